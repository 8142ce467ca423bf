use std::sync::Arc;

use moka::future::Cache;
use pairwatch_core::{AlignedTable, SeriesId, StatsParams, StatsTable};
use pairwatch_types::CacheConfig;

/// Identity of an ordered pair: `a / b` and `b / a` are different entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PairKey {
    a: SeriesId,
    b: SeriesId,
}

impl PairKey {
    pub(crate) fn new(a: &SeriesId, b: &SeriesId) -> Self {
        Self {
            a: a.clone(),
            b: b.clone(),
        }
    }

    pub(crate) const fn a(&self) -> &SeriesId {
        &self.a
    }

    pub(crate) const fn b(&self) -> &SeriesId {
        &self.b
    }
}

/// Identity of one analysis: the pair, the exact aligned table it was computed
/// from, and the parameters.
///
/// `table` is the address of the shared `AlignedTable`. A cached `StatsTable` holds
/// its base table alive, so no other table can reuse the address while the entry
/// exists. Sessions opened before a refetch therefore never share entries with
/// sessions opened after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct AnalysisKey {
    pair: PairKey,
    table: usize,
    zscore_window: usize,
    rsi_period: usize,
}

impl AnalysisKey {
    pub(crate) fn new(pair: &PairKey, table: &Arc<AlignedTable>, params: StatsParams) -> Self {
        Self {
            pair: pair.clone(),
            table: Arc::as_ptr(table) as usize,
            zscore_window: params.zscore_window,
            rsi_period: params.rsi_period,
        }
    }
}

fn store<K, V>(cfg: &CacheConfig) -> Option<Cache<K, V>>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    if cfg.max_entries == 0 {
        return None;
    }
    let mut builder = Cache::builder().max_capacity(cfg.max_entries);
    if let Some(ttl) = cfg.ttl {
        builder = builder.time_to_live(ttl);
    }
    Some(builder.build())
}

// `None` means disabled (max_entries = 0).
#[derive(Clone)]
pub(crate) struct Caches {
    aligned: Option<Cache<PairKey, Arc<AlignedTable>>>,
    analyses: Option<Cache<AnalysisKey, Arc<StatsTable>>>,
}

impl Caches {
    pub(crate) fn new(cfg: &CacheConfig) -> Self {
        Self {
            aligned: store(cfg),
            analyses: store(cfg),
        }
    }

    pub(crate) async fn aligned(&self, key: &PairKey) -> Option<Arc<AlignedTable>> {
        self.aligned.as_ref()?.get(key).await
    }

    pub(crate) async fn put_aligned(&self, key: PairKey, table: Arc<AlignedTable>) {
        if let Some(c) = &self.aligned {
            c.insert(key, table).await;
        }
    }

    pub(crate) async fn analysis(&self, key: &AnalysisKey) -> Option<Arc<StatsTable>> {
        self.analyses.as_ref()?.get(key).await
    }

    pub(crate) async fn put_analysis(&self, key: AnalysisKey, table: Arc<StatsTable>) {
        if let Some(c) = &self.analyses {
            c.insert(key, table).await;
        }
    }

    pub(crate) fn clear(&self) {
        if let Some(c) = &self.aligned {
            c.invalidate_all();
        }
        if let Some(c) = &self.analyses {
            c.invalidate_all();
        }
    }
}
