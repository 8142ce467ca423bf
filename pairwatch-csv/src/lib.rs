//! pairwatch-csv
//!
//! Series source backed by a local folder of daily history exports, one file per
//! instrument named `<ID>_historical_data.csv`. Each file needs a header row with
//! `Date` and `Close` columns; any other columns are ignored.
#![warn(missing_docs)]

/// Parsing of `Date,Close` history files.
pub mod parse;

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use pairwatch_core::{PairwatchError, Series, SeriesId, SeriesSource, SourceKey};

pub use parse::parse_series;

/// Source reading `<root>/<ID><suffix>` files.
#[derive(Debug, Clone)]
pub struct CsvSource {
    root: PathBuf,
    suffix: String,
}

impl CsvSource {
    /// Static source key for logs and priority configuration.
    pub const KEY: SourceKey = SourceKey::new("pairwatch-csv");

    /// File name suffix appended to identifiers by default.
    pub const DEFAULT_SUFFIX: &'static str = "_historical_data.csv";

    /// Create a source rooted at `root` using [`DEFAULT_SUFFIX`](Self::DEFAULT_SUFFIX).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            suffix: Self::DEFAULT_SUFFIX.to_string(),
        }
    }

    /// Override the file name suffix, e.g. `".csv"`.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Folder the source reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the file path for `id`.
    ///
    /// # Errors
    /// Returns `PairwatchError::NotFound` for blank identifiers and identifiers that
    /// would escape the root folder.
    pub fn path_for(&self, id: &SeriesId) -> Result<PathBuf, PairwatchError> {
        let file_name = format!("{}{}", id.as_str(), self.suffix);
        let mut components = Path::new(&file_name).components();
        let is_plain_file = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if id.is_empty() || !is_plain_file {
            return Err(PairwatchError::not_found(format!(
                "series for {id} (invalid identifier)"
            )));
        }
        Ok(self.root.join(file_name))
    }

    fn normalize_io_error(e: &io::Error, id: &SeriesId) -> PairwatchError {
        match e.kind() {
            io::ErrorKind::NotFound => PairwatchError::not_found(format!("series for {id}")),
            _ => PairwatchError::transient_io(Self::KEY.as_str(), format!("{id}: {e}")),
        }
    }
}

#[async_trait]
impl SeriesSource for CsvSource {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    async fn fetch_series(&self, id: &SeriesId) -> Result<Series, PairwatchError> {
        let path = self.path_for(id)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| Self::normalize_io_error(&e, id))?;
        let series = parse_series(id.clone(), bytes.as_slice())?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            id = %id,
            path = %path.display(),
            rows = series.len(),
            span = ?series.date_span(),
            "loaded series from csv"
        );
        Ok(series)
    }
}
