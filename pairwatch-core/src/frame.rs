use polars::prelude::{Column, DataFrame, PolarsResult};

use crate::{AlignedTable, StatsRow};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Conversion of pairwatch tables into a `polars` [`DataFrame`].
///
/// Dates are rendered as `YYYY-MM-DD` strings; missing values become nulls.
pub trait ToDataFrame {
    /// Build a data frame with one column per named field.
    ///
    /// # Errors
    /// Propagates any `polars` construction error.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

impl ToDataFrame for AlignedTable {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let rows = self.rows();
        let dates: Vec<String> = rows
            .iter()
            .map(|r| r.date.format(DATE_FORMAT).to_string())
            .collect();
        DataFrame::new(vec![
            Column::new("Date".into(), dates),
            Column::new(
                "ValueA".into(),
                rows.iter().map(|r| r.value_a).collect::<Vec<_>>(),
            ),
            Column::new(
                "ValueB".into(),
                rows.iter().map(|r| r.value_b).collect::<Vec<_>>(),
            ),
            Column::new(
                "Ratio".into(),
                rows.iter().map(|r| r.ratio).collect::<Vec<_>>(),
            ),
        ])
    }
}

impl ToDataFrame for [StatsRow] {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = self
            .iter()
            .map(|r| r.date.format(DATE_FORMAT).to_string())
            .collect();
        DataFrame::new(vec![
            Column::new("Date".into(), dates),
            Column::new("ValueA".into(), self.iter().map(|r| r.value_a).collect::<Vec<_>>()),
            Column::new("ValueB".into(), self.iter().map(|r| r.value_b).collect::<Vec<_>>()),
            Column::new("Ratio".into(), self.iter().map(|r| r.ratio).collect::<Vec<_>>()),
            Column::new("ZScore".into(), self.iter().map(|r| r.zscore).collect::<Vec<_>>()),
            Column::new("RSI".into(), self.iter().map(|r| r.rsi).collect::<Vec<_>>()),
        ])
    }
}
