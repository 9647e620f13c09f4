use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("column `{name}` not found; available: {}", available.join(", "))]
    MissingColumn { name: String, available: Vec<String> },

    #[error("{role} column index {index} is out of range; the csv has {column_count} columns")]
    ColumnIndexOutOfRange {
        role: &'static str,
        index: usize,
        column_count: usize,
    },

    #[error("no column qualifies as the {0} column")]
    MissingRole(&'static str),

    #[error("total value of data is zero; cannot normalize slice angles")]
    ZeroTotal,

    #[error("no valid rows left to build geometry from")]
    NoValidRows,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Schema errors abort a run before any geometry is computed.
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::Csv(_)
                | Self::MissingColumn { .. }
                | Self::ColumnIndexOutOfRange { .. }
                | Self::MissingRole(_)
        )
    }

    /// Aggregate errors are raised after every row was inspected.
    #[must_use]
    pub fn is_aggregate_error(&self) -> bool {
        matches!(self, Self::ZeroTotal | Self::NoValidRows)
    }
}
