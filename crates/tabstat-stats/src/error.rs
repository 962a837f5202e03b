/// Errors returned by dataset construction and statistical queries.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum StatsError {
    /// The dataset document is not a mapping from column name to values.
    #[display("dataset must be a mapping from column name to a sequence of values")]
    NotAMapping,
    /// A column of the dataset document is not a sequence.
    #[display("column '{column}' must be a sequence of values")]
    NotASequence { column: String },
    /// A cell holds a value the engine cannot represent (null, nested array or object).
    #[display("column '{column}' holds an unsupported value at index {index}")]
    UnsupportedValue { column: String, index: usize },
    /// A column's length differs from the first column's length.
    #[display("column '{column}' has {actual} values, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
    /// The requested column does not exist in the dataset.
    #[display("column '{column}' does not exist in the dataset")]
    MissingColumn { column: String },
    /// A cell of a column used in arithmetic is not numeric.
    #[display("column '{column}' holds a non-numeric value at index {index}")]
    NonNumeric { column: String, index: usize },
    /// The frequency mode is neither `absolute` nor `relative`.
    #[display("frequency mode must be 'absolute' or 'relative', got '{mode}'")]
    InvalidMode { mode: String },
    /// The conditioning value never occurs at a position with a successor.
    #[display("conditioning value never occurs before the last position of column '{column}'")]
    NoConditioningEvent { column: String },
}

/// Coarse classification of [`StatsError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorKind {
    /// Malformed dataset at construction.
    #[display("type")]
    Type,
    /// Columns of unequal length.
    #[display("shape")]
    Shape,
    /// Referenced column is absent.
    #[display("missing column")]
    MissingColumn,
    /// Arithmetic requested over a non-numeric cell.
    #[display("non-numeric")]
    NonNumeric,
    /// Unrecognized frequency mode.
    #[display("invalid mode")]
    InvalidMode,
    /// Degenerate denominator.
    #[display("division")]
    Division,
}

impl StatsError {
    /// Returns the class of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabstat_stats::{ErrorKind, Statistics};
    ///
    /// let stats = Statistics::from_columns([("x", vec![1, 2])]).unwrap();
    /// let err = stats.mean("y").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::MissingColumn);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAMapping | Self::NotASequence { .. } | Self::UnsupportedValue { .. } => {
                ErrorKind::Type
            }
            Self::RaggedColumn { .. } => ErrorKind::Shape,
            Self::MissingColumn { .. } => ErrorKind::MissingColumn,
            Self::NonNumeric { .. } => ErrorKind::NonNumeric,
            Self::InvalidMode { .. } => ErrorKind::InvalidMode,
            Self::NoConditioningEvent { .. } => ErrorKind::Division,
        }
    }

    pub(crate) fn missing_column(column: &str) -> Self {
        Self::MissingColumn {
            column: column.to_owned(),
        }
    }
}
