//! Error type for frame allocation and access.

use thiserror::Error;

use crate::dtype::ScalarType;

/// Errors raised while building or validating a frame.
///
/// Allocation either succeeds completely or returns one of these before any
/// frame is handed out; there is no partially-built state to clean up.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FrameError {
    /// An index type was requested without a name for it.
    #[error("an index of type {index_type} requires an index name")]
    MissingIndexName {
        /// The requested index type.
        index_type: ScalarType,
    },
    /// A type string contained a code the parser does not know.
    #[error("unknown type code '{code}' at position {position}")]
    UnknownTypeCode {
        /// The offending code, trimmed.
        code: String,
        /// Zero-based position within the type list.
        position: usize,
    },
    /// Column names and type codes do not pair up.
    #[error("{types} column types but {columns} column names")]
    ColumnCountMismatch {
        /// Number of type tags.
        types: usize,
        /// Number of column names.
        columns: usize,
    },
    /// Two columns (or a column and a view key) share a name.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn {
        /// The repeated name.
        name: String,
    },
    /// A categorical code does not address any category.
    #[error("code {code} at row {row} of column '{column}' is out of range for {categories} categories")]
    CodeOutOfRange {
        /// Column holding the code.
        column: String,
        /// Row of the code.
        row: usize,
        /// The code value.
        code: u64,
        /// Number of categories in the column.
        categories: usize,
    },
    /// A checked code write addressed a row past the end of the column.
    #[error("row {row} is out of bounds for column '{column}' of {rows} rows")]
    RowOutOfBounds {
        /// Column being written.
        column: String,
        /// First row past the end.
        row: usize,
        /// Rows in the column.
        rows: usize,
    },
    /// Labels were installed on a column that is missing or not categorical.
    #[error("column '{column}' is not a categorical column")]
    NotCategorical {
        /// The column name.
        column: String,
    },
    /// A new label table needs wider codes than the column was allocated with.
    #[error("{categories} categories for column '{column}' exceed the {max} its code array can address")]
    CategoryWidthExceeded {
        /// The column name.
        column: String,
        /// Size of the rejected label table.
        categories: usize,
        /// Most categories the allocated code width can address.
        max: usize,
    },
    /// The requested frame is too large to address.
    #[error("frame of {rows} rows × {columns} columns overflows usize")]
    CapacityOverflow {
        /// Requested row count.
        rows: usize,
        /// Columns in the group being allocated.
        columns: usize,
    },
    /// The allocator configuration is unusable.
    #[error("invalid frame configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with it.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::TimeUnit;

    #[test]
    fn missing_index_name_message_names_the_type() {
        let err = FrameError::MissingIndexName {
            index_type: ScalarType::DateTime(TimeUnit::Nanosecond),
        };
        assert_eq!(
            err.to_string(),
            "an index of type M8[ns] requires an index name"
        );
    }

    #[test]
    fn code_out_of_range_message() {
        let err = FrameError::CodeOutOfRange {
            column: "c".into(),
            row: 3,
            code: 9,
            categories: 2,
        };
        assert_eq!(
            err.to_string(),
            "code 9 at row 3 of column 'c' is out of range for 2 categories"
        );
    }

    #[test]
    fn row_out_of_bounds_message() {
        let err = FrameError::RowOutOfBounds {
            column: "c".into(),
            row: 2,
            rows: 2,
        };
        assert_eq!(
            err.to_string(),
            "row 2 is out of bounds for column 'c' of 2 rows"
        );
    }
}
