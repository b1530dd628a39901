use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A present cell that must be a whole number is not one.
    #[error("row {row}: cannot convert {field} value '{value}' to an integer")]
    TypeConversion {
        field: &'static str,
        row: usize,
        value: String,
    },

    /// Nothing survived cleaning.
    #[error(
        "all {rows} rows were dropped ({missing_year} without enrollment year, \
         {missing_age} without age, {negative_age} with negative age)"
    )]
    AllRowsDropped {
        rows: usize,
        missing_year: usize,
        missing_age: usize,
        negative_age: usize,
    },
}
