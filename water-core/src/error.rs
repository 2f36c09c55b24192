use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A range was requested by a name that is not in the table.
    #[error("unknown range key '{0}'")]
    UnknownRangeKey(String),
    #[error("reading '{field}' is not a finite number (got {value})")]
    NonFiniteReading { field: &'static str, value: f64 },
}
