use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinearError {
    #[error("Invalid interval [{from}, {to}], expected 0 <= from < to <= 1")]
    InvalidInterval { from: f64, to: f64 },
    #[error("A linear attribute requires at least one segment")]
    Empty,
    #[error("Segments do not partition [0, 1]: {0}")]
    NotPartition(String),
}
