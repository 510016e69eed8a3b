use thiserror::Error;

/// The two failure kinds this layer distinguishes: a lookup/mutation that
/// touched zero rows, and everything else the store or transport reports.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("payment not found")]
    NotFound,

    /// Store-side rejection, malformed input, or transport failure.
    /// The message is surfaced to the caller verbatim.
    #[error("{0}")]
    Client(String),
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::Client(err.to_string())
    }
}
