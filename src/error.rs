//! Library error types.

/// Errors surfaced by the report API. Platform queries never fail; they fall
/// back to documented defaults instead.
#[derive(Debug, thiserror::Error)]
pub enum SysinfoError {
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
}
