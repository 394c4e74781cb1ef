use crate::error::ServiceError;
use crate::params::QueryParams;

/// Result of one query. Success and failure are explicit, never inferred
/// from the shape of the returned number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Success(i64),
    Failure(String),
}

/// The external randomness provider.
///
/// Both calls block; the request worker runs them off the UI thread.
pub trait RandomnessService: Send + Sync {
    /// Block until the service can answer queries.
    fn wait_for_ready(&self) -> Result<(), ServiceError>;

    /// Produce one value in `[low, high]`, taking a while that depends on
    /// `certainty` and `delay`.
    fn query(&self, params: QueryParams) -> QueryOutcome;
}
