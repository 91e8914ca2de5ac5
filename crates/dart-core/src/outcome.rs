//! Per-call outcome classification.
//!
//! Every outbound OpenDART call is classified into an [`ApiOutcome`] before
//! any cascade logic sees it, so branch conditions on "did this step
//! produce data" are exhaustive matches instead of string comparisons.

/// The classified result of one outbound service call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    /// The service reported success and the payload parsed.
    Success(T),
    /// The service answered with a well-formed non-success status.
    Rejected {
        /// Service status code (e.g. "013" for no data).
        code: String,
        /// Human-readable message from the service.
        message: String,
    },
    /// The call failed below the application layer (connect, timeout,
    /// non-2xx, undecodable body).
    Transport(String),
}

impl<T> ApiOutcome<T> {
    /// Returns true for [`ApiOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Converts the outcome into an `Option`, discarding failure detail.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// Maps the success payload, leaving failures untouched.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Success(payload) => ApiOutcome::Success(f(payload)),
            Self::Rejected { code, message } => ApiOutcome::Rejected { code, message },
            Self::Transport(reason) => ApiOutcome::Transport(reason),
        }
    }
}
