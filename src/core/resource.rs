//! Tri-state result for a single network call: loading, success, or
//! error-with-message. One per logical operation; a superseding call
//! simply replaces the state, last-to-complete wins.

use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Resource<T> {
    /// Folds a finished call into the state machine. Only the display
    /// message of an error survives; callers never retry automatically.
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Resource::Success(value),
            Err(err) => Resource::Error(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn success(self) -> Option<T> {
        match self {
            Resource::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Resource::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NO_INTERNET_CONNECTION;

    #[test]
    fn ok_results_become_success() {
        let state = Resource::from_result(Ok(7));
        assert_eq!(state, Resource::Success(7));
        assert!(!state.is_loading());
        assert_eq!(state.success(), Some(7));
    }

    #[test]
    fn connection_failures_carry_the_fixed_message() {
        let state: Resource<()> = Resource::from_result(Err(ApiError::NoConnection));
        assert_eq!(state.error_message(), Some(NO_INTERNET_CONNECTION));
    }

    #[test]
    fn status_failures_carry_the_reason_phrase() {
        let state: Resource<()> =
            Resource::from_result(Err(ApiError::Status(reqwest::StatusCode::NOT_FOUND)));
        assert_eq!(state.error_message(), Some("Not Found"));
    }
}
