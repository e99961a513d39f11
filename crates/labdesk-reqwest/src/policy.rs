//! Per-endpoint failure handling.

use labdesk_core::Result;

use crate::TRACING_TARGET;

/// What an endpoint does when its request fails.
///
/// Read endpoints use [`FetchPolicy::EmptyDefault`]. Write and compute
/// endpoints use [`FetchPolicy::Propagate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Log the failure and substitute the type's default (an empty list).
    EmptyDefault,
    /// Log the failure and return it to the caller.
    #[default]
    Propagate,
}

impl FetchPolicy {
    /// Returns whether failures are swallowed under this policy.
    pub const fn swallows_errors(self) -> bool {
        matches!(self, Self::EmptyDefault)
    }

    /// Turns the outcome of `operation` into the value handed to the caller.
    ///
    /// Every failure is logged exactly once here: at `warn` when it is
    /// swallowed, at `error` when it is propagated.
    ///
    /// # Errors
    ///
    /// Under [`FetchPolicy::Propagate`], returns the error unchanged.
    pub fn resolve<T: Default>(self, operation: &str, result: Result<T>) -> Result<T> {
        let error = match result {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        match self {
            Self::EmptyDefault => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    operation,
                    kind = error.kind_str(),
                    status = error.status(),
                    error = %error,
                    "Request failed, returning empty result"
                );
                Ok(T::default())
            }
            Self::Propagate => {
                tracing::error!(
                    target: TRACING_TARGET,
                    operation,
                    kind = error.kind_str(),
                    status = error.status(),
                    error = %error,
                    "Request failed"
                );
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use labdesk_core::{Error, ErrorKind};

    use super::*;

    #[test]
    fn test_success_passes_through() {
        let value = FetchPolicy::EmptyDefault.resolve("GET /equipment", Ok(vec![1, 2]));
        assert_eq!(value.unwrap(), vec![1, 2]);

        let value = FetchPolicy::Propagate.resolve("POST /analysis", Ok(vec![3]));
        assert_eq!(value.unwrap(), vec![3]);
    }

    #[test]
    fn test_empty_default_swallows_errors() {
        let value: Result<Vec<u8>> =
            FetchPolicy::EmptyDefault.resolve("GET /equipment", Err(Error::request_failed(503)));
        assert!(value.unwrap().is_empty());
        assert!(FetchPolicy::EmptyDefault.swallows_errors());
    }

    #[test]
    fn test_propagate_returns_error() {
        let value: Result<Vec<u8>> =
            FetchPolicy::Propagate.resolve("POST /experiments", Err(Error::request_failed(404)));
        let error = value.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::RequestFailed);
        assert_eq!(error.status(), Some(404));
        assert!(!FetchPolicy::default().swallows_errors());
    }
}
