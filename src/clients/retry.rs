//! Retry decisions for failed attempts.
//!
//! Only two conditions are retryable: a 429 (after the server-dictated
//! `Retry-After`) and a 503 (immediately). Everything else fails the call.
//! The remaining budget counts attempts, including the one that just failed,
//! so a budget of 0 or 1 never retries.

use std::time::Duration;

use reqwest::StatusCode;

use crate::clients::response_error::ResponseError;

/// What the engine does after a failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given duration, then attempt again.
    RetryAfter(Duration),
    /// Attempt again without waiting.
    RetryNow,
    /// Surface the error to the caller.
    GiveUp,
}

/// Decides whether a failed attempt is retried.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use shopify_rest::{retry_decision, ResponseError, RetryDecision};
///
/// let throttled = ResponseError::RateLimited {
///     status: 429,
///     message: String::new(),
///     errors: vec![],
///     retry_after_seconds: 1.5,
/// };
/// assert_eq!(
///     retry_decision(&throttled, 3),
///     RetryDecision::RetryAfter(Duration::from_millis(1500))
/// );
/// assert_eq!(retry_decision(&throttled, 1), RetryDecision::GiveUp);
/// ```
#[must_use]
pub fn retry_decision(error: &ResponseError, remaining: u32) -> RetryDecision {
    if remaining <= 1 {
        return RetryDecision::GiveUp;
    }
    if let Some(seconds) = error.retry_after_seconds() {
        return RetryDecision::RetryAfter(backoff(seconds));
    }
    if error.status() == StatusCode::SERVICE_UNAVAILABLE.as_u16() {
        return RetryDecision::RetryNow;
    }
    RetryDecision::GiveUp
}

fn backoff(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(status: u16) -> ResponseError {
        ResponseError::Generic {
            status,
            message: String::new(),
            errors: vec![],
        }
    }

    fn rate_limited(retry_after_seconds: f64) -> ResponseError {
        ResponseError::RateLimited {
            status: 429,
            message: String::new(),
            errors: vec![],
            retry_after_seconds,
        }
    }

    #[test]
    fn test_exhausted_budget_gives_up() {
        for remaining in [0, 1] {
            assert_eq!(retry_decision(&rate_limited(1.0), remaining), RetryDecision::GiveUp);
            assert_eq!(retry_decision(&generic(503), remaining), RetryDecision::GiveUp);
        }
    }

    #[test]
    fn test_rate_limited_sleeps_fractional_seconds() {
        assert_eq!(
            retry_decision(&rate_limited(0.25), 2),
            RetryDecision::RetryAfter(Duration::from_millis(250))
        );
        assert_eq!(
            retry_decision(&rate_limited(0.0), 2),
            RetryDecision::RetryAfter(Duration::ZERO)
        );
    }

    #[test]
    fn test_service_unavailable_retries_immediately() {
        assert_eq!(retry_decision(&generic(503), 3), RetryDecision::RetryNow);

        let undecodable = ResponseError::DecodingFailed {
            status: 503,
            body: b"<html>".to_vec(),
            message: "expected value".to_string(),
        };
        assert_eq!(retry_decision(&undecodable, 3), RetryDecision::RetryNow);
    }

    #[test]
    fn test_other_statuses_are_not_retried() {
        for status in [400, 401, 404, 406, 422, 500, 502] {
            assert_eq!(retry_decision(&generic(status), 5), RetryDecision::GiveUp);
        }
    }

    #[test]
    fn test_backoff_clamps_invalid_durations() {
        assert_eq!(backoff(-1.0), Duration::ZERO);
        assert_eq!(backoff(f64::NAN), Duration::ZERO);
    }
}
