/*!
 * Tests for the retry policy and backoff combinator
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mdzh::errors::{AppError, ProviderError, TranslationError};
use mdzh::retry::{BackoffPolicy, MAX_RETRY_CAP, retry_with_backoff};

fn transient_error() -> ProviderError {
    ProviderError::ApiError {
        status_code: 503,
        message: "overloaded".to_string(),
    }
}

fn fatal_error() -> ProviderError {
    ProviderError::AuthenticationError("bad key".to_string())
}

#[test]
fn test_policy_withRetriesOverCap_shouldFailImmediately() {
    let result = BackoffPolicy::exponential(Duration::from_millis(1), 2.0, false, MAX_RETRY_CAP + 1);
    assert!(matches!(result, Err(AppError::Config(_))));

    let result = BackoffPolicy::constant(Duration::from_millis(1), true, 11);
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_policy_withRetriesAtCap_shouldSucceed() {
    let policy = BackoffPolicy::exponential(Duration::from_millis(1), 2.0, false, MAX_RETRY_CAP);
    assert_eq!(policy.unwrap().max_retries(), MAX_RETRY_CAP);
}

#[test]
fn test_delay_withExponentialBackoff_shouldGrowPerAttempt() {
    let policy = BackoffPolicy::exponential(Duration::from_millis(100), 2.0, false, 3).unwrap();

    assert_eq!(policy.delay_for(1), Duration::from_millis(200));
    assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    assert_eq!(policy.delay_for(3), Duration::from_millis(800));
}

#[test]
fn test_delay_withConstantBackoff_shouldStayFlat() {
    let policy = BackoffPolicy::constant(Duration::from_millis(100), false, 3).unwrap();

    assert_eq!(policy.delay_for(1), Duration::from_millis(100));
    assert_eq!(policy.delay_for(5), Duration::from_millis(100));
}

#[test]
fn test_delay_withJitter_shouldStayWithinOneToTwoTimesBase() {
    let policy = BackoffPolicy::constant(Duration::from_millis(100), true, 3).unwrap();

    for _ in 0..100 {
        let delay = policy.delay_for(1);
        assert!(delay >= Duration::from_millis(100), "delay {delay:?} below base");
        assert!(delay < Duration::from_millis(200), "delay {delay:?} at or above 2x base");
    }
}

#[tokio::test]
async fn test_retry_withImmediateSuccess_shouldCallOnce() {
    let policy = BackoffPolicy::constant(Duration::from_millis(1), false, 3).unwrap();
    let attempts = Arc::new(AtomicUsize::new(0));

    let counter = attempts.clone();
    let result: Result<i32, _> = retry_with_backoff(&policy, || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(42)
        }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retry_withTransientThenSuccess_shouldRecover() {
    let policy = BackoffPolicy::constant(Duration::from_millis(1), false, 3).unwrap();
    let attempts = Arc::new(AtomicUsize::new(0));

    let counter = attempts.clone();
    let result = retry_with_backoff(&policy, || {
        let counter = counter.clone();
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(transient_error())
            } else {
                Ok("done".to_string())
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_withPersistentTransientError_shouldExhaustRetries() {
    let policy = BackoffPolicy::constant(Duration::from_millis(1), false, 2).unwrap();
    let attempts = Arc::new(AtomicUsize::new(0));

    let counter = attempts.clone();
    let result: Result<(), _> = retry_with_backoff(&policy, || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(transient_error())
        }
    })
    .await;

    // Initial attempt plus two retries
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    match result {
        Err(TranslationError::RetriesExhausted {
            max_retries,
            last_error,
        }) => {
            assert_eq!(max_retries, 2);
            assert!(matches!(
                last_error,
                ProviderError::ApiError { status_code: 503, .. }
            ));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_withFatalError_shouldNotRetry() {
    let policy = BackoffPolicy::constant(Duration::from_millis(50), false, 5).unwrap();
    let attempts = Arc::new(AtomicUsize::new(0));

    let started = std::time::Instant::now();
    let counter = attempts.clone();
    let result: Result<(), _> = retry_with_backoff(&policy, || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(fatal_error())
        }
    })
    .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    // No backoff sleep happened on the fatal path
    assert!(started.elapsed() < Duration::from_millis(50));
    assert!(matches!(
        result,
        Err(TranslationError::Provider(ProviderError::AuthenticationError(_)))
    ));
}

#[test]
fn test_transience_classification_shouldMatchErrorKinds() {
    assert!(transient_error().is_transient());
    assert!(ProviderError::ConnectionError("refused".to_string()).is_transient());
    assert!(ProviderError::RateLimitExceeded("slow down".to_string()).is_transient());
    assert!(ProviderError::RequestFailed("reset".to_string()).is_transient());
    assert!(
        ProviderError::ApiError {
            status_code: 429,
            message: "too many".to_string()
        }
        .is_transient()
    );

    assert!(!fatal_error().is_transient());
    assert!(!ProviderError::ParseError("bad json".to_string()).is_transient());
    assert!(
        !ProviderError::ApiError {
            status_code: 400,
            message: "bad request".to_string()
        }
        .is_transient()
    );
}
