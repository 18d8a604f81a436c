//! Configuration and wiring integration tests
//!
//! Run with: cargo test -p integration-tests --test config_tests

use chat_common::AppError;
use chat_core::ChatDomainEvent;
use integration_tests::{test_config, TestContext};

#[test]
fn test_defaults() {
    let ctx = TestContext::start().unwrap();
    assert_eq!(ctx.config.app.name, "chat-events");
    assert_eq!(ctx.config.stream.capacity, 1000);
    assert_eq!(ctx.services.stream_config().capacity, 1000);
}

#[test]
fn test_invalid_capacity_is_a_config_error() {
    let err = chat_common::AppConfig::from_lookup(|key| {
        (key == "EVENT_STREAM_CAPACITY").then(|| "0".to_string())
    })
    .unwrap_err();

    let app_err = AppError::from(err);
    assert_eq!(app_err.error_code(), "CONFIG_ERROR");
    assert!(test_config(&[("EVENT_STREAM_CAPACITY", "-1")]).is_err());
}

#[test]
fn test_oversized_capacity_fails_at_startup() {
    assert!(test_config(&[("EVENT_STREAM_CAPACITY", "2000000")]).is_err());
    assert!(TestContext::start_with(&[("EVENT_STREAM_CAPACITY", "2000000")]).is_err());

    let max = chat_stream::MAX_CAPACITY.to_string();
    let ctx = TestContext::start_with(&[("EVENT_STREAM_CAPACITY", &max)]).unwrap();
    assert_eq!(ctx.services.stream_config().capacity, chat_stream::MAX_CAPACITY);
}

#[test]
fn test_production_logs_as_json() {
    let config = test_config(&[("APP_ENV", "production")]).unwrap();
    let tracing = config.tracing_config();
    assert!(tracing.json);
    assert!(!tracing.file_line);
}

#[test]
fn test_streams_from_one_context_are_independent() {
    let ctx = TestContext::start_with(&[("EVENT_STREAM_CAPACITY", "2")]).unwrap();
    let a = ctx.services.event_stream::<ChatDomainEvent>().unwrap();
    let b = ctx.services.event_stream::<ChatDomainEvent>().unwrap();

    a.dispose();
    assert!(a.is_disposed());
    assert!(!b.is_disposed());
    assert_eq!(b.capacity(), 2);
}
