//! Event stream integration tests
//!
//! Run with: cargo test -p integration-tests --test event_stream_tests

use std::collections::HashSet;

use chat_common::{AppError, Cancellation, CancellationSource};
use chat_core::{ChatDomainEvent, ChatEvent};
use chat_stream::{StreamError, StreamPosition};
use futures::StreamExt;
use integration_tests::{
    drain, entry_id, message, stays_pending, user_id, ChatFixture, TestContext,
    COMPLETION_TIMEOUT, SUSPENSION_WINDOW,
};

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_read_yields_publish_order_with_distinct_positions() {
    let ctx = TestContext::start().unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let stream = ctx.services.event_stream::<ChatDomainEvent>().unwrap();

    for id in 1..=10 {
        stream
            .publish(message(&chat.member.id, id), &Cancellation::none())
            .await
            .unwrap();
    }

    let items = drain(&stream, 10).await.unwrap();
    let ids: Vec<_> = items.iter().filter_map(|(e, _)| entry_id(e)).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    let positions: HashSet<_> = items.iter().map(|(_, p)| p.clone()).collect();
    assert_eq!(positions.len(), 10);
    assert!(items.iter().all(|(e, _)| e.chat_id() == &chat.chat_id));
}

#[tokio::test]
async fn test_mixed_event_kinds_keep_order() {
    let ctx = TestContext::start().unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let stream = ctx.services.event_stream::<ChatDomainEvent>().unwrap();
    let none = Cancellation::none();

    let claimed = ctx
        .directory
        .claim(&chat.anonymous.id, user_id("late-signup"))
        .unwrap();

    stream
        .publish(ChatDomainEvent::author_joined(chat.anonymous.id.clone()), &none)
        .await
        .unwrap();
    stream.publish(message(&chat.anonymous.id, 1), &none).await.unwrap();
    stream
        .publish(
            ChatDomainEvent::author_claimed(claimed.id.clone(), claimed.user_id.clone().unwrap()),
            &none,
        )
        .await
        .unwrap();
    stream
        .publish(ChatDomainEvent::author_left(claimed.id.clone()), &none)
        .await
        .unwrap();

    let kinds: Vec<_> = drain(&stream, 4)
        .await
        .unwrap()
        .iter()
        .map(|(e, _)| e.event_type())
        .collect();
    assert_eq!(
        kinds,
        vec!["AUTHOR_JOINED", "MESSAGE_POSTED", "AUTHOR_CLAIMED", "AUTHOR_LEFT"]
    );
}

#[tokio::test]
async fn test_resume_position_round_trips_as_string() {
    let ctx = TestContext::start().unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let stream = ctx.services.event_stream::<ChatDomainEvent>().unwrap();
    let none = Cancellation::none();

    stream.publish(message(&chat.member.id, 1), &none).await.unwrap();
    stream.publish(message(&chat.member.id, 2), &none).await.unwrap();

    let (_, position) = drain(&stream, 1).await.unwrap().remove(0);

    // Persist and restore the position between calls
    let stored = serde_json::to_string(&position).unwrap();
    let restored: StreamPosition = serde_json::from_str(&stored).unwrap();
    assert_eq!(restored, position);

    let mut events = Box::pin(stream.read(restored, none));
    let (event, next) = events.next().await.unwrap().unwrap();
    assert_eq!(entry_id(&event), Some(2));
    assert_ne!(next, position);
}

// ============================================================================
// Backpressure
// ============================================================================

#[tokio::test]
async fn test_backpressure_with_configured_capacity() {
    let ctx = TestContext::start_with(&[("EVENT_STREAM_CAPACITY", "3")]).unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let stream = ctx.services.event_stream::<ChatDomainEvent>().unwrap();
    assert_eq!(stream.capacity(), 3);

    for id in 1..=3 {
        stream
            .publish(message(&chat.member.id, id), &Cancellation::none())
            .await
            .unwrap();
    }

    // The (C+1)-th publish stays suspended while nothing is read
    let source = CancellationSource::new();
    let producer = stream.clone();
    let author = chat.member.id.clone();
    let token = source.token();
    let pending =
        tokio::spawn(async move { producer.publish(message(&author, 4), &token).await });

    tokio::time::sleep(SUSPENSION_WINDOW).await;
    assert!(!pending.is_finished());
    assert_eq!(stream.len(), 3);

    source.cancel();
    let result = tokio::time::timeout(COMPLETION_TIMEOUT, pending)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result, Err(StreamError::Cancelled));
    assert_eq!(stream.len(), 3);

    let ids: Vec<_> = drain(&stream, 3)
        .await
        .unwrap()
        .iter()
        .filter_map(|(e, _)| entry_id(e))
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_reading_releases_suspended_publisher() {
    let ctx = TestContext::start_with(&[("EVENT_STREAM_CAPACITY", "1")]).unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let stream = ctx.services.event_stream::<ChatDomainEvent>().unwrap();
    let none = Cancellation::none();

    stream.publish(message(&chat.member.id, 1), &none).await.unwrap();
    assert!(stays_pending(stream.publish(message(&chat.member.id, 2), &none)).await);

    let producer = stream.clone();
    let author = chat.member.id.clone();
    let pending = tokio::spawn(async move {
        producer
            .publish(message(&author, 2), &Cancellation::none())
            .await
    });

    let first = drain(&stream, 1).await.unwrap();
    assert_eq!(entry_id(&first[0].0), Some(1));

    tokio::time::timeout(COMPLETION_TIMEOUT, pending)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let second = drain(&stream, 1).await.unwrap();
    assert_eq!(entry_id(&second[0].0), Some(2));
}

// ============================================================================
// Cancellation and disposal
// ============================================================================

#[tokio::test]
async fn test_cancelling_read_does_not_consume() {
    let ctx = TestContext::start().unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let stream = ctx.services.event_stream::<ChatDomainEvent>().unwrap();

    stream
        .publish(message(&chat.member.id, 1), &Cancellation::none())
        .await
        .unwrap();

    let source = CancellationSource::new();
    source.cancel();
    let items: Vec<_> = stream
        .read(StreamPosition::start(), source.token())
        .collect()
        .await;
    assert!(items.is_empty());
    assert_eq!(stream.len(), 1);

    let items = drain(&stream, 1).await.unwrap();
    assert_eq!(entry_id(&items[0].0), Some(1));
}

#[tokio::test]
async fn test_disposed_stream_reports_closed() {
    let ctx = TestContext::start().unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let stream = ctx.services.event_stream::<ChatDomainEvent>().unwrap();

    stream.dispose();
    let err = stream
        .publish(message(&chat.member.id, 1), &Cancellation::none())
        .await
        .unwrap_err();
    assert_eq!(err, StreamError::Disposed);

    let app_err = AppError::from(err);
    assert_eq!(app_err.error_code(), "STREAM_CLOSED");
    assert!(drain(&stream, 1).await.is_err());
}
