//! Principal and mention resolution integration tests
//!
//! Run with: cargo test -p integration-tests --test identity_tests

use chat_common::Cancellation;
use chat_core::{ChatPrincipalId, PrincipalKind};
use integration_tests::{chat_id, user_id, ChatFixture, TestContext};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_user_principal_round_trip() {
    let principal = ChatPrincipalId::User(user_id("u1"));
    let parsed = ChatPrincipalId::parse(&principal.to_string());

    assert_eq!(parsed.kind(), PrincipalKind::User);
    assert_eq!(parsed.user_id().map(|u| u.as_str()), Some("u1"));
}

#[test]
fn test_author_principal_round_trip() {
    let author_id = chat_core::AuthorId::new(chat_id("c1"), 5);
    let parsed = ChatPrincipalId::parse(&ChatPrincipalId::Author(author_id).to_string());

    assert_eq!(parsed.kind(), PrincipalKind::Author);
    assert_eq!(parsed.chat_id().map(|c| c.as_str()), Some("c1"));
    assert_eq!(parsed.author_id().map(chat_core::AuthorId::local_id), Some(5));
}

#[test]
fn test_malformed_principals_are_invalid() {
    for raw in ["", "c1:", "c1:five", "bad chat:1", ":3"] {
        let parsed = ChatPrincipalId::parse(raw);
        assert_eq!(parsed.kind(), PrincipalKind::Invalid, "{raw:?}");
        assert!(!parsed.is_valid());
    }
}

// ============================================================================
// Account resolution
// ============================================================================

#[tokio::test]
async fn test_resolution_across_principal_kinds() {
    let ctx = TestContext::start().unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let resolver = ctx.services.principal_resolver();
    let none = Cancellation::none();

    let linked = resolver
        .resolve_account_id(&chat.member.principal_id(), &none)
        .await
        .unwrap();
    assert_eq!(linked.as_ref(), Some(chat.member_user_id()));

    // Lookup succeeds, but nobody has claimed the author
    let unlinked = resolver
        .resolve_account_id(&chat.anonymous.principal_id(), &none)
        .await
        .unwrap();
    assert!(unlinked.is_none());

    let lookups = ctx.directory.lookup_count();
    let invalid = resolver
        .resolve_account_id(&ChatPrincipalId::parse("c1:nope"), &none)
        .await
        .unwrap();
    assert!(invalid.is_none());
    assert_eq!(ctx.directory.lookup_count(), lookups);
}

#[tokio::test]
async fn test_claimed_author_resolves_after_claim() {
    let ctx = TestContext::start().unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let resolver = ctx.services.principal_resolver();
    let none = Cancellation::none();

    let principal = chat.anonymous.principal_id();
    assert!(resolver.resolve_account_id(&principal, &none).await.unwrap().is_none());

    ctx.directory
        .claim(&chat.anonymous.id, user_id("newcomer"))
        .unwrap();
    assert_eq!(
        resolver.resolve_account_id(&principal, &none).await.unwrap(),
        Some(user_id("newcomer"))
    );
}

#[tokio::test]
async fn test_raw_and_structured_forms_differ_for_unstructured_ids() {
    let ctx = TestContext::start().unwrap();
    let resolver = ctx.services.principal_resolver();
    let none = Cancellation::none();
    let raw = "legacy:id";

    let structured = resolver
        .resolve_account_id(&ChatPrincipalId::parse(raw), &none)
        .await
        .unwrap();
    let fallback = resolver.resolve_raw_account_id(raw, &none).await.unwrap();

    assert!(structured.is_none());
    assert_eq!(fallback, Some(user_id(raw)));
    assert!(resolver.resolve_raw_account_id("", &none).await.unwrap().is_none());
}

// ============================================================================
// Mentions
// ============================================================================

#[tokio::test]
async fn test_mention_resolvers_never_cross_chats() {
    let ctx = TestContext::start().unwrap();
    let first = ChatFixture::create(&ctx.directory);
    let second = ChatFixture::create(&ctx.directory);
    let factory = ctx.services.mention_resolvers();
    let none = Cancellation::none();

    let in_first = factory.create(first.chat_id.clone());
    let in_second = factory.create(second.chat_id.clone());

    // Same local id, different chats
    assert_eq!(first.member.id.local_id(), second.member.id.local_id());

    let own = in_first
        .resolve(&first.member.principal_id(), &none)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(own.author.map(|a| a.id), Some(first.member.id.clone()));

    let lookups = ctx.directory.lookup_count();
    assert!(in_first
        .resolve(&second.member.principal_id(), &none)
        .await
        .unwrap()
        .is_none());
    assert!(in_second
        .resolve(&first.member.principal_id(), &none)
        .await
        .unwrap()
        .is_none());
    assert_eq!(ctx.directory.lookup_count(), lookups);
}

#[tokio::test]
async fn test_resolve_mentions_in_message_text() {
    let ctx = TestContext::start().unwrap();
    let chat = ChatFixture::create(&ctx.directory);
    let other = ChatFixture::create(&ctx.directory);
    let resolver = ctx.services.mention_resolvers().create(chat.chat_id.clone());

    let text = format!(
        "@[{}] meet @[{}], not @[{}] or @[]",
        chat.anonymous.id,
        chat.member_user_id(),
        other.member.id
    );
    let mentions = resolver
        .resolve_text(&text, &Cancellation::none())
        .await
        .unwrap();

    assert_eq!(mentions.len(), 2);
    assert_eq!(mentions[0].author.as_ref().map(|a| &a.id), Some(&chat.anonymous.id));
    assert!(mentions[0].account_id.is_none());
    assert_eq!(mentions[1].account_id.as_ref(), Some(chat.member_user_id()));
    assert_eq!(mentions[1].author.as_ref().map(|a| &a.id), Some(&chat.member.id));
}
