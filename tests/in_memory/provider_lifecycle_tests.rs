//! In-memory integration tests for the provider lifecycle.

use rstest::rstest;
use serde_json::json;
use toolport::tool_registry::{
    adapters::memory::InMemoryBlobStore,
    domain::{ProviderDraft, TransportKind},
    services::ProviderAction,
};

use super::helpers::{TestContext, store};

const KEY: &str = "mcp-servers";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_providers_survive_a_reload(store: InMemoryBlobStore) {
    let context = TestContext::over(store.clone()).await;
    let docs = context
        .coordinator
        .register(
            ProviderDraft::new("Docs", "https://ex.com/mcp")
                .with_transport(TransportKind::RequestResponse)
                .with_header("Authorization", "Bearer t"),
        )
        .await
        .expect("registration should succeed");
    context
        .coordinator
        .register(ProviderDraft::new("Search", "https://search.example/sse"))
        .await
        .expect("registration should succeed");

    let reloaded = TestContext::over(store).await;

    assert_eq!(reloaded.coordinator.list(), context.coordinator.list());
    assert_eq!(reloaded.coordinator.registry().get(docs.id()), Some(docs));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_blob_uses_wire_record_shape(store: InMemoryBlobStore) {
    let context = TestContext::over(store.clone()).await;
    let docs = context
        .coordinator
        .register(
            ProviderDraft::new("Docs", "https://ex.com/mcp")
                .with_transport(TransportKind::RequestResponse),
        )
        .await
        .expect("registration should succeed");

    let blob = store
        .snapshot(KEY)
        .expect("store readable")
        .expect("slot populated");
    let stored: serde_json::Value = serde_json::from_str(&blob).expect("valid json");

    assert_eq!(
        stored,
        json!([{
            "id": docs.id().as_str(),
            "name": "Docs",
            "url": "https://ex.com/mcp",
            "transportType": "http",
            "headers": []
        }])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_the_targeted_provider(store: InMemoryBlobStore) {
    let context = TestContext::over(store).await;
    let first = context
        .coordinator
        .register(ProviderDraft::new("First", "https://a.example"))
        .await
        .expect("registration should succeed");
    let second = context
        .coordinator
        .register(ProviderDraft::new("Second", "https://b.example"))
        .await
        .expect("registration should succeed");
    let before = context.coordinator.list();

    let updated = context
        .coordinator
        .update(
            first.id(),
            ProviderDraft::from(&first)
                .with_transport(TransportKind::RequestResponse)
                .with_header("X-Team", "tools"),
        )
        .await
        .expect("update should succeed");
    let after = context.coordinator.list();

    assert_eq!(before.len(), after.len());
    assert_eq!(after.first(), Some(&updated));
    assert_eq!(after.get(1), Some(&second));
    assert_eq!(updated.name(), first.name());
    assert_eq!(updated.transport_kind(), TransportKind::RequestResponse);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_last_provider_clears_the_slot(store: InMemoryBlobStore) {
    let context = TestContext::over(store.clone()).await;
    let docs = context
        .coordinator
        .register(ProviderDraft::new("Docs", "https://ex.com/mcp"))
        .await
        .expect("registration should succeed");

    for _ in 0..2 {
        let outcome = context
            .coordinator
            .dispatch(ProviderAction::Remove {
                id: docs.id().clone(),
                name: "Docs".to_owned(),
            })
            .await;
        assert!(outcome.is_success());
    }

    assert_eq!(store.snapshot(KEY).expect("store readable"), None);
    assert!(TestContext::over(store).await.coordinator.list().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn legacy_records_load_as_streaming_and_are_rewritten_on_next_save() {
    let legacy = json!([
        { "id": "1712345678901", "name": "Legacy", "url": "https://old.example/sse", "headers": [] }
    ])
    .to_string();
    let store = InMemoryBlobStore::with_slot(KEY, legacy.clone());
    let context = TestContext::over(store.clone()).await;

    let loaded = context.coordinator.list();
    assert_eq!(
        loaded.first().map(|provider| provider.transport_kind()),
        Some(TransportKind::Streaming)
    );
    assert_eq!(store.snapshot(KEY).expect("store readable"), Some(legacy));

    context
        .coordinator
        .register(ProviderDraft::new("Docs", "https://ex.com/mcp"))
        .await
        .expect("registration should succeed");

    let blob = store
        .snapshot(KEY)
        .expect("store readable")
        .expect("slot populated");
    let stored: serde_json::Value = serde_json::from_str(&blob).expect("valid json");
    assert_eq!(stored[0]["transportType"], "sse");
    assert_eq!(stored[0]["id"], "1712345678901");
}
