//! In-memory integration tests for tool expansion and cache coherence.

use chrono::TimeDelta;
use rstest::rstest;
use toolport::tool_registry::{
    adapters::memory::InMemoryBlobStore,
    domain::{DiscoveredTool, ProviderDraft, ProviderUrl, TransportKind},
    ports::DiscoveryError,
    services::{ActionStatus, ProviderAction},
};

use super::helpers::{TestContext, store, tools};

fn docs_draft() -> ProviderDraft {
    ProviderDraft::new("Docs", "https://ex.com/mcp").with_transport(TransportKind::RequestResponse)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expand_caches_successful_discovery_for_the_hour(store: InMemoryBlobStore) {
    let context = TestContext::over(store).await;
    context
        .discovery
        .push(Ok(tools(&[("search", Some("Search docs"))])));
    let registered = context
        .coordinator
        .dispatch(ProviderAction::Register(docs_draft()))
        .await;
    let docs = registered.provider.expect("registered provider");
    assert_eq!(context.coordinator.list(), vec![docs.clone()]);

    let first = context
        .coordinator
        .dispatch(ProviderAction::Expand {
            provider_id: docs.id().clone(),
        })
        .await;
    context.clock.advance(TimeDelta::minutes(59));
    let second = context
        .coordinator
        .dispatch(ProviderAction::Expand {
            provider_id: docs.id().clone(),
        })
        .await;

    let expected = vec![DiscoveredTool::new("search", Some("Search docs".to_owned()))];
    assert_eq!(first.tools, expected);
    assert_eq!(second.tools, expected);
    assert_eq!(context.coordinator.cache().get(docs.url()), Some(expected));
    assert_eq!(context.discovery.calls().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn connection_failure_is_reported_and_retried(store: InMemoryBlobStore) {
    let context = TestContext::over(store).await;
    context
        .discovery
        .push(Err(DiscoveryError::Connection("refused".to_owned())));
    context.discovery.push(Ok(tools(&[("fetch", None)])));
    let docs = context
        .coordinator
        .register(docs_draft())
        .await
        .expect("registration should succeed");
    let expand = || ProviderAction::Expand {
        provider_id: docs.id().clone(),
    };

    let failed = context.coordinator.dispatch(expand()).await;
    assert_eq!(failed.status, ActionStatus::Failure);
    assert!(failed.message.contains("\"Docs\""));
    assert!(context.coordinator.cache().get(docs.url()).is_none());

    let retried = context.coordinator.dispatch(expand()).await;
    assert!(retried.is_success());
    assert_eq!(
        retried.tools.first().map(DiscoveredTool::description),
        Some("No description available")
    );
    assert_eq!(context.discovery.calls().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn url_change_invalidates_old_entry_without_touching_new(store: InMemoryBlobStore) {
    let context = TestContext::over(store).await;
    context.discovery.push(Ok(tools(&[("search", None)])));
    let docs = context
        .coordinator
        .register(docs_draft())
        .await
        .expect("registration should succeed");
    context
        .coordinator
        .expand(docs.id())
        .await
        .expect("expand should succeed");
    let moved = ProviderUrl::new("https://moved.example/mcp").expect("valid url");

    context
        .coordinator
        .update(
            docs.id(),
            ProviderDraft::from(&docs).with_headers(Vec::new()),
        )
        .await
        .expect("update should succeed");
    assert!(context.coordinator.cache().get(docs.url()).is_some());

    let mut draft = ProviderDraft::from(&docs);
    draft.url = moved.as_str().to_owned();
    context
        .coordinator
        .update(docs.id(), draft)
        .await
        .expect("update should succeed");

    assert!(context.coordinator.cache().get(docs.url()).is_none());
    assert!(context.coordinator.cache().get(&moved).is_none());
    assert_eq!(context.discovery.calls(), vec![docs.url().clone()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn providers_sharing_a_url_share_one_entry(store: InMemoryBlobStore) {
    let context = TestContext::over(store).await;
    context.discovery.push(Ok(tools(&[("search", None)])));
    let first = context
        .coordinator
        .register(docs_draft())
        .await
        .expect("registration should succeed");
    let mut twin_draft = docs_draft();
    twin_draft.name = "Docs mirror".to_owned();
    let twin = context
        .coordinator
        .register(twin_draft)
        .await
        .expect("registration should succeed");

    context
        .coordinator
        .expand(first.id())
        .await
        .expect("expand should succeed");
    let shared = context
        .coordinator
        .expand(twin.id())
        .await
        .expect("expand should be served from cache");

    assert_eq!(shared, tools(&[("search", None)]));
    assert_eq!(context.discovery.calls().len(), 1);
}
