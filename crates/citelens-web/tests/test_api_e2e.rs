//! End-to-end API tests: the full router wired to a fake page fetcher, a
//! tempdir-backed local cache and a credential-less completion backend.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use citelens_ingestion::scholar::{PageFetcher, ScrapeError};
use citelens_llm::OpenAiCompatibleBackend;
use citelens_storage::LocalCacheStore;
use citelens_web::config::AppConfig;
use citelens_web::router::build_router;
use citelens_web::state::AppState;

const LISTING: &str = r##"<html><body><table>
    <tr class="gsc_a_tr"><td>
        <a class="gsc_a_at" href="/citations?view_op=view_citation&citation_for_view=USER:aa">Federated Learning over Blockchains</a>
        <div class="gs_gray">A. Smith, B. Jones</div>
        <div class="gs_gray">Neural Information Processing Systems, 2022</div>
    </td>
    <td class="gsc_a_c"><a href="#">12</a></td>
    <td class="gsc_a_y"><span>2022</span></td></tr>
    <tr class="gsc_a_tr"><td>
        <a class="gsc_a_at" href="/citations?view_op=view_citation&citation_for_view=USER:bb">Privacy-Preserving Gradient Aggregation</a>
        <div class="gs_gray">A. Smith, C. Wu</div>
        <div class="gs_gray">arXiv preprint, 2023</div>
    </td>
    <td class="gsc_a_c"><a href="#">3</a></td>
    <td class="gsc_a_y"><span>2023</span></td></tr>
</table></body></html>"##;

struct TwoPaperFetcher;

#[async_trait]
impl PageFetcher for TwoPaperFetcher {
    async fn fetch_page(&self, _: &str, start: usize, _: usize) -> Result<String, ScrapeError> {
        if start == 0 {
            Ok(LISTING.to_string())
        } else {
            Ok("<html><body></body></html>".to_string())
        }
    }
}

fn test_state(cache_dir: &std::path::Path, cron_secret: Option<&str>) -> AppState {
    let config = AppConfig {
        cron_secret: cron_secret.map(str::to_string),
        cache_dir: cache_dir.to_path_buf(),
        ..AppConfig::default()
    };
    AppState::new(
        config,
        Arc::new(LocalCacheStore::new(cache_dir)),
        Arc::new(TwoPaperFetcher),
        // No credential: the chat endpoint must degrade to demo mode.
        Arc::new(OpenAiCompatibleBackend::new(
            "https://api.example.com/v1",
            "demo-model",
            None,
        )),
    )
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &axum::Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_read_endpoints_fall_back_to_stub() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), None));

    let (status, body) = get_json(&app, "/api/data/papers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["papers"].as_array().unwrap().len(), 3);
    assert_eq!(body["stats"]["totalPapers"], 3);

    let (status, body) = get_json(&app, "/api/data/citation-graph").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["graph"]["nodes"].as_array().unwrap().is_empty());

    let (status, body) = get_json(&app, "/api/data/embeddings").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["embeddings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_refresh_then_read_returns_live_data() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), None));

    let (status, body) = get_json(&app, "/api/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["stats"]["totalPapers"], 2);
    assert_eq!(body["message"], "Successfully scraped 2 papers");

    let (status, body) = get_json(&app, "/api/data/papers").await;
    assert_eq!(status, StatusCode::OK);
    let papers = body["papers"].as_array().unwrap();
    assert_eq!(papers.len(), 2, "live data, not the 3-paper stub");
    assert_eq!(papers[0]["title"], "Federated Learning over Blockchains");
    assert_eq!(papers[1]["title"], "Privacy-Preserving Gradient Aggregation");
    assert_eq!(body["stats"]["totalCitations"], 15);

    let (status, body) = get_json(&app, "/api/data/citation-graph").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["graph"]["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(body["graph"]["edges"][0]["relationType"], "co-authored");
}

#[tokio::test]
async fn test_refresh_requires_bearer_secret_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), Some("s3cret")));

    let (status, body) = get_json(&app, "/api/refresh").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/refresh")
                .header(header::AUTHORIZATION, "Bearer wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/refresh")
                .header(header::AUTHORIZATION, "Bearer s3cret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_mixed_generation_artifacts_fall_back_to_stub() {
    use citelens_storage::{keys, StorageBackend};

    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), None));

    let (status, _) = get_json(&app, "/api/refresh").await;
    assert_eq!(status, StatusCode::OK);

    // Simulate an interleaved refresh: restamp the stats envelope with a
    // foreign generation id.
    let storage = LocalCacheStore::new(dir.path());
    let mut stats = storage.get(keys::STATS).await.unwrap().unwrap();
    stats["generation"] = serde_json::json!("00000000-0000-0000-0000-000000000000");
    storage.set(keys::STATS, &stats).await.unwrap();

    let (status, body) = get_json(&app, "/api/data/papers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["papers"].as_array().unwrap().len(),
        3,
        "mixed generations must serve the stub set"
    );
}

#[tokio::test]
async fn test_chat_demo_mode_without_credential() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), None));

    let (status, body) = post_json(
        &app,
        "/api/chat",
        r#"{"messages": [{"role": "user", "content": "tell me about privacy"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("demo mode"));
    assert_eq!(body["relevantPapers"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_chat_rejects_malformed_body() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), None));

    let (status, _) = post_json(&app, "/api/chat", r#"{"filters": {}}"#).await;
    assert!(status.is_client_error(), "missing messages array must be rejected: {status}");

    let (status, _) = post_json(&app, "/api/chat", "not json").await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_health_and_status() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), None));

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get_json(&app, "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "local-cache");
    assert_eq!(body["available"], true);
    assert!(body["lastUpdated"].is_null(), "no refresh has run yet");
}
