//! Dataset generation against a mock shorten endpoint

use shortbench_config::DatasetConfig;
use shortbench_dataset::{generate_dataset, load_dataset, DatasetError};
use shortbench_http::{ClientConfig, ShortenerClient};
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers every shorten request with an alias derived from the submitted
/// URL, so the line pairing of the output files can be checked exactly.
struct AliasFromUrl;

impl Respond for AliasFromUrl {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let url = body["url"].as_str().unwrap();
        ResponseTemplate::new(201)
            .set_body_json(serde_json::json!({ "alias": format!("alias-for:{url}") }))
    }
}

/// Fails with a 500 once the request counter passes a threshold.
struct FailAfter {
    threshold: usize,
    seen: AtomicUsize,
}

impl Respond for FailAfter {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if self.seen.fetch_add(1, Ordering::SeqCst) >= self.threshold {
            return ResponseTemplate::new(500).set_body_string("out of aliases");
        }
        AliasFromUrl.respond(request)
    }
}

fn config_in(dir: &tempfile::TempDir, count: usize) -> DatasetConfig {
    DatasetConfig {
        count,
        concurrency: 4,
        progress_interval: 0,
        urls_file: dir.path().join("data_urls.txt"),
        aliases_file: dir.path().join("data_aliases.txt"),
    }
}

fn client_for(server: &MockServer) -> ShortenerClient {
    ShortenerClient::from_str(&server.uri(), &ClientConfig::default()).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn generation_writes_paired_files() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/shorten"))
        .respond_with(AliasFromUrl)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, 40);

    let summary = generate_dataset(&config, client_for(&server)).await.unwrap();
    assert_eq!(summary.count, 40);

    let dataset = load_dataset(&config.urls_file, &config.aliases_file).unwrap();
    assert_eq!(dataset.len(), 40);
    for (url, alias) in dataset.urls.iter().zip(dataset.aliases.iter()) {
        assert_eq!(alias, &format!("alias-for:{url}"));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_generation_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/shorten"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, 20);

    let err = generate_dataset(&config, client_for(&server)).await.unwrap_err();
    assert!(matches!(err, DatasetError::Batch(_)));
    assert!(!config.urls_file.exists());
    assert!(!config.aliases_file.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_generation_preserves_previous_dataset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/shorten"))
        .respond_with(AliasFromUrl)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, 10);
    generate_dataset(&config, client_for(&server)).await.unwrap();
    let before = load_dataset(&config.urls_file, &config.aliases_file).unwrap();

    // Second run fails partway through
    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/shorten"))
        .respond_with(FailAfter {
            threshold: 5,
            seen: AtomicUsize::new(0),
        })
        .mount(&server)
        .await;

    let err = generate_dataset(&config, client_for(&server)).await.unwrap_err();
    assert!(matches!(err, DatasetError::Batch(_)));

    let after = load_dataset(&config.urls_file, &config.aliases_file).unwrap();
    assert_eq!(after.urls, before.urls);
    assert_eq!(after.aliases, before.aliases);
}
