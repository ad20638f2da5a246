//! End-to-end tests for the urlcounts HTTP API.

use std::collections::HashSet;
use std::io::Write;

use urlcounts::MatchResult;

mod common;

#[tokio::test]
async fn test_urlcounts_success() {
    let server = common::start_server(common::config_with_hosts(&common::fixture("hosts.txt"), false)).await;
    let body = std::fs::read_to_string(common::fixture("urls.json")).unwrap();

    let res = common::client()
        .post(server.url("/urlcounts"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));

    let result: MatchResult = res.json().await.unwrap();
    assert_eq!(result.matched_count, 2);
    assert_eq!(result.unmatched_count, 2);
    assert!(result
        .matched_per_host
        .contains(&"count=[2] torrentdownloads.test".to_string()));

    let unmatched: HashSet<&str> = result.unmatched_urls.iter().map(String::as_str).collect();
    assert_eq!(
        unmatched,
        HashSet::from([
            "http://dummydummyhostname/dummytest1",
            "http://dummydummyhostname/dummytest2"
        ])
    );

    server.stop().await;
}

#[tokio::test]
async fn test_urlcounts_fail() {
    let server = common::start_server(common::config_with_hosts(&common::fixture("hosts.txt"), false)).await;
    let client = common::client();

    // No body at all.
    let res = client.post(server.url("/urlcounts")).send().await.unwrap();
    assert_eq!(res.status(), 422);

    // No 'urls' item.
    let res = client
        .post(server.url("/urlcounts"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 422);

    // 'urls' is null.
    let res = client
        .post(server.url("/urlcounts"))
        .json(&serde_json::json!({ "urls": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 422);

    // Empty list.
    let res = client
        .post(server.url("/urlcounts"))
        .json(&serde_json::json!({ "urls": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    // Not JSON.
    let res = client
        .post(server.url("/urlcounts"))
        .header("content-type", "application/json")
        .body("urls=http://a.com/")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    server.stop().await;
}

#[tokio::test]
async fn test_all_urls_match() {
    let mut hosts = tempfile::NamedTempFile::new().unwrap();
    writeln!(hosts, "a.com\nb.com").unwrap();
    hosts.flush().unwrap();

    let server = common::start_server(common::config_with_hosts(hosts.path(), true)).await;

    let res = common::client()
        .post(server.url("/urlcounts"))
        .json(&serde_json::json!({
            "urls": ["http://a.com/1", "http://www.a.com/2", "http://b.com/1"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let result: MatchResult = res.json().await.unwrap();
    assert_eq!(result.matched_count, 3);
    assert_eq!(result.unmatched_count, 0);
    assert_eq!(result.matched_per_host, vec!["count=[2] a.com", "count=[1] b.com"]);
    assert!(result.unmatched_urls.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_missing_host_list_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let server = common::start_server(common::config_with_hosts(&dir.path().join("hosts.txt"), false)).await;

    let res = common::client()
        .post(server.url("/urlcounts"))
        .json(&serde_json::json!({ "urls": ["http://a.com/"] }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert!(res.text().await.unwrap().starts_with("Unexpected error:"));

    server.stop().await;
}

#[tokio::test]
async fn test_host_list_is_reread_without_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.txt");
    std::fs::write(&path, "a.com\n").unwrap();

    let server = common::start_server(common::config_with_hosts(&path, false)).await;
    let client = common::client();
    let body = serde_json::json!({ "urls": ["http://b.com/"] });

    let result: MatchResult = client
        .post(server.url("/urlcounts"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(result.matched_count, 0);

    std::fs::write(&path, "a.com\nb.com\n").unwrap();

    let result: MatchResult = client
        .post(server.url("/urlcounts"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(result.matched_count, 1);

    server.stop().await;
}

#[tokio::test]
async fn test_status() {
    let server = common::start_server(common::config_with_hosts(&common::fixture("hosts.txt"), true)).await;

    let status: serde_json::Value = common::client()
        .get(server.url("/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(status["status"], "operational");
    assert_eq!(status["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(status["hosts_cached"], true);

    server.stop().await;
}
