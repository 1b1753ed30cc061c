use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 2100-01-01 in epoch milliseconds.
const FAR_FUTURE_MS: u64 = 4_102_444_800_000;

async fn run_shelf(home: &Path, server: &str, args: &[&str], stdin: Option<&str>) -> Output {
    let home = home.to_path_buf();
    let server = server.to_string();
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    let stdin = stdin.map(str::to_string);

    tokio::task::spawn_blocking(move || {
        let mut cmd = cargo_bin_cmd!("shelf");
        cmd.env("SHELF_HOME", &home)
            .env("SHELF_BASE_URL", &server)
            .env("SHELF_API_PATH", "shop")
            .env_remove("SHELF_LOG")
            .args(&args);
        if let Some(input) = stdin {
            cmd.write_stdin(input);
        }
        cmd.output().unwrap()
    })
    .await
    .unwrap()
}

fn session_file(home: &Path) -> PathBuf {
    home.join("session.json")
}

fn write_session(home: &Path) {
    let session = json!({
        "token": "tok-123",
        "expires": FAR_FUTURE_MS,
        "identifier": "admin"
    });
    fs::write(session_file(home), session.to_string()).unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_session_and_identifier() {
    let home = tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/admin/signin"))
        .and(body_json(json!({ "username": "admin", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "tok-123", "expired": FAR_FUTURE_MS })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let output = run_shelf(
        home.path(),
        &server.uri(),
        &["login", "--identifier", "admin"],
        Some("pw\n"),
    )
    .await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as admin"));

    let stored: Value =
        serde_json::from_str(&fs::read_to_string(session_file(home.path())).unwrap()).unwrap();
    assert_eq!(stored["token"], "tok-123");
    assert_eq!(stored["identifier"], "admin");

    let config = fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(config.contains("last_identifier = \"admin\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_stores_nothing() {
    let home = tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/admin/signin"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "wrong password" })),
        )
        .mount(&server)
        .await;

    let output = run_shelf(
        home.path(),
        &server.uri(),
        &["login", "--identifier", "admin"],
        Some("nope\n"),
    )
    .await;

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong password"));
    assert!(!session_file(home.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_table_and_json() {
    let home = tempdir().unwrap();
    write_session(home.path());
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/shop/admin/products"))
        .and(header("authorization", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "products": [
                { "id": "p1", "title": "Oolong", "category": "tea", "unit": "box",
                  "origin_price": 20, "price": 15.5, "is_enabled": 1, "imagesUrl": [] },
                { "id": "p2", "title": "Sencha", "category": "tea", "unit": "box",
                  "origin_price": 10, "price": 10, "is_enabled": 0 }
            ]
        })))
        .mount(&server)
        .await;

    run_shelf(home.path(), &server.uri(), &["products", "list"], None)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Oolong"))
        .stdout(predicate::str::contains("Sencha"))
        .stdout(predicate::str::contains("15.50"));

    let output = run_shelf(home.path(), &server.uri(), &["products", "list", "--json"], None).await;
    let output = output.assert().success().get_output().clone();
    let products: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(products.as_array().map(Vec::len), Some(2));
    assert_eq!(products[0]["id"], "p1");
    assert_eq!(products[0]["is_enabled"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_requires_session() {
    let home = tempdir().unwrap();
    let server = MockServer::start().await;

    run_shelf(home.path(), &server.uri(), &["products", "list"], None)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_session_is_cleared() {
    let home = tempdir().unwrap();
    write_session(home.path());
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/shop/admin/products"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
        .mount(&server)
        .await;

    run_shelf(home.path(), &server.uri(), &["products", "list"], None)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("shelf login"));
    assert!(!session_file(home.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_delete() {
    let home = tempdir().unwrap();
    write_session(home.path());
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/api/shop/admin/product/p1"))
        .and(header("authorization", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    run_shelf(home.path(), &server.uri(), &["products", "delete", "p1"], None)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted product p1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_reports_server_acceptance() {
    let home = tempdir().unwrap();
    write_session(home.path());
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/api/user/check"))
        .and(header("authorization", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    run_shelf(home.path(), &server.uri(), &["status"], None)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Identifier: admin"))
        .stdout(predicate::str::contains("Accepted:   yes"))
        .stdout(predicate::str::contains("tok-123").not());
}
