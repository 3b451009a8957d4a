//! Integration tests for the wedding guest backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::db::{init_database, Repository};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        let state = AppState { repo };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create_wedding(&self, body: Value) -> String {
        let resp = self
            .client
            .post(self.url("/api/weddings"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn guests(&self, wedding_id: &str) -> Value {
        let resp = self
            .client
            .get(self.url(&format!("/api/weddings/{}/guests", wedding_id)))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }

    async fn rsvp(&self, wedding_id: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/api/weddings/{}/rsvp", wedding_id)))
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_create_wedding_starts_everyone_pending() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/weddings"))
        .json(&json!({
            "coupleNames": "Alice Brown & Bob Lee",
            "weddingDate": "2026-09-12",
            "guestNameList": ["Carol King", "Dan Wu"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["revisionId"], 1);
    let wedding_id = body["data"]["id"].as_str().unwrap().to_string();

    let list = fixture.guests(&wedding_id).await;
    let guests = list["data"].as_array().unwrap();
    assert_eq!(guests.len(), 2);
    assert_eq!(guests[0]["name"], "Carol King");
    assert_eq!(guests[0]["rsvpStatus"], "pending");
    assert_eq!(list["revisionId"], 1);
}

#[tokio::test]
async fn test_create_wedding_requires_couple_names() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/weddings"))
        .json(&json!({ "coupleNames": "  ", "guestNameList": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_legacy_rsvps_migrate_on_first_read() {
    let fixture = TestFixture::new().await;
    let wedding_id = fixture
        .create_wedding(json!({
            "coupleNames": "Alice & Bob",
            "guestNameList": ["Alice", "Bob"],
            "legacyRsvps": [
                {
                    "guestName": "Bob",
                    "email": "bob@x.com",
                    "attending": true,
                    "numberOfGuests": 2,
                    "plusOneName": "Dana",
                    "submittedAt": "2025-05-01T10:00:00Z"
                },
                { "guestName": "Zara", "attending": false, "numberOfGuests": 1 }
            ]
        }))
        .await;

    let first = fixture.guests(&wedding_id).await;
    let guests = first["data"].as_array().unwrap();
    let names: Vec<&str> = guests.iter().map(|g| g["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Zara"]);
    assert_eq!(guests[0]["rsvpStatus"], "pending");
    assert_eq!(guests[1]["rsvpStatus"], "yes");
    assert_eq!(guests[1]["plusOne"], true);
    assert_eq!(guests[1]["plusOneName"], "Dana");
    assert_eq!(guests[2]["rsvpStatus"], "no");
    assert_eq!(first["revisionId"], 2);

    // Migration happens once
    let second = fixture.guests(&wedding_id).await;
    assert_eq!(second["revisionId"], 2);
    assert_eq!(second["data"], first["data"]);
}

#[tokio::test]
async fn test_unknown_wedding() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/weddings/does-not-exist/guests"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let resp = fixture
        .client
        .get(fixture.url("/api/weddings/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_guest_search() {
    let fixture = TestFixture::new().await;
    let wedding_id = fixture
        .create_wedding(json!({
            "coupleNames": "Alice & Bob",
            "guestNameList": ["John Smithson", "Jane Smith"]
        }))
        .await;

    let resp = fixture
        .client
        .get(fixture.url(&format!(
            "/api/weddings/{}/guests/search?q=John%20Sm",
            wedding_id
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "John Smithson");

    let resp = fixture
        .client
        .get(fixture.url(&format!(
            "/api/weddings/{}/guests/search?q=Nobody+Here",
            wedding_id
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/weddings/{}/guests/search", wedding_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_rsvp_flow_and_email_dedup() {
    let fixture = TestFixture::new().await;
    let wedding_id = fixture
        .create_wedding(json!({
            "coupleNames": "Alice & Bob",
            "guestNameList": ["Bob Lee", "Carol King"]
        }))
        .await;

    // An earlier import added the same person under another spelling
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/weddings/{}/guests", wedding_id)))
        .json(&json!({ "name": "Robert Lee", "email": "bob@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .rsvp(
            &wedding_id,
            json!({
                "name": "lee bob",
                "email": "bob@x.com",
                "attending": true,
                "plusOne": true,
                "plusOneName": "Dana",
                "dietaryRestrictions": "vegan"
            }),
        )
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Bob Lee");
    assert_eq!(body["data"]["rsvpStatus"], "yes");
    assert_eq!(body["data"]["email"], "bob@x.com");
    assert!(body["data"]["submittedAt"].is_string());

    let list = fixture.guests(&wedding_id).await;
    let names: Vec<&str> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob Lee", "Carol King"]);

    // Answering again updates in place
    let resp = fixture
        .rsvp(
            &wedding_id,
            json!({ "name": "Bob Lee", "email": "bob@x.com", "attending": false }),
        )
        .await;
    assert_eq!(resp.status(), 200);
    let list = fixture.guests(&wedding_id).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
    assert_eq!(list["data"][0]["rsvpStatus"], "no");
    assert_eq!(list["data"][0]["plusOne"], false);
}

#[tokio::test]
async fn test_rsvp_rejections() {
    let fixture = TestFixture::new().await;
    let wedding_id = fixture
        .create_wedding(json!({
            "coupleNames": "Alice & Bob",
            "guestNameList": ["Carol King"]
        }))
        .await;

    let resp = fixture
        .rsvp(
            &wedding_id,
            json!({ "name": "Carol King", "email": " ", "attending": true }),
        )
        .await;
    assert_eq!(resp.status(), 400);

    let resp = fixture
        .rsvp(
            &wedding_id,
            json!({ "name": "Zara Quinn", "email": "z@x.com", "attending": true }),
        )
        .await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_guest_management() {
    let fixture = TestFixture::new().await;
    let wedding_id = fixture
        .create_wedding(json!({
            "coupleNames": "Alice & Bob",
            "guestNameList": ["Carol King"]
        }))
        .await;

    // Import skips known names and blank rows
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/weddings/{}/guests/import", wedding_id)))
        .json(&json!({
            "entries": [
                { "name": "carol  king" },
                { "name": "Dan Wu", "email": "dan@x.com" },
                { "name": "" }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["added"], 1);
    assert_eq!(body["data"]["skippedDuplicates"], 1);
    assert_eq!(body["data"]["skippedInvalid"], 1);
    let version = body["revisionId"].as_i64().unwrap();

    // Duplicate add is refused
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/weddings/{}/guests", wedding_id)))
        .json(&json!({ "name": "Dan Wu" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "CONFLICT");

    // Edit with a stale version is refused
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/weddings/{}/guests/Dan%20Wu", wedding_id)))
        .json(&json!({ "rsvpStatus": "yes", "expectedVersion": version - 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VERSION_MISMATCH");
    assert_eq!(body["error"]["details"]["currentVersion"], version);

    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/weddings/{}/guests/Dan%20Wu", wedding_id)))
        .json(&json!({ "name": "Daniel Wu", "rsvpStatus": "yes", "expectedVersion": version }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Daniel Wu");
    assert_eq!(body["data"]["email"], "dan@x.com");
    assert_eq!(body["revisionId"], version + 1);

    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/weddings/{}/guests/Nobody", wedding_id)))
        .json(&json!({ "rsvpStatus": "no" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_wedding_overview() {
    let fixture = TestFixture::new().await;
    let wedding_id = fixture
        .create_wedding(json!({
            "coupleNames": "Alice Brown and Bob Lee",
            "guestNameList": ["Carol King", "Dan Wu", "Eve Park"]
        }))
        .await;

    let resp = fixture
        .rsvp(
            &wedding_id,
            json!({ "name": "Carol King", "email": "carol@x.com", "attending": true, "plusOne": true }),
        )
        .await;
    assert_eq!(resp.status(), 200);
    let resp = fixture
        .rsvp(
            &wedding_id,
            json!({ "name": "Dan Wu", "email": "dan@x.com", "attending": false }),
        )
        .await;
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/weddings/{}", wedding_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let data = &body["data"];
    assert_eq!(data["id"], wedding_id.as_str());
    assert_eq!(data["coupleFirstNames"]["first"], "Alice");
    assert_eq!(data["coupleFirstNames"]["second"], "Bob");
    assert_eq!(data["guests"]["total"], 3);
    assert_eq!(data["guests"]["attending"], 1);
    assert_eq!(data["guests"]["declined"], 1);
    assert_eq!(data["guests"]["pending"], 1);
    assert_eq!(data["guests"]["plusOnes"], 1);
    assert_eq!(data["guests"]["expectedHeadcount"], 2);
    assert_eq!(body["revisionId"], 3);
}
