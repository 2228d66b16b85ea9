mod common;

use common::{TestApp, USER_A, USER_B};
use mongodb::bson::doc;

#[tokio::test]
async fn get_record_returns_own_record() {
    let app = TestApp::spawn().await;

    let record_id = app.seed_record(USER_A, "Asha Rao", 800_000.0, "new").await;

    let response = app
        .get(USER_A, &format!("/api/tax/records/{}", record_id))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["id"], record_id.as_str());
    assert_eq!(body["taxAmount"].as_f64().unwrap(), 35_000.0);

    app.cleanup().await;
}

#[tokio::test]
async fn foreign_and_missing_records_are_indistinguishable() {
    let app = TestApp::spawn().await;

    let record_id = app.seed_record(USER_A, "Asha Rao", 800_000.0, "new").await;

    // User B probes user A's real id
    let foreign = app
        .get(USER_B, &format!("/api/tax/records/{}", record_id))
        .await;
    assert_eq!(foreign.status().as_u16(), 404);
    let foreign_body: serde_json::Value = foreign.json().await.expect("Failed to parse JSON");

    // User B probes an id that exists for nobody
    let missing = app
        .get(USER_B, "/api/tax/records/no-such-record")
        .await;
    assert_eq!(missing.status().as_u16(), 404);
    let missing_body: serde_json::Value = missing.json().await.expect("Failed to parse JSON");

    assert_eq!(foreign_body, missing_body);

    app.cleanup().await;
}

#[tokio::test]
async fn delete_own_record_removes_it() {
    let app = TestApp::spawn().await;

    let record_id = app.seed_record(USER_A, "Asha Rao", 800_000.0, "new").await;

    let response = app
        .delete(USER_A, &format!("/api/tax/records/{}", record_id))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], true);

    let stored = app
        .db
        .tax_records()
        .find_one(doc! { "_id": &record_id }, None)
        .await
        .unwrap();
    assert!(stored.is_none());

    // A second delete now reports the generic not-found
    let again = app
        .delete(USER_A, &format!("/api/tax/records/{}", record_id))
        .await;
    assert_eq!(again.status().as_u16(), 404);

    app.cleanup().await;
}

#[tokio::test]
async fn delete_of_foreign_record_reports_not_found_and_keeps_it() {
    let app = TestApp::spawn().await;

    let record_id = app.seed_record(USER_A, "Asha Rao", 800_000.0, "new").await;

    let foreign = app
        .delete(USER_B, &format!("/api/tax/records/{}", record_id))
        .await;
    assert_eq!(foreign.status().as_u16(), 404);
    let foreign_body: serde_json::Value = foreign.json().await.expect("Failed to parse JSON");

    let missing = app.delete(USER_B, "/api/tax/records/no-such-record").await;
    assert_eq!(missing.status().as_u16(), 404);
    let missing_body: serde_json::Value = missing.json().await.expect("Failed to parse JSON");

    // Ownership mismatch and nonexistence look identical
    assert_eq!(foreign_body, missing_body);

    // The record is still there for its owner
    let stored = app
        .db
        .tax_records()
        .find_one(doc! { "_id": &record_id }, None)
        .await
        .unwrap();
    assert!(stored.is_some());

    app.cleanup().await;
}
