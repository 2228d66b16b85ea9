mod common;

use common::{TestApp, USER_A, USER_B};

#[tokio::test]
async fn empty_history_returns_zeroed_stats() {
    let app = TestApp::spawn().await;

    let response = app.get(USER_A, "/api/tax/stats").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["overall"]["count"], 0);
    assert_eq!(body["overall"]["totalIncome"].as_f64().unwrap(), 0.0);
    assert_eq!(body["overall"]["totalTax"].as_f64().unwrap(), 0.0);
    assert_eq!(body["byRegime"].as_array().unwrap().len(), 0);

    app.cleanup().await;
}

#[tokio::test]
async fn stats_aggregate_own_records() {
    let app = TestApp::spawn().await;

    // tax 35_000, rate 4.38
    app.seed_record(USER_A, "Asha Rao", 800_000.0, "new").await;
    // tax 65_000, rate 8.67
    app.seed_record(USER_A, "Asha Rao", 800_000.0, "old").await;
    // Foreign record must not show up
    app.seed_record(USER_B, "Binod Kumar", 500_000.0, "new").await;

    let response = app.get(USER_A, "/api/tax/stats").await;
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");

    let overall = &body["overall"];
    assert_eq!(overall["count"], 2);
    assert_eq!(overall["totalIncome"].as_f64().unwrap(), 1_600_000.0);
    assert_eq!(overall["totalTax"].as_f64().unwrap(), 100_000.0);
    assert_eq!(overall["avgIncome"].as_f64().unwrap(), 800_000.0);
    let avg_rate = overall["avgTaxRate"].as_f64().unwrap();
    assert!((avg_rate - 6.525).abs() < 1e-9);

    // Grouped by regime, sorted by regime key
    let by_regime = body["byRegime"].as_array().expect("byRegime array");
    assert_eq!(by_regime.len(), 2);
    assert_eq!(by_regime[0]["regime"], "new");
    assert_eq!(by_regime[0]["count"], 1);
    assert!((by_regime[0]["avgTaxRate"].as_f64().unwrap() - 4.38).abs() < 1e-9);
    assert_eq!(by_regime[1]["regime"], "old");
    assert_eq!(by_regime[1]["count"], 1);
    assert!((by_regime[1]["avgTaxRate"].as_f64().unwrap() - 8.67).abs() < 1e-9);

    app.cleanup().await;
}

#[tokio::test]
async fn stats_never_include_other_users_records() {
    let app = TestApp::spawn().await;

    app.seed_record(USER_B, "Binod Kumar", 900_000.0, "old").await;

    let response = app.get(USER_A, "/api/tax/stats").await;
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");

    assert_eq!(body["overall"]["count"], 0);
    assert_eq!(body["byRegime"].as_array().unwrap().len(), 0);

    app.cleanup().await;
}
