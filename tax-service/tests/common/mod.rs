use tax_service::config::Config;
use tax_service::services::MongoDb;
use tax_service::startup::Application;
use uuid::Uuid;

pub const USER_A: &str = "test_user_a";
pub const USER_B: &str = "test_user_b";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        if std::env::var("MONGODB_URI").is_err() {
            std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");
        }

        let db_name = format!("tax_test_{}", Uuid::new_v4());

        let mut config = Config::load().expect("Failed to load configuration");
        config.server.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            client,
            db,
            db_name,
        }
    }

    /// POST /api/tax/calculate as `user_id`.
    pub async fn calculate(&self, user_id: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/tax/calculate", self.address))
            .header("X-User-ID", user_id)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Seed one record and return its id. Sleeps a few milliseconds so
    /// consecutive seeds get distinct creation timestamps.
    pub async fn seed_record(
        &self,
        user_id: &str,
        name: &str,
        income: f64,
        regime: &str,
    ) -> String {
        let response = self
            .calculate(
                user_id,
                serde_json::json!({
                    "displayName": name,
                    "grossIncome": income,
                    "regime": regime,
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        body["record"]["id"].as_str().expect("record id").to_string()
    }

    pub async fn get(&self, user_id: &str, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .header("X-User-ID", user_id)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, user_id: &str, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .header("X-User-ID", user_id)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Cleanup the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
