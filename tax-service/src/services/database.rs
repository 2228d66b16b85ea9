use crate::error::AppError;
use crate::models::TaxRecord;
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for tax-service");

        let records = self.tax_records();

        // (owner_id, created_at desc) serves the history listing order
        let history_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("owner_history_lookup".to_string())
                    .build(),
            )
            .build();

        // (owner_id, regime) serves the regime filter and the stats grouping
        let regime_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "regime": 1 })
            .options(
                IndexOptions::builder()
                    .name("owner_regime_lookup".to_string())
                    .build(),
            )
            .build();

        records
            .create_indexes([history_index, regime_index], None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create indexes on tax_records collection: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created indexes on tax_records.(owner_id, created_at) and (owner_id, regime)");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn tax_records(&self) -> Collection<TaxRecord> {
        self.db.collection("tax_records")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
