use crate::dtos::{OverallStats, RegimeStats};
use crate::error::AppError;
use crate::models::TaxRecord;
use crate::services::MongoDb;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::options::FindOptions;
use mongodb::Collection;
use tax_engine::Regime;

/// Optional history filters; the owner scope is applied on top of these
/// in every query.
#[derive(Debug, Default, Clone)]
pub struct HistoryFilter {
    pub name: Option<String>,
    pub regime: Option<Regime>,
}

#[derive(Clone)]
pub struct TaxRecordRepository {
    collection: Collection<TaxRecord>,
}

impl TaxRecordRepository {
    pub fn new(db: &MongoDb) -> Self {
        Self {
            collection: db.tax_records(),
        }
    }

    pub async fn insert(&self, record: &TaxRecord) -> Result<(), AppError> {
        self.collection.insert_one(record, None).await?;
        Ok(())
    }

    /// Page through the owner's records, newest first. Returns the page
    /// plus the total count for the same filter.
    pub async fn list_for_owner(
        &self,
        owner_id: &str,
        filter: &HistoryFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<TaxRecord>, u64), AppError> {
        let query = owner_query(owner_id, filter);

        let total = self
            .collection
            .count_documents(query.clone(), None)
            .await?;

        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(page.saturating_sub(1).saturating_mul(page_size))
            .limit(page_size as i64)
            .build();

        let records: Vec<TaxRecord> = self
            .collection
            .find(query, options)
            .await?
            .try_collect()
            .await?;

        Ok((records, total))
    }

    pub async fn find_for_owner(
        &self,
        owner_id: &str,
        id: &str,
    ) -> Result<Option<TaxRecord>, AppError> {
        let record = self
            .collection
            .find_one(doc! { "_id": id, "owner_id": owner_id }, None)
            .await?;
        Ok(record)
    }

    /// Returns false when the id does not exist or belongs to another
    /// user; the caller cannot tell the two apart.
    pub async fn delete_for_owner(&self, owner_id: &str, id: &str) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "owner_id": owner_id }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn overall_stats(&self, owner_id: &str) -> Result<OverallStats, AppError> {
        let pipeline = vec![
            doc! { "$match": { "owner_id": owner_id } },
            doc! { "$group": {
                "_id": null,
                "count": { "$sum": 1 },
                "totalIncome": { "$sum": "$gross_income" },
                "totalTax": { "$sum": "$tax_amount" },
                "avgTaxRate": { "$avg": "$effective_rate" },
                "avgIncome": { "$avg": "$gross_income" },
            }},
            doc! { "$project": {
                "_id": 0,
                "count": 1,
                "totalIncome": 1,
                "totalTax": 1,
                "avgTaxRate": 1,
                "avgIncome": 1,
            }},
        ];

        let mut cursor = self.collection.aggregate(pipeline, None).await?;
        match cursor.try_next().await? {
            // No records aggregates to no group at all; report zeroes.
            None => Ok(OverallStats::default()),
            Some(document) => decode_stats(document),
        }
    }

    pub async fn regime_stats(&self, owner_id: &str) -> Result<Vec<RegimeStats>, AppError> {
        let pipeline = vec![
            doc! { "$match": { "owner_id": owner_id } },
            doc! { "$group": {
                "_id": "$regime",
                "count": { "$sum": 1 },
                "avgTaxRate": { "$avg": "$effective_rate" },
            }},
            doc! { "$sort": { "_id": 1 } },
            doc! { "$project": {
                "_id": 0,
                "regime": "$_id",
                "count": 1,
                "avgTaxRate": 1,
            }},
        ];

        let mut cursor = self.collection.aggregate(pipeline, None).await?;
        let mut stats = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            stats.push(decode_stats(document)?);
        }
        Ok(stats)
    }
}

fn owner_query(owner_id: &str, filter: &HistoryFilter) -> Document {
    let mut query = doc! { "owner_id": owner_id };
    if let Some(name) = &filter.name {
        query.insert("display_name", doc! { "$regex": name, "$options": "i" });
    }
    if let Some(regime) = filter.regime {
        query.insert("regime", regime.as_str());
    }
    query
}

fn decode_stats<T: serde::de::DeserializeOwned>(document: Document) -> Result<T, AppError> {
    bson::from_document(document)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to decode stats: {}", e)))
}
