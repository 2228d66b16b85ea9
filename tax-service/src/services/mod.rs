pub mod database;
pub mod metrics;
pub mod repository;

pub use database::MongoDb;
pub use metrics::{get_metrics, init_metrics};
pub use repository::{HistoryFilter, TaxRecordRepository};
