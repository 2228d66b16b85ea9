pub mod tax;

pub use tax::{
    CalculateTaxRequest, CalculateTaxResponse, CalculationData, DeleteResponse, HistoryParams,
    HistoryResponse, OverallStats, Pagination, RegimeStats, StatsResponse, TaxRecordResponse,
};
