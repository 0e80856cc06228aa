pub mod allocation_service;
pub mod asset_store;
pub mod history_service;
pub mod metrics_service;
pub mod query_service;
