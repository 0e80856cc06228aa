pub mod analytics;
pub mod chart;
pub mod holding;
pub mod portfolio;
pub mod query;
pub mod settings;
