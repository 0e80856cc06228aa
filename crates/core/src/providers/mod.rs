pub mod registry;
pub mod traits;

// History source implementations
pub mod static_history;
pub mod synthetic;
