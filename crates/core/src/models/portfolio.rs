use serde::{Deserialize, Serialize};

use super::holding::Holding;
use super::settings::Settings;

/// The main data container of a session: what the local snapshot stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Holdings in insertion order
    pub holdings: Vec<Holding>,

    #[serde(default)]
    pub settings: Settings,
}
