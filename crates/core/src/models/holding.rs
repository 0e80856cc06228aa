use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Asset class of a holding. Drives allocation grouping and chart colours.
///
/// Serialized with the tokens the dashboard backend uses (`stock`, `crypto`,
/// `etf`, `bond`, `forex`, `commodity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "stock")]
    Equity,
    #[serde(rename = "crypto")]
    Crypto,
    #[serde(rename = "etf")]
    Fund,
    #[serde(rename = "bond")]
    FixedIncome,
    #[serde(rename = "forex")]
    CurrencyPair,
    #[serde(rename = "commodity")]
    Commodity,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Equity,
        Category::Crypto,
        Category::Fund,
        Category::FixedIncome,
        Category::CurrencyPair,
        Category::Commodity,
    ];

    /// Wire token, as stored by the backend.
    pub fn token(&self) -> &'static str {
        match self {
            Category::Equity => "stock",
            Category::Crypto => "crypto",
            Category::Fund => "etf",
            Category::FixedIncome => "bond",
            Category::CurrencyPair => "forex",
            Category::Commodity => "commodity",
        }
    }

    /// Plural label used in allocation legends.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Equity => "Stocks",
            Category::Crypto => "Cryptocurrencies",
            Category::Fund => "ETFs",
            Category::FixedIncome => "Bonds",
            Category::CurrencyPair => "Forex",
            Category::Commodity => "Commodities",
        }
    }

    /// Chart colour for this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Equity => "#3366FF",
            Category::Crypto => "#8C52FF",
            Category::Fund => "#36D399",
            Category::FixedIncome => "#FFBD49",
            Category::CurrencyPair => "#FF5724",
            Category::Commodity => "#6B7280",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    /// Accepts the wire tokens plus the long asset-class names
    /// (`equity`, `crypto-asset`, `fund`, `fixed-income`, `currency-pair`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stock" | "equity" => Ok(Category::Equity),
            "crypto" | "crypto-asset" => Ok(Category::Crypto),
            "etf" | "fund" => Ok(Category::Fund),
            "bond" | "fixed-income" => Ok(Category::FixedIncome),
            "forex" | "currency-pair" => Ok(Category::CurrencyPair),
            "commodity" => Ok(Category::Commodity),
            _ => Err(CoreError::UnknownToken {
                kind: "category",
                token: s.to_string(),
            }),
        }
    }
}

/// Opaque holding identifier. Generated ids are UUID v4 strings; ids that
/// come back from the backend are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldingId(String);

impl HoldingId {
    /// Fresh, never-reused identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HoldingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HoldingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HoldingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One recorded investment position.
///
/// Fields are public for cheap reads by the aggregation code; the
/// [`AssetStore`](crate::services::asset_store::AssetStore) runs
/// [`Holding::validate`] before anything is admitted, so aggregations may
/// assume the invariants hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    #[serde(alias = "_id")]
    pub id: HoldingId,

    /// Display name (e.g., "Apple Inc.")
    #[serde(alias = "assetName")]
    pub name: String,

    /// Ticker symbol, uppercased (e.g., "AAPL", "BTC")
    pub symbol: String,

    #[serde(rename = "type", alias = "assetType")]
    pub category: Category,

    /// Units held, always > 0
    #[serde(alias = "Quantity")]
    pub quantity: f64,

    /// Average cost per unit
    pub purchase_price: f64,

    /// Latest known market price per unit
    pub current_price: f64,

    #[serde(with = "wire_date")]
    pub purchase_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl Holding {
    /// Build a holding from validated user input, assigning a fresh id.
    pub fn create(draft: HoldingDraft) -> Result<Self, CoreError> {
        Self::from_draft(HoldingId::generate(), draft)
    }

    /// Build a holding with a known id (edits, backend records).
    pub fn from_draft(id: HoldingId, draft: HoldingDraft) -> Result<Self, CoreError> {
        let holding = Self {
            id,
            name: draft.name.trim().to_string(),
            symbol: draft.symbol.trim().to_uppercase(),
            category: draft.category,
            quantity: draft.quantity,
            purchase_price: draft.purchase_price,
            current_price: draft.current_price,
            purchase_date: draft.purchase_date,
            logo_url: draft
                .logo_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        };
        holding.validate()?;
        Ok(holding)
    }

    /// Canonical form for records that did not come through a draft
    /// (backend reads, snapshots): trimmed name, trimmed upper-case symbol,
    /// blank logo dropped.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.symbol = self.symbol.trim().to_uppercase();
        self.logo_url = self
            .logo_url
            .take()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
    }

    /// Check the record invariants: non-blank identity, `quantity > 0`,
    /// non-negative finite prices.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.as_str().trim().is_empty() {
            return Err(CoreError::Validation("Holding id must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Name is required".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(CoreError::Validation("Symbol is required".into()));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Quantity must be a positive number, got {}",
                self.quantity
            )));
        }
        if !self.purchase_price.is_finite() || self.purchase_price < 0.0 {
            return Err(CoreError::Validation(format!(
                "Purchase price must be a non-negative number, got {}",
                self.purchase_price
            )));
        }
        if !self.current_price.is_finite() || self.current_price < 0.0 {
            return Err(CoreError::Validation(format!(
                "Current price must be a non-negative number, got {}",
                self.current_price
            )));
        }
        Ok(())
    }

    /// `current_price × quantity`
    pub fn market_value(&self) -> f64 {
        self.current_price * self.quantity
    }

    /// `purchase_price × quantity`
    pub fn cost_basis(&self) -> f64 {
        self.purchase_price * self.quantity
    }

    /// Absolute gain (negative for a loss).
    pub fn gain_loss(&self) -> f64 {
        self.market_value() - self.cost_basis()
    }

    /// Per-unit gain in percent of the purchase price; 0 when the purchase
    /// price is 0.
    pub fn gain_loss_percent(&self) -> f64 {
        if self.purchase_price > 0.0 {
            (self.current_price - self.purchase_price) / self.purchase_price * 100.0
        } else {
            0.0
        }
    }

    /// Logo to display: the stored URL, or a placeholder avatar keyed on the symbol.
    pub fn logo(&self) -> String {
        match &self.logo_url {
            Some(url) => url.clone(),
            None => placeholder_logo(&self.symbol),
        }
    }

    /// Apply an edit in place. The id never changes; on validation failure
    /// the holding is left untouched.
    pub fn apply(&mut self, draft: HoldingDraft) -> Result<(), CoreError> {
        let updated = Self::from_draft(self.id.clone(), draft)?;
        *self = updated;
        Ok(())
    }

    /// The editable part of this holding, e.g. to prefill a form.
    pub fn to_draft(&self) -> HoldingDraft {
        HoldingDraft {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            category: self.category,
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            current_price: self.current_price,
            purchase_date: self.purchase_date,
            logo_url: self.logo_url.clone(),
        }
    }
}

/// Deterministic avatar URL for holdings and indices without a logo.
pub fn placeholder_logo(symbol: &str) -> String {
    format!("https://ui-avatars.com/api/?name={symbol}&background=random&color=fff")
}

/// User-entered holding fields, before an id is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingDraft {
    pub name: String,
    pub symbol: String,
    pub category: Category,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl HoldingDraft {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        category: Category,
        quantity: f64,
        purchase_price: f64,
        current_price: f64,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            category,
            quantity,
            purchase_price,
            current_price,
            purchase_date,
            logo_url: None,
        }
    }

    pub fn with_logo(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }
}

/// Purchase dates arrive either as `YYYY-MM-DD` or as a full ISO timestamp.
mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        let day = raw.get(..10).unwrap_or(&raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }
}
