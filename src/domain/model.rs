use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A marketplace category and the search term used to query it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub name: String,
    pub query: String,
}

impl Category {
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
        }
    }
}

/// One raw search result, with the `category` key injected by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    /// Listing id for log lines; numeric ids are rendered as-is.
    pub fn id(&self) -> String {
        match self.data.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => "unknown".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Result of querying one category. `Failed` is not the same as an empty result page.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Listings(Vec<Value>),
    Failed,
}

impl FetchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed)
    }
}

/// Typed view over a [`Record`]. Every field tolerates absence and `null`.
///
/// `id` and `sold_quantity` stay untyped and are copied into the feed unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Number>,
    #[serde(default)]
    pub original_price: Option<Number>,
    #[serde(default)]
    pub currency_id: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub sold_quantity: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Output record of the deals feed. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedListing {
    #[serde(rename = "ProductId")]
    pub product_id: Value,
    #[serde(rename = "Image Url")]
    pub image_url: String,
    #[serde(rename = "Video Url")]
    pub video_url: String,
    #[serde(rename = "Product Desc")]
    pub product_desc: String,
    #[serde(rename = "Origin Price")]
    pub origin_price: Number,
    #[serde(rename = "Discount Price")]
    pub discount_price: Number,
    #[serde(rename = "Discount")]
    pub discount: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Commission Rate")]
    pub commission_rate: String,
    #[serde(rename = "Commission")]
    pub commission: String,
    #[serde(rename = "Sales180Day")]
    pub sales_180_day: Value,
    #[serde(rename = "Positive Feedback")]
    pub positive_feedback: String,
    #[serde(rename = "Promotion Url")]
    pub promotion_url: String,
    #[serde(rename = "Code Name")]
    pub code_name: String,
    #[serde(rename = "Code Start Time")]
    pub code_start_time: String,
    #[serde(rename = "Code End Time")]
    pub code_end_time: String,
    #[serde(rename = "Code Value")]
    pub code_value: String,
    #[serde(rename = "Code Quantity")]
    pub code_quantity: String,
    #[serde(rename = "Code Minimum Spend")]
    pub code_minimum_spend: String,
}

impl NormalizedListing {
    /// Parsed value of the `"<value>%"` discount string, if it has one.
    pub fn discount_value(&self) -> Option<f64> {
        self.discount
            .strip_suffix('%')
            .and_then(|value| value.trim().parse::<f64>().ok())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub listings: Vec<NormalizedListing>,
    pub processed_count: usize,
    pub skipped_count: usize,
    pub filtered_out_count: usize,
}
