//! Listing normalization, discount computation and the discount filter/sort.
//!
//! Everything here is pure; logging is the only side effect.

use crate::core::{NormalizedListing, RawListing, Record, TransformResult};
use crate::utils::error::{EtlError, Result};
use serde_json::{Number, Value};

/// Discount threshold applied when none is configured.
pub const DEFAULT_MIN_DISCOUNT: f64 = 10.0;

/// `round((1 - current / original) * 100, 2)`, or `0.0` unless `0 < current < original`.
///
/// Exact halves round to even, so 28.125 becomes 28.12.
pub fn calculate_discount(original_price: f64, current_price: f64) -> f64 {
    if original_price <= 0.0 || current_price <= 0.0 {
        return 0.0;
    }

    if current_price >= original_price {
        return 0.0;
    }

    let discount = (1.0 - current_price / original_price) * 100.0;
    (discount * 100.0).round_ties_even() / 100.0
}

/// Empty for no discount, otherwise `"<value>%"` with whole values kept as `"20.0%"`.
pub fn format_discount(discount: f64) -> String {
    if discount <= 0.0 {
        String::new()
    } else if discount.fract() == 0.0 {
        format!("{:.1}%", discount)
    } else {
        format!("{}%", discount)
    }
}

/// Maps one raw record onto the fixed feed schema.
pub fn transform_listing(record: Record) -> Result<NormalizedListing> {
    let raw: RawListing = serde_json::from_value(Value::Object(record.data))?;

    let current_price = raw.price.unwrap_or_else(|| Number::from(0));
    // a missing original price means "not discounted"
    let original_price = raw.original_price.unwrap_or_else(|| current_price.clone());

    let current = price_as_f64(&current_price, "price")?;
    let original = price_as_f64(&original_price, "original_price")?;
    let discount = calculate_discount(original, current);

    Ok(NormalizedListing {
        product_id: raw.id.unwrap_or_else(|| Value::String(String::new())),
        image_url: raw.thumbnail.unwrap_or_default(),
        video_url: String::new(),
        product_desc: raw.title.unwrap_or_default(),
        origin_price: original_price,
        discount_price: current_price,
        discount: format_discount(discount),
        currency: raw.currency_id.unwrap_or_default(),
        commission_rate: String::new(),
        commission: String::new(),
        sales_180_day: raw.sold_quantity.unwrap_or_else(|| Value::from(0)),
        positive_feedback: String::new(),
        promotion_url: raw.permalink.unwrap_or_default(),
        code_name: String::new(),
        code_start_time: String::new(),
        code_end_time: String::new(),
        code_value: String::new(),
        code_quantity: String::new(),
        code_minimum_spend: String::new(),
    })
}

fn price_as_f64(price: &Number, field: &str) -> Result<f64> {
    price.as_f64().ok_or_else(|| EtlError::ProcessingError {
        message: format!("{} is not representable as a number: {}", field, price),
    })
}

/// Keeps listings whose discount is at least `min_discount`. Order is preserved.
pub fn filter_by_discount(listings: Vec<NormalizedListing>, min_discount: f64) -> Vec<NormalizedListing> {
    listings
        .into_iter()
        .filter(|listing| {
            listing
                .discount_value()
                .is_some_and(|value| value >= min_discount)
        })
        .collect()
}

/// Stable sort, highest discount first. Unparseable discounts count as zero.
pub fn sort_by_discount(listings: &mut [NormalizedListing]) {
    listings.sort_by(|a, b| {
        let a = a.discount_value().unwrap_or(0.0);
        let b = b.discount_value().unwrap_or(0.0);
        b.total_cmp(&a)
    });
}

/// Transforms every record, skipping the ones that fail, then filters and sorts.
pub fn process_listings(records: Vec<Record>, min_discount: f64) -> TransformResult {
    tracing::info!("🔧 Processing {} listings from all categories", records.len());

    let mut transformed = Vec::with_capacity(records.len());
    let mut skipped_count = 0;

    for record in records {
        let id = record.id();
        match transform_listing(record) {
            Ok(listing) => transformed.push(listing),
            Err(e) => {
                tracing::warn!("⚠️  Skipping listing {}: {}", id, e);
                skipped_count += 1;
            }
        }
    }

    let processed_count = transformed.len();
    tracing::info!("✅ {} listings transformed", processed_count);

    let mut listings = filter_by_discount(transformed, min_discount);
    tracing::info!(
        "🔍 {} listings with discount >= {}%",
        listings.len(),
        min_discount
    );

    sort_by_discount(&mut listings);
    tracing::debug!("Listings sorted by discount");

    TransformResult {
        filtered_out_count: processed_count - listings.len(),
        listings,
        processed_count,
        skipped_count,
    }
}
