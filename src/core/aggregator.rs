use crate::core::{Category, FetchOutcome, Record};
use serde_json::{json, Value};

/// Merges per-category outcomes in category order, stamping each item with its category.
///
/// Falls back to [`sample_listings`] only when every category failed; categories that
/// answered with zero results are not failures.
pub fn aggregate(outcomes: Vec<(Category, FetchOutcome)>) -> Vec<Record> {
    if outcomes.iter().all(|(_, outcome)| outcome.is_failed()) {
        tracing::warn!("🔄 No category could be fetched, using sample listings");
        return sample_listings();
    }

    let mut records = Vec::new();
    for (category, outcome) in outcomes {
        let items = match outcome {
            FetchOutcome::Listings(items) => items,
            FetchOutcome::Failed => {
                tracing::warn!("⚠️  No data for {}", category.name);
                continue;
            }
        };

        for item in items {
            match item {
                Value::Object(mut data) => {
                    data.insert("category".to_string(), Value::String(category.name.clone()));
                    records.push(Record { data });
                }
                other => {
                    tracing::warn!(
                        "⚠️  Skipping non-object result in {}: {}",
                        category.name,
                        other
                    );
                }
            }
        }
    }

    tracing::info!("📊 Total listings fetched: {}", records.len());
    records
}

/// Built-in listings spanning every default category, with one undiscounted item.
pub fn sample_listings() -> Vec<Record> {
    tracing::info!("📝 Generating sample listings for all categories");

    let samples = json!([
        {
            "id": "MLA123456789",
            "title": "Samsung Galaxy S23 Ultra 256GB Negro",
            "price": 799999,
            "original_price": 999999,
            "currency_id": "ARS",
            "thumbnail": "https://http2.mlstatic.com/D_NQ_NP_123456-MLA123456789_012023-O.jpg",
            "permalink": "https://articulo.mercadolibre.com.ar/MLA-123456789-samsung-galaxy-s23-ultra-256gb-negro-_JM",
            "sold_quantity": 15,
            "category": "Smartphones"
        },
        {
            "id": "MLA987654321",
            "title": "iPhone 14 Pro Max 128GB Azul",
            "price": 1099999,
            "original_price": 1299999,
            "currency_id": "ARS",
            "thumbnail": "https://http2.mlstatic.com/D_NQ_NP_987654-MLA987654321_012023-O.jpg",
            "permalink": "https://articulo.mercadolibre.com.ar/MLA-987654321-iphone-14-pro-max-128gb-azul-_JM",
            "sold_quantity": 8,
            "category": "Smartphones"
        },
        {
            "id": "MLA111222333",
            "title": "iPad Air 5 64GB WiFi Gris Espacial",
            "price": 599999,
            "original_price": 799999,
            "currency_id": "ARS",
            "thumbnail": "https://http2.mlstatic.com/D_NQ_NP_111222-MLA111222333_012023-O.jpg",
            "permalink": "https://articulo.mercadolibre.com.ar/MLA-111222333-ipad-air-5-64gb-wifi-gris-espacial-_JM",
            "sold_quantity": 12,
            "category": "Tablets"
        },
        {
            "id": "MLA222333444",
            "title": "Samsung Galaxy Tab S8 128GB WiFi Negro",
            "price": 449999,
            "original_price": 599999,
            "currency_id": "ARS",
            "thumbnail": "https://http2.mlstatic.com/D_NQ_NP_222333-MLA222333444_012023-O.jpg",
            "permalink": "https://articulo.mercadolibre.com.ar/MLA-222333444-samsung-galaxy-tab-s8-128gb-wifi-negro-_JM",
            "sold_quantity": 6,
            "category": "Tablets"
        },
        {
            "id": "MLA333444555",
            "title": "Apple Watch Series 8 GPS 45mm Azul",
            "price": 299999,
            "original_price": 399999,
            "currency_id": "ARS",
            "thumbnail": "https://http2.mlstatic.com/D_NQ_NP_333444-MLA333444555_012023-O.jpg",
            "permalink": "https://articulo.mercadolibre.com.ar/MLA-333444555-apple-watch-series-8-gps-45mm-azul-_JM",
            "sold_quantity": 9,
            "category": "Smartwatches"
        },
        {
            "id": "MLA444555666",
            "title": "Samsung Galaxy Watch 5 44mm Negro",
            "price": 199999,
            "original_price": 299999,
            "currency_id": "ARS",
            "thumbnail": "https://http2.mlstatic.com/D_NQ_NP_444555-MLA444555666_012023-O.jpg",
            "permalink": "https://articulo.mercadolibre.com.ar/MLA-444555666-samsung-galaxy-watch-5-44mm-negro-_JM",
            "sold_quantity": 14,
            "category": "Smartwatches"
        },
        {
            "id": "MLA555666777",
            "title": "MacBook Air M2 13 pulgadas 256GB Gris Espacial",
            "price": 1299999,
            "original_price": 1599999,
            "currency_id": "ARS",
            "thumbnail": "https://http2.mlstatic.com/D_NQ_NP_555666-MLA555666777_012023-O.jpg",
            "permalink": "https://articulo.mercadolibre.com.ar/MLA-555666777-macbook-air-m2-13-pulgadas-256gb-gris-espacial-_JM",
            "sold_quantity": 3,
            "category": "Portátiles"
        },
        {
            "id": "MLA666777888",
            "title": "Dell XPS 13 512GB SSD 16GB RAM Negro",
            "price": 899999,
            "original_price": 1199999,
            "currency_id": "ARS",
            "thumbnail": "https://http2.mlstatic.com/D_NQ_NP_666777-MLA666777888_012023-O.jpg",
            "permalink": "https://articulo.mercadolibre.com.ar/MLA-666777888-dell-xps-13-512gb-ssd-16gb-ram-negro-_JM",
            "sold_quantity": 7,
            "category": "Portátiles"
        },
        // no real discount, exercises the filter
        {
            "id": "MLA777888999",
            "title": "Xiaomi Redmi Note 12 Pro 128GB Blanco",
            "price": 249999,
            "original_price": 249999,
            "currency_id": "ARS",
            "thumbnail": "https://http2.mlstatic.com/D_NQ_NP_777888-MLA777888999_012023-O.jpg",
            "permalink": "https://articulo.mercadolibre.com.ar/MLA-777888999-xiaomi-redmi-note-12-pro-128gb-blanco-_JM",
            "sold_quantity": 25,
            "category": "Smartphones"
        }
    ]);

    match samples {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(data) => Some(Record { data }),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn categories() -> (Category, Category) {
        (
            Category::new("Smartphones", "smartphone"),
            Category::new("Tablets", "tablet"),
        )
    }

    #[test]
    fn test_aggregate_tags_items_with_category() {
        let (phones, tablets) = categories();
        let outcomes = vec![
            (
                phones,
                FetchOutcome::Listings(vec![json!({"id": "MLA1"}), json!({"id": "MLA2"})]),
            ),
            (tablets, FetchOutcome::Listings(vec![json!({"id": "MLA3"})])),
        ];

        let records = aggregate(outcomes);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id(), "MLA1");
        assert_eq!(records[0].data["category"], "Smartphones");
        assert_eq!(records[2].data["category"], "Tablets");
    }

    #[test]
    fn test_failed_category_contributes_nothing() {
        let (phones, tablets) = categories();
        let outcomes = vec![
            (phones, FetchOutcome::Failed),
            (tablets, FetchOutcome::Listings(vec![json!({"id": "MLA3"})])),
        ];

        let records = aggregate(outcomes);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data["category"], "Tablets");
    }

    #[test]
    fn test_all_failed_falls_back_to_samples() {
        let (phones, tablets) = categories();
        let records = aggregate(vec![
            (phones, FetchOutcome::Failed),
            (tablets, FetchOutcome::Failed),
        ]);

        assert_eq!(records, sample_listings());
    }

    #[test]
    fn test_zero_results_is_not_a_failure() {
        let (phones, tablets) = categories();
        let records = aggregate(vec![
            (phones, FetchOutcome::Listings(vec![])),
            (tablets, FetchOutcome::Failed),
        ]);

        assert!(records.is_empty());
    }

    #[test]
    fn test_non_object_results_are_skipped() {
        let (phones, _) = categories();
        let records = aggregate(vec![(
            phones,
            FetchOutcome::Listings(vec![json!("oops"), json!({"id": "MLA9"}), json!(42)]),
        )]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "MLA9");
    }

    #[test]
    fn test_samples_span_all_default_categories() {
        let samples = sample_listings();
        let names: HashSet<&str> = samples
            .iter()
            .filter_map(|r| r.data.get("category").and_then(Value::as_str))
            .collect();

        assert_eq!(samples.len(), 9);
        assert_eq!(
            names,
            HashSet::from(["Smartphones", "Tablets", "Smartwatches", "Portátiles"])
        );
    }
}
