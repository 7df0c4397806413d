use crate::core::{NormalizedListing, Storage};
use crate::utils::error::Result;

/// Pretty-printed JSON array, two-space indent, non-ASCII left unescaped.
pub fn encode_feed(listings: &[NormalizedListing]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(listings)?)
}

/// Overwrites `filename` in `storage` with the feed.
pub async fn write_feed<S: Storage>(
    storage: &S,
    filename: &str,
    listings: &[NormalizedListing],
) -> Result<()> {
    let data = encode_feed(listings)?;
    tracing::debug!("Writing feed ({} bytes) to storage", data.len());
    storage.write_file(filename, &data).await
}

pub async fn read_feed<S: Storage>(storage: &S, filename: &str) -> Result<Vec<NormalizedListing>> {
    let data = storage.read_file(filename).await?;
    Ok(serde_json::from_slice(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::transform_listing;
    use crate::core::Record;
    use serde_json::json;

    #[test]
    fn test_encode_feed_keeps_non_ascii_and_indent() {
        let listing = transform_listing(Record {
            data: json!({
                "id": "MLA1",
                "title": "Portátil Señorial Ñandú",
                "price": 800,
                "original_price": 1000
            })
            .as_object()
            .cloned()
            .unwrap(),
        })
        .unwrap();

        let text = String::from_utf8(encode_feed(&[listing]).unwrap()).unwrap();

        assert!(text.starts_with("[\n  {\n    \"ProductId\": \"MLA1\""));
        assert!(text.contains("Portátil Señorial Ñandú"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_encode_empty_feed() {
        assert_eq!(encode_feed(&[]).unwrap(), b"[]");
    }
}
