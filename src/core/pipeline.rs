use crate::core::aggregator::aggregate;
use crate::core::fetcher::MarketplaceClient;
use crate::core::transform::process_listings;
use crate::core::writer::write_feed;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::utils::error::Result;
use std::path::Path;

/// Fetch every category, normalize and rank the discounted listings, write the feed.
pub struct DealsPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: MarketplaceClient,
}

impl<S: Storage, C: ConfigProvider> DealsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = MarketplaceClient::from_config(&config)?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DealsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let mut outcomes = Vec::with_capacity(self.config.categories().len());

        // one request at a time
        for category in self.config.categories() {
            let outcome = self.client.search(category).await;
            outcomes.push((category.clone(), outcome));
        }

        Ok(aggregate(outcomes))
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        Ok(process_listings(data, self.config.min_discount()))
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let filename = self.config.output_filename();
        write_feed(&self.storage, filename, &result.listings).await?;

        let output_path = Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .into_owned();
        tracing::info!(
            "💾 Feed saved to {} with {} listings",
            output_path,
            result.listings.len()
        );
        Ok(output_path)
    }
}
