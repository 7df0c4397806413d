use crate::domain::model::{Category, Record, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn result_limit(&self) -> usize;
    fn request_timeout_seconds(&self) -> u64;
    fn request_headers(&self) -> &BTreeMap<String, String>;
    fn categories(&self) -> &[Category];
    fn min_discount(&self) -> f64;
    fn output_path(&self) -> &str;
    fn output_filename(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
