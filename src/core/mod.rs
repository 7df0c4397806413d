pub mod aggregator;
pub mod etl;
pub mod fetcher;
pub mod pipeline;
pub mod transform;
pub mod writer;

pub use crate::domain::model::{
    Category, FetchOutcome, NormalizedListing, RawListing, Record, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
