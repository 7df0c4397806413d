pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::{cli::LocalStorage, FeedConfig};

pub use self::core::{etl::EtlEngine, pipeline::DealsPipeline};
pub use domain::model::{Category, NormalizedListing};
pub use utils::error::{EtlError, Result};
