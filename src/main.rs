use clap::Parser;
use deals_feed::core::writer::read_feed;
use deals_feed::utils::{logger, validation::Validate};
use deals_feed::{CliArgs, DealsPipeline, EtlEngine, EtlError, FeedConfig, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!(
        "📅 Deals feed run at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let config = match args.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    if args.dry_run {
        display_config_summary(&config).await;
        return Ok(());
    }

    let monitor_enabled = config.monitoring_enabled();
    let output_dir = config.output.path.clone();
    let storage = LocalStorage::new(output_dir);
    let pipeline = match DealsPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with(e),
    };

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("🎉 Deals feed updated: {}", output_path);
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: EtlError) -> ! {
    tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

async fn display_config_summary(config: &FeedConfig) {
    println!("📋 Configuration Summary:");
    println!("  Source: {}", config.source.endpoint);
    println!(
        "  Limit: {} per category, timeout {}s",
        config.source.limit, config.source.timeout_seconds
    );
    for category in &config.categories {
        println!("  Category: {} (q={})", category.name, category.query);
    }
    println!("  Min Discount: {}%", config.filter.min_discount);
    println!("  Output: {}", config.output_file_path());

    let storage = LocalStorage::new(config.output.path.clone());
    match read_feed(&storage, &config.output.filename).await {
        Ok(listings) => println!("  Existing feed: {} listings", listings.len()),
        Err(e) => println!("  Existing feed: none ({})", e),
    }
    println!("  🔍 DRY RUN MODE - nothing fetched or written");
}
