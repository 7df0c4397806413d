use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract, transform and load in order. Returns the path of the written feed.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting deals feed update");
        self.monitor.log_stats("Start");

        let raw_data = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} listings", raw_data.len());
        self.monitor.log_stats("Extract");

        let result = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "🔧 Kept {} listings ({} skipped, {} below threshold)",
            result.listings.len(),
            result.skipped_count,
            result.filtered_out_count
        );
        self.monitor.log_stats("Transform");

        let output_path = self.pipeline.load(result).await?;
        self.monitor.log_stats("Load");

        if self.monitor.is_enabled() {
            self.monitor.log_final_stats();
        }

        Ok(output_path)
    }
}
