//! Content-check command - operator report on per-domain availability

use chrono::Utc;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Print the availability report for every blueprint domain.
///
/// Exits with code 1 when any domain's eligible pool is below the minimum
/// threshold, so the check can gate content deployments.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    let state = crate::create_app_state_with_config(&config).await?;
    let report = state
        .selection_service
        .availability_report()
        .await
        .map_err(|e| anyhow::anyhow!("availability report failed: {}", e))?;

    println!("Content availability report ({})", Utc::now().to_rfc3339());
    println!("{:<45} {:>10}  {}", "DOMAIN", "AVAILABLE", "STATUS");

    let mut gaps = 0usize;
    let mut total = 0usize;

    for entry in &report {
        let status = if entry.below_threshold { "LOW" } else { "ok" };
        if entry.below_threshold {
            gaps += 1;
        }
        total += entry.available_count;

        println!(
            "{:<45} {:>10}  {}",
            entry.domain_code.as_str(),
            entry.available_count,
            status
        );
    }

    println!("Total eligible questions: {}", total);

    if gaps > 0 {
        info!(gaps, "Content gaps detected");
        anyhow::bail!("{} domain(s) below the minimum pool threshold", gaps);
    }

    Ok(())
}
