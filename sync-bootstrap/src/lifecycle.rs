use anyhow::Result;
use tracing::{info, warn};

use sync_application::commands::{run_cleanup, run_sync};
use sync_infrastructure::{AppConfig, RunGuard};

use crate::context::AppContext;

pub async fn run_sync_once(dry_run: bool, force: bool) -> Result<()> {
    let config = AppConfig::load().await?;

    // Checked before any network call; a run inside the interval does no
    // work at all.
    let guard = RunGuard::new(&config.last_run_path);
    if !force && !guard.should_run(config.min_sync_interval_hours).await {
        info!("run suppressed by minimum sync interval, zero events processed");
        return Ok(());
    }

    let context = AppContext::from_config(&config).await?;
    let mut state = context.state;
    if dry_run {
        state.config.dry_run = true;
    }

    let summary = run_sync(&state).await?;
    for decision in &summary.details {
        info!(
            source = %decision.source,
            title = %decision.title,
            decision = %serde_json::to_string(&decision.outcome).unwrap_or_default()
        );
    }
    info!(
        processed = summary.processed,
        created = summary.created,
        skipped = summary.skipped,
        failed = summary.failed,
        dry_run = summary.dry_run,
        "run complete"
    );

    if !state.config.dry_run {
        if let Err(err) = guard.mark_run().await {
            warn!(error = %err, "could not stamp last-run time");
        }
    }
    Ok(())
}

pub async fn run_cleanup_once(force: bool) -> Result<()> {
    let config = AppConfig::load().await?;
    let context = AppContext::from_config(&config).await?;

    let report = run_cleanup(&context.state, force).await?;
    info!(
        groups = report.groups,
        removable = report.removable,
        removed = report.removed,
        failed = report.failed,
        dry_run = report.dry_run,
        "cleanup complete"
    );
    Ok(())
}
