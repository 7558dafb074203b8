use color_eyre::eyre::{Result, WrapErr};
use tokio::runtime::Runtime;
use tracing::info;

use crate::app::build_orchestrator;
use crate::config::UserConfig;

/// One sync without a screen. The aggregate goes to stdout; any failure exits non-zero.
pub fn run(config: &UserConfig, runtime: &Runtime, compact: bool) -> Result<()> {
    let orchestrator = build_orchestrator(config, runtime.handle().clone());
    info!(
        export = %config.provider.export_path.display(),
        backend = %config.backend.base_url,
        "Running headless sync"
    );

    let handle = orchestrator.trigger()?;
    let outcome = runtime.block_on(handle.outcome());

    // The aggregate is published before the upload, so print it even if the upload failed.
    if let Some(aggregate) = orchestrator.state().aggregate {
        let json = if compact {
            aggregate.to_json()?
        } else {
            aggregate.to_json_pretty()?
        };
        println!("{}", json);
    }

    outcome.map(|_| ()).wrap_err("Sync failed")
}
