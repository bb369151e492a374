mod cli;
mod config;
mod logging;
mod render;
mod vehicle;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use fleet_engine::{EngineHandle, FetchCoordinator, ReqwestListApi};
use fleet_logging::{fleet_error, fleet_info};
use log::LevelFilter;

use crate::cli::Args;
use crate::vehicle::VehicleRow;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let loaded = config::load(&args.config)?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(config.log_destination, level);
    if !found {
        fleet_info!("No config at {:?}; using defaults", args.config);
    }

    let api = ReqwestListApi::new(config.api.to_settings()).context("building HTTP client")?;
    let engine: EngineHandle<VehicleRow> =
        EngineHandle::new(Arc::new(api), Arc::new(vehicle::map_vehicle))
            .context("starting fetch engine")?;

    let limit = args.limit.unwrap_or(config.page_size);
    let mut coordinator = FetchCoordinator::new(engine, config.scope(), limit);
    let timeout = Duration::from_secs(args.timeout_secs);

    coordinator.ensure_fetched(args.filters(), limit);
    for index in 0..args.pages.max(1) {
        if index > 0 {
            if !coordinator.view().has_next {
                fleet_info!("No more pages after page {}", coordinator.view().page);
                break;
            }
            coordinator.next_page();
        }

        if !coordinator.settle(timeout) {
            bail!("timed out after {timeout:?} waiting for the vehicle list");
        }

        let view = coordinator.view();
        if let Some(error) = &view.error {
            fleet_error!("Vehicle list request failed: {}", error);
            bail!("vehicle list request failed: {error}");
        }
        render::print_page(&mut io::stdout().lock(), &view).context("writing output")?;
    }

    Ok(())
}
