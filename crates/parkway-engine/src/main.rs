//! Demo binary for the Parkway world core.
//!
//! Builds a small park, drives a scripted construction session through the
//! top-level dispatcher while recording the command log, then replays that
//! log against a snapshot of the starting park and checks that both worlds
//! end on the same checksum.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `parkway-config.yaml` (or `PARKWAY_CONFIG`)
//! 2. Initialize structured logging (tracing), defaulting to the configured level
//! 3. Build the demo park
//! 4. Run the scripted session with a command log attached
//! 5. Show and discard a ghost preview
//! 6. Encode, decode and replay the log on the starting snapshot
//! 7. Compare checksums

mod demo;
mod error;

use std::path::PathBuf;

use parkway_core::{CommandLog, GameActions, ParkConfig, replay};
use parkway_types::ActionResult;
use parkway_world::ParkWorld;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

const DEFAULT_CONFIG_PATH: &str = "parkway-config.yaml";
const CONFIG_PATH_ENV: &str = "PARKWAY_CONFIG";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the demo park cannot
/// be built, or the replay does not converge.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, found) = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config_file = ?found,
        map_size = config.map.size,
        max_elements = config.map.max_elements,
        sandbox_mode = config.cheats.sandbox_mode,
        "parkway-engine starting"
    );

    run(&config)?;
    Ok(())
}

/// Load configuration, falling back to defaults when no file exists.
/// Returns the path actually read, if any.
fn load_config() -> Result<(ParkConfig, Option<PathBuf>), EngineError> {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = ParkConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let mut config = ParkConfig::default();
        config.apply_sandbox_override(std::env::var(parkway_core::config::SANDBOX_ENV).ok().as_deref());
        Ok((config, None))
    }
}

fn run(config: &ParkConfig) -> Result<(), EngineError> {
    let mut world = demo::build_park(config)?;
    let snapshot = world.clone();
    info!(
        rides = world.rides().len(),
        checksum = format_args!("{:#018x}", world.checksum()),
        "Demo park built"
    );

    let mut actions = GameActions::with_log(CommandLog::new(world.checksum()));
    for mut step in demo::session() {
        let result = actions.execute(&mut world, step.command.as_mut());
        report(step.label, &result);
    }
    let committed = world.checksum();
    show_preview(&mut actions, &mut world);
    let live = world.checksum();
    if live != committed {
        tracing::warn!(
            committed = format_args!("{committed:#018x}"),
            live = format_args!("{live:#018x}"),
            "Discarded preview changed the park"
        );
    }
    let log = actions
        .take_log()
        .unwrap_or_else(|| CommandLog::new(snapshot.checksum()));

    let bytes = log.to_bytes()?;
    info!(records = log.len(), bytes = bytes.len(), "Command log encoded");
    let decoded = CommandLog::decode(&mut bytes.as_slice())?;

    let mut replica = snapshot;
    let outcome = replay(&mut replica, &decoded)?;
    if !outcome.is_clean() || outcome.final_checksum != live {
        return Err(EngineError::Diverged {
            live,
            replayed: outcome.final_checksum,
            rejected: outcome.rejected,
        });
    }

    info!(
        checksum = format_args!("{live:#018x}"),
        commands = outcome.executed,
        "Replay converged"
    );
    Ok(())
}

/// Place a ghost and tear it down again; previews never reach the log.
fn show_preview(actions: &mut GameActions, world: &mut ParkWorld) {
    let _ = world.take_invalidated();
    let mut step = demo::preview();
    let result = actions.execute(world, step.command.as_mut());
    report(step.label, &result);
    let removed = world.remove_ghosts();
    let redraw = world.take_invalidated();
    info!(removed, redraw_tiles = redraw.len(), "Preview discarded");
}

fn report(label: &str, result: &ActionResult) {
    match result.error_text() {
        None => info!(
            step = label,
            position = ?result.position,
            cost = ?result.cost,
            "Step succeeded"
        ),
        Some(text) => info!(
            step = label,
            status = ?result.status,
            error = %text.replace('\n', ": "),
            "Step rejected"
        ),
    }
}
