// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{WatchConfig, load_and_validate};
use crate::engine::{
    CoreEngine, Runtime, RuntimeOptions, TracingSink, install_signal_handlers, stop_channel,
};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (TOML file + CLI) and startup validation
/// - the watch core and its poll loop
/// - SIGINT / SIGTERM handling
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let cfg = load_and_validate(&args, fs.as_ref())?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let (stop_handle, stop_signal) = stop_channel();
    install_signal_handlers(stop_handle)?;

    let options = RuntimeOptions {
        poll_interval: cfg.interval(),
        max_cycles: if args.once { Some(1) } else { None },
    };

    info!(
        dir = ?cfg.dir(),
        magic = %cfg.magic(),
        extensions = ?cfg.extensions(),
        "watching directory"
    );

    let core = CoreEngine::new(&cfg, fs);
    let runtime = Runtime::new(core, stop_signal, TracingSink, options);
    let summary = runtime.run().await?;

    info!(
        cycles = summary.cycles,
        matches = summary.matches,
        "shutting down"
    );
    Ok(())
}

/// Simple dry-run output: print the effective configuration.
fn print_dry_run(cfg: &WatchConfig) {
    println!("dirwatcher dry-run");
    println!("  dir = {:?}", cfg.dir());
    println!("  magic = {:?}", cfg.magic());
    println!("  extensions = {:?}", cfg.extensions());
    println!("  interval = {}s", cfg.interval().as_secs());
    println!("  on_truncate = {:?}", cfg.on_truncate());

    debug!("dry-run complete (no watching)");
}
