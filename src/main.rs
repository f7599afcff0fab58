use anyhow::Result;
use clap::Parser;
use shortcut_overlay::cli::{self, Cli};
use std::io;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Routes all log::info!() etc. to the debug log file.
    // The --log-level flag takes precedence over RUST_LOG.
    shortcut_overlay::debug::init_log_bridge(cli.log_level.map(Into::into));

    log::info!("Starting shortcut-overlay {}", shortcut_overlay::VERSION);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let code = cli::run(cli, stdin.lock(), &mut stdout)?;
    log::logger().flush();

    if code != 0 {
        drop(stdout);
        std::process::exit(code);
    }
    Ok(())
}
