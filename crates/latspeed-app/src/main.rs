//! The `latspeed` binary.

use clap::Parser;
use latspeed_config::CliArgs;

fn main() {
    let args = CliArgs::parse();

    let startup = match latspeed_app::load_config(&args) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let log_file = latspeed_log::init_logging(
        Some(&startup.dirs.log_dir),
        cfg!(debug_assertions),
        Some(&startup.config),
    );
    startup.log_paths(log_file.as_deref());

    if let Err(e) = latspeed_app::run(&args, &startup.config) {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
