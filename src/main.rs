mod cli;

use clap::Parser;

use cli::{handle_config_action, list_cameras, run_view_command, Args, Command};

/// Load .env file before reading FACECHECK_* variables.
///
/// Does not override existing environment variables.
fn load_env() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();
}

/// Install the logger. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    load_env();

    let args = Args::parse();
    init_logging(args.verbose);

    match &args.command {
        Command::ListCameras => list_cameras(),
        Command::Config { action } => handle_config_action(action, &args),
        command => match run_view_command(command, &args) {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}
