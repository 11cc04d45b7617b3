use symgen_core::{emit, logging};

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    // The local UTC offset can only be read while the process is single-threaded,
    // so take the timestamp before the runtime spawns its workers.
    let timestamp = emit::generation_timestamp();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("symgen error: cannot start runtime: {}", err);
            std::process::exit(1);
        }
    };

    match runtime.block_on(Cli::run_from_args(&timestamp)) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("symgen error: {:#}", err);
            std::process::exit(1);
        }
    }
}
