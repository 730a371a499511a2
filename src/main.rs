//! Release packager - stamps version metadata and builds release packages.
//!
//! Creates source distributions, Windows installers and a standalone runtime
//! jar by driving the project's external toolchain.

use env_logger::Env;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let exit_code = match release_packager::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
