//! PayTrust binary entry point.

use clap::Parser;

use paytrust::cli::{self, Cli};
use paytrust::observability;

fn main() {
    observability::init_logging();
    let cli = Cli::parse();
    if let Err(err) = cli::run(cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
