//! sitekit - command-line build driver for a static blog

use std::process::ExitCode;

use sitekit::cli;

fn main() -> ExitCode {
    cli::run()
}
