use clap::Parser;
use eodscan::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
