use clap::Parser;
use filler_coach::cli::CliArgs;

fn main() {
    if let Err(err) = filler_coach::run(CliArgs::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
