use clap::Parser;

mod cli;
mod platform;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(error) = platform::run_app(cli) {
        eprintln!("critique error: {error:#}");
        std::process::exit(1);
    }
}
