//! gitseed - synthesize a git commit history through fast-import.

use clap::Parser;

mod cli;
mod output;
mod run;
mod workdir;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run::run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
