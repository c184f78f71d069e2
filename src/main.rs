pub mod inventory;
pub mod logger;
pub mod product;
pub mod repl;
pub mod sort;
#[cfg(test)]
mod test;

use crate::repl::{run, Cli};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
