//! flagbind demo: a command whose flags fall back to the environment and a
//! config file.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
