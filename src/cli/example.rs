//! Example command implementation

use anyhow::Result;
use serde_json::json;

use flagbind::{Commander, FlagSet, SimpleCommand};

pub struct ExampleCommand {
    base: SimpleCommand,
}

impl ExampleCommand {
    pub fn new() -> Self {
        Self {
            base: SimpleCommand::new("example-command", "This is an example command (with fangs!)").long(
                "Prints the value of --example. Flags not given on the command line are read from \
                 FLAGBIND_* environment variables, then from the config file.",
            ),
        }
    }
}

impl Commander for ExampleCommand {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn init(&mut self, cmd: clap::Command, flags: &mut FlagSet) -> Result<clap::Command> {
        let cmd = self.base.init(cmd, flags)?.version(env!("CARGO_PKG_VERSION"));

        flags
            .add_string("example", "", "Example flag")?
            .add_string("config", "", "Config file to read flags from (YAML, TOML or JSON)")?
            .add_bool("verbose", false, "Enable verbose logging (sets log level to DEBUG)")?
            .add_bool("explain", false, "Print every flag with the source of its value")?;

        Ok(cmd)
    }

    fn pre_run(&mut self, flags: &mut FlagSet) -> Result<()> {
        self.base.pre_run(flags)
    }

    fn run(&mut self, flags: &FlagSet) -> Result<()> {
        println!(
            "Ran \"{}\" with the example flag set to \"{}\"",
            self.name(),
            flags.get_string("example").unwrap_or_default()
        );

        if flags.get_bool("explain").unwrap_or(false) {
            for flag in flags.iter() {
                let line = json!({
                    "flag": flag.name(),
                    "value": flag.value(),
                    "source": flag.source(),
                });
                println!("{}", line);
            }
        }

        Ok(())
    }
}
