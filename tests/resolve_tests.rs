//! Integration tests for flag resolution through the public API

use flagbind::{
    execute, Commander, FlagSet, MapEnv, ResolveError, ResolverConfig, ResolvingCommand, SimpleCommand,
    ValueSource,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// Wraps [`SimpleCommand`] and records what `run` saw.
struct RecordingCommand {
    base: SimpleCommand,
    example: Option<String>,
    source: Option<ValueSource>,
}

impl RecordingCommand {
    fn new() -> Self {
        Self {
            base: SimpleCommand::new("example-command", "This is an example command (with fangs!)"),
            example: None,
            source: None,
        }
    }
}

impl Commander for RecordingCommand {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn init(&mut self, cmd: clap::Command, flags: &mut FlagSet) -> anyhow::Result<clap::Command> {
        let cmd = self.base.init(cmd, flags)?;
        flags.add_string("example", "", "Example flag")?;
        Ok(cmd)
    }

    fn run(&mut self, flags: &FlagSet) -> anyhow::Result<()> {
        self.example = flags.get_string("example").map(str::to_string);
        self.source = flags.source("example");
        Ok(())
    }
}

#[test]
fn test_env_prefix_scenario() {
    let env = MapEnv::new().with("CMD_EXAMPLE", "from env var");
    let config = ResolverConfig::new().env_prefix("cmd");
    let mut command = ResolvingCommand::with_env(RecordingCommand::new(), config, env);

    execute(&mut command, ["example-command"]).expect("execute");
    assert_eq!(command.inner().example.as_deref(), Some("from env var"));
    assert_eq!(command.inner().source, Some(ValueSource::Environment));
}

#[test]
fn test_required_config_file_scenario() {
    let config = ResolverConfig::new().config_file(fixture("testconfig.yml"));
    let mut command = ResolvingCommand::with_env(RecordingCommand::new(), config, MapEnv::new());

    execute(&mut command, ["example-command"]).expect("execute");
    assert_eq!(command.inner().example.as_deref(), Some("from config file"));
    assert_eq!(command.inner().source, Some(ValueSource::File));
    assert_eq!(command.resolution().and_then(|r| r.config_file.clone()), Some(fixture("testconfig.yml")));
}

#[test]
fn test_optional_absent_config_file_scenario() {
    let config = ResolverConfig::new().config_file(fixture("absent.yml")).optional_config_file(true);
    let mut command = ResolvingCommand::with_env(RecordingCommand::new(), config, MapEnv::new());

    execute(&mut command, ["example-command"]).expect("execute");
    assert_eq!(command.inner().example.as_deref(), Some(""));
    assert_eq!(command.inner().source, Some(ValueSource::Default));
}

#[test]
fn test_required_absent_config_file_scenario() {
    let config = ResolverConfig::new().config_file(fixture("absent.yml"));
    let mut command = ResolvingCommand::with_env(RecordingCommand::new(), config, MapEnv::new());

    let err = execute(&mut command, ["example-command"]).unwrap_err();
    assert!(matches!(err.downcast_ref::<ResolveError>(), Some(ResolveError::ConfigLoad { .. })));
    assert!(command.inner().example.is_none());
}
