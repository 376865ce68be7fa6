//! clap integration for flag sets

use clap::parser::ValueSource as ClapSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches};

use super::value::split_csv;
use super::{Flag, FlagError, FlagKind, FlagSet, FlagValue, ValueSource};

impl Flag {
    fn to_arg(&self) -> Arg {
        let mut help = self.usage.clone();
        let default = self.default.to_string();
        if !default.is_empty() {
            help = format!("{} [default: {}]", help, default);
        }

        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(help)
            .value_parser(value_parser!(String));

        match self.kind() {
            // `--flag` means true; `--flag=false` is still accepted.
            FlagKind::Bool => arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .action(ArgAction::Set),
            FlagKind::List => arg.value_name("LIST").action(ArgAction::Append),
            FlagKind::Int | FlagKind::Float => {
                arg.value_name(self.kind().as_str().to_uppercase())
                    .allow_negative_numbers(true)
                    .action(ArgAction::Set)
            }
            FlagKind::String => arg.value_name("STRING").action(ArgAction::Set),
        }
    }
}

impl FlagSet {
    /// One clap argument per declared flag.
    ///
    /// No clap defaults are registered, so only values typed on the command
    /// line show up in the matches.
    pub fn to_args(&self) -> Vec<Arg> {
        self.flags.iter().map(Flag::to_arg).collect()
    }

    /// Copy every flag given on the command line into the set.
    ///
    /// Returns how many flags were set.
    pub fn apply_matches(&mut self, matches: &ArgMatches) -> Result<usize, FlagError> {
        let mut applied = 0;
        for flag in &mut self.flags {
            if matches.value_source(&flag.name) != Some(ClapSource::CommandLine) {
                continue;
            }
            let raw: Vec<String> = matches
                .get_many::<String>(&flag.name)
                .map(|values| values.cloned().collect())
                .unwrap_or_default();

            let value = match flag.kind() {
                FlagKind::List => FlagValue::List(raw.iter().flat_map(|r| split_csv(r)).collect()),
                _ => {
                    let last = raw.last().map(String::as_str).unwrap_or_default();
                    flag.parse(last)?
                }
            };
            flag.value = value;
            flag.source = ValueSource::CommandLine;
            applied += 1;
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(flags: &mut FlagSet, argv: &[&str]) -> Result<usize, FlagError> {
        let matches = clap::Command::new("test")
            .args(flags.to_args())
            .try_get_matches_from(argv)
            .expect("argv parses");
        flags.apply_matches(&matches)
    }

    fn sample() -> FlagSet {
        let mut flags = FlagSet::new();
        flags
            .add_string("example", "", "Example flag")
            .and_then(|f| f.add_bool("verbose", false, "Verbose output"))
            .and_then(|f| f.add_int("offset", 0, "Offset"))
            .and_then(|f| f.add_list("tags", &[], "Tags"))
            .expect("declare flags");
        flags
    }

    #[test]
    fn test_unset_flags_keep_defaults() {
        let mut flags = sample();
        assert_eq!(parse(&mut flags, &["test"]).expect("apply"), 0);
        assert!(flags.iter().all(|f| !f.changed()));
    }

    #[test]
    fn test_command_line_values_are_applied() {
        let mut flags = sample();
        let applied = parse(
            &mut flags,
            &["test", "--example", "hi", "--verbose", "--offset", "-3", "--tags", "a,b", "--tags", "c"],
        )
        .expect("apply");
        assert_eq!(applied, 4);
        assert_eq!(flags.get_string("example"), Some("hi"));
        assert_eq!(flags.get_bool("verbose"), Some(true));
        assert_eq!(flags.get_int("offset"), Some(-3));
        assert_eq!(flags.get_list("tags").map(|t| t.len()), Some(3));
        assert_eq!(flags.source("example"), Some(ValueSource::CommandLine));
    }

    #[test]
    fn test_explicit_false_bool() {
        let mut flags = sample();
        parse(&mut flags, &["test", "--verbose=false"]).expect("apply");
        assert_eq!(flags.get_bool("verbose"), Some(false));
        assert!(flags.changed("verbose"));
    }

    #[test]
    fn test_bad_command_line_int_is_a_parse_error() {
        let mut flags = sample();
        let err = parse(&mut flags, &["test", "--offset", "ten"]).unwrap_err();
        assert!(matches!(err, FlagError::Parse { kind: FlagKind::Int, .. }));
    }

    #[test]
    fn test_help_mentions_default() {
        let mut flags = FlagSet::new();
        flags.add_int("port", 8080, "Port to bind").expect("declare");
        let help = clap::Command::new("test").args(flags.to_args()).render_help().to_string();
        assert!(help.contains("--port"));
        assert!(help.contains("[default: 8080]"));
    }
}
