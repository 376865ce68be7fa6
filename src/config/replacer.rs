//! Substring substitution for deriving environment keys

/// Ordered `(match, replacement)` pairs applied in one left-to-right pass.
///
/// At each position the first pair whose match starts there wins, and the
/// output of a replacement is never rescanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyReplacer {
    pairs: Vec<(String, String)>,
}

impl KeyReplacer {
    pub fn new<I, F, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .filter(|(from, _)| !from.is_empty())
            .collect();
        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn replace(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        'scan: while !rest.is_empty() {
            for (from, to) in &self.pairs {
                if let Some(tail) = rest.strip_prefix(from.as_str()) {
                    out.push_str(to);
                    rest = tail;
                    continue 'scan;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_to_underscore() {
        let replacer = KeyReplacer::new([("-", "_")]);
        assert_eq!(replacer.replace("log-level-max"), "log_level_max");
    }

    #[test]
    fn test_first_pair_wins_at_a_position() {
        let replacer = KeyReplacer::new([("a", "1"), ("ab", "2")]);
        assert_eq!(replacer.replace("ab"), "1b");

        let replacer = KeyReplacer::new([("ab", "2"), ("a", "1")]);
        assert_eq!(replacer.replace("aba"), "21");
    }

    #[test]
    fn test_replacements_are_not_rescanned() {
        let replacer = KeyReplacer::new([(".", "_"), ("_", "__")]);
        assert_eq!(replacer.replace("a.b_c"), "a_b__c");
    }

    #[test]
    fn test_empty_matches_are_dropped() {
        let replacer = KeyReplacer::new([("", "x")]);
        assert!(replacer.is_empty());
        assert_eq!(replacer.replace("name"), "name");
    }

    #[test]
    fn test_multibyte_input_is_preserved() {
        let replacer = KeyReplacer::new([("-", "_")]);
        assert_eq!(replacer.replace("café-crème"), "café_crème");
    }
}
