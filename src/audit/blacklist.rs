use std::collections::HashSet;

/// Action names that are never written to the action log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    names: HashSet<String>,
}

impl Blacklist {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma separated list, ignoring blank entries.
    pub fn parse(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    /// Exact, case-sensitive match on the action name.
    pub fn is_blacklisted(&self, action_name: &str) -> bool {
        self.names.contains(action_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_entries() {
        let list = Blacklist::parse(" SecretAction, ,Users.view ,");
        assert_eq!(list.len(), 2);
        assert!(list.is_blacklisted("SecretAction"));
        assert!(list.is_blacklisted("Users.view"));
    }

    #[test]
    fn match_is_exact() {
        let list = Blacklist::new(["SecretAction"]);
        assert!(!list.is_blacklisted("secretaction"));
        assert!(!list.is_blacklisted("SecretAction2"));
        assert!(!Blacklist::default().is_blacklisted("SecretAction"));
    }
}
