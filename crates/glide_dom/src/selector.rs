//! Simple selectors: `#id`, `.class`, `tag` and `*`

use std::str::FromStr;

/// A single simple selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Any,
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    /// Check whether an element with the given identity matches
    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        match self {
            Selector::Any => true,
            Selector::Id(want) => id == Some(want.as_str()),
            Selector::Class(want) => classes.iter().any(|c| c == want),
            Selector::Tag(want) => tag.eq_ignore_ascii_case(want),
        }
    }
}

impl FromStr for Selector {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid_name = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        if s == "*" {
            return Ok(Selector::Any);
        }
        if let Some(id) = s.strip_prefix('#') {
            return valid_name(id).then(|| Selector::Id(id.to_string())).ok_or(());
        }
        if let Some(class) = s.strip_prefix('.') {
            return valid_name(class)
                .then(|| Selector::Class(class.to_string()))
                .ok_or(());
        }
        valid_name(s).then(|| Selector::Tag(s.to_string())).ok_or(())
    }
}
