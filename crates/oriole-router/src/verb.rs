use std::fmt;
use std::str::FromStr;

use crate::error::UnknownVerb;

/// Request verbs a route can be registered for.
///
/// `Any` is the wildcard bucket (`*`) filled by `Routes::add`. `Cli` is kept
/// for command-line dispatch through the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Head,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
    Connect,
    Cli,
    Any,
}

impl Verb {
    /// Every concrete verb, wildcard excluded.
    pub const CONCRETE: [Verb; 10] = [
        Verb::Get,
        Verb::Post,
        Verb::Head,
        Verb::Put,
        Verb::Patch,
        Verb::Delete,
        Verb::Options,
        Verb::Trace,
        Verb::Connect,
        Verb::Cli,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Head => "head",
            Verb::Put => "put",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
            Verb::Options => "options",
            Verb::Trace => "trace",
            Verb::Connect => "connect",
            Verb::Cli => "cli",
            Verb::Any => "*",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        *self == Verb::Any
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = UnknownVerb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered == "*" {
            return Ok(Verb::Any);
        }

        Verb::CONCRETE
            .into_iter()
            .find(|verb| verb.as_str() == lowered)
            .ok_or_else(|| UnknownVerb(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("GET".parse::<Verb>().unwrap(), Verb::Get);
        assert_eq!("Delete".parse::<Verb>().unwrap(), Verb::Delete);
        assert_eq!("*".parse::<Verb>().unwrap(), Verb::Any);
    }

    #[test]
    fn test_unknown_verb() {
        let err = "BREW".parse::<Verb>().unwrap_err();
        assert_eq!(err, UnknownVerb("BREW".to_string()));
    }

    #[test]
    fn test_display_matches_bucket_key() {
        assert_eq!(Verb::Post.to_string(), "post");
        assert_eq!(Verb::Any.to_string(), "*");
    }
}
