//! Header specification parsing.

/// A resolved header specification.
///
/// An empty spec string means "take the header from the input" (the first
/// CSV row, or the named groups of a line pattern). Anything else is a
/// comma-separated list of field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSpec {
    /// Take the header from the input itself.
    FromInput,
    /// Explicit ordered field names. Names need not be unique.
    Names(Vec<String>),
}

impl HeaderSpec {
    /// Resolves a header spec string. Never fails.
    ///
    /// Names are split on literal commas without trimming, so `"a,,b"` yields
    /// three names, the middle one empty.
    pub fn parse(spec: &str) -> Self {
        if spec.is_empty() {
            HeaderSpec::FromInput
        } else {
            HeaderSpec::Names(spec.split(',').map(str::to_string).collect())
        }
    }

    /// The explicit names, if any.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            HeaderSpec::FromInput => None,
            HeaderSpec::Names(names) => Some(names),
        }
    }
}

impl From<&str> for HeaderSpec {
    fn from(spec: &str) -> Self {
        HeaderSpec::parse(spec)
    }
}
