use std::fmt;

/// A compiled `pattern`, matched anywhere in the value.
///
/// Plain expressions run on `regex`; lookaround and backreferences, which
/// `regex` rejects, are compiled with `fancy_regex` instead.
#[derive(Clone)]
pub enum Pattern {
    Plain(regex::Regex),
    Backtracking(Box<fancy_regex::Regex>),
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, fancy_regex::Error> {
        match regex::Regex::new(source) {
            Ok(re) => Ok(Pattern::Plain(re)),
            Err(_) => fancy_regex::Regex::new(source).map(|re| Pattern::Backtracking(Box::new(re))),
        }
    }

    /// A backtracking match that exceeds its limit counts as a mismatch.
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Pattern::Plain(re) => re.is_match(haystack),
            Pattern::Backtracking(re) => re.is_match(haystack).unwrap_or_else(|e| {
                tracing::warn!(pattern = re.as_str(), error = %e, "pattern evaluation aborted");
                false
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Plain(re) => re.as_str(),
            Pattern::Backtracking(re) => re.as_str(),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_expressions_stay_on_regex() {
        let p = Pattern::new("^[a-z]+$").unwrap();
        assert!(matches!(p, Pattern::Plain(_)));
        assert!(p.is_match("abc"));
        assert!(!p.is_match("abc1"));
    }

    #[test]
    fn lookaround_and_backreferences() {
        let upper = Pattern::new(r"^(?=.*[A-Z])(?=.*\d)").unwrap();
        assert!(matches!(upper, Pattern::Backtracking(_)));
        assert!(upper.is_match("Secret1"));
        assert!(!upper.is_match("secret1"));

        let doubled = Pattern::new(r"(\w)\1").unwrap();
        assert!(doubled.is_match("hello"));
        assert!(!doubled.is_match("helo"));

        let not_after_dollar = Pattern::new(r"(?<!\$)\d+").unwrap();
        assert!(not_after_dollar.is_match("x42"));
    }

    #[test]
    fn broken_pattern_is_an_error() {
        assert!(Pattern::new("(unclosed").is_err());
    }
}
