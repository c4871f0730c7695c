use alloc::string::{String, ToString};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::QueryError;
use crate::query::QueryDictionary;

// -----------------------------------------------------------------------------
// QueryConfig

/// Separators, patterns and limits used by build and parse.
///
/// Every field has a default, so a partial document deserializes.
///
/// # Examples
///
/// ```
/// use vc_qs::query::QueryConfig;
///
/// let config: QueryConfig = serde_json::from_str(r#"{ "pair_separator": ";" }"#).unwrap();
/// assert_eq!(config.pair_separator, ';');
/// assert_eq!(config.value_separator, '+');
///
/// let syntax = config.compile().unwrap();
/// assert_eq!(syntax.pair_separator(), ';');
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Separates the values of one parameter, `a+b+c`.
    pub value_separator: char,
    /// Separates a name from its value, `name=value`.
    pub key_value_separator: char,
    /// Separates parameters, `a=1&b=2`.
    pub pair_separator: char,
    /// Extracts parameters from text.
    ///
    /// Capture group 1 is the name, group 3 the optional value.
    pub parameter_pattern: String,
    /// Splits the value of a sequence parameter into items.
    pub split_pattern: String,
    /// Deepest nesting of grouped slots walked before failing.
    pub max_depth: usize,
}

impl QueryConfig {
    pub const DEFAULT_PARAMETER_PATTERN: &'static str = "([^?=&]+)(=([^&]*))?";
    pub const DEFAULT_SPLIT_PATTERN: &'static str = "[+]";
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Validates and compiles the patterns.
    pub fn compile(&self) -> Result<QuerySyntax, QueryError> {
        Ok(QuerySyntax {
            value_separator: self.value_separator,
            key_value_separator: self.key_value_separator,
            pair_separator: self.pair_separator,
            parameter: compile_pattern(&self.parameter_pattern)?,
            split: compile_pattern(&self.split_pattern)?,
            max_depth: self.max_depth,
        })
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            value_separator: '+',
            key_value_separator: '=',
            pair_separator: '&',
            parameter_pattern: Self::DEFAULT_PARAMETER_PATTERN.into(),
            split_pattern: Self::DEFAULT_SPLIT_PATTERN.into(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, QueryError> {
    Regex::new(pattern).map_err(|err| QueryError::InvalidPattern {
        pattern: pattern.into(),
        message: err.to_string(),
    })
}

// -----------------------------------------------------------------------------
// QuerySyntax

static DEFAULT_SYNTAX: LazyLock<QuerySyntax> = LazyLock::new(|| {
    QueryConfig::default()
        .compile()
        .expect("default patterns are valid")
});

/// The compiled form of a [`QueryConfig`].
///
/// Cloning is cheap, the compiled patterns are shared.
#[derive(Clone, Debug)]
pub struct QuerySyntax {
    value_separator: char,
    key_value_separator: char,
    pair_separator: char,
    parameter: Regex,
    split: Regex,
    max_depth: usize,
}

impl Default for QuerySyntax {
    /// The compiled [`QueryConfig::default`].
    #[inline]
    fn default() -> Self {
        DEFAULT_SYNTAX.clone()
    }
}

impl QuerySyntax {
    #[inline]
    pub const fn value_separator(&self) -> char {
        self.value_separator
    }

    #[inline]
    pub const fn key_value_separator(&self) -> char {
        self.key_value_separator
    }

    #[inline]
    pub const fn pair_separator(&self) -> char {
        self.pair_separator
    }

    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Splits the raw value of a sequence parameter into its items.
    ///
    /// An empty value has no items.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_qs::query::QuerySyntax;
    ///
    /// let syntax = QuerySyntax::default();
    /// assert_eq!(syntax.split("a+b+c").collect::<Vec<_>>(), ["a", "b", "c"]);
    /// assert_eq!(syntax.split("").count(), 0);
    /// ```
    pub fn split<'t>(&self, raw: &'t str) -> impl Iterator<Item = &'t str> {
        let pieces = if raw.is_empty() {
            None
        } else {
            Some(self.split.split(raw))
        };
        pieces.into_iter().flatten()
    }

    /// Extracts the parameters of `text` into a dictionary.
    ///
    /// Values of a repeated name are joined with the value separator, in
    /// order of occurrence. A name without value maps to the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_qs::query::QuerySyntax;
    ///
    /// let dict = QuerySyntax::default().tokenize("?Tags=a&Flag&Tags=b");
    /// assert_eq!(dict.get("Tags"), Some("a+b"));
    /// assert_eq!(dict.get("Flag"), Some(""));
    /// assert_eq!(dict.names().collect::<Vec<_>>(), ["Tags", "Flag"]);
    /// ```
    pub fn tokenize(&self, text: &str) -> QueryDictionary {
        let mut dictionary = QueryDictionary::new();
        for captures in self.parameter.captures_iter(text) {
            let Some(name) = captures.get(1) else {
                continue;
            };
            let value = captures.get(3).map_or("", |m| m.as_str());
            dictionary.append(name.as_str(), value, self.value_separator);
        }
        dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryConfig, QuerySyntax};
    use crate::error::QueryError;
    use alloc::vec::Vec;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = QueryConfig::default();
        assert_eq!(
            (config.value_separator, config.key_value_separator, config.pair_separator),
            ('+', '=', '&')
        );
        assert_eq!(config.max_depth, 32);

        let parsed: QueryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let config = QueryConfig {
            split_pattern: "[".into(),
            ..QueryConfig::default()
        };
        let err = config.compile().unwrap_err();
        assert!(matches!(err, QueryError::InvalidPattern { ref pattern, .. } if pattern == "["));
    }

    #[test]
    fn tokenize_keeps_first_seen_order() {
        let dict = QuerySyntax::default().tokenize("b=2&a=1&b=3");
        let entries: Vec<_> = dict.iter().collect();
        assert_eq!(entries, [("b", "2+3"), ("a", "1")]);
    }

    #[test]
    fn custom_split_pattern() {
        let syntax = QueryConfig {
            value_separator: ',',
            split_pattern: ",".into(),
            ..QueryConfig::default()
        }
        .compile()
        .unwrap();
        assert_eq!(syntax.split("x,y").collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(syntax.tokenize("k=x&k=y").get("k"), Some("x,y"));
    }
}
