use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::query::QuerySyntax;

/// The outcome of a build: the processed pairs plus their raw and
/// percent-encoded renderings.
///
/// # Examples
///
/// ```
/// use vc_qs::query::{QueryResult, QuerySyntax};
///
/// let syntax = QuerySyntax::default();
/// let result = QueryResult::assemble(
///     [("q", Some("a b".to_string()), false), ("page", None, false), ("all", None, true)],
///     &syntax,
/// );
/// assert_eq!(result.query_string(), "q=a b&all=");
/// assert_eq!(result.encoded_query_string(), "q=a%20b&all=");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryResult {
    processed: Vec<(String, String)>,
    raw: String,
    encoded: String,
}

impl QueryResult {
    /// Joins `(name, processed value, keep when null)` triples.
    ///
    /// A null value is dropped unless it is marked to be kept, in which case
    /// it is rendered as `name=` with nothing after.
    pub fn assemble<N: Into<String>>(
        values: impl IntoIterator<Item = (N, Option<String>, bool)>,
        syntax: &QuerySyntax,
    ) -> Self {
        let processed: Vec<(String, String)> = values
            .into_iter()
            .filter_map(|(name, value, keep_null)| match value {
                Some(value) => Some((name.into(), value)),
                None if keep_null => Some((name.into(), String::new())),
                None => None,
            })
            .collect();

        let raw = render(&processed, syntax, |text, out| out.push_str(text));
        let encoded = render(&processed, syntax, |text, out| {
            out.push_str(&urlencoding::encode(text));
        });

        Self {
            processed,
            raw,
            encoded,
        }
    }

    /// The query text without escaping.
    #[inline]
    pub fn query_string(&self) -> &str {
        &self.raw
    }

    /// The query text with names and values percent-encoded.
    #[inline]
    pub fn encoded_query_string(&self) -> &str {
        &self.encoded
    }

    /// `(name, value)` pairs in emission order.
    #[inline]
    pub fn processed_values(&self) -> &[(String, String)] {
        &self.processed
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.processed
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}

impl fmt::Display for QueryResult {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn render(
    pairs: &[(String, String)],
    syntax: &QuerySyntax,
    mut push: impl FnMut(&str, &mut String),
) -> String {
    let mut out = String::new();
    for (index, (name, value)) in pairs.iter().enumerate() {
        if index > 0 {
            out.push(syntax.pair_separator());
        }
        push(name, &mut out);
        out.push(syntax.key_value_separator());
        push(value, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::QueryResult;
    use crate::query::{QueryConfig, QuerySyntax};
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn empty_result_is_empty_text() {
        let result = QueryResult::assemble(Vec::<(String, _, _)>::new(), &QuerySyntax::default());
        assert!(result.is_empty());
        assert_eq!(result.query_string(), "");
    }

    #[test]
    fn separators_come_from_the_syntax() {
        let syntax = QueryConfig {
            key_value_separator: ':',
            pair_separator: ';',
            ..QueryConfig::default()
        }
        .compile()
        .unwrap();
        let result = QueryResult::assemble(
            [("a", Some(String::from("1")), false), ("b", Some(String::from("x&y")), false)],
            &syntax,
        );
        assert_eq!(result.to_string(), "a:1;b:x&y");
        assert_eq!(result.encoded_query_string(), "a:1;b:x%26y");
        assert_eq!(result.get("b"), Some("x&y"));
    }

    #[test]
    fn encoding_escapes_everything_but_unreserved() {
        let result = QueryResult::assemble(
            [
                ("city", Some(String::from("Zürich")), false),
                ("safe", Some(String::from("safe-._~")), false),
                ("raw", Some(String::from("x&y=z/?#%")), false),
                ("a b", Some(String::from("a b+c")), false),
            ],
            &QuerySyntax::default(),
        );
        assert_eq!(
            result.encoded_query_string(),
            "city=Z%C3%BCrich&safe=safe-._~&raw=x%26y%3Dz%2F%3F%23%25&a%20b=a%20b%2Bc"
        );
        assert_eq!(result.query_string(), "city=Zürich&safe=safe-._~&raw=x&y=z/?#%&a b=a b+c");
    }
}
