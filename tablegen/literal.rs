//! Classification of seed values into the literal forms the generated
//! seed statements can carry.

use std::fmt::{self, Display, Write};

use crate::model::SeedValue;

/// Prefix marking seed text that must be translated at runtime.
pub const LOCALIZATION_MARKER: &str = "_tr_";

/// A seed value as it appears in generated source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Ready-to-embed SQL token: `'USD'`, `'1'`, `NULL`.
    Plain(String),
    /// Marker-stripped text passed through the localization wrapper.
    Localized(String),
    /// Text with non-ASCII characters, emitted as a wide string literal.
    Wide(String),
}

impl Literal {
    pub fn classify(value: &SeedValue) -> Self {
        match value {
            SeedValue::Null => Literal::Plain("NULL".to_string()),
            SeedValue::Integer(i) => Literal::Plain(sql_quote(&i.to_string())),
            SeedValue::Real(r) => Literal::Plain(sql_quote(&format_real(*r))),
            SeedValue::Text(text) => {
                if !text.is_ascii() {
                    Literal::Wide(strip_marker(text).to_string())
                } else if let Some(unmarked) = text
                    .strip_prefix(LOCALIZATION_MARKER)
                    .filter(|rest| !rest.is_empty())
                {
                    Literal::Localized(unmarked.to_string())
                } else {
                    Literal::Plain(sql_quote(text))
                }
            }
        }
    }

    /// Whether the statement carrying this literal must be formatted at
    /// runtime instead of embedded as one string.
    pub fn is_wrapped(&self) -> bool {
        !matches!(self, Literal::Plain(_))
    }

    /// Source text for a wrapped value, used as a formatting argument.
    ///
    /// The argument lands inside a `'%s'` slot, so quotes in wide text are
    /// doubled here.
    pub fn argument(&self) -> Option<String> {
        match self {
            Literal::Plain(_) => None,
            Literal::Localized(text) => Some(format!("_({})", CppStr(text))),
            Literal::Wide(text) => Some(format!("L{}", CppStr(&text.replace('\'', "''")))),
        }
    }
}

/// Removes one leading localization marker, if present.
pub fn strip_marker(text: &str) -> &str {
    text.strip_prefix(LOCALIZATION_MARKER).unwrap_or(text)
}

/// Removes every marker occurrence, including ones the removal itself
/// splices together (`_t_tr_r_`).
pub fn strip_all_markers(text: &str) -> String {
    let mut stripped = text.replace(LOCALIZATION_MARKER, "");
    while stripped.contains(LOCALIZATION_MARKER) {
        stripped = stripped.replace(LOCALIZATION_MARKER, "");
    }
    stripped
}

/// Single-quoted SQL string with embedded quotes doubled.
pub fn sql_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Reals keep a fractional part so they never read back as integers.
pub fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// A C++ narrow string literal.
///
/// Line breaks are folded so multi-line SQL embeds on one line: a break
/// between two word characters becomes a space, any other break vanishes.
pub struct CppStr<'a>(pub &'a str);

impl Display for CppStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        let mut prev: Option<char> = None;
        let mut chars = self.0.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => continue,
                '\n' => {
                    let next = chars.peek().copied();
                    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
                    if is_word(prev) && is_word(next) {
                        f.write_char(' ')?;
                        prev = Some(' ');
                    }
                    continue;
                }
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\t' => f.write_str("\\t")?,
                c => f.write_char(c)?,
            }
            prev = Some(c);
        }
        f.write_char('"')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SeedValue {
        SeedValue::Text(s.to_string())
    }

    #[test]
    fn test_plain_ascii() {
        assert_eq!(Literal::classify(&text("USD")), Literal::Plain("'USD'".into()));
        assert_eq!(Literal::classify(&text("$")), Literal::Plain("'$'".into()));
    }

    #[test]
    fn test_marked_ascii_is_localized() {
        let lit = Literal::classify(&text("_tr_Dollar"));
        assert_eq!(lit, Literal::Localized("Dollar".into()));
        assert_eq!(lit.argument().as_deref(), Some("_(\"Dollar\")"));
    }

    #[test]
    fn test_non_ascii_is_wide() {
        let lit = Literal::classify(&text("日本円"));
        assert_eq!(lit, Literal::Wide("日本円".into()));
        assert_eq!(lit.argument().as_deref(), Some("L\"日本円\""));
        assert_eq!(
            Literal::classify(&text("_tr_€uro")),
            Literal::Wide("€uro".into())
        );
    }

    #[test]
    fn test_numbers_are_never_wrapped() {
        assert_eq!(Literal::classify(&SeedValue::Integer(2)), Literal::Plain("'2'".into()));
        assert_eq!(Literal::classify(&SeedValue::Real(1.0)), Literal::Plain("'1.0'".into()));
        assert_eq!(Literal::classify(&SeedValue::Real(0.01)), Literal::Plain("'0.01'".into()));
        assert_eq!(Literal::classify(&SeedValue::Null), Literal::Plain("NULL".into()));
    }

    #[test]
    fn test_bare_marker_is_plain() {
        assert_eq!(Literal::classify(&text("_tr_")), Literal::Plain("'_tr_'".into()));
        assert!(!Literal::classify(&text("_tr_")).is_wrapped());
    }

    #[test]
    fn test_wide_argument_doubles_quotes() {
        let lit = Literal::classify(&text("d'€"));
        assert_eq!(lit, Literal::Wide("d'€".into()));
        assert_eq!(lit.argument().as_deref(), Some("L\"d''€\""));
    }

    #[test]
    fn test_strip_all_markers() {
        assert_eq!(strip_all_markers("_tr_Euro"), "Euro");
        assert_eq!(strip_all_markers("_t_tr_r_Euro"), "Euro");
        assert_eq!(strip_all_markers("USD"), "USD");
    }

    #[test]
    fn test_quote_escaping() {
        assert_eq!(Literal::classify(&text("O'Brien")), Literal::Plain("'O''Brien'".into()));
    }

    #[test]
    fn test_cpp_str_folds_lines() {
        let sql = "CREATE TABLE T(\nID INTEGER PRIMARY KEY,\nNAME TEXT NOT NULL\nUNIQUE\n)";
        assert_eq!(
            CppStr(sql).to_string(),
            "\"CREATE TABLE T(ID INTEGER PRIMARY KEY,NAME TEXT NOT NULL UNIQUE)\""
        );
        assert_eq!(CppStr("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
    }
}
