//! Terms and term-list parsing.
//!
//! One term per line. A line may carry an image URL after a separator:
//!
//! ```
//! use memorama::core::{parse_term_line, Separator, Term};
//!
//! let seps = Separator::DEFAULT_PRIORITY;
//! assert_eq!(
//!     parse_term_line("Hola | https://x/img.png", &seps),
//!     Some(Term::with_image("Hola", "https://x/img.png"))
//! );
//! assert_eq!(parse_term_line("Mundo", &seps), Some(Term::new("Mundo")));
//! assert_eq!(parse_term_line("   ", &seps), None);
//! ```
//!
//! Separators are tried in priority order; the first one present in the line
//! wins and the line is split on its first occurrence.

use serde::{Deserialize, Serialize};

/// A term to be matched. Text is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub text: String,
    pub image_url: Option<String>,
}

impl Term {
    /// Text-only term.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_url: None,
        }
    }

    /// Term with an image.
    pub fn with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_url: Some(image_url.into()),
        }
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.image_url {
            Some(url) => write!(f, "{} [{}]", self.text, url),
            None => f.write_str(&self.text),
        }
    }
}

/// Separator between a term's text and its image URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separator {
    Tab,
    Pipe,
    Semicolon,
    Comma,
}

impl Separator {
    /// Tab, then `|`, then `;`. Comma is opt-in since term text often contains commas.
    pub const DEFAULT_PRIORITY: [Separator; 3] = [Separator::Tab, Separator::Pipe, Separator::Semicolon];

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Separator::Tab => '\t',
            Separator::Pipe => '|',
            Separator::Semicolon => ';',
            Separator::Comma => ',',
        }
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Parse a single input line.
///
/// Returns `None` for lines that are empty after trimming and quote
/// stripping, or whose text part is empty (e.g. `"| url"`).
pub fn parse_term_line(raw: &str, separators: &[Separator]) -> Option<Term> {
    let line = raw.trim().trim_matches(is_quote).trim();
    if line.is_empty() {
        return None;
    }

    let split = separators
        .iter()
        .find_map(|sep| line.split_once(sep.as_char()));

    let (text, image_url) = match split {
        Some((text, rest)) => {
            let url = rest.trim();
            (text.trim(), (!url.is_empty()).then(|| url.to_string()))
        }
        None => (line, None),
    };

    if text.is_empty() {
        return None;
    }

    Some(Term {
        text: text.to_string(),
        image_url,
    })
}

/// Parse every line of `raw`, dropping lines that yield no term.
pub fn parse_terms(raw: &str, separators: &[Separator]) -> Vec<Term> {
    raw.lines()
        .filter_map(|line| parse_term_line(line, separators))
        .collect()
}

/// Parsed term list, as entered on the setup panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermList {
    terms: Vec<Term>,
}

impl TermList {
    pub fn parse(raw: &str, separators: &[Separator]) -> Self {
        Self {
            terms: parse_terms(raw, separators),
        }
    }

    /// Number of valid terms detected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// First `n` terms in input order, or `None` if there are fewer.
    #[must_use]
    pub fn take(&self, n: usize) -> Option<&[Term]> {
        self.terms.get(..n)
    }
}

impl From<Vec<Term>> for TermList {
    fn from(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}
