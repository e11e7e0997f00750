use crate::parser::{ParsedAtom, ParsedItem};
use std::fmt;

/// A validated web-style query: positive atoms that must match and negated
/// atoms that must not.
#[derive(Debug, Clone, PartialEq)]
pub struct WebQuery {
    pub must: Vec<Atom>,
    pub must_not: Vec<Atom>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// A single search term
    Term(String),
    /// A quoted phrase matched as a contiguous word sequence
    Phrase(String),
}

impl Atom {
    pub fn text(&self) -> &str {
        match self {
            Atom::Term(s) => s,
            Atom::Phrase(s) => s,
        }
    }

    /// Lowercased word tokens of this atom, split the same way the index
    /// tokenizer splits text.
    pub fn words(&self) -> Vec<String> {
        words(self.text())
    }
}

/// Split text into lowercased alphanumeric word tokens.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl WebQuery {
    /// All positive word tokens in query order.
    pub fn tokens(&self) -> Vec<String> {
        self.must.iter().flat_map(|a| a.words()).collect()
    }

    /// Render the query in the index backend's syntax. Every atom is
    /// emitted quoted, which turns punctuation-joined words into adjacent
    /// phrases and keeps backend metacharacters inert.
    pub fn to_index_syntax(&self) -> String {
        let mut parts = Vec::with_capacity(self.must.len() + self.must_not.len());
        for atom in &self.must {
            parts.push(quoted(atom.text()));
        }
        for atom in &self.must_not {
            parts.push(format!("-{}", quoted(atom.text())));
        }
        parts.join(" ")
    }
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace(['"', '\\'], " "))
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// No positive term survived validation
    Empty,
    /// The token stream did not parse
    Syntax(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Empty => write!(f, "query has no searchable terms"),
            QueryError::Syntax(msg) => write!(f, "query syntax error: {}", msg),
        }
    }
}

impl std::error::Error for QueryError {}

/// Turn raw parsed items into a `WebQuery`.
///
/// Atoms with no alphanumeric content are dropped (they cannot match any
/// tokenized text). A query left without a single positive atom is invalid.
pub fn validate(items: Vec<ParsedItem>) -> Result<WebQuery, QueryError> {
    let mut must = Vec::new();
    let mut must_not = Vec::new();

    for item in items {
        let atom = match item.atom {
            ParsedAtom::Word(w) => Atom::Term(w),
            ParsedAtom::Phrase(p) => Atom::Phrase(p.replace(r#"\""#, r#"""#)),
        };
        if atom.words().is_empty() {
            continue;
        }
        if item.negated {
            must_not.push(atom);
        } else {
            must.push(atom);
        }
    }

    if must.is_empty() {
        return Err(QueryError::Empty);
    }
    Ok(WebQuery { must, must_not })
}
