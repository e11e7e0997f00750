pub mod lexer;
pub mod parser;
pub mod validator;

pub use lexer::Token;
pub use parser::{ParsedAtom, ParsedItem, parse_items, parser};
pub use validator::{Atom, QueryError, WebQuery, validate, words};

/// Parse and validate a raw query string in one step.
pub fn parse_query(input: &str) -> Result<WebQuery, QueryError> {
    let items = parse_items(input).map_err(QueryError::Syntax)?;
    validate(items)
}
