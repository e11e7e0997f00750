use chumsky::{input::ValueInput, prelude::*};

use crate::lexer::Token;

/// A raw query item before validation: an optionally negated word or phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    pub negated: bool,
    pub atom: ParsedAtom,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedAtom {
    /// Bare word, e.g. `refund`
    Word(String),

    /// Quoted phrase without the surrounding quotes, e.g. `refund policy`
    Phrase(String),
}

impl ParsedAtom {
    pub fn raw_str(&self) -> &str {
        match self {
            ParsedAtom::Word(s) => s,
            ParsedAtom::Phrase(s) => s,
        }
    }
}

/// Parser for web-search style queries
///
/// Grammar:
/// ```text
/// query := item* '-'*
/// item  := '-'* atom
/// atom  := Word | Phrase
/// ```
///
/// A run of `-` in front of an atom negates it; dangling `-` with nothing
/// after it is dropped, matching how forgiving web search boxes behave.
pub fn parser<'tokens, I>()
-> impl Parser<'tokens, I, Vec<ParsedItem>, extra::Err<Rich<'tokens, Token>>>
where
    I: ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
{
    let atom = select! {
        Token::Word(s) => ParsedAtom::Word(s),
        Token::Phrase(s) => ParsedAtom::Phrase(s),
    };

    let item = just(Token::Minus)
        .repeated()
        .collect::<Vec<_>>()
        .then(atom)
        .map(|(minuses, atom)| ParsedItem {
            negated: !minuses.is_empty(),
            atom,
        });

    item.repeated()
        .collect::<Vec<_>>()
        .then_ignore(just(Token::Minus).repeated())
}

/// Lex and parse a query string into raw items.
///
/// Lexer errors (stray quotes and the like) are skipped rather than
/// reported; the remaining tokens still parse.
pub fn parse_items(input: &str) -> Result<Vec<ParsedItem>, String> {
    use chumsky::input::Stream;
    use logos::Logos;

    let token_iter = Token::lexer(input)
        .spanned()
        .filter_map(|(token, span)| token.ok().map(|t| (t, SimpleSpan::from(span))));

    let token_stream = Stream::from_iter(token_iter)
        .map((0..input.len()).into(), |(t, s): (_, _)| (t, s));

    parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errors| format!("{:?}", errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_terms() {
        let items = parse_items("refund policy").unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| !i.negated));
        assert_eq!(items[0].atom.raw_str(), "refund");
        assert_eq!(items[1].atom.raw_str(), "policy");
    }

    #[test]
    fn test_phrase() {
        let items = parse_items(r#""refund policy" faq"#).unwrap();
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0].atom, ParsedAtom::Phrase(p) if p == "refund policy"));
        assert!(matches!(&items[1].atom, ParsedAtom::Word(w) if w == "faq"));
    }

    #[test]
    fn test_negation() {
        let items = parse_items("refund -draft").unwrap();
        assert!(!items[0].negated);
        assert!(items[1].negated);
    }

    #[test]
    fn test_negated_phrase() {
        let items = parse_items(r#"refund -"work in progress""#).unwrap();
        assert!(items[1].negated);
        assert!(matches!(&items[1].atom, ParsedAtom::Phrase(p) if p == "work in progress"));
    }

    #[test]
    fn test_double_minus() {
        let items = parse_items("--draft").unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].negated);
    }

    #[test]
    fn test_dangling_minus_dropped() {
        let items = parse_items("refund -").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].atom.raw_str(), "refund");
    }

    #[test]
    fn test_empty_input() {
        let items = parse_items("").unwrap();
        assert!(items.is_empty());
    }
}
