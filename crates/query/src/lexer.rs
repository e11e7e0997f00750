use logos::Logos;

/// Tokens of the web-style search grammar.
///
/// The grammar is deliberately small: bare words, quoted phrases and a `-`
/// exclusion prefix. `-` is only an operator at the start of a token, so
/// words like `e-mail` stay in one piece.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\n\f]+")]
pub enum Token {
    #[token("-")]
    Minus,

    #[regex(r#""([^"\\]|\\.)*""#, phrase_inner_string)]
    Phrase(String),

    #[regex(r#"[^ \t\n\f"-][^ \t\n\f"]*"#, |lex| lex.slice().to_string())]
    Word(String),
}

fn phrase_inner_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice.get(1..slice.len() - 1).unwrap_or_default().to_string()
}
