use std::fmt;

use winnow::ascii::digit1;
use winnow::combinator::{alt, opt};
use winnow::error::{ErrMode, ModalResult};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use crate::{CompareOp, Value};

use super::error::{ParseError, ParseErrorKind};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    LParen,
    RParen,
    And,
    Or,
    Not,
    Implies,
    Op(CompareOp),
    Literal(Value),
    Ident(String),
}

/// A token with its byte span in the trimmed source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) start: usize,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::And => write!(f, "'and'"),
            TokenKind::Or => write!(f, "'or'"),
            TokenKind::Not => write!(f, "'not'"),
            TokenKind::Implies => write!(f, "'implies'"),
            TokenKind::Op(op) => write!(f, "operator '{op}'"),
            TokenKind::Literal(value) => write!(f, "literal {value}"),
            TokenKind::Ident(name) => write!(f, "identifier '{name}'"),
        }
    }
}

// -- Literals ---------------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            c if c == quote => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\'' => s.push('\''),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn number(input: &mut &str) -> ModalResult<Value> {
    let text = (
        opt('-'),
        digit1,
        opt(('.', digit1)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;
    let is_integer = !text.contains(['.', 'e', 'E']);
    if is_integer {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Value::Int(i));
        }
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
        .ok_or_else(|| ErrMode::from_input(input))
}

// -- Words ------------------------------------------------------------------

fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1, |c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '-')
        }),
    )
        .take()
        .parse_next(input)
}

fn classify_word(word: &str) -> TokenKind {
    match word.to_ascii_lowercase().as_str() {
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "implies" => TokenKind::Implies,
        "true" => TokenKind::Literal(Value::Bool(true)),
        "false" => TokenKind::Literal(Value::Bool(false)),
        "null" => TokenKind::Literal(Value::Null),
        _ => match CompareOp::from_word(word) {
            Some(op) => TokenKind::Op(op),
            None => TokenKind::Ident(word.to_owned()),
        },
    }
}

// -- Symbols (longest match first) ------------------------------------------

fn symbol(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        alt((
            "&&".value(TokenKind::And),
            "||".value(TokenKind::Or),
            "!=".value(TokenKind::Op(CompareOp::Neq)),
            "==".value(TokenKind::Op(CompareOp::Eq)),
            "=|".value(TokenKind::Op(CompareOp::StartsWith)),
            ":=".value(TokenKind::Op(CompareOp::EqIgnoreCase)),
            ">=".value(TokenKind::Op(CompareOp::Gte)),
            "<=".value(TokenKind::Op(CompareOp::Lte)),
            "~~".value(TokenKind::Op(CompareOp::JavaRegex)),
            "~/".value(TokenKind::Op(CompareOp::MatchesPath)),
        )),
        alt((
            "(".value(TokenKind::LParen),
            ")".value(TokenKind::RParen),
            "!".value(TokenKind::Not),
            "=".value(TokenKind::Op(CompareOp::Eq)),
            ">".value(TokenKind::Op(CompareOp::Gt)),
            "<".value(TokenKind::Op(CompareOp::Lt)),
            "~".value(TokenKind::Op(CompareOp::Matches)),
        )),
    ))
    .parse_next(input)
}

fn token(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        string_literal.map(|s| TokenKind::Literal(Value::String(s))),
        number.map(TokenKind::Literal),
        word.map(classify_word),
        symbol,
    ))
    .parse_next(input)
}

/// Split trimmed condition text into tokens.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut input = source;
    let mut tokens = Vec::new();
    loop {
        input = input.trim_start();
        if input.is_empty() {
            return Ok(tokens);
        }
        let start = source.len() - input.len();
        match token.parse_next(&mut input) {
            Ok(kind) => tokens.push(Token { kind, start }),
            Err(_) => return Err(lex_error(source, start)),
        }
    }
}

fn lex_error(source: &str, start: usize) -> ParseError {
    let kind = match source[start..].chars().next() {
        Some('"' | '\'') => ParseErrorKind::UnterminatedString,
        Some(c) => ParseErrorKind::UnexpectedCharacter(c),
        None => ParseErrorKind::UnexpectedEnd {
            expected: "token".to_owned(),
        },
    };
    ParseError::at(source, start, kind)
}
