//! Reference tokenizer producing the token tree.
//!
//! Flat lexemes come from a logos-generated scanner; a small stack of open
//! frames then folds bracketed regions into [`Token::Block`] and
//! [`Token::TypeParam`] values. String literals are scanned by hand so that
//! `{...}` interpolations can be tokenized recursively.

use logos::Logos;
use thiserror::Error;

use crate::token::{Block, Keyword, Operator, ShiftOp, StringPart, Token};

/// Errors raised while tokenizing source text. Offsets are byte positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized input {text:?} at byte {offset}")]
    Unrecognized { text: String, offset: usize },

    #[error("'{close}' at byte {offset} has no matching opener")]
    UnmatchedClose { close: char, offset: usize },

    #[error("'{open}' opened at byte {offset} is never closed")]
    Unclosed { open: char, offset: usize },

    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("integer literal {text:?} at byte {offset} does not fit in 64 bits")]
    IntegerOverflow { text: String, offset: usize },
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[regex(r"[ \t\r\n]+")]
    #[regex(r"//[^\n]*")]
    Whitespace,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[token("in?")]
    InQuery,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"0[xX][0-9A-Fa-f_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"0[oO][0-7_]+")]
    BasedNumber,

    #[regex(r#"r"[^"]*""#)]
    RawString,

    #[token("\"")]
    Quote,

    #[regex(r"#[A-Za-z_][A-Za-z0-9_]*")]
    Hashtag,

    #[token("(")]
    #[token("[")]
    #[token("{")]
    Open,

    #[token(")")]
    #[token("]")]
    #[token("}")]
    Close,

    #[token("<")]
    AngleOpen,

    #[token(">")]
    AngleClose,

    #[token("..")]
    DotDot,

    #[token(",")]
    Comma,

    #[token(".+")]
    #[token(".-")]
    #[token(".*")]
    #[token("./")]
    #[token(".÷")]
    #[token(".%")]
    #[token(".^")]
    #[token(".=?")]
    #[token(".<?")]
    #[token(".<=?")]
    #[token(".>?")]
    #[token(".>=?")]
    Broadcast,

    #[token("<<")]
    #[token(">>")]
    #[token("<<<")]
    #[token(">>>")]
    #[token("<<!")]
    #[token("!>>")]
    Shift,

    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("÷")]
    #[token("%")]
    #[token("^")]
    #[token("=")]
    #[token("=?")]
    #[token("<?")]
    #[token("<=?")]
    #[token(">?")]
    #[token(">=?")]
    #[token("->")]
    #[token("<->")]
    #[token("=>")]
    #[token(":>")]
    #[token(".")]
    #[token(":")]
    #[token("@")]
    #[token("`")]
    #[token(";")]
    #[token("...")]
    Symbol,
}

/// Tokenizes `source` into a token tree.
///
/// Whitespace runs and `//` comments are kept as single
/// [`Token::Whitespace`] tokens since adjacency is meaningful to the parser.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    lex_at(source, 0)
}

fn lex_at(source: &str, base: usize) -> Result<Vec<Token>, LexError> {
    let mut tree = TreeBuilder::default();
    let mut lexer = Lexeme::lexer(source);

    while let Some(lexeme) = lexer.next() {
        let span = lexer.span();
        let offset = base + span.start;
        let slice = lexer.slice();
        let lexeme = lexeme.map_err(|()| LexError::Unrecognized {
            text: slice.to_string(),
            offset,
        })?;

        match lexeme {
            Lexeme::Whitespace => tree.push(Token::Whitespace),
            Lexeme::Word => tree.push(word_token(slice)),
            Lexeme::InQuery => tree.push(Token::Operator(Operator::InQuery)),
            Lexeme::Integer => {
                let value = slice.parse().map_err(|_| LexError::IntegerOverflow {
                    text: slice.to_string(),
                    offset,
                })?;
                tree.push(Token::Integer(value));
            }
            Lexeme::BasedNumber => tree.push(based_number(slice, offset)?),
            Lexeme::RawString => {
                let body = &slice[2..slice.len() - 1];
                tree.push(Token::RawString(body.to_string()));
            }
            Lexeme::Quote => {
                let (parts, consumed) = scan_string(lexer.remainder(), base + span.end, offset)?;
                lexer.bump(consumed);
                tree.push(Token::String(parts));
            }
            Lexeme::Hashtag => tree.push(Token::Hashtag(slice[1..].to_string())),
            Lexeme::Open => tree.open(leading_char(slice), offset),
            Lexeme::Close => tree.close(leading_char(slice), offset)?,
            Lexeme::AngleOpen => tree.open('<', offset),
            Lexeme::AngleClose => tree.close('>', offset)?,
            Lexeme::DotDot => tree.push(Token::DotDot),
            Lexeme::Comma => tree.push(Token::Comma),
            Lexeme::Broadcast => {
                let op = Operator::from_symbol(&slice[1..]).ok_or_else(|| LexError::Unrecognized {
                    text: slice.to_string(),
                    offset,
                })?;
                tree.push(Token::Broadcast(op));
            }
            Lexeme::Shift => {
                let op = ShiftOp::from_symbol(slice).ok_or_else(|| LexError::Unrecognized {
                    text: slice.to_string(),
                    offset,
                })?;
                tree.push(Token::ShiftOperator(op));
            }
            Lexeme::Symbol => {
                let op = Operator::from_symbol(slice).ok_or_else(|| LexError::Unrecognized {
                    text: slice.to_string(),
                    offset,
                })?;
                tree.push(Token::Operator(op));
            }
        }
    }

    tree.finish()
}

fn leading_char(slice: &str) -> char {
    slice.chars().next().unwrap_or_default()
}

fn word_token(word: &str) -> Token {
    if let Some(keyword) = Keyword::from_word(word) {
        Token::Keyword(keyword)
    } else if let Some(op) = Operator::from_word(word) {
        Token::Operator(op)
    } else {
        Token::Identifier(word.to_string())
    }
}

fn based_number(src: &str, offset: usize) -> Result<Token, LexError> {
    let radix = match src.as_bytes().get(1) {
        Some(b'x' | b'X') => 16,
        Some(b'b' | b'B') => 2,
        _ => 8,
    };
    let digits: String = src[2..].chars().filter(|c| *c != '_').collect();
    if digits.is_empty() {
        return Err(LexError::Unrecognized {
            text: src.to_string(),
            offset,
        });
    }
    let value = u64::from_str_radix(&digits, radix).map_err(|_| LexError::IntegerOverflow {
        text: src.to_string(),
        offset,
    })?;
    Ok(Token::BasedNumber {
        src: src.to_string(),
        value,
    })
}

/// Scans a string body starting just after the opening quote.
///
/// Returns the parts and the number of bytes consumed including the closing
/// quote. `body_offset` is the absolute position of `rest`, `quote_offset`
/// the position of the opening quote.
fn scan_string(
    rest: &str,
    body_offset: usize,
    quote_offset: usize,
) -> Result<(Vec<StringPart>, usize), LexError> {
    let unterminated = LexError::UnterminatedString {
        offset: quote_offset,
    };
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    while let Some(c) = rest[pos..].chars().next() {
        match c {
            '"' => {
                if !text.is_empty() || parts.is_empty() {
                    parts.push(StringPart::Text(text));
                }
                return Ok((parts, pos + 1));
            }
            '\\' => {
                let escaped = rest[pos + 1..].chars().next().ok_or(unterminated.clone())?;
                match escaped {
                    'n' => text.push('\n'),
                    't' => text.push('\t'),
                    'r' => text.push('\r'),
                    '\\' | '"' | '{' | '}' => text.push(escaped),
                    other => {
                        text.push('\\');
                        text.push(other);
                    }
                }
                pos += 1 + escaped.len_utf8();
            }
            '{' => {
                let close = matching_brace(&rest[pos..]).ok_or(LexError::Unclosed {
                    open: '{',
                    offset: body_offset + pos,
                })?;
                if !text.is_empty() {
                    parts.push(StringPart::Text(std::mem::take(&mut text)));
                }
                let inner = &rest[pos + 1..pos + close];
                let body = lex_at(inner, body_offset + pos + 1)?;
                parts.push(StringPart::Block(Block::new('{', '}', body)));
                pos += close + 1;
            }
            _ => {
                text.push(c);
                pos += c.len_utf8();
            }
        }
    }

    Err(unterminated)
}

/// Byte index of the `}` closing the `{` at the start of `s`.
///
/// Quoted strings inside the interpolation are skipped so their braces do
/// not count.
fn matching_brace(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

struct Frame {
    open: char,
    offset: usize,
    tokens: Vec<Token>,
}

/// Folds a flat lexeme stream into nested blocks.
#[derive(Default)]
struct TreeBuilder {
    root: Vec<Token>,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn push(&mut self, token: Token) {
        let tokens = match self.stack.last_mut() {
            Some(frame) => &mut frame.tokens,
            None => &mut self.root,
        };
        // a comment followed by a newline is still one gap
        if token == Token::Whitespace && tokens.last() == Some(&Token::Whitespace) {
            return;
        }
        tokens.push(token);
    }

    fn open(&mut self, open: char, offset: usize) {
        self.stack.push(Frame {
            open,
            offset,
            tokens: Vec::new(),
        });
    }

    /// Brackets close whatever bracket is innermost; `>` only closes `<`.
    fn close(&mut self, close: char, offset: usize) -> Result<(), LexError> {
        let angle = close == '>';
        let frame = match self.stack.last() {
            Some(frame) if (frame.open == '<') == angle => self.stack.pop(),
            Some(frame) if frame.open == '<' => {
                return Err(LexError::Unclosed {
                    open: '<',
                    offset: frame.offset,
                });
            }
            _ => None,
        };
        let Some(frame) = frame else {
            return Err(LexError::UnmatchedClose { close, offset });
        };

        let token = if angle {
            Token::TypeParam(frame.tokens)
        } else {
            Token::Block(Block::new(frame.open, close, frame.tokens))
        };
        self.push(token);
        Ok(())
    }

    fn finish(self) -> Result<Vec<Token>, LexError> {
        match self.stack.last() {
            Some(frame) => Err(LexError::Unclosed {
                open: frame.open,
                offset: frame.offset,
            }),
            None => Ok(self.root),
        }
    }
}
