//! Token tree model consumed by the parser.
//!
//! Tokens arrive already grouped: every bracketed region is a single
//! [`Token::Block`] whose body is its own token sequence, and every `<...>`
//! region is a [`Token::TypeParam`]. String interpolations keep their
//! embedded expressions as `{...}` blocks inside [`Token::String`].

use std::fmt;

/// A lexical token.
///
/// Display output is diagnostic text. Adjacent tokens are separated by a
/// space unless one of them is [`Token::Whitespace`] or
/// [`Token::Juxtapose`], so whitespace-bearing streams print as they were
/// written and inverted streams print with their adjacency made explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Identifier such as `x`, `print` or `true`.
    Identifier(String),
    /// Decimal integer literal.
    Integer(u64),
    /// Integer written with a radix prefix. `src` keeps the literal text.
    BasedNumber { src: String, value: u64 },
    /// `r"..."`, body kept verbatim.
    RawString(String),
    /// `"..."` with escapes resolved and `{...}` interpolations kept as blocks.
    String(Vec<StringPart>),
    /// Bracketed region `(...)`, `[...]` or `{...}`.
    Block(Block),
    /// Angle-bracketed region `<...>`.
    TypeParam(Vec<Token>),
    /// `#name`
    Hashtag(String),
    /// `..`
    DotDot,
    Operator(Operator),
    /// An operator applied element-wise, written `.+`, `.<?` and so on.
    Broadcast(Operator),
    ShiftOperator(ShiftOp),
    Comma,
    Keyword(Keyword),
    /// A run of whitespace or comments.
    Whitespace,
    /// Marker for two tokens written with no whitespace between them.
    /// Only produced by whitespace inversion.
    Juxtapose,
}

impl Token {
    /// True for tokens that can stand on their own as the core of an expression.
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::Integer(_)
                | Token::BasedNumber { .. }
                | Token::RawString(_)
                | Token::String(_)
                | Token::Block(_)
                | Token::TypeParam(_)
                | Token::Hashtag(_)
                | Token::DotDot
        )
    }

    /// True for tokens whose meaning does not depend on surrounding
    /// whitespace. Juxtaposition markers next to them carry no information.
    pub fn is_whitespace_insensitive(&self) -> bool {
        matches!(
            self,
            Token::Operator(_)
                | Token::Broadcast(_)
                | Token::ShiftOperator(_)
                | Token::Comma
                | Token::Keyword(_)
        )
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Token::Keyword(k) if *k == keyword)
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, Token::Operator(o) if *o == op)
    }
}

/// Body of a bracketed token.
///
/// The lexer pairs brackets by nesting only, so `left` and `right` may be
/// any combination of `(`, `[`, `{` and `)`, `]`, `}`. Whether a pair is
/// legal is decided later by the brace validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub left: char,
    pub right: char,
    pub body: Vec<Token>,
}

impl Block {
    pub fn new(left: char, right: char, body: Vec<Token>) -> Self {
        Self { left, right, body }
    }
}

/// A piece of a string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringPart {
    Text(String),
    /// An interpolated `{...}` expression.
    Block(Block),
}

/// Operators that are not shifts.
///
/// An operator may be usable in binary, prefix or postfix position; the
/// chain segmenter asks [`Operator::is_prefix`] and friends to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    /// `÷`
    IntDivide,
    Percent,
    Caret,
    /// `=`
    Assign,
    /// `=?`
    Equal,
    /// `<?`
    Less,
    /// `<=?`
    LessEqual,
    /// `>?`
    Greater,
    /// `>=?`
    GreaterEqual,
    /// `->`
    Arrow,
    /// `<->`
    BiArrow,
    /// `=>`
    FatArrow,
    /// `:>`
    ReturnArrow,
    Dot,
    Colon,
    At,
    /// `` ` ``
    Backtick,
    Semicolon,
    /// `...`
    Ellipsis,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    Not,
    In,
    /// `in?`
    InQuery,
}

/// Every operator paired with its source spelling.
const OPERATOR_SYMBOLS: &[(Operator, &str)] = &[
    (Operator::Plus, "+"),
    (Operator::Minus, "-"),
    (Operator::Star, "*"),
    (Operator::Slash, "/"),
    (Operator::IntDivide, "÷"),
    (Operator::Percent, "%"),
    (Operator::Caret, "^"),
    (Operator::Assign, "="),
    (Operator::Equal, "=?"),
    (Operator::Less, "<?"),
    (Operator::LessEqual, "<=?"),
    (Operator::Greater, ">?"),
    (Operator::GreaterEqual, ">=?"),
    (Operator::Arrow, "->"),
    (Operator::BiArrow, "<->"),
    (Operator::FatArrow, "=>"),
    (Operator::ReturnArrow, ":>"),
    (Operator::Dot, "."),
    (Operator::Colon, ":"),
    (Operator::At, "@"),
    (Operator::Backtick, "`"),
    (Operator::Semicolon, ";"),
    (Operator::Ellipsis, "..."),
    (Operator::And, "and"),
    (Operator::Or, "or"),
    (Operator::Xor, "xor"),
    (Operator::Nand, "nand"),
    (Operator::Nor, "nor"),
    (Operator::Xnor, "xnor"),
    (Operator::Not, "not"),
    (Operator::In, "in"),
    (Operator::InQuery, "in?"),
];

impl Operator {
    pub const ALL: [Operator; 32] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Star,
        Operator::Slash,
        Operator::IntDivide,
        Operator::Percent,
        Operator::Caret,
        Operator::Assign,
        Operator::Equal,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
        Operator::Arrow,
        Operator::BiArrow,
        Operator::FatArrow,
        Operator::ReturnArrow,
        Operator::Dot,
        Operator::Colon,
        Operator::At,
        Operator::Backtick,
        Operator::Semicolon,
        Operator::Ellipsis,
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::Nand,
        Operator::Nor,
        Operator::Xnor,
        Operator::Not,
        Operator::In,
        Operator::InQuery,
    ];

    pub fn symbol(self) -> &'static str {
        OPERATOR_SYMBOLS
            .iter()
            .find(|(op, _)| *op == self)
            .map(|(_, symbol)| *symbol)
            .unwrap_or("?")
    }

    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        OPERATOR_SYMBOLS
            .iter()
            .find(|(_, s)| *s == symbol)
            .map(|(op, _)| *op)
    }

    /// Looks up a word operator (`and`, `not`, ...) by its spelling.
    pub fn from_word(word: &str) -> Option<Operator> {
        Self::from_symbol(word).filter(|op| op.is_word())
    }

    /// Spelled with letters rather than punctuation.
    pub fn is_word(self) -> bool {
        self.symbol().starts_with(|c: char| c.is_ascii_alphabetic())
    }

    pub fn is_prefix(self) -> bool {
        matches!(
            self,
            Operator::Plus
                | Operator::Minus
                | Operator::Star
                | Operator::Slash
                | Operator::Not
                | Operator::At
                | Operator::Ellipsis
        )
    }

    pub fn is_postfix(self) -> bool {
        matches!(self, Operator::Backtick | Operator::Semicolon)
    }

    pub fn is_binary(self) -> bool {
        !matches!(
            self,
            Operator::Not
                | Operator::At
                | Operator::Ellipsis
                | Operator::Backtick
                | Operator::Semicolon
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Bit shift and rotate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftOp {
    /// `<<`
    Left,
    /// `>>`
    Right,
    /// `<<<`
    RotateLeft,
    /// `>>>`
    RotateRight,
    /// `<<!`
    RotateLeftCarry,
    /// `!>>`
    RotateRightCarry,
}

impl ShiftOp {
    pub const ALL: [ShiftOp; 6] = [
        ShiftOp::Left,
        ShiftOp::Right,
        ShiftOp::RotateLeft,
        ShiftOp::RotateRight,
        ShiftOp::RotateLeftCarry,
        ShiftOp::RotateRightCarry,
    ];

    pub fn from_symbol(symbol: &str) -> Option<ShiftOp> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ShiftOp::Left => "<<",
            ShiftOp::Right => ">>",
            ShiftOp::RotateLeft => "<<<",
            ShiftOp::RotateRight => ">>>",
            ShiftOp::RotateLeftCarry => "<<!",
            ShiftOp::RotateRightCarry => "!>>",
        }
    }
}

impl fmt::Display for ShiftOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    Else,
    Loop,
    Let,
    Const,
    Break,
    Continue,
    Express,
    Return,
    Import,
}

impl Keyword {
    pub const ALL: [Keyword; 10] = [
        Keyword::If,
        Keyword::Else,
        Keyword::Loop,
        Keyword::Let,
        Keyword::Const,
        Keyword::Break,
        Keyword::Continue,
        Keyword::Express,
        Keyword::Return,
        Keyword::Import,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Loop => "loop",
            Keyword::Let => "let",
            Keyword::Const => "const",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Express => "express",
            Keyword::Return => "return",
            Keyword::Import => "import",
        }
    }

    pub fn from_word(word: &str) -> Option<Keyword> {
        Keyword::ALL.into_iter().find(|k| k.as_str() == word)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => f.write_str(name),
            Token::Integer(value) => write!(f, "{value}"),
            Token::BasedNumber { src, .. } => f.write_str(src),
            Token::RawString(body) => write!(f, "r\"{body}\""),
            Token::String(parts) => {
                f.write_str("\"")?;
                for part in parts {
                    match part {
                        StringPart::Text(text) => f.write_str(&escape(text))?,
                        StringPart::Block(block) => write!(f, "{block}")?,
                    }
                }
                f.write_str("\"")
            }
            Token::Block(block) => write!(f, "{block}"),
            Token::TypeParam(body) => write!(f, "<{}>", DisplayTokens(body)),
            Token::Hashtag(name) => write!(f, "#{name}"),
            Token::DotDot => f.write_str(".."),
            Token::Operator(op) => write!(f, "{op}"),
            Token::Broadcast(op) => write!(f, ".{op}"),
            Token::ShiftOperator(op) => write!(f, "{op}"),
            Token::Comma => f.write_str(","),
            Token::Keyword(keyword) => write!(f, "{keyword}"),
            Token::Whitespace => f.write_str(" "),
            Token::Juxtapose => Ok(()),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, DisplayTokens(&self.body), self.right)
    }
}

/// Displays a token sequence with the spacing rule described on [`Token`].
pub struct DisplayTokens<'a>(pub &'a [Token]);

impl fmt::Display for DisplayTokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev: Option<&Token> = None;
        for token in self.0 {
            if let Some(prev) = prev {
                let glued = matches!(prev, Token::Whitespace | Token::Juxtapose)
                    || matches!(token, Token::Whitespace | Token::Juxtapose);
                if !glued {
                    f.write_str(" ")?;
                }
            }
            write!(f, "{token}")?;
            prev = Some(token);
        }
        Ok(())
    }
}

/// Renders a token sequence as diagnostic text.
pub fn render_tokens(tokens: &[Token]) -> String {
    DisplayTokens(tokens).to_string()
}

/// Escapes string literal text so it can be re-read by the lexer.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            _ => out.push(c),
        }
    }
    out
}
