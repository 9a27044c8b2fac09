//! Cursor over a borrowed token slice.

use sprig_lexer::Token;

/// Token cursor with lookahead.
///
/// Positions are indices into the backing slice, so consumed ranges can be
/// handed out as sub-slices without copying.
#[derive(Debug, Clone)]
pub(crate) struct TokenStream<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenStream<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Peek at the nth token ahead without consuming.
    pub fn peek_nth(&self, n: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + n)
    }

    /// Advance to the next token and return the current one.
    pub fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if `accept` approves it.
    pub fn advance_if(&mut self, accept: impl FnOnce(&Token) -> bool) -> Option<&'t Token> {
        match self.peek() {
            Some(token) if accept(token) => self.advance(),
            _ => None,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Tokens consumed since `start`.
    pub fn slice_from(&self, start: usize) -> &'t [Token] {
        &self.tokens[start..self.pos]
    }

    /// Tokens not yet consumed.
    pub fn rest(&self) -> &'t [Token] {
        &self.tokens[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumed_and_rest_partition_the_slice() {
        let tokens = [Token::Integer(1), Token::Comma, Token::Integer(2)];
        let mut stream = TokenStream::new(&tokens);
        assert_eq!(stream.advance(), Some(&Token::Integer(1)));
        assert_eq!(stream.advance_if(|t| *t == Token::Integer(9)), None);
        assert_eq!(stream.advance_if(|t| *t == Token::Comma), Some(&Token::Comma));
        assert_eq!(stream.slice_from(0), &tokens[..2]);
        assert_eq!(stream.rest(), &tokens[2..]);
        assert_eq!(stream.peek_nth(1), None);
        stream.advance();
        assert!(stream.at_end());
        assert_eq!(stream.advance(), None);
    }
}
