use crate::Error;

/// A lexical token of a math expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Variable(String),
    /// A name immediately followed by `(`, other than a bound variable.
    Function(String),
    /// A binary operator: one of `+ - * / % ^`.
    BinOp(char),
    /// Prefix minus.
    Neg,
    OParen,
    CParen,
    Comma,
}

/// Splits an expression into [`Token`]s.
///
/// A `-` is a prefix minus when nothing that can end an operand precedes it.
/// A prefix `+` is dropped. `**` is accepted as a spelling of `^`.
/// Multiplication is inserted between an operand (number, variable, closing
/// parenthesis) and a following variable, function, or opening parenthesis,
/// so `1.7x` reads as `1.7*x` and `2(x+1)` as `2*(x+1)`. The bound names
/// `x`, `e` and `pi` are never calls, so `x(x+1)` reads as `x*(x+1)`.
const BOUND: [&str; 3] = ["x", "e", "pi"];

pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    prev: Option<Token>,
    pending: Option<Token>,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            prev: None,
            pending: None,
            failed: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    // A minus is prefix unless the previous token can end an operand.
    fn ends_operand(prev: Option<&Token>) -> bool {
        matches!(
            prev,
            Some(Token::Number(_) | Token::Variable(_) | Token::CParen)
        )
    }

    fn starts_operand(token: &Token) -> bool {
        matches!(
            token,
            Token::Variable(_) | Token::Function(_) | Token::OParen
        )
    }

    fn scan_number(&mut self) -> Result<Token, Error> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if self.peek() == Some('.') {
            self.bump();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }
        // Only treat `e` as an exponent when digits follow, so `2e` is `2*e`.
        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_follows = match self.peek_nth(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.peek_nth(2).is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent_follows {
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                }
            }
        }
        let lexeme = &self.src[start..self.pos];
        lexeme
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| Error::BadToken(lexeme.to_string()))
    }

    fn scan_name(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }
        let name = self.src[start..self.pos].to_string();
        if self.peek() == Some('(') && !BOUND.contains(&name.as_str()) {
            Token::Function(name)
        } else {
            Token::Variable(name)
        }
    }

    fn scan(&mut self) -> Option<Result<Token, Error>> {
        loop {
            self.skip_ws();
            let c = self.peek()?;
            let token = match c {
                '0'..='9' | '.' => return Some(self.scan_number()),
                c if c.is_alphabetic() || c == '_' => return Some(Ok(self.scan_name())),
                '(' => Token::OParen,
                ')' => Token::CParen,
                ',' => Token::Comma,
                '-' if !Self::ends_operand(self.prev.as_ref()) => Token::Neg,
                '+' if !Self::ends_operand(self.prev.as_ref()) => {
                    self.bump();
                    continue;
                }
                '*' if self.peek_nth(1) == Some('*') => {
                    self.bump();
                    Token::BinOp('^')
                }
                '+' | '-' | '*' | '/' | '%' | '^' => Token::BinOp(c),
                other => {
                    self.bump();
                    return Some(Err(Error::BadToken(other.to_string())));
                }
            };
            self.bump();
            return Some(Ok(token));
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = match self.pending.take() {
            Some(token) => token,
            None => match self.scan()? {
                Ok(token) => token,
                Err(error) => {
                    self.failed = true;
                    return Some(Err(error));
                }
            },
        };

        let token = if Self::ends_operand(self.prev.as_ref()) && Self::starts_operand(&token) {
            self.pending = Some(token);
            Token::BinOp('*')
        } else {
            token
        };

        self.prev = Some(token.clone());
        Some(Ok(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        Tokenizer::new(src)
            .collect::<Result<_, _>>()
            .expect("should tokenize")
    }

    fn var(name: &str) -> Token {
        Token::Variable(name.to_string())
    }

    #[test]
    fn basic_ops() {
        assert_eq!(
            tokens("3+4*2/-(1-5)^2"),
            vec![
                Token::Number(3.0),
                Token::BinOp('+'),
                Token::Number(4.0),
                Token::BinOp('*'),
                Token::Number(2.0),
                Token::BinOp('/'),
                Token::Neg,
                Token::OParen,
                Token::Number(1.0),
                Token::BinOp('-'),
                Token::Number(5.0),
                Token::CParen,
                Token::BinOp('^'),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(
            tokens("-0.9x^2 + 1.7x"),
            vec![
                Token::Neg,
                Token::Number(0.9),
                Token::BinOp('*'),
                var("x"),
                Token::BinOp('^'),
                Token::Number(2.0),
                Token::BinOp('+'),
                Token::Number(1.7),
                Token::BinOp('*'),
                var("x"),
            ]
        );
        assert_eq!(
            tokens("2(x+1)sin(x)"),
            vec![
                Token::Number(2.0),
                Token::BinOp('*'),
                Token::OParen,
                var("x"),
                Token::BinOp('+'),
                Token::Number(1.0),
                Token::CParen,
                Token::BinOp('*'),
                Token::Function("sin".to_string()),
                Token::OParen,
                var("x"),
                Token::CParen,
            ]
        );
    }

    #[test]
    fn bound_names_multiply_a_parenthesis() {
        assert_eq!(
            tokens("x(x+1)"),
            vec![
                var("x"),
                Token::BinOp('*'),
                Token::OParen,
                var("x"),
                Token::BinOp('+'),
                Token::Number(1.0),
                Token::CParen,
            ]
        );
        assert_eq!(
            tokens("pi(e)"),
            vec![
                var("pi"),
                Token::BinOp('*'),
                Token::OParen,
                var("e"),
                Token::CParen,
            ]
        );
        assert_eq!(tokens("f(x)")[0], Token::Function("f".to_string()));
    }

    #[test]
    fn exponents_and_euler() {
        assert_eq!(tokens("3.4e-2"), vec![Token::Number(3.4e-2)]);
        assert_eq!(
            tokens("2e"),
            vec![Token::Number(2.0), Token::BinOp('*'), var("e")]
        );
        assert_eq!(
            tokens("e^x"),
            vec![var("e"), Token::BinOp('^'), var("x")]
        );
    }

    #[test]
    fn unary_signs() {
        assert_eq!(
            tokens("+x - -2"),
            vec![var("x"), Token::BinOp('-'), Token::Neg, Token::Number(2.0)]
        );
        assert_eq!(
            tokens("x**2"),
            vec![var("x"), Token::BinOp('^'), Token::Number(2.0)]
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        let result: Result<Vec<_>, _> = Tokenizer::new("x # 2").collect();
        assert_eq!(result, Err(Error::BadToken("#".to_string())));
    }
}
