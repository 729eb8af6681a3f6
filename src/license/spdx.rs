use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::SpdxError;
use crate::license::ids::{self, Listed};

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9.\-]+$").unwrap());
static REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(DocumentRef-[A-Za-z0-9.\-]+:)?LicenseRef-[A-Za-z0-9.\-]+$").unwrap()
});

/// How picky the parser is about license and exception identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Any syntactically valid identifier.
    AllowAny,
    /// Known identifiers, including deprecated ones.
    AllowDeprecated,
    /// Only current, non-deprecated identifiers.
    AllowCurrent,
}

/// A parsed SPDX license expression.
///
/// `Display` renders the normalized form: canonical identifier case, upper-case
/// operators and parentheses only where `OR` sits below `AND` or `WITH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpdxExpression {
    License { id: String, or_later: bool },
    LicenseRef(String),
    With {
        license: Box<SpdxExpression>,
        exception: String,
    },
    And(Box<SpdxExpression>, Box<SpdxExpression>),
    Or(Box<SpdxExpression>, Box<SpdxExpression>),
}

impl SpdxExpression {
    /// Parse `text`, validating every identifier against `strictness`.
    pub fn parse(text: &str, strictness: Strictness) -> Result<Self, SpdxError> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Err(SpdxError::Empty);
        }

        let mut parser = ExprParser {
            tokens,
            pos: 0,
            strictness,
        };
        let expr = parser.parse_or()?;

        match parser.consume() {
            None => Ok(expr),
            Some(Token::RParen) => Err(SpdxError::UnbalancedParens),
            Some(token) => Err(SpdxError::UnexpectedToken(token.to_string())),
        }
    }
}

impl std::fmt::Display for SpdxExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpdxExpression::License { id, or_later } => {
                write!(f, "{}{}", id, if *or_later { "+" } else { "" })
            }
            SpdxExpression::LicenseRef(reference) => write!(f, "{}", reference),
            SpdxExpression::With { license, exception } => {
                write!(f, "{} WITH {}", license, exception)
            }
            SpdxExpression::And(left, right) => {
                write_and_operand(f, left)?;
                write!(f, " AND ")?;
                write_and_operand(f, right)
            }
            SpdxExpression::Or(left, right) => write!(f, "{} OR {}", left, right),
        }
    }
}

fn write_and_operand(f: &mut std::fmt::Formatter<'_>, expr: &SpdxExpression) -> std::fmt::Result {
    match expr {
        SpdxExpression::Or(..) => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}

impl Serialize for SpdxExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Clone)]
enum Token {
    Id(String),
    And,
    Or,
    With,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Id(id) => write!(f, "{}", id),
            Token::And => write!(f, "AND"),
            Token::Or => write!(f, "OR"),
            Token::With => write!(f, "WITH"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

impl Token {
    /// Classify a bare word. Operators are matched case-insensitively.
    fn word(word: &str) -> Token {
        if word.eq_ignore_ascii_case("AND") {
            Token::And
        } else if word.eq_ignore_ascii_case("OR") {
            Token::Or
        } else if word.eq_ignore_ascii_case("WITH") {
            Token::With
        } else {
            Token::Id(word.to_string())
        }
    }
}

/// Split an expression into tokens. Words run until whitespace or a parenthesis.
fn tokenize(expr: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = expr.trim_start();

    while let Some(c) = rest.chars().next() {
        let len = match c {
            '(' => {
                tokens.push(Token::LParen);
                1
            }
            ')' => {
                tokens.push(Token::RParen);
                1
            }
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
                    .unwrap_or(rest.len());
                tokens.push(Token::word(&rest[..end]));
                end
            }
        };
        rest = rest[len..].trim_start();
    }

    tokens
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Recursive descent parser, `WITH` binds tighter than `AND`, which binds tighter than `OR`.
///
/// ```text
/// or_expr   := and_expr ( "OR" and_expr )*
/// and_expr  := with_expr ( "AND" with_expr )*
/// with_expr := "(" or_expr ")" | id ( "WITH" id )?
/// ```
struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    strictness: Strictness,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn parse_or(&mut self) -> Result<SpdxExpression, SpdxError> {
        let mut result = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.consume();
            let rhs = self.parse_and()?;
            result = SpdxExpression::Or(Box::new(result), Box::new(rhs));
        }
        Ok(result)
    }

    fn parse_and(&mut self) -> Result<SpdxExpression, SpdxError> {
        let mut result = self.parse_with()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.consume();
            let rhs = self.parse_with()?;
            result = SpdxExpression::And(Box::new(result), Box::new(rhs));
        }
        Ok(result)
    }

    fn parse_with(&mut self) -> Result<SpdxExpression, SpdxError> {
        match self.consume() {
            Some(Token::LParen) => {
                let result = self.parse_or()?;
                match self.consume() {
                    Some(Token::RParen) => Ok(result),
                    _ => Err(SpdxError::UnbalancedParens),
                }
            }
            Some(Token::Id(id)) => {
                let license = self.license(&id)?;
                if !matches!(self.peek(), Some(Token::With)) {
                    return Ok(license);
                }
                self.consume();
                match self.consume() {
                    Some(Token::Id(exception)) => Ok(SpdxExpression::With {
                        license: Box::new(license),
                        exception: self.exception(&exception)?,
                    }),
                    Some(token) => Err(SpdxError::UnexpectedToken(token.to_string())),
                    None => Err(SpdxError::UnexpectedEnd),
                }
            }
            Some(Token::RParen) => Err(SpdxError::UnbalancedParens),
            Some(token) => Err(SpdxError::UnexpectedToken(token.to_string())),
            None => Err(SpdxError::UnexpectedEnd),
        }
    }

    fn license(&self, raw: &str) -> Result<SpdxExpression, SpdxError> {
        if raw.starts_with("LicenseRef-") || raw.starts_with("DocumentRef-") {
            return if REF_RE.is_match(raw) {
                Ok(SpdxExpression::LicenseRef(raw.to_string()))
            } else {
                Err(SpdxError::InvalidReference(raw.to_string()))
            };
        }

        let (id, or_later) = match raw.strip_suffix('+') {
            Some(base) => (base, true),
            None => (raw, false),
        };

        if !ID_RE.is_match(id) {
            return Err(SpdxError::UnexpectedToken(raw.to_string()));
        }

        let id = resolve(
            id,
            self.strictness,
            ids::license,
            SpdxError::UnknownLicense,
            SpdxError::DeprecatedLicense,
        )?;

        Ok(SpdxExpression::License { id, or_later })
    }

    fn exception(&self, raw: &str) -> Result<String, SpdxError> {
        if !ID_RE.is_match(raw) {
            return Err(SpdxError::UnexpectedToken(raw.to_string()));
        }

        resolve(
            raw,
            self.strictness,
            ids::exception,
            SpdxError::UnknownException,
            SpdxError::DeprecatedException,
        )
    }
}

/// Map `id` to its canonical spelling, or reject it under `strictness`.
fn resolve(
    id: &str,
    strictness: Strictness,
    lookup: fn(&str) -> Option<Listed>,
    unknown: fn(String) -> SpdxError,
    deprecated_err: fn(String) -> SpdxError,
) -> Result<String, SpdxError> {
    match (lookup(id), strictness) {
        (Some(Listed { id, deprecated: false }), _) => Ok(id.to_string()),
        (Some(Listed { id, .. }), Strictness::AllowAny | Strictness::AllowDeprecated) => {
            Ok(id.to_string())
        }
        (Some(Listed { id, .. }), Strictness::AllowCurrent) => Err(deprecated_err(id.to_string())),
        (None, Strictness::AllowAny) => Ok(id.to_string()),
        (None, _) => Err(unknown(id.to_string())),
    }
}
