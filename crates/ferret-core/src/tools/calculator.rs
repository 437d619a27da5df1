//! Arithmetic evaluator — a closed grammar, no identifiers or calls.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Integers stay integers under `+ - * %`; `/` always produces a float and
//! `%` is floor-modulo (the result takes the sign of the divisor).

use crate::types::TaggedResult;

/// Deepest parenthesis / unary nesting accepted.
const MAX_DEPTH: usize = 64;

/// Evaluate `expression` and tag the outcome. Never fails past this boundary.
pub fn evaluate(expression: &str) -> TaggedResult {
    match eval_str(expression) {
        Ok(value) => TaggedResult::result(value.to_string()),
        Err(message) => TaggedResult::error(message),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

/// Shortest round-trip digits. Decimal exponents below -4 or from 16 up use
/// `1.5e-07` / `1e+16` form; everything else keeps a trailing `.0` when whole.
fn format_float(x: f64) -> String {
    let sci = format!("{:e}", x);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };
    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        format!("{:?}", x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(Number),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

fn eval_str(expression: &str) -> Result<Number, String> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err("empty expression".into());
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some((offset, _)) = parser.peek() {
        return Err(format!("unexpected token at position {}", offset));
    }
    Ok(value)
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' || c == '_' {
                        if c != '_' {
                            literal.push(c);
                        }
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((offset, Token::Num(parse_number(&literal, offset)?)));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(format!(
                    "unexpected character '{}' at position {}",
                    other, offset
                ))
            }
        };
        chars.next();
        tokens.push((offset, token));
    }

    Ok(tokens)
}

fn parse_number(literal: &str, offset: usize) -> Result<Number, String> {
    if literal.contains('.') {
        if literal.matches('.').count() > 1 || literal == "." {
            return Err(format!("invalid number '{}' at position {}", literal, offset));
        }
        literal
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| format!("invalid number '{}' at position {}", literal, offset))
    } else {
        literal
            .parse::<i64>()
            .map(Number::Int)
            .map_err(|_| format!("number too large at position {}", offset))
    }
}

struct Parser<'a> {
    tokens: &'a [(usize, Token)],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<(usize, Token)> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<(usize, Token)> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Number, String> {
        let mut left = self.term()?;
        while let Some((_, op @ (Token::Plus | Token::Minus))) = self.peek() {
            self.advance();
            let right = self.term()?;
            left = apply(op, left, right)?;
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Number, String> {
        let mut left = self.unary()?;
        while let Some((_, op @ (Token::Star | Token::Slash | Token::Percent))) = self.peek() {
            self.advance();
            let right = self.unary()?;
            left = apply(op, left, right)?;
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Number, String> {
        match self.peek() {
            Some((_, Token::Plus)) => {
                self.advance();
                self.nested(Self::unary)
            }
            Some((_, Token::Minus)) => {
                self.advance();
                match self.nested(Self::unary)? {
                    Number::Int(i) => i
                        .checked_neg()
                        .map(Number::Int)
                        .ok_or_else(|| "integer overflow".to_string()),
                    Number::Float(f) => Ok(Number::Float(-f)),
                }
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Number, String> {
        match self.advance() {
            Some((_, Token::Num(n))) => Ok(n),
            Some((offset, Token::LParen)) => {
                let value = self.nested(Self::expr)?;
                match self.advance() {
                    Some((_, Token::RParen)) => Ok(value),
                    _ => Err(format!("unclosed '(' at position {}", offset)),
                }
            }
            Some((offset, _)) => Err(format!("unexpected token at position {}", offset)),
            None => Err("unexpected end of expression".into()),
        }
    }

    fn nested(&mut self, f: fn(&mut Self) -> Result<Number, String>) -> Result<Number, String> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err("expression nested too deeply".into());
        }
        let value = f(self);
        self.depth -= 1;
        value
    }
}

fn apply(op: Token, left: Number, right: Number) -> Result<Number, String> {
    let value = match (op, left, right) {
        (Token::Plus, Number::Int(a), Number::Int(b)) => a.checked_add(b).map(Number::Int),
        (Token::Minus, Number::Int(a), Number::Int(b)) => a.checked_sub(b).map(Number::Int),
        (Token::Star, Number::Int(a), Number::Int(b)) => a.checked_mul(b).map(Number::Int),
        (Token::Percent, Number::Int(a), Number::Int(b)) => {
            if b == 0 {
                return Err("modulo by zero".into());
            }
            // MIN % -1 is 0 mathematically; only the hardware op overflows
            let r = a.wrapping_rem(b);
            if r != 0 && (r < 0) != (b < 0) {
                Some(Number::Int(r + b))
            } else {
                Some(Number::Int(r))
            }
        }
        (Token::Slash, l, r) => {
            let divisor = r.as_f64();
            if divisor == 0.0 {
                return Err("division by zero".into());
            }
            Some(Number::Float(l.as_f64() / divisor))
        }
        (Token::Percent, l, r) => {
            let (a, b) = (l.as_f64(), r.as_f64());
            if b == 0.0 {
                return Err("modulo by zero".into());
            }
            let rem = a % b;
            if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
                Some(Number::Float(rem + b))
            } else {
                Some(Number::Float(rem))
            }
        }
        (Token::Plus, l, r) => Some(Number::Float(l.as_f64() + r.as_f64())),
        (Token::Minus, l, r) => Some(Number::Float(l.as_f64() - r.as_f64())),
        (Token::Star, l, r) => Some(Number::Float(l.as_f64() * r.as_f64())),
        _ => return Err("unsupported operator".into()),
    };

    match value {
        Some(Number::Float(f)) if !f.is_finite() => Err("result is not a finite number".into()),
        Some(n) => Ok(n),
        None => Err("integer overflow".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(evaluate("15*7+3").to_string(), "RESULT: 108");
        assert_eq!(evaluate("25 * 4 + 15").to_string(), "RESULT: 115");
        assert_eq!(evaluate("2 + 3 * 4").to_string(), "RESULT: 14");
        assert_eq!(evaluate("(2 + 3) * 4").to_string(), "RESULT: 20");
    }

    #[test]
    fn test_division_is_float() {
        assert_eq!(evaluate("10/4").to_string(), "RESULT: 2.5");
        assert_eq!(evaluate("4/2").to_string(), "RESULT: 2.0");
        assert_eq!(evaluate("0.1 + 0.2").to_string(), "RESULT: 0.30000000000000004");
    }

    #[test]
    fn test_unary_and_modulo() {
        assert_eq!(evaluate("-3 + 5").to_string(), "RESULT: 2");
        assert_eq!(evaluate("--4").to_string(), "RESULT: 4");
        assert_eq!(evaluate("7 % 3").to_string(), "RESULT: 1");
        assert_eq!(evaluate("-7 % 3").to_string(), "RESULT: 2");
        assert_eq!(evaluate("7 % -3").to_string(), "RESULT: -2");
        assert_eq!(evaluate("7.5 % 2").to_string(), "RESULT: 1.5");
    }

    #[test]
    fn test_division_by_zero() {
        let result = evaluate("1/0");
        assert!(result.is_error());
        assert_eq!(result.to_string(), "ERROR: division by zero");
        assert!(evaluate("5 / 0").is_error());
        assert_eq!(evaluate("5 % 0").payload, "modulo by zero");
    }

    #[test]
    fn test_rejects_identifiers_and_calls() {
        assert!(evaluate("__import__('os')").is_error());
        assert!(evaluate("abs(-1)").is_error());
        assert!(evaluate("2 ** 8").is_error());
        assert!(evaluate("x + 1").payload.contains("unexpected character 'x'"));
    }

    #[test]
    fn test_malformed_expressions() {
        assert_eq!(evaluate("").payload, "empty expression");
        assert_eq!(evaluate("   ").payload, "empty expression");
        assert_eq!(evaluate("1 +").payload, "unexpected end of expression");
        assert!(evaluate("(1 + 2").payload.contains("unclosed"));
        assert!(evaluate("1 + 2)").is_error());
        assert!(evaluate("1.2.3").payload.contains("invalid number"));
    }

    #[test]
    fn test_overflow_is_error() {
        assert_eq!(
            evaluate("9223372036854775807 + 1").payload,
            "integer overflow"
        );
        assert!(evaluate("99999999999999999999").payload.contains("too large"));
    }

    #[test]
    fn test_min_modulo_minus_one() {
        assert_eq!(
            evaluate("(-9223372036854775807 - 1) % -1").to_string(),
            "RESULT: 0"
        );
    }

    #[test]
    fn test_float_exponent_form() {
        assert_eq!(evaluate("10000000000000000 / 1").payload, "1e+16");
        assert_eq!(evaluate("15000000000000000 / 1").payload, "1.5e+16");
        assert_eq!(evaluate("1 / 10000000").payload, "1e-07");
        assert_eq!(evaluate("1 / 10000").payload, "0.0001");
        assert_eq!(evaluate("1000000000000000 / 1").payload, "1000000000000000.0");
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(evaluate(&deep).payload, "expression nested too deeply");
    }
}
