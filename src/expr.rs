//! 입력 필드에 타이핑된 수식을 부동소수로 평가하는 작은 산술 평가기.
//!
//! 지원: 숫자(지수 표기 포함), `+ - * / % ** ^`, 단항 부호, 괄호,
//! 상수 `pi`, `e`, 함수 `sqrt abs log10 ln log exp sin cos tan min max`.
//! `^`는 `**`와 같은 거듭제곱이고 `%`의 결과는 제수의 부호를 따른다.
//! 이름 조회나 대입은 없다.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/// 수식 해석/평가 오류.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("빈 수식")]
    Empty,
    #[error("예상하지 못한 입력 끝")]
    UnexpectedEnd,
    #[error("{pos}번째 위치의 예상하지 못한 문자 '{ch}'")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("{pos}번째 위치의 알 수 없는 이름 '{name}'")]
    UnknownName { name: String, pos: usize },
    #[error("{name}: 인자 {expected}개가 필요하지만 {found}개가 주어짐")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("0으로 나눔")]
    DivisionByZero,
    #[error("유한하지 않은 결과")]
    NotFinite,
    #[error("{pos}번째 위치에서 중첩이 너무 깊음")]
    TooDeep { pos: usize },
}

/// 괄호, 함수 호출, 거듭제곱 지수의 최대 중첩 깊이.
pub const MAX_DEPTH: usize = 256;

/// 문자열 수식을 평가한다. 앞뒤 공백은 무시한다.
pub fn evaluate(text: &str) -> Result<f64, ParseError> {
    let mut parser = ExprParser::new(text);
    parser.skip_whitespace();
    if parser.is_at_end() {
        return Err(ParseError::Empty);
    }
    let value = parser.parse_sum()?;
    parser.skip_whitespace();
    if let Some((pos, ch)) = parser.chars.peek().copied() {
        return Err(ParseError::UnexpectedChar { ch, pos });
    }
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NotFinite)
    }
}

struct ExprParser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    depth: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        ExprParser {
            input,
            chars: input.char_indices().peekable(),
            depth: 0,
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn current_pos(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(pos, _)| pos)
            .unwrap_or(self.input.len())
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|(_, ch)| ch)
    }

    fn descend(&mut self, pos: usize) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { pos });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.chars.peek().copied() {
            Some((_, ch)) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some((pos, ch)) => Err(ParseError::UnexpectedChar { ch, pos }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    // sum := product (('+' | '-') product)*
    fn parse_sum(&mut self) -> Result<f64, ParseError> {
        let mut acc = self.parse_product()?;
        loop {
            self.skip_whitespace();
            match self.peek_char() {
                Some('+') => {
                    self.advance();
                    acc += self.parse_product()?;
                }
                Some('-') => {
                    self.advance();
                    acc -= self.parse_product()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    // product := unary (('*' | '/' | '%') unary)*
    fn parse_product(&mut self) -> Result<f64, ParseError> {
        let mut acc = self.parse_unary()?;
        loop {
            self.skip_whitespace();
            match self.peek_char() {
                Some('*') => {
                    // `**` 는 거듭제곱이므로 parse_power 에서 처리된다.
                    self.advance();
                    acc *= self.parse_unary()?;
                }
                Some('/') => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    if rhs == 0.0 {
                        return Err(ParseError::DivisionByZero);
                    }
                    acc /= rhs;
                }
                Some('%') => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    if rhs == 0.0 {
                        return Err(ParseError::DivisionByZero);
                    }
                    // 나머지의 부호는 제수를 따른다(floor mod).
                    acc -= rhs * (acc / rhs).floor();
                }
                _ => return Ok(acc),
            }
        }
    }

    // unary := ('+' | '-')* power
    fn parse_unary(&mut self) -> Result<f64, ParseError> {
        let mut negative = false;
        loop {
            self.skip_whitespace();
            match self.peek_char() {
                Some('-') => negative = !negative,
                Some('+') => {}
                _ => break,
            }
            self.advance();
        }
        let value = self.parse_power()?;
        Ok(if negative { -value } else { value })
    }

    // power := primary (('**' | '^') unary)?   (우결합)
    fn parse_power(&mut self) -> Result<f64, ParseError> {
        let base = self.parse_primary()?;
        self.skip_whitespace();
        let pos = self.current_pos();
        if self.peek_char() == Some('^') {
            self.advance();
        } else if self.input[pos..].starts_with("**") {
            self.advance();
            self.advance();
        } else {
            return Ok(base);
        }
        self.descend(pos)?;
        let exp = self.parse_unary()?;
        self.ascend();
        Ok(base.powf(exp))
    }

    fn parse_primary(&mut self) -> Result<f64, ParseError> {
        self.skip_whitespace();
        let pos = self.current_pos();
        match self.peek_char() {
            None => Err(ParseError::UnexpectedEnd),
            Some('(') => {
                self.descend(pos)?;
                self.advance();
                let value = self.parse_sum()?;
                self.expect(')')?;
                self.ascend();
                Ok(value)
            }
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.parse_number(),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.parse_name(),
            Some(ch) => Err(ParseError::UnexpectedChar { ch, pos }),
        }
    }

    fn parse_number(&mut self) -> Result<f64, ParseError> {
        let start = self.current_pos();
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit() || ch == '.') {
            self.advance();
        }
        // 지수부는 뒤에 숫자가 올 때만 소비한다. `2e` 는 숫자 2와 이름 e 로 나뉜다.
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let pos = self.current_pos();
            let rest = &self.input[pos + 1..];
            let signed = rest.starts_with(['+', '-']);
            let digits = if signed { &rest[1..] } else { rest };
            if digits.starts_with(|c: char| c.is_ascii_digit()) {
                self.advance();
                if signed {
                    self.advance();
                }
                while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                    self.advance();
                }
            }
        }
        let end = self.current_pos();
        let literal = &self.input[start..end];
        literal.parse::<f64>().map_err(|_| ParseError::UnexpectedChar {
            ch: literal.chars().next().unwrap_or('.'),
            pos: start,
        })
    }

    fn parse_name(&mut self) -> Result<f64, ParseError> {
        let start = self.current_pos();
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_') {
            self.advance();
        }
        let end = self.current_pos();
        let name = self.input[start..end].to_string();

        self.skip_whitespace();
        if self.peek_char() != Some('(') {
            return match name.as_str() {
                "pi" => Ok(std::f64::consts::PI),
                "e" => Ok(std::f64::consts::E),
                _ => Err(ParseError::UnknownName { name, pos: start }),
            };
        }

        self.descend(start)?;
        self.advance();
        let args = self.parse_args()?;
        self.ascend();
        apply_function(&name, start, &args)
    }

    fn parse_args(&mut self) -> Result<Vec<f64>, ParseError> {
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek_char() == Some(')') {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_sum()?);
            self.skip_whitespace();
            match self.chars.peek().copied() {
                Some((_, ',')) => {
                    self.advance();
                }
                Some((_, ')')) => {
                    self.advance();
                    return Ok(args);
                }
                Some((pos, ch)) => return Err(ParseError::UnexpectedChar { ch, pos }),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }
}

fn apply_function(name: &str, pos: usize, args: &[f64]) -> Result<f64, ParseError> {
    let unary = |f: fn(f64) -> f64| -> Result<f64, ParseError> {
        match args {
            [x] => Ok(f(*x)),
            _ => Err(ParseError::WrongArity {
                name: name.to_string(),
                expected: 1,
                found: args.len(),
            }),
        }
    };
    let binary = |f: fn(f64, f64) -> f64| -> Result<f64, ParseError> {
        match args {
            [a, b] => Ok(f(*a, *b)),
            _ => Err(ParseError::WrongArity {
                name: name.to_string(),
                expected: 2,
                found: args.len(),
            }),
        }
    };
    match name {
        "sqrt" => unary(f64::sqrt),
        "abs" => unary(f64::abs),
        "log10" => unary(f64::log10),
        "ln" | "log" => unary(f64::ln),
        "exp" => unary(f64::exp),
        "sin" => unary(f64::sin),
        "cos" => unary(f64::cos),
        "tan" => unary(f64::tan),
        "min" => binary(f64::min),
        "max" => binary(f64::max),
        _ => Err(ParseError::UnknownName {
            name: name.to_string(),
            pos,
        }),
    }
}
