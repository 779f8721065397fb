//! Single-pass tokenizer over CSS value text (§4.B).
//!
//! Produces a flat token stream; the expression and transform parsers
//! (`crate::expr`, `crate::transform`) each drive their own cursor over it.
//! Mirrors the teacher's `parse_parentheses`/`parse_pixel_value_inner` style
//! of hand-written scanning rather than reaching for a parser-combinator or
//! regex crate (the teacher depends on neither).

use css_typed_om::units::Unit;

use crate::error::LexError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Num(f64),
    Dim(f64, Unit),
    Ident(String),
    Func(String),
    Open,
    Close,
    Comma,
    Op(char),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Tokenizes `input` eagerly into a `Vec<Token>` terminated by `Eof`.
///
/// Scanning is done over `char` indices (`chars`/`pos` below), but
/// `Token::position` is a byte offset into `input` so callers (e.g.
/// `crate::expr`'s `var()` fallback capture) can slice `input` directly
/// without risking a non-char-boundary panic on multibyte input. `offsets[i]`
/// is the byte offset of `chars[i]`, with one extra trailing entry for the
/// position just past the last character.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = input.chars().collect();
    let offsets: Vec<usize> = input
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(input.len()))
        .collect();
    let mut pos = 0usize;
    let mut out = Vec::new();

    loop {
        skip_whitespace(&chars, &mut pos);
        if pos >= chars.len() {
            out.push(Token { kind: TokenKind::Eof, position: offsets[pos] });
            break;
        }

        let start = pos;
        let c = chars[pos];

        match c {
            '(' => {
                pos += 1;
                out.push(Token { kind: TokenKind::Open, position: offsets[start] });
            }
            ')' => {
                pos += 1;
                out.push(Token { kind: TokenKind::Close, position: offsets[start] });
            }
            ',' => {
                pos += 1;
                out.push(Token { kind: TokenKind::Comma, position: offsets[start] });
            }
            '+' | '*' | '/' => {
                pos += 1;
                out.push(Token { kind: TokenKind::Op(c), position: offsets[start] });
            }
            '-' if !starts_identifier_or_is_dash(&chars, pos) && !is_number_start(&chars, pos) => {
                pos += 1;
                out.push(Token { kind: TokenKind::Op('-'), position: offsets[start] });
            }
            _ if is_number_start(&chars, pos) => {
                let (value, end) = scan_number(&chars, pos)?;
                pos = end;
                out.push(scan_dim_or_num(&chars, &mut pos, value, offsets[start])?);
            }
            _ if is_identifier_start(c) => {
                let end = scan_identifier_end(&chars, pos);
                let ident: String = chars[pos..end].iter().collect::<String>().to_lowercase();
                pos = end;
                skip_whitespace(&chars, &mut pos);
                if pos < chars.len() && chars[pos] == '(' {
                    pos += 1;
                    out.push(Token { kind: TokenKind::Func(ident), position: offsets[start] });
                } else {
                    out.push(Token { kind: TokenKind::Ident(ident), position: offsets[start] });
                }
            }
            other => {
                return Err(LexError::UnexpectedCharacter { found: other, position: offsets[start] });
            }
        }
    }

    Ok(out)
}

fn skip_whitespace(chars: &[char], pos: &mut usize) {
    while *pos < chars.len() && (chars[*pos] as u32) <= 0x20 {
        *pos += 1;
    }
}

/// `true` when the character run starting at `pos` is the beginning of a
/// number rather than an operator or identifier (§4.B: a leading `-` is part
/// of a number only when followed by a digit or `.`).
fn is_number_start(chars: &[char], pos: usize) -> bool {
    let c = chars[pos];
    if c.is_ascii_digit() || c == '.' {
        return true;
    }
    if (c == '-' || c == '+') && pos + 1 < chars.len() {
        let next = chars[pos + 1];
        return next.is_ascii_digit() || next == '.';
    }
    false
}

/// `true` when a `-` at `pos` belongs to an identifier (`-moz-foo`,
/// `--custom`) rather than standing alone as the subtraction operator.
fn starts_identifier_or_is_dash(chars: &[char], pos: usize) -> bool {
    if pos + 1 >= chars.len() {
        return false;
    }
    let next = chars[pos + 1];
    next == '-' || is_identifier_start(next)
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

fn scan_identifier_end(chars: &[char], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < chars.len() && is_identifier_continue(chars[pos]) {
        pos += 1;
    }
    pos
}

/// Scans a number: optional sign, integer/fraction digits, optional exponent.
/// Returns the parsed value and the index just past the last consumed char.
fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize), LexError> {
    let mut pos = start;
    if pos < chars.len() && (chars[pos] == '+' || chars[pos] == '-') {
        pos += 1;
    }
    let digits_start = pos;
    while pos < chars.len() && chars[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < chars.len() && chars[pos] == '.' {
        pos += 1;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos == digits_start || (pos == digits_start + 1 && chars[digits_start] == '.') {
        return Err(LexError::InvalidNumber { text: chars[start..pos].iter().collect() });
    }
    if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
        let mut lookahead = pos + 1;
        if lookahead < chars.len() && (chars[lookahead] == '+' || chars[lookahead] == '-') {
            lookahead += 1;
        }
        let exp_digits_start = lookahead;
        while lookahead < chars.len() && chars[lookahead].is_ascii_digit() {
            lookahead += 1;
        }
        if lookahead > exp_digits_start {
            pos = lookahead;
        }
    }
    let text: String = chars[start..pos].iter().collect();
    let value: f64 = text.parse().map_err(|_| LexError::InvalidNumber { text: text.clone() })?;
    if !value.is_finite() {
        return Err(LexError::InvalidNumber { text });
    }
    Ok((value, pos))
}

/// After a number has been scanned, decides whether it's a bare `Num`, a
/// `%`-suffixed percent `Dim`, or a unit-suffixed `Dim` (§4.B).
/// `start_byte` is the byte offset of the token's first character.
fn scan_dim_or_num(
    chars: &[char],
    pos: &mut usize,
    value: f64,
    start_byte: usize,
) -> Result<Token, LexError> {
    if *pos < chars.len() && chars[*pos] == '%' {
        *pos += 1;
        return Ok(Token { kind: TokenKind::Dim(value, Unit::Percent), position: start_byte });
    }
    if *pos < chars.len() && is_identifier_start(chars[*pos]) {
        let end = scan_identifier_end(chars, *pos);
        let ident: String = chars[*pos..end].iter().collect::<String>().to_lowercase();
        let unit = Unit::from_ident(&ident).ok_or_else(|| LexError::UnknownUnit { ident: ident.clone() })?;
        *pos = end;
        return Ok(Token { kind: TokenKind::Dim(value, unit), position: start_byte });
    }
    Ok(Token { kind: TokenKind::Num(value), position: start_byte })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_plain_number_and_dimension() {
        assert_eq!(kinds("10"), vec![TokenKind::Num(10.0), TokenKind::Eof]);
        assert_eq!(kinds("10px"), vec![TokenKind::Dim(10.0, Unit::Px), TokenKind::Eof]);
        assert_eq!(kinds("50%"), vec![TokenKind::Dim(50.0, Unit::Percent), TokenKind::Eof]);
    }

    #[test]
    fn tokenizes_signed_and_exponent_numbers() {
        assert_eq!(kinds("-5"), vec![TokenKind::Num(-5.0), TokenKind::Eof]);
        assert_eq!(kinds("1e3"), vec![TokenKind::Num(1000.0), TokenKind::Eof]);
        assert_eq!(kinds("1.5e-2px"), vec![TokenKind::Dim(0.015, Unit::Px), TokenKind::Eof]);
    }

    #[test]
    fn minus_before_identifier_is_part_of_identifier() {
        assert_eq!(kinds("-moz-foo"), vec![TokenKind::Ident("-moz-foo".to_string()), TokenKind::Eof]);
        assert_eq!(kinds("--custom"), vec![TokenKind::Ident("--custom".to_string()), TokenKind::Eof]);
    }

    #[test]
    fn minus_before_number_is_an_operator_in_a_subtraction() {
        assert_eq!(
            kinds("10px - 5px"),
            vec![
                TokenKind::Dim(10.0, Unit::Px),
                TokenKind::Op('-'),
                TokenKind::Dim(5.0, Unit::Px),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn function_call_emits_func_and_consumes_open_paren() {
        assert_eq!(
            kinds("calc(1px)"),
            vec![
                TokenKind::Func("calc".to_string()),
                TokenKind::Dim(1.0, Unit::Px),
                TokenKind::Close,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn function_name_is_lowercased() {
        assert_eq!(kinds("CALC(1)"), vec![TokenKind::Func("calc".to_string()), TokenKind::Num(1.0), TokenKind::Close, TokenKind::Eof]);
    }

    #[test]
    fn whitespace_before_open_paren_still_makes_a_func_token() {
        assert_eq!(kinds("calc (1)"), vec![TokenKind::Func("calc".to_string()), TokenKind::Num(1.0), TokenKind::Close, TokenKind::Eof]);
    }

    #[test]
    fn unknown_unit_is_a_lex_error() {
        assert!(tokenize("10zz").is_err());
    }

    #[test]
    fn keyword_token_for_bare_identifier() {
        assert_eq!(kinds("auto"), vec![TokenKind::Ident("auto".to_string()), TokenKind::Eof]);
    }
}
