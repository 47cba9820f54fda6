//! Tokenizer for Whitespace assembly text.

use num_bigint::BigInt;

use crate::error::AsmError;

/// A single token from an assembly line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A mnemonic or label name. Always uppercase.
    Ident(String),
    /// A signed numeric literal (decimal or hex).
    Number(BigInt),
}

/// Tokenize a single line of assembly text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = Vec::new();
    for word in line.split_whitespace() {
        let token = if looks_numeric(word) {
            Token::Number(parse_number(word).ok_or_else(|| AsmError::InvalidNumber {
                line: line_num,
                token: word.to_string(),
            })?)
        } else {
            Token::Ident(word.to_uppercase())
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn looks_numeric(word: &str) -> bool {
    let digits = word.strip_prefix(['-', '+']).unwrap_or(word);
    digits.as_bytes().first().is_some_and(|b| b.is_ascii_digit())
}

fn parse_number(word: &str) -> Option<BigInt> {
    let (negative, rest) = match word.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, word.strip_prefix('+').unwrap_or(word)),
    };
    let (digits, radix) = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (rest, 10),
    };
    // parse_bytes accepts its own sign; only the leading one is allowed.
    if digits.starts_with(['-', '+']) {
        return None;
    }
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)?;
    Some(if negative { -magnitude } else { magnitude })
}
