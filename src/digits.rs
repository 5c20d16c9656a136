//! Digit transliteration between ASCII, Persian and Arabic-Indic numerals.
//!
//! Only digits and the decimal/thousands marks are touched; everything else
//! in the input passes through unchanged, so mixed text is safe to translate.

use crate::consts::{
    ARABIC_COMMA, ARABIC_INDIC_DIGITS, PERSIAN_DECIMAL_MARK, PERSIAN_DIGITS,
    PERSIAN_THOUSANDS_MARK,
};
use crate::types::DigitAlphabet;

/// Rewrites the numerals in `input` for `target`.
///
/// Targeting [`DigitAlphabet::Fa`] maps ASCII digits to Persian, `.` to
/// `decimal_mark` and `,` to `٬`. Any other target maps Persian and
/// Arabic-Indic digits back to ASCII, along with `٫`, `٬`, `،` and
/// `decimal_mark` itself.
pub fn translate(input: &str, target: DigitAlphabet, decimal_mark: &str) -> String {
    match target {
        DigitAlphabet::Fa => to_persian(input, decimal_mark),
        DigitAlphabet::En | DigitAlphabet::Ar => to_ascii(input, decimal_mark),
    }
}

/// [`translate`] with the standard Persian decimal mark.
pub fn translate_default(input: &str, target: DigitAlphabet) -> String {
    translate(input, target, PERSIAN_DECIMAL_MARK)
}

fn to_persian(input: &str, decimal_mark: &str) -> String {
    let mut out = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        match c {
            '0'..='9' => out.push(PERSIAN_DIGITS[ascii_digit(c)]),
            '.' => out.push_str(decimal_mark),
            ',' => out.push(PERSIAN_THOUSANDS_MARK),
            _ => out.push(c),
        }
    }
    out
}

fn to_ascii(input: &str, decimal_mark: &str) -> String {
    // A custom mark may span several characters, so it goes first.
    let custom_mark = !decimal_mark.is_empty() && decimal_mark != PERSIAN_DECIMAL_MARK;
    let input = if custom_mark {
        input.replace(decimal_mark, ".")
    } else {
        input.to_owned()
    };

    input
        .chars()
        .map(|c| {
            if let Some(digit) = native_digit(c) {
                return digit;
            }
            match c {
                c if c == PERSIAN_THOUSANDS_MARK || c == ARABIC_COMMA => ',',
                c if PERSIAN_DECIMAL_MARK.starts_with(c) => '.',
                c => c,
            }
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn native_digit(c: char) -> Option<char> {
    PERSIAN_DIGITS
        .iter()
        .position(|&d| d == c)
        .or_else(|| ARABIC_INDIC_DIGITS.iter().position(|&d| d == c))
        .map(|value| char::from(b'0' + value as u8))
}

const fn ascii_digit(c: char) -> usize {
    (c as u32 - '0' as u32) as usize
}
