// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Numeric-aware ("natural") ordering for file names, so that `scan2.pdf`
// sorts before `scan10.pdf`.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// A maximal run of either ASCII digits or non-digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (idx, ch) in s.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(current) if current != is_digit => {
                tokens.push(make_token(&s[start..idx], current));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(current) = in_digits {
        tokens.push(make_token(&s[start..], current));
    }
    tokens
}

fn make_token(run: &str, digits: bool) -> Token<'_> {
    if digits {
        Token::Digits(run)
    } else {
        Token::Text(run)
    }
}

/// Compare two digit runs by value without parsing, so arbitrarily long
/// runs never overflow. Equal values: the one with fewer leading zeros wins.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.len().cmp(&b.len()))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    let lower_a = a.chars().flat_map(char::to_lowercase);
    let lower_b = b.chars().flat_map(char::to_lowercase);
    lower_a.cmp(lower_b)
}

/// Total order over strings treating embedded numbers numerically.
///
/// Text runs compare case-insensitively, digit runs sort before text runs at
/// the same position, and a full tie falls back to a byte comparison.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ta = tokenize(a);
    let tb = tokenize(b);

    for (x, y) in ta.iter().zip(tb.iter()) {
        let ord = match (x, y) {
            (Token::Digits(dx), Token::Digits(dy)) => cmp_digits(dx, dy),
            (Token::Text(tx), Token::Text(ty)) => cmp_text(tx, ty),
            (Token::Digits(_), Token::Text(_)) => Ordering::Less,
            (Token::Text(_), Token::Digits(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    ta.len().cmp(&tb.len()).then_with(|| a.cmp(b))
}

fn file_name_of(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}

/// Sort paths in place by the natural order of their file names.
pub fn sort_paths_naturally(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&file_name_of(a), &file_name_of(b)));
}
