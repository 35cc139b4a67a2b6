//! Placeholder renumbering and argument collection.
//!
//! Every caller-authored fragment numbers its placeholders from `$1`. The
//! [`Collector`] appends fragments in render order, shifting each fragment's
//! local `$i` to `$(base + i)` where `base` is the number of arguments
//! collected so far, and appends the fragment's arguments in local order.

use crate::error::{BoilError, BoilResult};
use crate::param::{Param, ParamList};
use std::ops::Range;

/// A `$n` token found in SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Placeholder {
    /// Byte span of the whole token, `$` included.
    pub span: Range<usize>,
    /// The local number; saturates on overflow so it never matches.
    pub index: usize,
}

/// Find positional placeholders in `sql`.
///
/// Skips string literals (including `E'...'` escape strings), quoted
/// identifiers, dollar-quoted bodies and comments. A `$` directly after an
/// identifier character is part of that identifier (`col$1`), not a
/// placeholder.
pub(crate) fn scan(sql: &str) -> Vec<Placeholder> {
    let bytes = sql.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut i = 0;

    while i < len {
        match bytes[i] {
            b'\'' => i = skip_quoted(bytes, i, b'\'', is_escape_string(bytes, i)),
            b'"' => i = skip_quoted(bytes, i, b'"', false),
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i = match sql[i..].find('\n') {
                    Some(pos) => i + pos + 1,
                    None => len,
                };
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i),
            b'$' if i > 0 && is_ident_byte(bytes[i - 1]) => i += 1,
            b'$' => {
                let digits_end = i + 1 + bytes[i + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
                if digits_end > i + 1 {
                    let index = sql[i + 1..digits_end].parse().unwrap_or(usize::MAX);
                    out.push(Placeholder {
                        span: i..digits_end,
                        index,
                    });
                    i = digits_end;
                } else if let Some(tag_end) = dollar_tag_end(bytes, i) {
                    let tag = &sql[i..tag_end];
                    i = match sql[tag_end..].find(tag) {
                        Some(pos) => tag_end + pos + tag.len(),
                        None => len,
                    };
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }

    out
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Whether the quote at `quote` opens an `E'...'` escape string.
fn is_escape_string(bytes: &[u8], quote: usize) -> bool {
    match quote.checked_sub(1).map(|p| bytes[p]) {
        Some(b'E' | b'e') => quote < 2 || !is_ident_byte(bytes[quote - 2]),
        _ => false,
    }
}

/// Index just past the closing quote; doubled quotes are escapes, and so is
/// a backslash inside an escape string.
fn skip_quoted(bytes: &[u8], start: usize, quote: u8, backslash: bool) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if backslash && bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// Index just past the `*/` closing the comment at `start`; comments nest.
fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// If a dollar-quote opener (`$$` or `$tag$`) starts at `start`, return the
/// index just past it.
fn dollar_tag_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if bytes.get(i) == Some(&b'$') {
        return Some(i + 1);
    }
    match bytes.get(i) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' || *b >= 0x80 => {}
        _ => return None,
    }
    while let Some(&b) = bytes.get(i) {
        if b == b'$' {
            return Some(i + 1);
        }
        if !is_ident_byte(b) {
            return None;
        }
        i += 1;
    }
    None
}

/// Check that the distinct local indices are exactly `1..=args`.
fn check_alignment(clause: &str, sql: &str, placeholders: &[Placeholder], args: usize) -> BoilResult<()> {
    let mut indices: Vec<usize> = placeholders.iter().map(|p| p.index).collect();
    indices.sort_unstable();
    indices.dedup();

    let aligned = indices.len() == args && indices.iter().enumerate().all(|(i, &n)| n == i + 1);
    if aligned {
        Ok(())
    } else {
        Err(BoilError::argument_mismatch(format!("{clause} `{sql}`"), indices, args))
    }
}

/// Accumulates the final SQL text and the statement-wide argument list.
pub(crate) struct Collector {
    sql: String,
    params: ParamList,
}

impl Collector {
    pub(crate) fn new() -> Self {
        Self {
            sql: String::new(),
            params: ParamList::new(),
        }
    }

    /// Append SQL generated by the renderer itself; never scanned.
    pub(crate) fn push_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a fresh placeholder bound to `param`.
    pub(crate) fn push_bind(&mut self, param: &Param) {
        let idx = self.params.push_param(param.clone());
        self.push_index(idx);
    }

    /// Append caller-authored SQL, renumbering its local placeholders.
    pub(crate) fn push_fragment(&mut self, clause: &str, sql: &str, args: &[Param]) -> BoilResult<()> {
        let placeholders = scan(sql);
        check_alignment(clause, sql, &placeholders, args.len())?;

        let base = self.params.len();
        let mut last = 0;
        for p in &placeholders {
            self.sql.push_str(&sql[last..p.span.start]);
            self.push_index(base + p.index);
            last = p.span.end;
        }
        self.sql.push_str(&sql[last..]);

        for arg in args {
            self.params.push_param(arg.clone());
        }
        Ok(())
    }

    fn push_index(&mut self, idx: usize) {
        self.sql.push('$');
        self.sql.push_str(&idx.to_string());
    }

    pub(crate) fn param_count(&self) -> usize {
        self.params.len()
    }

    pub(crate) fn finish(self) -> (String, ParamList) {
        (self.sql, self.params)
    }
}
