//! Minimal parser for Valve's VDF key-value manifest format
//!
//! Covers the subset the launcher manifests use: quoted keys and values,
//! nested braces, backslash escapes, bare tokens, and `//` line comments.
//! Declared order is preserved because library priority follows it.

use std::iter::Peekable;
use std::str::Chars;

use anyhow::{Context, bail};

use crate::error::Result;

/// A parsed VDF value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Leaf string value
    String(String),
    /// Nested block of key/value pairs
    Table(Table),
}

/// Ordered key/value pairs of one VDF block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table(Vec<(String, Value)>);

impl Table {
    /// Look up a direct child by key, case-insensitively (the launcher's
    /// manifests are inconsistent about casing)
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Direct child as a string value
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Direct child as a nested table
    #[must_use]
    pub fn get_table(&self, key: &str) -> Option<&Table> {
        match self.get(key) {
            Some(Value::Table(t)) => Some(t),
            _ => None,
        }
    }

    /// Key/value pairs in declared order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Parse a whole VDF document into its top-level table
///
/// # Errors
///
/// Returns an error on unbalanced braces, unterminated strings, or a key
/// with no value.
pub fn parse(input: &str) -> Result<Table> {
    let mut chars = input.chars().peekable();
    parse_pairs(&mut chars, true)
}

fn parse_pairs(chars: &mut Peekable<Chars<'_>>, top_level: bool) -> Result<Table> {
    let mut pairs = Vec::new();
    loop {
        skip_ws_and_comments(chars);
        match chars.peek() {
            None => {
                if top_level {
                    return Ok(Table(pairs));
                }
                bail!("unexpected end of input inside a block");
            }
            Some('}') => {
                chars.next();
                if top_level {
                    bail!("unmatched closing brace");
                }
                return Ok(Table(pairs));
            }
            _ => {}
        }

        let key = parse_string(chars).context("expected a key")?;
        skip_ws_and_comments(chars);
        match chars.peek() {
            Some('{') => {
                chars.next();
                let nested = parse_pairs(chars, false)?;
                pairs.push((key, Value::Table(nested)));
            }
            Some(_) => {
                let value = parse_string(chars)
                    .with_context(|| format!("expected a value for key {key:?}"))?;
                pairs.push((key, Value::String(value)));
            }
            None => bail!("missing value for key {key:?}"),
        }
    }
}

fn parse_string(chars: &mut Peekable<Chars<'_>>) -> Result<String> {
    let mut out = String::new();
    match chars.peek() {
        Some('"') => {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => return Ok(out),
                    Some('\\') => match chars.next() {
                        Some('n') => out.push('\n'),
                        Some('t') => out.push('\t'),
                        Some(c) => out.push(c),
                        None => bail!("unterminated escape in string"),
                    },
                    Some(c) => out.push(c),
                    None => bail!("unterminated string"),
                }
            }
        }
        Some(_) => {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '{' || c == '}' || c == '"' {
                    break;
                }
                out.push(c);
                chars.next();
            }
            if out.is_empty() {
                bail!("expected a token");
            }
            Ok(out)
        }
        None => bail!("unexpected end of input"),
    }
}

fn skip_ws_and_comments(chars: &mut Peekable<Chars<'_>>) {
    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let mut ahead = chars.clone();
        if ahead.next() == Some('/') && ahead.next() == Some('/') {
            for c in chars.by_ref() {
                if c == '\n' {
                    break;
                }
            }
            continue;
        }
        break;
    }
}
