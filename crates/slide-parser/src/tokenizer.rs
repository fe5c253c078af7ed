// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record line tokenizer using nom combinators
//!
//! Turns `id [=] key: value key: value ...` lines into an ordered field map.

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0},
    sequence::{delimited, terminated},
    IResult, Parser,
};
use slide_model::{ParseError, Result};

/// Raw token of a record line
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    /// Field label (`type:`), stored without the colon
    Key(&'a str),
    /// Bracketed list (`[1,2,3]`), stored without the brackets
    List(&'a str),
    /// Any other whitespace-delimited word
    Word(&'a str),
}

// ============================================================================
// Parsing Primitives
// ============================================================================

/// Parse whitespace
fn ws(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    Ok((input, ()))
}

/// Parse a field label (`name:`)
fn key(input: &str) -> IResult<&str, Token> {
    let (input, name) = terminated(
        take_while1(|c: char| !c.is_whitespace() && c != ':' && c != '[' && c != ']'),
        char(':'),
    )
    .parse(input)?;
    Ok((input, Token::Key(name)))
}

/// Parse a bracketed list (`[1, 2, 3]`)
fn list(input: &str) -> IResult<&str, Token> {
    let (input, inner) = delimited(char('['), take_till(|c: char| c == ']'), char(']')).parse(input)?;
    Ok((input, Token::List(inner)))
}

/// Parse a bare word
fn word(input: &str) -> IResult<&str, Token> {
    let (input, w) = take_while1(|c: char| !c.is_whitespace())(input)?;
    Ok((input, Token::Word(w)))
}

/// Parse any token
fn token(input: &str) -> IResult<&str, Token> {
    alt((list, key, word)).parse(input)
}

/// Split a line into tokens with their byte offsets
pub fn tokenize(line: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens = Vec::new();
    let mut input = line;

    loop {
        input = ws(input).map(|(rest, _)| rest).unwrap_or(input);
        if input.is_empty() {
            break;
        }
        let offset = line.len() - input.len();
        match token(input) {
            Ok((rest, tok)) => {
                tokens.push((offset, tok));
                input = rest;
            }
            Err(_) => break,
        }
    }

    tokens
}

// ============================================================================
// Record Lines
// ============================================================================

/// Value slot of the field currently being folded
enum Slot<'a> {
    Empty,
    Span(usize, usize),
    List(&'a str),
}

/// A tokenized record line
///
/// `prefix` is the raw text before the first label (record id, `=`, or a
/// free-text name). Fields keep source order; a label with no value is
/// absent from the map.
#[derive(Clone, Debug, PartialEq)]
pub struct LineRecord<'a> {
    line: &'a str,
    prefix: &'a str,
    fields: Vec<(&'a str, &'a str)>,
}

impl<'a> LineRecord<'a> {
    /// Tokenize and fold a line
    pub fn parse(line: &'a str) -> Self {
        let mut prefix_end = line.len();
        let mut fields = Vec::new();
        let mut current: Option<(&'a str, Slot<'a>)> = None;

        for (offset, tok) in tokenize(line) {
            match tok {
                Token::Key(name) => {
                    if current.is_none() {
                        prefix_end = prefix_end.min(offset);
                    }
                    Self::flush(&mut fields, current.take(), line);
                    current = Some((name, Slot::Empty));
                }
                Token::List(inner) => {
                    if let Some((_, slot)) = current.as_mut() {
                        if matches!(slot, Slot::Empty) {
                            *slot = Slot::List(inner);
                        }
                    }
                }
                Token::Word(w) => {
                    if let Some((_, slot)) = current.as_mut() {
                        let end = offset + w.len();
                        match slot {
                            Slot::Empty => *slot = Slot::Span(offset, end),
                            Slot::Span(_, span_end) => *span_end = end,
                            Slot::List(_) => {}
                        }
                    }
                }
            }
        }
        Self::flush(&mut fields, current, line);

        Self {
            line,
            prefix: line[..prefix_end].trim(),
            fields,
        }
    }

    fn flush(fields: &mut Vec<(&'a str, &'a str)>, pending: Option<(&'a str, Slot<'a>)>, line: &'a str) {
        match pending {
            Some((name, Slot::Span(start, end))) => fields.push((name, &line[start..end])),
            Some((name, Slot::List(inner))) => fields.push((name, inner)),
            Some((_, Slot::Empty)) | None => {}
        }
    }

    /// Raw source line
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Text before the first label, trimmed
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// Leading record id (first word of the prefix)
    pub fn id(&self) -> Option<&'a str> {
        self.prefix.split_whitespace().next()
    }

    /// Name used in error reports
    pub fn context(&self) -> String {
        match self.id() {
            Some(id) => id.to_string(),
            None => self.line.trim().to_string(),
        }
    }

    /// Fields in source order
    pub fn fields(&self) -> &[(&'a str, &'a str)] {
        &self.fields
    }

    /// Raw value of a field
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Raw value of a field that must be present
    pub fn require(&self, key: &str) -> Result<&'a str> {
        self.get(key)
            .ok_or_else(|| ParseError::missing_field(self.context(), key))
    }

    /// Required floating point field
    pub fn f64(&self, key: &str) -> Result<f64> {
        parse_number(&self.context(), key, self.require(key)?)
    }

    /// Optional floating point field; present-but-invalid still fails
    pub fn opt_f64(&self, key: &str) -> Result<Option<f64>> {
        self.get(key)
            .map(|raw| parse_number(&self.context(), key, raw))
            .transpose()
    }

    /// Required integer field
    pub fn i64(&self, key: &str) -> Result<i64> {
        parse_number(&self.context(), key, self.require(key)?)
    }

    /// Required unsigned integer field
    pub fn u32(&self, key: &str) -> Result<u32> {
        parse_number(&self.context(), key, self.require(key)?)
    }

    /// Required comma-separated id list (`[1,2,3]`)
    pub fn id_list(&self, key: &str) -> Result<Vec<u32>> {
        parse_id_list(&self.context(), key, self.require(key)?)
    }

    /// Record id parsed as an unsigned integer
    pub fn numeric_id(&self) -> Result<u32> {
        let raw = self
            .id()
            .ok_or_else(|| ParseError::malformed(self.line.trim(), "missing record id"))?;
        parse_number(raw, "id", raw)
    }
}

/// Tokenized non-blank lines of a section body
pub fn records(content: &str) -> impl Iterator<Item = LineRecord<'_>> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(LineRecord::parse)
}

/// Parse a numeric field with lexical-core
pub fn parse_number<T: lexical_core::FromLexical>(record: &str, field: &str, raw: &str) -> Result<T> {
    let trimmed = raw.trim();
    lexical_core::parse::<T>(trimmed.as_bytes())
        .map_err(|_| ParseError::invalid_value(record, field, trimmed))
}

/// Parse `1,2,3` (brackets optional) into ids
pub fn parse_id_list(record: &str, field: &str, raw: &str) -> Result<Vec<u32>> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_number(record, field, s))
        .collect()
}
