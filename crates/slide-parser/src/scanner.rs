// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section scanner using SIMD-accelerated line splitting
//!
//! Slices whitespace-structured documents into named blocks without any
//! per-field parsing.

use memchr::memchr;
use rustc_hash::FxHashMap;
use slide_model::{ParseError, Result};

/// Top-level section labels of the input document, in document order
pub const INPUT_SECTIONS: [&str; 12] = [
    "model description",
    "material types",
    "anchor types",
    "vertices",
    "cells",
    "anchors",
    "water table",
    "slope",
    "exterior",
    "forces",
    "slope limits",
    "material properties",
];

/// Iterator over `(byte_offset, line)` pairs
///
/// Lines exclude the `\n` terminator and a trailing `\r`.
pub struct LineScanner<'a> {
    content: &'a str,
    pos: usize,
}

impl<'a> LineScanner<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content, pos: 0 }
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.content.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        let end = match memchr(b'\n', &bytes[start..]) {
            Some(offset) => start + offset,
            None => bytes.len(),
        };
        self.pos = end + 1;

        let line = &self.content[start..end];
        Some((start, line.strip_suffix('\r').unwrap_or(line)))
    }
}

/// Whether a line opens a new top-level block (starts with a word character)
fn is_top_level(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Label -> trimmed section body
#[derive(Debug, Default)]
pub struct Sections<'a> {
    map: FxHashMap<&'static str, &'a str>,
}

impl<'a> Sections<'a> {
    /// Body of a section, if the label was found
    pub fn get(&self, label: &str) -> Option<&'a str> {
        self.map.get(label).copied()
    }

    /// Body of a section that must be present
    pub fn require(&self, label: &str) -> Result<&'a str> {
        self.get(label)
            .ok_or_else(|| ParseError::MissingSection(label.to_string()))
    }

    /// Body of an optional section; absent reads as empty
    pub fn optional(&self, label: &str) -> &'a str {
        self.get(label).unwrap_or("")
    }

    pub fn contains(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Section extractor for label-delimited documents
pub struct SectionExtractor;

impl SectionExtractor {
    /// Slice `content` into the sections named by `labels`
    ///
    /// A label matches at line start when followed directly by `:`. The body
    /// runs from after the colon up to the next line starting with a word
    /// character. The first occurrence of each label wins.
    pub fn extract<'a>(content: &'a str, labels: &[&'static str]) -> Sections<'a> {
        let lines: Vec<(usize, &str)> = LineScanner::new(content).collect();
        let mut map = FxHashMap::default();

        for (i, &(start, line)) in lines.iter().enumerate() {
            if !is_top_level(line) {
                continue;
            }
            for &label in labels {
                if map.contains_key(label) {
                    continue;
                }
                let Some(rest) = line.strip_prefix(label) else {
                    continue;
                };
                if !rest.starts_with(':') {
                    continue;
                }

                let body_start = start + label.len() + 1;
                let body_end = lines[i + 1..]
                    .iter()
                    .find(|(_, next)| is_top_level(next))
                    .map(|(next_start, _)| *next_start)
                    .unwrap_or(content.len());

                map.insert(label, content[body_start..body_end].trim());
            }
        }

        Sections { map }
    }

    /// Byte offset of the first line starting with `marker`
    pub fn find_marker(content: &str, marker: &str) -> Option<usize> {
        LineScanner::new(content)
            .find(|(_, line)| line.starts_with(marker))
            .map(|(start, _)| start)
    }

    /// Block from the `start` marker line up to the first later line that
    /// starts with any of `ends`, or to the end of the document
    pub fn marker_block<'a>(content: &'a str, start: &str, ends: &[&str]) -> Option<&'a str> {
        let begin = Self::find_marker(content, start)?;
        let tail = &content[begin..];
        let end = LineScanner::new(tail)
            .skip(1)
            .find(|(_, line)| ends.iter().any(|m| line.starts_with(m)))
            .map(|(offset, _)| offset)
            .unwrap_or(tail.len());
        Some(tail[..end].trim())
    }

    /// Split a block into `* key` headers and the value lines that follow
    ///
    /// Returns `(key, value)` pairs in document order; values are trimmed.
    pub fn star_blocks(content: &str) -> Vec<(&str, &str)> {
        let mut blocks = Vec::new();
        let mut current: Option<(&str, usize)> = None;

        for (start, line) in LineScanner::new(content) {
            if let Some(header) = line.strip_prefix('*') {
                if let Some((key, value_start)) = current.take() {
                    blocks.push((key, content[value_start..start].trim()));
                }
                let value_start = (start + line.len() + 1).min(content.len());
                current = Some((header.trim(), value_start));
            }
        }
        if let Some((key, value_start)) = current {
            blocks.push((key, content[value_start..].trim()));
        }

        blocks
    }
}
