// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display style catalog for materials and supports
//!
//! Style entries carry no explicit id. Entries with a hatch pattern are
//! numbered `soil1, soil2, ...` and entries without one `anchor1, ...`, each
//! counter advancing independently in document order.

use crate::tokenizer::{parse_number, tokenize, LineRecord, Token};
use rustc_hash::{FxHashMap, FxHashSet};
use slide_model::{Color, ParseError, Result};

/// Name, color and hatch of one catalog entry
#[derive(Clone, Debug, PartialEq)]
pub struct StyleEntry {
    pub name: String,
    pub color: Color,
    pub hatch: Option<u32>,
}

/// Style entries keyed by their derived `soil<N>` / `anchor<N>` id
#[derive(Debug, Default)]
pub struct StyleTable {
    entries: FxHashMap<String, StyleEntry>,
    order: Vec<String>,
    soils: u32,
    anchors: u32,
}

impl StyleTable {
    /// Build the table from the `material properties` section
    pub fn parse(content: &str) -> Result<Self> {
        let mut table = Self::default();

        for line in content.lines() {
            let Some(name) = style_name(line) else {
                continue;
            };
            let record = LineRecord::parse(line);
            let color = Color::new(
                channel(&record, name, "red")?,
                channel(&record, name, "green")?,
                channel(&record, name, "blue")?,
            );
            let hatch = record
                .get("hatch")
                .map(|raw| parse_number::<u32>(name, "hatch", raw))
                .transpose()?;

            table.push(StyleEntry {
                name: name.to_string(),
                color,
                hatch,
            });
        }

        Ok(table)
    }

    fn push(&mut self, entry: StyleEntry) {
        let id = if entry.hatch.is_some() {
            self.soils += 1;
            format!("soil{}", self.soils)
        } else {
            self.anchors += 1;
            format!("anchor{}", self.anchors)
        };
        self.order.push(id.clone());
        self.entries.insert(id, entry);
    }

    pub fn get(&self, id: &str) -> Option<&StyleEntry> {
        self.entries.get(id)
    }

    /// Entry for a type record id; a miss is a correlation failure
    pub fn lookup(&self, id: &str) -> Result<&StyleEntry> {
        self.get(id).ok_or_else(|| {
            ParseError::StyleCorrelation(format!("no style entry for record '{}'", id))
        })
    }

    /// Fail if any entry was never claimed by a type record
    pub fn ensure_claimed(&self, claimed: &FxHashSet<&str>) -> Result<()> {
        match self.order.iter().find(|id| !claimed.contains(id.as_str())) {
            Some(id) => Err(ParseError::StyleCorrelation(format!(
                "style entry '{}' has no matching type record",
                id
            ))),
            None => Ok(()),
        }
    }

    /// Derived ids in document order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn soil_count(&self) -> u32 {
        self.soils
    }

    pub fn anchor_count(&self) -> u32 {
        self.anchors
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Raw text before the `red:` label, which may itself contain colons
fn style_name(line: &str) -> Option<&str> {
    tokenize(line)
        .into_iter()
        .find(|(_, tok)| *tok == Token::Key("red"))
        .map(|(offset, _)| line[..offset].trim())
}

/// One 0..=255 color channel
fn channel(record: &LineRecord, name: &str, field: &str) -> Result<u8> {
    parse_number(name, field, record.require(field)?)
}
