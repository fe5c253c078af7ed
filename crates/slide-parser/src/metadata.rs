// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project header decoding from the `model description` section

use crate::tokenizer::parse_number;
use rustc_hash::FxHashMap;
use slide_model::{ParseError, ProjectMetadata, Result};

const RECORD: &str = "model description";

/// Number of free-text comment slots in the header
const COMMENT_SLOTS: usize = 5;

/// `key: value` lines, split at the first colon
struct HeaderFields<'a> {
    map: FxHashMap<&'a str, &'a str>,
}

impl<'a> HeaderFields<'a> {
    fn parse(content: &'a str) -> Self {
        let map = content
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim(), value.trim()))
            .collect();
        Self { map }
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.map.get(key).copied()
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    fn require(&self, key: &str) -> Result<&'a str> {
        self.get(key)
            .ok_or_else(|| ParseError::missing_field(RECORD, key))
    }

    fn number<T: lexical_core::FromLexical>(&self, key: &str) -> Result<T> {
        parse_number(RECORD, key, self.require(key)?)
    }
}

/// Strip one pair of surrounding double quotes
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Decode the project header
pub fn parse_metadata(content: &str) -> Result<ProjectMetadata> {
    let fields = HeaderFields::parse(content);

    let comments: [Option<String>; COMMENT_SLOTS] = std::array::from_fn(|i| {
        fields
            .get(&format!("str_comments{}", i + 1))
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    });

    Ok(ProjectMetadata {
        version: fields.require("version")?.to_string(),
        title: unquote(fields.require("title")?).to_string(),
        analysis: fields.text("str_analysis"),
        author: fields.text("str_author"),
        date: fields.text("str_date_created"),
        company: fields.text("str_company"),
        comments,
        units: fields.require("units")?.to_string(),
        time_units: fields.text("time_units"),
        permeability_units_imperial: fields.text("permeability_units_imperial"),
        permeability_units_metric: fields.text("permeability_units_metric"),
        direction: fields.require("direction")?.to_string(),
        num_materials: fields.number("nummaterials")?,
        num_anchors: fields.number("numanchors")?,
        seismic: fields.number("seismic")?,
        seismic_v: fields.number("seismicv")?,
    })
}
