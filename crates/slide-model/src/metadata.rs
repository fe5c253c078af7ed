// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project header metadata

use serde::{Deserialize, Serialize};

/// Scalar project header parsed from the `model description` section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// File format version
    pub version: String,
    /// Project title
    pub title: String,
    /// Analysis type description
    pub analysis: Option<String>,
    pub author: Option<String>,
    /// Creation date as written in the document
    pub date: Option<String>,
    pub company: Option<String>,
    /// Free-text comment slots `str_comments1..5` by position; blank or absent is `None`
    pub comments: [Option<String>; 5],
    /// Unit system
    pub units: String,
    pub time_units: Option<String>,
    pub permeability_units_imperial: Option<String>,
    pub permeability_units_metric: Option<String>,
    /// Failure direction convention
    pub direction: String,
    /// Declared number of materials
    pub num_materials: u32,
    /// Declared number of anchor types
    pub num_anchors: u32,
    /// Horizontal seismic coefficient
    pub seismic: f64,
    /// Vertical seismic coefficient
    pub seismic_v: f64,
}

impl ProjectMetadata {
    /// Whether any seismic loading is applied
    pub fn is_seismic(&self) -> bool {
        self.seismic != 0.0 || self.seismic_v != 0.0
    }

    /// Filled comment slots with their 1-based slot number
    pub fn filled_comments(&self) -> impl Iterator<Item = (usize, &str)> {
        self.comments
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_deref().map(|c| (i + 1, c)))
    }
}
