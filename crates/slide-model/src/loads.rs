// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Applied loads

use crate::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of a force's `type_load` code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadKind {
    /// `type_load == 0`: load distributed between two points
    Distributed,
    /// `type_load == 1`: line load applied at a single point
    Line,
    /// Any other code, kept verbatim
    Other(i64),
}

impl LoadKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => LoadKind::Distributed,
            1 => LoadKind::Line,
            other => LoadKind::Other(other),
        }
    }
}

/// A force record from the `forces` section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Force {
    pub id: u32,
    pub point1: Point,
    /// Equal to `point1` when the source line has no second point
    pub point2: Point,
    /// Application angle in degrees
    pub angle: f64,
    /// Raw load type code
    pub type_load: i64,
    /// Magnitude at `point1`
    pub load: f64,
    /// Magnitude at `point2`, meaningful for distributed loads
    pub load2: Option<f64>,
}

impl Force {
    pub fn kind(&self) -> LoadKind {
        LoadKind::from_code(self.type_load)
    }

    /// Resultant magnitude per unit width, trapezoidal for distributed loads
    pub fn resultant(&self) -> f64 {
        match (self.kind(), self.load2) {
            (LoadKind::Distributed, Some(load2)) => {
                (self.load + load2) / 2.0 * self.point1.distance(&self.point2)
            }
            _ => self.load,
        }
    }
}

/// Loads aggregate: the flat list plus derived grouping views
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectLoads {
    pub forces: Vec<Force>,
}

impl ProjectLoads {
    /// Distributed loads, in source order
    pub fn distributed(&self) -> Vec<&Force> {
        self.of_kind(LoadKind::Distributed)
    }

    /// Line (single point) loads, in source order
    pub fn linear(&self) -> Vec<&Force> {
        self.of_kind(LoadKind::Line)
    }

    pub fn of_kind(&self, kind: LoadKind) -> Vec<&Force> {
        self.forces.iter().filter(|f| f.kind() == kind).collect()
    }

    /// Forces grouped by raw `type_load` code
    pub fn by_type(&self) -> BTreeMap<i64, Vec<&Force>> {
        let mut groups: BTreeMap<i64, Vec<&Force>> = BTreeMap::new();
        for force in &self.forces {
            groups.entry(force.type_load).or_default().push(force);
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }
}
