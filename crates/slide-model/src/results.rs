// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stability analysis results

use crate::Point;
use serde::{Deserialize, Serialize};

/// A limit-equilibrium method declared by the results document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// 0-based declaration index, the key used to pair fs values
    pub id: usize,
    pub name: String,
}

/// One candidate circular failure surface evaluated by one method
///
/// Grid and three-point layouts both normalize to this record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Method name
    pub method: String,
    pub radius: f64,
    /// Left intersection with the slope
    pub point1: Point,
    /// Right intersection with the slope
    pub point2: Point,
    pub yleft: Option<f64>,
    pub yright: Option<f64>,
    /// Factor of safety
    pub fs: f64,
    /// Circle center
    pub point_center: Point,
    pub b1: Option<f64>,
}

impl Surface {
    /// Whether `fs` is an actual safety factor rather than a negative error code
    pub fn has_valid_fs(&self) -> bool {
        self.fs.is_finite() && self.fs > 0.0
    }
}

/// Equilibrium terms of a global minimum surface
///
/// Moment terms exist only for moment-equilibrium methods and force terms
/// only for force-equilibrium methods; absent means "not applicable".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumTerms {
    pub resisting_moment: Option<f64>,
    pub driving_moment: Option<f64>,
    pub resisting_force: Option<f64>,
    pub driving_force: Option<f64>,
}

impl EquilibriumTerms {
    /// Resisting over driving moment, when both are known
    pub fn moment_ratio(&self) -> Option<f64> {
        match (self.resisting_moment, self.driving_moment) {
            (Some(r), Some(d)) if d != 0.0 => Some(r / d),
            _ => None,
        }
    }

    /// Resisting over driving horizontal force, when both are known
    pub fn force_ratio(&self) -> Option<f64> {
        match (self.resisting_force, self.driving_force) {
            (Some(r), Some(d)) if d != 0.0 => Some(r / d),
            _ => None,
        }
    }
}

/// Lowest-fs surface of one method
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalMinimum {
    pub surface: Surface,
    pub equilibrium_terms: EquilibriumTerms,
}

/// Results aggregate
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectResults {
    /// Results format version, when declared
    pub version: Option<String>,
    /// Declared number of search grids, when present
    pub grid_count: Option<u32>,
    pub methods: Vec<Method>,
    /// One entry per evaluated candidate per method
    pub surfaces: Vec<Surface>,
    /// One entry per method, in document order
    pub global_minimums: Vec<GlobalMinimum>,
}

impl ProjectResults {
    /// Method by 0-based id
    pub fn method(&self, id: usize) -> Option<&Method> {
        self.methods.get(id)
    }

    /// All surfaces evaluated by the named method
    pub fn surfaces_for<'a>(&'a self, method: &'a str) -> impl Iterator<Item = &'a Surface> {
        self.surfaces.iter().filter(move |s| s.method == method)
    }

    /// Global minimum of the named method
    pub fn global_minimum_for(&self, method: &str) -> Option<&GlobalMinimum> {
        self.global_minimums
            .iter()
            .find(|g| g.surface.method == method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(method: &str, fs: f64) -> Surface {
        Surface {
            method: method.into(),
            radius: 10.0,
            point1: Point::new(0.0, 5.0),
            point2: Point::new(8.0, 1.0),
            yleft: None,
            yright: None,
            fs,
            point_center: Point::new(4.0, 12.0),
            b1: None,
        }
    }

    #[test]
    fn test_queries_by_method() {
        let results = ProjectResults {
            methods: vec![
                Method {
                    id: 0,
                    name: "bishop simplified".into(),
                },
                Method {
                    id: 1,
                    name: "spencer".into(),
                },
            ],
            surfaces: vec![
                surface("bishop simplified", 1.4),
                surface("spencer", 1.5),
                surface("bishop simplified", 1.3),
            ],
            global_minimums: vec![GlobalMinimum {
                surface: surface("spencer", 1.2),
                equilibrium_terms: EquilibriumTerms::default(),
            }],
            ..Default::default()
        };
        assert_eq!(results.method(1).map(|m| m.name.as_str()), Some("spencer"));
        assert_eq!(results.surfaces_for("bishop simplified").count(), 2);
        assert!(results.global_minimum_for("spencer").is_some());
        assert!(results.global_minimum_for("janbu").is_none());
    }

    #[test]
    fn test_equilibrium_ratios() {
        let terms = EquilibriumTerms {
            resisting_moment: Some(300.0),
            driving_moment: Some(200.0),
            ..Default::default()
        };
        assert_eq!(terms.moment_ratio(), Some(1.5));
        assert_eq!(terms.force_ratio(), None);
        assert!(!surface("x", -112.0).has_valid_fs());
    }
}
