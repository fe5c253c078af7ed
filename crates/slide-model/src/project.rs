// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ProjectModel - read-only aggregate root

use crate::{
    GlobalMinimum, ParseError, ProjectGeometry, ProjectLoads, ProjectMetadata, ProjectProperties,
    ProjectResults, Result,
};
use serde::{Deserialize, Serialize};

/// Fully parsed project
///
/// Owns every aggregate; all of them are released together when the model is
/// dropped. Results are present only when an output document was parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectModel {
    metadata: ProjectMetadata,
    properties: ProjectProperties,
    geometry: ProjectGeometry,
    loads: ProjectLoads,
    results: Option<ProjectResults>,
}

impl ProjectModel {
    /// Assemble a model from its parts
    pub fn new(
        metadata: ProjectMetadata,
        properties: ProjectProperties,
        geometry: ProjectGeometry,
        loads: ProjectLoads,
        results: Option<ProjectResults>,
    ) -> Self {
        Self {
            metadata,
            properties,
            geometry,
            loads,
            results,
        }
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn properties(&self) -> &ProjectProperties {
        &self.properties
    }

    pub fn geometry(&self) -> &ProjectGeometry {
        &self.geometry
    }

    pub fn loads(&self) -> &ProjectLoads {
        &self.loads
    }

    /// Analysis results, or `NoResults` when none were parsed
    pub fn results(&self) -> Result<&ProjectResults> {
        self.results.as_ref().ok_or(ParseError::NoResults)
    }

    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    /// Minimum factor of safety across all global minima
    pub fn min_safety_factor(&self) -> Result<f64> {
        self.critical_surface().map(|g| g.surface.fs)
    }

    /// Global minimum achieving the lowest factor of safety
    ///
    /// Ties resolve to the first record in parse order.
    pub fn critical_surface(&self) -> Result<&GlobalMinimum> {
        let mut minima = self.results()?.global_minimums.iter();
        let first = minima.next().ok_or(ParseError::NoResults)?;
        Ok(minima.fold(first, |best, candidate| {
            if candidate.surface.fs < best.surface.fs {
                candidate
            } else {
                best
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EquilibriumTerms, Point, Surface};

    fn minimum(method: &str, fs: f64) -> GlobalMinimum {
        GlobalMinimum {
            surface: Surface {
                method: method.into(),
                radius: 12.0,
                point1: Point::new(1.0, 9.0),
                point2: Point::new(14.0, 2.0),
                yleft: None,
                yright: None,
                fs,
                point_center: Point::new(6.0, 16.0),
                b1: None,
            },
            equilibrium_terms: EquilibriumTerms::default(),
        }
    }

    fn model_with(results: Option<ProjectResults>) -> ProjectModel {
        ProjectModel::new(
            ProjectMetadata::default(),
            ProjectProperties::default(),
            ProjectGeometry::default(),
            ProjectLoads::default(),
            results,
        )
    }

    #[test]
    fn test_min_safety_factor() {
        let model = model_with(Some(ProjectResults {
            global_minimums: vec![
                minimum("bishop simplified", 1.35),
                minimum("janbu simplified", 1.20),
                minimum("spencer", 1.41),
            ],
            ..Default::default()
        }));
        assert_eq!(model.min_safety_factor().unwrap(), 1.20);
        let critical = model.critical_surface().unwrap();
        assert_eq!(critical.surface.fs, 1.20);
        assert_eq!(critical.surface.method, "janbu simplified");
    }

    #[test]
    fn test_ties_resolve_to_first() {
        let model = model_with(Some(ProjectResults {
            global_minimums: vec![minimum("a", 1.1), minimum("b", 1.1)],
            ..Default::default()
        }));
        assert_eq!(model.critical_surface().unwrap().surface.method, "a");
    }

    #[test]
    fn test_no_results() {
        let model = model_with(None);
        assert!(!model.has_results());
        assert_eq!(model.results().unwrap_err(), ParseError::NoResults);
        assert_eq!(model.min_safety_factor().unwrap_err(), ParseError::NoResults);

        let empty = model_with(Some(ProjectResults::default()));
        assert_eq!(empty.critical_surface().unwrap_err(), ParseError::NoResults);
    }
}
