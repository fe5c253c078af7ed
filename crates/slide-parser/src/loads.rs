// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Force record decoding

use crate::tokenizer::{records, LineRecord};
use slide_model::{Force, Point, ProjectLoads, Result};

/// Builds [`ProjectLoads`] from the `forces` section
pub struct LoadAssembler;

impl LoadAssembler {
    /// Decode one force line
    ///
    /// `x2`/`y2` default to the first point for single point loads; `load2`
    /// is kept whenever the line carries it, whatever the load type.
    pub fn force(record: &LineRecord) -> Result<Force> {
        let point1 = Point::new(record.f64("x1")?, record.f64("y1")?);
        let point2 = match (record.opt_f64("x2")?, record.opt_f64("y2")?) {
            (Some(x), Some(y)) => Point::new(x, y),
            _ => point1,
        };

        Ok(Force {
            id: record.numeric_id()?,
            point1,
            point2,
            angle: record.f64("angle")?,
            type_load: record.i64("type")?,
            load: record.f64("load")?,
            load2: record.opt_f64("load2")?,
        })
    }

    pub fn assemble(content: &str) -> Result<ProjectLoads> {
        let forces = records(content)
            .map(|record| Self::force(&record))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Parsed {} forces", forces.len());
        Ok(ProjectLoads { forces })
    }
}
