// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh geometry assembly with vertex id resolution

use crate::scanner::Sections;
use crate::tokenizer::{parse_id_list, records, LineRecord};
use rustc_hash::FxHashMap;
use slide_model::{
    Cell, ParseError, Point, ProjectGeometry, ProjectProperties, Result, SlopeLimits, Support,
    Vertex, VertexId,
};

/// Read an `x1 y1` style coordinate pair
fn point(record: &LineRecord, x: &str, y: &str) -> Result<Point> {
    Ok(Point::new(record.f64(x)?, record.f64(y)?))
}

/// Builds [`ProjectGeometry`] once the vertex arena is known
///
/// Vertices are parsed first; every later id reference is resolved against
/// the arena and fails with `DanglingReference` when it was never declared.
pub struct GeometryAssembler {
    vertices: Vec<Vertex>,
    index: FxHashMap<VertexId, usize>,
}

impl GeometryAssembler {
    /// Parse the `vertices` section into the arena
    pub fn from_vertices(content: &str) -> Result<Self> {
        let mut vertices = Vec::new();
        let mut index = FxHashMap::default();

        for record in records(content) {
            let id = VertexId(record.numeric_id()?);
            let vertex = Vertex {
                id,
                point: point(&record, "x", "y")?,
            };
            if index.insert(id, vertices.len()).is_some() {
                return Err(ParseError::malformed(
                    record.context(),
                    "duplicate vertex id",
                ));
            }
            vertices.push(vertex);
        }

        Ok(Self { vertices, index })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Resolve a declared vertex id
    pub fn resolve(&self, id: u32) -> Result<&Vertex> {
        self.index
            .get(&VertexId(id))
            .map(|&slot| &self.vertices[slot])
            .ok_or_else(|| ParseError::dangling("vertex", id))
    }

    /// Parse the `cells` section
    pub fn cells(&self, content: &str, properties: &ProjectProperties) -> Result<Vec<Cell>> {
        records(content)
            .map(|record| {
                let ids = record.id_list("vertices")?;
                let &[a, b, c] = ids.as_slice() else {
                    return Err(ParseError::malformed(
                        record.context(),
                        format!("expected 3 vertex ids, found {}", ids.len()),
                    ));
                };

                let material = record.require("material")?;
                if properties.material(material).is_none() {
                    return Err(ParseError::dangling("material", material));
                }

                Ok(Cell {
                    id: record.numeric_id()?,
                    vertices: [self.resolve(a)?.id, self.resolve(b)?.id, self.resolve(c)?.id],
                    property_id: material.to_string(),
                })
            })
            .collect()
    }

    /// Parse the `anchors` section into support segments
    pub fn supports(content: &str, properties: &ProjectProperties) -> Result<Vec<Support>> {
        records(content)
            .map(|record| {
                let material = record.require("material")?;
                if properties.support(material).is_none() {
                    return Err(ParseError::dangling("support", material));
                }

                Ok(Support {
                    id: record.numeric_id()?,
                    point1: point(&record, "x1", "y1")?,
                    point2: point(&record, "x2", "y2")?,
                    property_id: material.to_string(),
                })
            })
            .collect()
    }

    /// Parse a single-line vertex chain (`water table`, `slope`, `exterior`)
    pub fn chain(&self, label: &str, content: &str) -> Result<Vec<VertexId>> {
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());
        let Some(line) = lines.next() else {
            return Ok(Vec::new());
        };
        let extra = lines.count();
        if extra > 0 {
            log::warn!("Ignoring {} extra line(s) in '{}' section", extra, label);
        }

        let record = LineRecord::parse(line);
        let raw = record
            .get("vertices")
            .or_else(|| record.fields().first().map(|(_, value)| *value))
            .ok_or_else(|| ParseError::missing_field(label, "vertices"))?;

        parse_id_list(label, "vertices", raw)?
            .into_iter()
            .map(|id| self.resolve(id).map(|v| v.id))
            .collect()
    }

    /// Parse `slope limits`: empty, or one four-coordinate line
    pub fn slope_limits(content: &str) -> Result<Option<SlopeLimits>> {
        const RECORD: &str = "slope limits";
        const FIELDS: [&str; 4] = ["x1", "y1", "x2", "y2"];

        let mut lines = content.lines().filter(|line| !line.trim().is_empty());
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        if lines.next().is_some() {
            return Err(ParseError::malformed(RECORD, "expected a single line"));
        }

        let record = LineRecord::parse(line);
        let keys: Vec<&str> = record.fields().iter().map(|(key, _)| *key).collect();
        if !record.prefix().is_empty() || keys != FIELDS {
            return Err(ParseError::malformed(
                RECORD,
                format!("expected 'x1 y1 x2 y2', found {:?}", line.trim()),
            ));
        }
        Ok(Some(SlopeLimits {
            point1: point(&record, "x1", "y1")?,
            point2: point(&record, "x2", "y2")?,
        }))
    }

    /// Assemble the full geometry from the extracted sections
    pub fn assemble(self, sections: &Sections, properties: &ProjectProperties) -> Result<ProjectGeometry> {
        let cells = self.cells(sections.require("cells")?, properties)?;
        let supports = Self::supports(sections.optional("anchors"), properties)?;
        let water_table = self.chain("water table", sections.optional("water table"))?;
        let slope = self.chain("slope", sections.optional("slope"))?;
        let exterior = self.chain("exterior", sections.optional("exterior"))?;
        let slope_limits = Self::slope_limits(sections.optional("slope limits"))?;

        log::debug!(
            "Assembled geometry: {} vertices, {} cells, {} supports",
            self.vertices.len(),
            cells.len(),
            supports.len()
        );

        Ok(ProjectGeometry {
            vertices: self.vertices,
            cells,
            supports,
            water_table,
            slope,
            exterior,
            slope_limits,
        })
    }
}
