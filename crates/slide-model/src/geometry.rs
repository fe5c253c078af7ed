// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh geometry: vertex arena and id-based references into it

use crate::{Point, VertexId};
use serde::{Deserialize, Serialize};

/// A mesh vertex, the sole owner of coordinate data
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub point: Point,
}

/// Triangular mesh cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: u32,
    /// Exactly three vertex references, in source order
    pub vertices: [VertexId; 3],
    /// Id of the `PropertyMaterial` filling this cell
    pub property_id: String,
}

/// Geometric support segment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Support {
    pub id: u32,
    pub point1: Point,
    pub point2: Point,
    /// Id of the `PropertySupport` describing this segment
    pub property_id: String,
}

impl Support {
    /// Segment length
    pub fn length(&self) -> f64 {
        self.point1.distance(&self.point2)
    }
}

/// Left and right limits of the slope search region
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlopeLimits {
    pub point1: Point,
    pub point2: Point,
}

/// Geometry aggregate
///
/// Vertices are stored once; cells and chains hold [`VertexId`]s that resolve
/// through [`ProjectGeometry::vertex`]. Absent chains are empty vectors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectGeometry {
    pub vertices: Vec<Vertex>,
    pub cells: Vec<Cell>,
    pub supports: Vec<Support>,
    pub water_table: Vec<VertexId>,
    pub slope: Vec<VertexId>,
    pub exterior: Vec<VertexId>,
    pub slope_limits: Option<SlopeLimits>,
}

impl ProjectGeometry {
    /// Look up a vertex by id
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        // Ids normally match declaration order
        let slot = (id.0 as usize).checked_sub(1)?;
        match self.vertices.get(slot) {
            Some(v) if v.id == id => Some(v),
            _ => self.vertices.iter().find(|v| v.id == id),
        }
    }

    /// Resolve the three vertices of a cell
    pub fn cell_vertices(&self, cell: &Cell) -> Option<[&Vertex; 3]> {
        let [a, b, c] = cell.vertices;
        Some([self.vertex(a)?, self.vertex(b)?, self.vertex(c)?])
    }

    /// Triangle area of a cell
    pub fn cell_area(&self, cell: &Cell) -> Option<f64> {
        let [a, b, c] = self.cell_vertices(cell)?;
        let (a, b, c) = (a.point, b.point, c.point);
        Some(((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0)
    }

    /// Cells filled with the given material
    pub fn cells_with_material<'a>(&'a self, material_id: &'a str) -> impl Iterator<Item = &'a Cell> {
        self.cells.iter().filter(move |c| c.property_id == material_id)
    }

    /// Resolve a chain of vertex ids into points, skipping unknown ids
    pub fn chain_points(&self, chain: &[VertexId]) -> Vec<Point> {
        chain
            .iter()
            .filter_map(|id| self.vertex(*id))
            .map(|v| v.point)
            .collect()
    }

    /// Water table polyline
    pub fn water_table_points(&self) -> Vec<Point> {
        self.chain_points(&self.water_table)
    }

    /// Slope surface polyline
    pub fn slope_points(&self) -> Vec<Point> {
        self.chain_points(&self.slope)
    }

    /// Exterior boundary polyline
    pub fn exterior_points(&self) -> Vec<Point> {
        self.chain_points(&self.exterior)
    }

    pub fn has_water_table(&self) -> bool {
        !self.water_table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> ProjectGeometry {
        ProjectGeometry {
            vertices: vec![
                Vertex {
                    id: VertexId(1),
                    point: Point::new(0.0, 0.0),
                },
                Vertex {
                    id: VertexId(2),
                    point: Point::new(10.0, 0.0),
                },
                Vertex {
                    id: VertexId(3),
                    point: Point::new(5.0, 5.0),
                },
            ],
            cells: vec![Cell {
                id: 1,
                vertices: [VertexId(1), VertexId(2), VertexId(3)],
                property_id: "soil1".into(),
            }],
            water_table: vec![VertexId(3), VertexId(1)],
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_cell_vertices() {
        let geometry = triangle();
        let [a, b, c] = geometry.cell_vertices(&geometry.cells[0]).unwrap();
        assert_eq!(a.point, Point::new(0.0, 0.0));
        assert_eq!(b.point, Point::new(10.0, 0.0));
        assert_eq!(c.point, Point::new(5.0, 5.0));
        assert_relative_eq!(geometry.cell_area(&geometry.cells[0]).unwrap(), 25.0);
    }

    #[test]
    fn test_vertex_lookup_out_of_order() {
        let mut geometry = triangle();
        geometry.vertices.reverse();
        assert_eq!(geometry.vertex(VertexId(1)).unwrap().point, Point::new(0.0, 0.0));
        assert!(geometry.vertex(VertexId(0)).is_none());
        assert!(geometry.vertex(VertexId(9)).is_none());
    }

    #[test]
    fn test_chains() {
        let geometry = triangle();
        assert!(geometry.has_water_table());
        assert_eq!(
            geometry.water_table_points(),
            vec![Point::new(5.0, 5.0), Point::new(0.0, 0.0)]
        );
        assert!(geometry.slope_points().is_empty());
        assert_eq!(geometry.cells_with_material("soil1").count(), 1);
    }

    #[test]
    fn test_support_length() {
        let support = Support {
            id: 1,
            point1: Point::new(28.0, 10.0),
            point2: Point::new(25.0, 6.0),
            property_id: "anchor1".into(),
        };
        assert_relative_eq!(support.length(), 5.0);
    }
}
