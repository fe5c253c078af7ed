// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slide-Model - Typed model and trait definitions for slope-stability projects
//!
//! This crate provides the data types produced by parsing the textual payload of
//! a slope-stability project archive: project metadata, material and support
//! property catalogs, mesh geometry, applied loads and, when an analysis has
//! been run, the factor-of-safety results.
//!
//! # Architecture
//!
//! - [`ProjectParser`] - Entry point for parsing the input/output documents
//! - [`ProjectModel`] - Read-only aggregate root with the derived queries
//! - [`ProjectProperties`] - Materials and supports, each a closed parameter enum
//! - [`ProjectGeometry`] - Vertex arena plus id-based cells, chains and supports
//! - [`ProjectLoads`] - Applied forces with a grouping-by-type view
//! - [`ProjectResults`] - Methods, flattened surfaces and per-method global minima
//!
//! # Example
//!
//! ```ignore
//! use slide_model::ProjectParser;
//!
//! let model = parser.parse(input_text, Some(output_text))?;
//! println!("Minimum FS: {}", model.min_safety_factor()?);
//! ```

pub mod error;
pub mod geometry;
pub mod loads;
pub mod metadata;
pub mod project;
pub mod properties;
pub mod results;
pub mod traits;
pub mod types;

// Re-export all public types
pub use error::*;
pub use geometry::*;
pub use loads::*;
pub use metadata::*;
pub use project::*;
pub use properties::*;
pub use results::*;
pub use traits::*;
pub use types::*;
