// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project assembly from the input and output documents

use crate::geometry::GeometryAssembler;
use crate::loads::LoadAssembler;
use crate::metadata::parse_metadata;
use crate::properties::parse_properties;
use crate::results::parse_results;
use crate::scanner::{SectionExtractor, INPUT_SECTIONS};
use crate::styles::StyleTable;
use slide_model::{ProjectMetadata, ProjectModel, ProjectProperties, ProjectResults, Result};

/// Build a [`ProjectModel`], reporting each phase to `on_progress`
///
/// `output` is only decoded when `parse_results` is set.
pub fn build_project(
    input: &str,
    output: Option<&str>,
    parse_results: bool,
    on_progress: &dyn Fn(&str, f32),
) -> Result<ProjectModel> {
    on_progress("Extracting sections", 0.0);
    let sections = SectionExtractor::extract(input, &INPUT_SECTIONS);
    log::debug!("Extracted {} input sections", sections.len());

    on_progress("Parsing metadata", 10.0);
    let metadata = parse_metadata(sections.require("model description")?)?;

    on_progress("Parsing properties", 20.0);
    let styles = StyleTable::parse(sections.require("material properties")?)?;
    let properties = parse_properties(
        &styles,
        sections.require("material types")?,
        sections.optional("anchor types"),
    )?;
    check_declared_counts(&metadata, &properties);

    on_progress("Assembling geometry", 40.0);
    let geometry = GeometryAssembler::from_vertices(sections.require("vertices")?)?
        .assemble(&sections, &properties)?;

    on_progress("Parsing loads", 60.0);
    let loads = LoadAssembler::assemble(sections.optional("forces"))?;

    let results = match output {
        Some(content) if parse_results => {
            on_progress("Parsing results", 70.0);
            Some(parse_results_document(content)?)
        }
        _ => None,
    };

    on_progress("Done", 100.0);
    Ok(ProjectModel::new(metadata, properties, geometry, loads, results))
}

fn parse_results_document(content: &str) -> Result<ProjectResults> {
    let results = parse_results(content)?;
    log::debug!(
        "Parsed results: {} methods, {} surfaces, {} global minima",
        results.methods.len(),
        results.surfaces.len(),
        results.global_minimums.len()
    );
    Ok(results)
}

/// Header counts are informational; a mismatch is logged, not fatal
fn check_declared_counts(metadata: &ProjectMetadata, properties: &ProjectProperties) {
    if metadata.num_materials as usize != properties.materials.len() {
        log::warn!(
            "Header declares {} materials but {} were parsed",
            metadata.num_materials,
            properties.materials.len()
        );
    }
    if metadata.num_anchors as usize != properties.supports.len() {
        log::warn!(
            "Header declares {} anchors but {} were parsed",
            metadata.num_anchors,
            properties.supports.len()
        );
    }
}
