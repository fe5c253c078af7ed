// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for project parsing

use crate::{ProjectModel, Result};

/// Progress callback type for parsing operations
pub type ProgressCallback = Box<dyn Fn(&str, f32) + Send>;

/// Main parsing interface
///
/// The archive-reading collaborator hands over the two decompressed text
/// payloads: the input document (metadata, properties, geometry, loads) and
/// the optional output document (results).
///
/// # Example
///
/// ```ignore
/// use slide_model::ProjectParser;
///
/// let model = parser.parse(input, None)?;
/// println!("Title: {}", model.metadata().title);
/// ```
pub trait ProjectParser: Send + Sync {
    /// Parse the input document and, when given, the output document
    ///
    /// # Arguments
    /// * `input` - The input document text
    /// * `output` - The results document text, if the project was computed
    ///
    /// # Returns
    /// The complete `ProjectModel`, or the first `ParseError` encountered
    fn parse(&self, input: &str, output: Option<&str>) -> Result<ProjectModel>;

    /// Parse with progress reporting
    ///
    /// # Arguments
    /// * `input` - The input document text
    /// * `output` - The results document text, if the project was computed
    /// * `on_progress` - Callback receiving (phase_name, percent_complete)
    fn parse_with_progress(
        &self,
        input: &str,
        output: Option<&str>,
        on_progress: ProgressCallback,
    ) -> Result<ProjectModel>;
}
