// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slide-Lite Parser - slope stability project parser
//!
//! This crate turns the two decompressed text payloads of a slope stability
//! project (the input document and the optional results document) into a
//! typed [`ProjectModel`]. It implements the traits defined in `slide-model`.
//!
//! # Features
//!
//! - **Section scanning** using `memchr`
//! - **Line tokenization** using `nom` combinators
//! - **Numeric fields** parsed with `lexical-core`
//! - **Closed variant dispatch** for material and support parameters
//! - **Both surface layouts** (grid and three-point) normalized to one shape
//! - **Progress reporting** through a callback
//!
//! # Example
//!
//! ```ignore
//! use slide_parser::SlideParser;
//! use slide_model::ProjectParser;
//!
//! let parser = SlideParser::new();
//! let model = parser.parse(input, Some(output))?;
//!
//! println!("Minimum FS: {}", model.min_safety_factor()?);
//! ```

mod geometry;
mod loads;
mod metadata;
mod model;
mod properties;
mod results;
mod scanner;
mod styles;
mod tokenizer;

#[cfg(test)]
mod fixtures;

pub use geometry::GeometryAssembler;
pub use loads::LoadAssembler;
pub use metadata::parse_metadata;
pub use properties::{parse_properties, ParamsFactory};
pub use results::{parse_results, ResultsAssembler, Stage, SurfaceLayout};
pub use scanner::{LineScanner, SectionExtractor, Sections, INPUT_SECTIONS};
pub use styles::{StyleEntry, StyleTable};
pub use tokenizer::{tokenize, LineRecord, Token};

use slide_model::{ProgressCallback, ProjectModel, ProjectParser, Result};
use std::borrow::Cow;

/// Main project parser implementing `ProjectParser`
///
/// Entry point for parsing a project. Results are decoded only when an
/// output document is supplied and `parse_results` is set.
#[derive(Clone, Copy, Debug)]
pub struct SlideParser {
    /// Whether to decode the output document when one is given
    pub parse_results: bool,
}

impl Default for SlideParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideParser {
    /// Create a new parser with default settings
    pub fn new() -> Self {
        Self {
            parse_results: true,
        }
    }

    /// Create a parser that ignores any output document
    pub fn input_only() -> Self {
        Self {
            parse_results: false,
        }
    }

    /// Set whether to decode results
    pub fn with_results(mut self, enabled: bool) -> Self {
        self.parse_results = enabled;
        self
    }

    /// Parse raw payloads, dropping invalid UTF-8 sequences
    pub fn parse_bytes(&self, input: &[u8], output: Option<&[u8]>) -> Result<ProjectModel> {
        let input = decode_lossy(input);
        let output = output.map(decode_lossy);
        self.parse(&input, output.as_deref())
    }
}

impl ProjectParser for SlideParser {
    fn parse(&self, input: &str, output: Option<&str>) -> Result<ProjectModel> {
        model::build_project(input, output, self.parse_results, &|_, _| {})
    }

    fn parse_with_progress(
        &self,
        input: &str,
        output: Option<&str>,
        on_progress: ProgressCallback,
    ) -> Result<ProjectModel> {
        model::build_project(input, output, self.parse_results, &*on_progress)
    }
}

/// Decode a payload as UTF-8, skipping invalid byte sequences
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let mut text = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                text.push_str(chunk.valid());
            }
            Cow::Owned(text)
        }
    }
}

/// Quick parse function for simple use cases
pub fn parse(input: &str, output: Option<&str>) -> Result<ProjectModel> {
    SlideParser::new().parse(input, output)
}

/// Parse with progress reporting
pub fn parse_with_progress(
    input: &str,
    output: Option<&str>,
    on_progress: impl Fn(&str, f32) + Send + 'static,
) -> Result<ProjectModel> {
    SlideParser::new().parse_with_progress(input, output, Box::new(on_progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{INPUT, OUTPUT};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_parse_entry_points() {
        let model = parse(INPUT, Some(OUTPUT)).unwrap();
        assert!(model.has_results());

        let model = SlideParser::input_only().parse(INPUT, Some(OUTPUT)).unwrap();
        assert!(!model.has_results());

        let model = SlideParser::input_only()
            .with_results(true)
            .parse(INPUT, None)
            .unwrap();
        assert!(!model.has_results());
    }

    #[test]
    fn test_progress_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        parse_with_progress(INPUT, Some(OUTPUT), move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        assert!(calls.load(Ordering::SeqCst) >= 5);
    }

    #[test]
    fn test_decode_lossy_drops_invalid_bytes() {
        assert!(matches!(decode_lossy(b"plain"), Cow::Borrowed("plain")));
        assert_eq!(decode_lossy(b"ti\xfftle"), "title");
    }

    #[test]
    fn test_parse_bytes() {
        let mut input = INPUT.as_bytes().to_vec();
        input.extend_from_slice(b"\xfe\n");
        let model = SlideParser::new()
            .parse_bytes(&input, Some(OUTPUT.as_bytes()))
            .unwrap();
        assert_eq!(model.metadata().version, "6.029");
        assert_eq!(model.results().unwrap().methods.len(), 3);
    }
}
