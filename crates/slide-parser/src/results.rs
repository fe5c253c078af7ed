// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Results document parser
//!
//! The output document is a sequence of `* marker` blocks. Four of them are
//! consumed in order: the info block (method names), the surface block in
//! either grid or three-point layout, the global minimum block and the
//! per-slice data block, which is located but not decoded.

use crate::scanner::{LineScanner, SectionExtractor};
use crate::tokenizer::parse_number;
use slide_model::{
    EquilibriumTerms, GlobalMinimum, Method, ParseError, Point, ProjectResults, Result, Surface,
};

pub const INFO_MARKER: &str = "* Version";
pub const GRID_MARKER: &str = "* grid#";
pub const THREE_POINT_MARKER: &str = "* Three Point Surfaces";
pub const GLOBAL_MINIMUM_MARKER: &str = "* Global Minimum FS";
pub const SLICE_DATA_MARKER: &str = "* #data";
pub const BOLT_DATA_MARKER: &str = "* bolt data";

const GLOBAL_MINIMUM_TEXT: &str = "Global Minimum Text";

/// Fixed leading columns of a grid surface line (r, yleft, x1, y1, x2, y2, yright)
const GRID_COLUMNS: usize = 7;
/// Fixed leading columns of a three-point line (xc, yc, then the grid columns)
const THREE_POINT_COLUMNS: usize = 9;
/// xc yc r x1 y1 x2 y2 fs
const GLOBAL_MINIMUM_COLUMNS: usize = 8;

/// Parser position within the output document
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    ExpectMethods,
    ExpectSurfaceBlock,
    ExpectGlobalMinimumBlock,
    ExpectSliceBlock,
    Done,
}

/// Surface block encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceLayout {
    /// Nested blocks of `xc yc count` headers each followed by `count` lines
    Grid,
    /// Flat lines carrying their own circle center
    ThreePoint,
}

impl SurfaceLayout {
    fn marker(self) -> &'static str {
        match self {
            SurfaceLayout::Grid => GRID_MARKER,
            SurfaceLayout::ThreePoint => THREE_POINT_MARKER,
        }
    }

    /// Layout of the document; grid wins when both markers are present
    pub fn detect(content: &str) -> Option<Self> {
        [SurfaceLayout::Grid, SurfaceLayout::ThreePoint]
            .into_iter()
            .find(|layout| SectionExtractor::find_marker(content, layout.marker()).is_some())
    }
}

/// Lines that carry structure rather than data
fn is_structure(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('*') || line.starts_with('$')
}

/// Parse whitespace separated numbers of a data line
fn numbers(record: &str, line: &str) -> Result<Vec<f64>> {
    line.split_whitespace()
        .enumerate()
        .map(|(i, raw)| {
            lexical_core::parse::<f64>(raw.as_bytes())
                .map_err(|_| ParseError::invalid_value(record, format!("column {}", i + 1), raw))
        })
        .collect()
}

/// Builds [`ProjectResults`] by walking the output document's marker blocks
pub struct ResultsAssembler<'a> {
    content: &'a str,
    stage: Stage,
    results: ProjectResults,
}

impl<'a> ResultsAssembler<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            stage: Stage::ExpectMethods,
            results: ProjectResults::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run every stage to completion
    pub fn assemble(mut self) -> Result<ProjectResults> {
        while self.stage != Stage::Done {
            self.step()?;
        }
        Ok(self.results)
    }

    /// Consume the block expected at the current stage and advance
    pub fn step(&mut self) -> Result<Stage> {
        self.stage = match self.stage {
            Stage::ExpectMethods => {
                let block = self.block(INFO_MARKER, &[GRID_MARKER, THREE_POINT_MARKER])?;
                self.read_info(block)?;
                Stage::ExpectSurfaceBlock
            }
            Stage::ExpectSurfaceBlock => {
                let layout = SurfaceLayout::detect(self.content).ok_or_else(|| {
                    ParseError::MissingResultsSection(format!(
                        "{} | {}",
                        GRID_MARKER, THREE_POINT_MARKER
                    ))
                })?;
                let block = self.block(layout.marker(), &[GLOBAL_MINIMUM_MARKER])?;
                self.results.surfaces = match layout {
                    SurfaceLayout::Grid => decode_grid(block, &self.results.methods)?,
                    SurfaceLayout::ThreePoint => decode_three_point(block, &self.results.methods)?,
                };
                log::debug!(
                    "Decoded {} surfaces ({:?} layout)",
                    self.results.surfaces.len(),
                    layout
                );
                Stage::ExpectGlobalMinimumBlock
            }
            Stage::ExpectGlobalMinimumBlock => {
                let block = self.block(GLOBAL_MINIMUM_MARKER, &[SLICE_DATA_MARKER])?;
                self.results.global_minimums = decode_global_minimums(block)?;
                Stage::ExpectSliceBlock
            }
            Stage::ExpectSliceBlock => {
                // Located to validate the document; slice records stay undecoded
                let block = self.block(SLICE_DATA_MARKER, &[BOLT_DATA_MARKER])?;
                log::debug!("Skipped {} bytes of per-slice data", block.len());
                Stage::Done
            }
            Stage::Done => Stage::Done,
        };
        Ok(self.stage)
    }

    fn block(&self, start: &str, ends: &[&str]) -> Result<&'a str> {
        SectionExtractor::marker_block(self.content, start, ends)
            .ok_or_else(|| ParseError::MissingResultsSection(start.to_string()))
    }

    /// Methods, version and grid count from the info block
    fn read_info(&mut self, block: &str) -> Result<()> {
        let mut declared = None;
        let mut names = None;

        for (key, value) in SectionExtractor::star_blocks(block) {
            match key {
                "Version" => self.results.version = Some(value.to_string()),
                "#grids" => self.results.grid_count = Some(parse_number("info", key, value)?),
                "Number of analysis types" => {
                    declared = Some(parse_number::<usize>("info", key, value)?)
                }
                "Analysis names" => names = Some(value),
                _ => {}
            }
        }

        let names = names
            .ok_or_else(|| ParseError::MissingResultsSection("* Analysis names".to_string()))?;
        self.results.methods = names
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .enumerate()
            .map(|(id, name)| Method {
                id,
                name: name.to_string(),
            })
            .collect();

        if let Some(declared) = declared {
            if declared != self.results.methods.len() {
                log::warn!(
                    "Results declare {} analysis types but name {}",
                    declared,
                    self.results.methods.len()
                );
            }
        }
        log::debug!("Parsed {} analysis methods", self.results.methods.len());
        Ok(())
    }
}

// ============================================================================
// Surface Decoders
// ============================================================================

/// Expand one data line into a surface per method
///
/// `geometry` holds `r, yleft, x1, y1, x2, y2, yright`, followed by one fs
/// per method and a trailing `b1`.
fn expand_line(center: Point, values: &[f64], methods: &[Method], out: &mut Vec<Surface>) {
    let (geometry, rest) = values.split_at(GRID_COLUMNS);
    let (fs_values, b1) = rest.split_at(methods.len());

    out.extend(methods.iter().zip(fs_values).map(|(method, &fs)| Surface {
        method: method.name.clone(),
        radius: geometry[0],
        point1: Point::new(geometry[2], geometry[3]),
        point2: Point::new(geometry[4], geometry[5]),
        yleft: Some(geometry[1]),
        yright: Some(geometry[6]),
        fs,
        point_center: center,
        b1: b1.first().copied(),
    }));
}

fn check_width(record: &str, line: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(ParseError::malformed(
            record,
            format!(
                "expected {} columns, found {}: {:?}",
                expected,
                values.len(),
                line.trim()
            ),
        ));
    }
    Ok(())
}

/// Decode the grid layout
///
/// Inside each grid, a `xc yc count` line opens a grid point and the next
/// `count` data lines are its surfaces. Short lines between points (grid
/// number, grid dimensions) are skipped.
pub fn decode_grid(block: &str, methods: &[Method]) -> Result<Vec<Surface>> {
    const RECORD: &str = "grid surface";
    let width = GRID_COLUMNS + methods.len() + 1;
    let mut surfaces = Vec::new();
    let mut lines = block.lines().filter(|line| !is_structure(line));

    while let Some(line) = lines.next() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            continue;
        }
        let &[xc, yc, count] = tokens.as_slice() else {
            return Err(ParseError::malformed(
                RECORD,
                format!("expected grid point header, found {:?}", line.trim()),
            ));
        };
        let center = Point::new(
            parse_number(RECORD, "xc", xc)?,
            parse_number(RECORD, "yc", yc)?,
        );
        let count: usize = parse_number(RECORD, "count", count)?;

        for found in 0..count {
            let data = lines.next().ok_or_else(|| {
                ParseError::malformed(
                    RECORD,
                    format!("grid point declares {} surfaces, found {}", count, found),
                )
            })?;
            let values = numbers(RECORD, data)?;
            check_width(RECORD, data, &values, width)?;
            expand_line(center, &values, methods, &mut surfaces);
        }
    }

    Ok(surfaces)
}

/// Decode the three-point layout
pub fn decode_three_point(block: &str, methods: &[Method]) -> Result<Vec<Surface>> {
    const RECORD: &str = "three point surface";
    let width = THREE_POINT_COLUMNS + methods.len() + 1;
    let mut surfaces = Vec::new();

    for line in block.lines().filter(|line| !is_structure(line)) {
        let values = numbers(RECORD, line)?;
        check_width(RECORD, line, &values, width)?;
        let center = Point::new(values[0], values[1]);
        expand_line(center, &values[2..], methods, &mut surfaces);
    }

    Ok(surfaces)
}

// ============================================================================
// Global Minima
// ============================================================================

/// Split the free-text block into per-method chunks
///
/// A line holding only an integer opens a chunk, even if nothing follows it.
fn text_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;

    for (start, line) in LineScanner::new(text) {
        let trimmed = line.trim();
        let is_index = !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit());
        if !is_index {
            continue;
        }
        let preamble = text[open.unwrap_or(0)..start].trim();
        match open {
            Some(begin) => blocks.push(text[begin..start].trim()),
            None if !preamble.is_empty() => blocks.push(preamble),
            None => {}
        }
        open = Some((start + line.len() + 1).min(text.len()));
    }

    match open {
        Some(begin) => blocks.push(text[begin..].trim()),
        None if !text.trim().is_empty() => blocks.push(text.trim()),
        None => {}
    }
    blocks
}

/// Equilibrium terms of one text chunk; unknown keys are ignored
fn equilibrium_terms(chunk: &str) -> Result<EquilibriumTerms> {
    const RECORD: &str = "global minimum text";
    let mut terms = EquilibriumTerms::default();

    for (key, value) in chunk.lines().filter_map(|line| line.split_once('=')) {
        let key = key.trim();
        let slot = match key {
            "Resisting Moment" => &mut terms.resisting_moment,
            "Driving Moment" => &mut terms.driving_moment,
            "Resisting Horizontal Force" => &mut terms.resisting_force,
            "Driving Horizontal Force" => &mut terms.driving_force,
            _ => continue,
        };
        let raw = value.split_whitespace().next().unwrap_or("");
        *slot = Some(parse_number(RECORD, key, raw)?);
    }

    Ok(terms)
}

/// One `xc yc r x1 y1 x2 y2 fs name...` table line
fn minimum_surface(line: &str) -> Result<Surface> {
    const RECORD: &str = "global minimum";
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() <= GLOBAL_MINIMUM_COLUMNS {
        return Err(ParseError::malformed(
            RECORD,
            format!("expected columns and a method name, found {:?}", line.trim()),
        ));
    }
    let values = tokens[..GLOBAL_MINIMUM_COLUMNS]
        .iter()
        .map(|raw| parse_number::<f64>(RECORD, "column", raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(Surface {
        method: tokens[GLOBAL_MINIMUM_COLUMNS..].join(" "),
        radius: values[2],
        point1: Point::new(values[3], values[4]),
        point2: Point::new(values[5], values[6]),
        yleft: None,
        yright: None,
        fs: values[7],
        point_center: Point::new(values[0], values[1]),
        b1: None,
    })
}

/// Pair table line *i* with text chunk *i*
pub fn decode_global_minimums(block: &str) -> Result<Vec<GlobalMinimum>> {
    let sub_blocks = SectionExtractor::star_blocks(block);
    let table = sub_blocks
        .iter()
        .find(|(key, _)| key.starts_with("Global Minimum FS"))
        .map(|(_, value)| *value)
        .ok_or_else(|| ParseError::MissingResultsSection(GLOBAL_MINIMUM_MARKER.to_string()))?;
    let text = sub_blocks
        .iter()
        .find(|(key, _)| *key == GLOBAL_MINIMUM_TEXT)
        .map(|(_, value)| *value)
        .unwrap_or("");

    let surfaces = table
        .lines()
        .filter(|line| !is_structure(line))
        .map(minimum_surface)
        .collect::<Result<Vec<_>>>()?;
    let chunks = text_blocks(text);

    if surfaces.len() != chunks.len() {
        return Err(ParseError::ResultCorrelation(format!(
            "{} global minimum lines but {} text blocks",
            surfaces.len(),
            chunks.len()
        )));
    }

    surfaces
        .into_iter()
        .zip(chunks)
        .map(|(surface, chunk)| {
            Ok(GlobalMinimum {
                surface,
                equilibrium_terms: equilibrium_terms(chunk)?,
            })
        })
        .collect()
}

/// Parse a complete output document
pub fn parse_results(content: &str) -> Result<ProjectResults> {
    ResultsAssembler::new(content).assemble()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const THREE_POINT_OUTPUT: &str = "* Version
6.029
* Number of analysis types
2
* Analysis names
bishop simplified
spencer
* Three Point Surfaces (xc,yc,r,yleft,x1,y1,x2,y2,yright,fs1,fs2,...,b1)
17.16 23.58 9.07 23.58 8.09 23.58 15.92 14.60 14.60 1.85461 1.82308 0.5
$end
* Global Minimum FS (xc,yc,r,x1,y1,x2,y2,fs,name)
17.16 23.58 9.07 8.09 23.58 15.92 14.60 1.85461 bishop simplified
17.16 23.58 9.07 8.09 23.58 15.92 14.60 1.82308 spencer
* Global Minimum Text
1
Resisting Moment=1500.5
Driving Moment=809.1
2
Resisting Horizontal Force=120
Driving Horizontal Force=65.8
* #data
1 2 3
* bolt data (#bolts,nummethods)
0 2";

    const GRID_OUTPUT: &str = "* Version
6.029
* #grids
1
* Number of analysis types
1
* Analysis names
bishop simplified
* grid#
1
* nx ny
1 0
* xc yc #surfaces
10.5 20.0 2
21.13 24.46 3.73 24.46 38.56 8.56 8.56 2.38275 0.5
20.00 24.00 4.00 24.00 37.00 9.00 9.00 -112 0.5
11.5 20.0 1
19.00 23.00 5.00 23.00 36.00 9.50 9.50 1.97 0.5
* Global Minimum FS (xc,yc,r,x1,y1,x2,y2,fs,name)
11.5 20.0 19.00 5.00 23.00 36.00 9.50 1.97 bishop simplified
* Global Minimum Text
1
Resisting Moment=3000
Driving Moment=1522.8
* #data
";

    #[test]
    fn test_three_point_layout() {
        let results = parse_results(THREE_POINT_OUTPUT).unwrap();
        assert_eq!(results.version.as_deref(), Some("6.029"));
        assert_eq!(
            results.methods.iter().map(|m| (m.id, m.name.as_str())).collect::<Vec<_>>(),
            vec![(0, "bishop simplified"), (1, "spencer")]
        );

        assert_eq!(results.surfaces.len(), 2);
        let (bishop, spencer) = (&results.surfaces[0], &results.surfaces[1]);
        assert_eq!(bishop.method, "bishop simplified");
        assert_eq!(spencer.method, "spencer");
        assert_relative_eq!(bishop.fs, 1.85461);
        assert_relative_eq!(spencer.fs, 1.82308);
        assert_eq!(bishop.point_center, spencer.point_center);
        assert_eq!(bishop.point1, spencer.point1);
        assert_eq!(bishop.radius, spencer.radius);
        assert_eq!(bishop.b1, Some(0.5));
        assert_eq!(bishop.point_center, Point::new(17.16, 23.58));
    }

    #[test]
    fn test_global_minimum_pairing() {
        let results = parse_results(THREE_POINT_OUTPUT).unwrap();
        assert_eq!(results.global_minimums.len(), 2);

        let bishop = results.global_minimum_for("bishop simplified").unwrap();
        assert_eq!(bishop.equilibrium_terms.resisting_moment, Some(1500.5));
        assert_eq!(bishop.equilibrium_terms.resisting_force, None);

        let spencer = results.global_minimum_for("spencer").unwrap();
        assert_eq!(spencer.equilibrium_terms.driving_force, Some(65.8));
        assert_eq!(spencer.equilibrium_terms.driving_moment, None);
        assert_eq!(spencer.surface.yleft, None);
    }

    #[test]
    fn test_grid_layout() {
        let results = parse_results(GRID_OUTPUT).unwrap();
        assert_eq!(results.grid_count, Some(1));
        assert_eq!(results.surfaces.len(), 3);
        assert_eq!(results.surfaces[0].point_center, Point::new(10.5, 20.0));
        assert_eq!(results.surfaces[2].point_center, Point::new(11.5, 20.0));
        assert!(!results.surfaces[1].has_valid_fs());
        assert_eq!(results.surfaces[0].yleft, Some(24.46));
        assert_relative_eq!(
            results.global_minimums[0].equilibrium_terms.moment_ratio().unwrap(),
            3000.0 / 1522.8
        );
    }

    #[test]
    fn test_grid_fs_pairs_with_method_order() {
        let methods: Vec<Method> = ["bishop simplified", "spencer"]
            .into_iter()
            .enumerate()
            .map(|(id, name)| Method {
                id,
                name: name.into(),
            })
            .collect();
        let block = "* grid#
1
* nx ny
1 0
10 20 2
9.0 24.0 3.0 24.0 30.0 8.0 8.0 1.50 1.70 0.5
9.5 24.0 2.5 24.0 31.0 8.0 8.0 1.41 1.44 0.5
11 20 1
8.0 23.0 4.0 23.0 29.0 8.5 8.5 2.10 1.95 0.5";

        let surfaces = decode_grid(block, &methods).unwrap();
        let pairs: Vec<(&str, f64, Point)> = surfaces
            .iter()
            .map(|s| (s.method.as_str(), s.fs, s.point_center))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("bishop simplified", 1.50, Point::new(10.0, 20.0)),
                ("spencer", 1.70, Point::new(10.0, 20.0)),
                ("bishop simplified", 1.41, Point::new(10.0, 20.0)),
                ("spencer", 1.44, Point::new(10.0, 20.0)),
                ("bishop simplified", 2.10, Point::new(11.0, 20.0)),
                ("spencer", 1.95, Point::new(11.0, 20.0)),
            ]
        );
        assert_eq!(surfaces[2].radius, 9.5);
        assert_eq!(surfaces[3].radius, 9.5);
    }

    #[test]
    fn test_grid_point_short_of_surfaces() {
        let methods = vec![Method {
            id: 0,
            name: "bishop simplified".into(),
        }];
        let block = "* grid#\n10 20 2\n1 2 3 4 5 6 7 1.5 0.5";
        assert!(matches!(
            decode_grid(block, &methods),
            Err(ParseError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_strict_width() {
        let doc = THREE_POINT_OUTPUT.replace("1.85461 1.82308 0.5", "1.85461 0.5");
        assert!(matches!(
            parse_results(&doc),
            Err(ParseError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_correlation_mismatch() {
        let doc = THREE_POINT_OUTPUT.replace("2\nResisting Horizontal Force=120\n", "");
        assert!(matches!(
            parse_results(&doc),
            Err(ParseError::ResultCorrelation(_))
        ));
    }

    #[test]
    fn test_empty_text_block_counts() {
        assert_eq!(text_blocks("1\n2\nDriving Moment=5"), vec!["", "Driving Moment=5"]);
        assert_eq!(text_blocks("Resisting Moment=1"), vec!["Resisting Moment=1"]);
        assert!(text_blocks("").is_empty());
    }

    #[test]
    fn test_missing_markers() {
        let doc = THREE_POINT_OUTPUT.replace("* #data", "* data");
        assert_eq!(
            parse_results(&doc).unwrap_err(),
            ParseError::MissingResultsSection(SLICE_DATA_MARKER.to_string())
        );

        let doc = THREE_POINT_OUTPUT.replace("* Three Point Surfaces", "* Surfaces");
        assert!(matches!(
            parse_results(&doc),
            Err(ParseError::MissingResultsSection(_))
        ));

        assert_eq!(
            parse_results("").unwrap_err(),
            ParseError::MissingResultsSection(INFO_MARKER.to_string())
        );
    }

    #[test]
    fn test_stages_advance_in_order() {
        let mut assembler = ResultsAssembler::new(THREE_POINT_OUTPUT);
        assert_eq!(assembler.stage(), Stage::ExpectMethods);
        assert_eq!(assembler.step().unwrap(), Stage::ExpectSurfaceBlock);
        assert_eq!(assembler.step().unwrap(), Stage::ExpectGlobalMinimumBlock);
        assert_eq!(assembler.step().unwrap(), Stage::ExpectSliceBlock);
        assert_eq!(assembler.step().unwrap(), Stage::Done);
    }
}
