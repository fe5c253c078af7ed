// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parses a synthetic project with a strip mesh and a few thousand surfaces.

use std::fmt::Write;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use slide_model::ProjectParser;
use slide_parser::SlideParser;

const COLUMNS: usize = 500;
const SURFACES: usize = 2_000;
const METHODS: [&str; 3] = ["bishop simplified", "janbu simplified", "spencer"];

/// Two rows of vertices joined by triangles
fn input_document() -> String {
    let mut doc = String::from(
        "model description:
  version: 6.029
  title: \"bench\"
  units: 0
  seismic: 0
  seismicv: 0
  direction: 1
  nummaterials: 1
  numanchors: 0
material types:
  soil1 = type: 0 c: 5 phi: 32 uw: 19
vertices:
",
    );
    for i in 0..COLUMNS {
        let _ = writeln!(doc, "  {} x: {} y: 0", 2 * i + 1, i);
        let _ = writeln!(doc, "  {} x: {} y: 5", 2 * i + 2, i);
    }

    doc.push_str("cells:\n");
    let mut cell = 1;
    for i in 0..COLUMNS - 1 {
        let (a, b, c, d) = (2 * i + 1, 2 * i + 2, 2 * i + 3, 2 * i + 4);
        let _ = writeln!(doc, "  {} vertices: [{},{},{}] material: soil1", cell, a, c, b);
        let _ = writeln!(doc, "  {} vertices: [{},{},{}] material: soil1", cell + 1, c, d, b);
        cell += 2;
    }

    doc.push_str("slope:\n  1  vertices: [");
    let ids: Vec<String> = (0..COLUMNS).map(|i| (2 * i + 2).to_string()).collect();
    doc.push_str(&ids.join(","));
    doc.push_str("]\nmaterial properties:\n  Soil red: 120 green: 100 blue: 60 hatch: 1\n");
    doc
}

fn output_document() -> String {
    let mut doc = format!(
        "* Version\n6.029\n* Number of analysis types\n{}\n* Analysis names\n{}\n",
        METHODS.len(),
        METHODS.join("\n")
    );
    doc.push_str("* Three Point Surfaces (xc,yc,r,yleft,x1,y1,x2,y2,yright,fs1,fs2,...,b1)\n");
    for i in 0..SURFACES {
        let x = i as f64 * 0.1;
        let _ = writeln!(
            doc,
            "{} 12.5 9.1 5 {} 5 {} 0 0 1.{:03} 1.{:03} 1.{:03} 0.5",
            x,
            x - 4.0,
            x + 4.0,
            i % 1000,
            (i + 7) % 1000,
            (i + 13) % 1000
        );
    }
    doc.push_str("$end\n* Global Minimum FS (xc,yc,r,x1,y1,x2,y2,fs,name)\n");
    for name in METHODS {
        let _ = writeln!(doc, "0 12.5 9.1 -4 5 4 0 1.000 {}", name);
    }
    doc.push_str("* Global Minimum Text\n1\nResisting Moment=10\nDriving Moment=10\n2\n3\n");
    doc.push_str("* #data\n* bolt data (#bolts,nummethods)\n0 3\n");
    doc
}

fn parse_project(c: &mut Criterion) {
    let input = input_document();
    let output = output_document();

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes((input.len() + output.len()) as u64));

    group.bench_function("input only", |b| {
        let parser = SlideParser::input_only();
        b.iter(|| parser.parse(&input, None).unwrap())
    });
    group.bench_function("with results", |b| {
        let parser = SlideParser::new();
        b.iter(|| parser.parse(&input, Some(&output)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, parse_project);
criterion_main!(benches);
