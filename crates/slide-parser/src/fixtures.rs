// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared test documents

/// Small but complete input document
pub const INPUT: &str = "model description:
  version: 6.029
  title: \"Test embankment\"
  units: 0
  seismic: 0
  seismicv: 0
  direction: 1
  nummaterials: 2
  numanchors: 1
material types:
  soil1 = type: 0 c: 12 phi: 30 uw: 18
  soil2 = type: 2 uw: 20 uwbwt: 21
anchor types:
  anchor1 = type: 1 fa: 1 sp: 1 cap: 100
vertices:
  1 x: 0.0 y: 0.0
  2 x: 10.0 y: 0.0
  3 x: 5.0 y: 5.0
  4 x: 10.0 y: 5.0
cells:
  1 vertices: [1,2,3] material: soil1
  2 vertices: [2,4,3] material: soil2
anchors:
  1 x1: 5 y1: 5 x2: 2 y2: 3 material: anchor1 group_id: -1 index_in_group: -1
water table:
slope:
  1  vertices: [1,3,4]
exterior:
  1  vertices: [1,2,4,3]
forces:
  1 type: 1 x1: 5 y1: 5 angle: 270 load: 10
material properties:
  ClaySoil red: 200 green: 150 blue: 50 hatch: 3
  Sand red: 230 green: 220 blue: 120 hatch: 5
  Bolt red: 0 green: 0 blue: 0
analysis settings:
  method: 1
";

/// Results for [`INPUT`] in three-point layout with three methods
pub const OUTPUT: &str = "* Version
6.029
* Number of analysis types
3
* Analysis names
bishop simplified
janbu simplified
spencer
* Three Point Surfaces (xc,yc,r,yleft,x1,y1,x2,y2,yright,fs1,fs2,...,b1)
4.0 9.0 6.5 5.0 0.5 3.0 9.0 4.5 5.0 1.35 1.20 1.41 0.5
4.5 9.5 7.0 5.0 0.2 3.1 9.5 4.6 5.0 1.52 1.38 1.60 0.5
$end
* Global Minimum FS (xc,yc,r,x1,y1,x2,y2,fs,name)
4.0 9.0 6.5 0.5 3.0 9.0 4.5 1.35 bishop simplified
4.0 9.0 6.5 0.5 3.0 9.0 4.5 1.20 janbu simplified
4.0 9.0 6.5 0.5 3.0 9.0 4.5 1.41 spencer
* Global Minimum Text
1
Resisting Moment=850.2
Driving Moment=629.8
2
Resisting Horizontal Force=95.1
Driving Horizontal Force=79.3
3
Resisting Moment=880.0
Driving Moment=624.1
Resisting Horizontal Force=99.0
Driving Horizontal Force=70.2
* #data
1
* bolt data (#bolts,nummethods)
0 3
";
