// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material and support property catalogs

use crate::Color;
use serde::{Deserialize, Serialize};

/// Strength model parameters of a material
///
/// Exactly one variant per material, selected by the record's type code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model")]
pub enum MaterialParams {
    /// Type code `0`
    MohrCoulomb { cohesion: f64, friction_angle: f64 },
    /// Type code `1`
    Undrained { cohesion: f64, c_type: i64 },
    /// Type code `2`
    NoStrength,
    /// Type code `3`
    InfiniteStrength,
    /// Type code `7`
    HoekBrown { sigc: f64, mb: f64, s: f64 },
    /// Type code `8`
    GeneralHoekBrown { sigc: f64, mb: f64, s: f64, a: f64 },
}

impl MaterialParams {
    /// Source type code of this variant
    pub fn type_code(&self) -> &'static str {
        match self {
            MaterialParams::MohrCoulomb { .. } => "0",
            MaterialParams::Undrained { .. } => "1",
            MaterialParams::NoStrength => "2",
            MaterialParams::InfiniteStrength => "3",
            MaterialParams::HoekBrown { .. } => "7",
            MaterialParams::GeneralHoekBrown { .. } => "8",
        }
    }

    /// Human readable strength model name
    pub fn model_name(&self) -> &'static str {
        match self {
            MaterialParams::MohrCoulomb { .. } => "Mohr-Coulomb",
            MaterialParams::Undrained { .. } => "Undrained",
            MaterialParams::NoStrength => "No Strength",
            MaterialParams::InfiniteStrength => "Infinite Strength",
            MaterialParams::HoekBrown { .. } => "Hoek-Brown",
            MaterialParams::GeneralHoekBrown { .. } => "Generalized Hoek-Brown",
        }
    }
}

/// Anchor technology parameters of a support
///
/// Field names follow the meaning of the source keys: `fa` force application,
/// `sp` out-of-plane spacing, `cap` tensile capacity, `pc` plate capacity,
/// `bs` bond strength, `bt` bond length type, `bl` bond length, `ts` tensile
/// strength, `po_adh`/`po_fric` pullout adhesion/friction angle, `mpss` pile
/// shear strength, `mpforcedirection` pile force direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "technology")]
pub enum SupportParams {
    /// Type code `1`
    EndAnchored {
        force_application: i64,
        spacing: f64,
        tensile_capacity: f64,
    },
    /// Type code `4`
    GeoTextile {
        force_application: i64,
        tensile_strength: f64,
        adhesion: f64,
        friction_angle: f64,
    },
    /// Type code `2`
    GroutedTieback {
        force_application: i64,
        spacing: f64,
        tensile_capacity: f64,
        plate_capacity: f64,
        bond_strength: f64,
        bond_length_type: i64,
        bond_length: f64,
    },
    /// Type code `5`
    GroutedTiebackFriction {
        force_application: i64,
        spacing: f64,
        tensile_capacity: f64,
        plate_capacity: f64,
        bond_length_type: i64,
        bond_length: f64,
        adhesion: f64,
        friction_angle: f64,
    },
    /// Type code `6`
    MicroPile {
        force_application: i64,
        spacing: f64,
        shear_strength: f64,
        force_direction: i64,
    },
    /// Type code `3`
    SoilNail {
        force_application: i64,
        spacing: f64,
        tensile_capacity: f64,
        plate_capacity: f64,
        bond_strength: f64,
    },
}

impl SupportParams {
    /// Source type code of this variant
    pub fn type_code(&self) -> &'static str {
        match self {
            SupportParams::EndAnchored { .. } => "1",
            SupportParams::GroutedTieback { .. } => "2",
            SupportParams::SoilNail { .. } => "3",
            SupportParams::GeoTextile { .. } => "4",
            SupportParams::GroutedTiebackFriction { .. } => "5",
            SupportParams::MicroPile { .. } => "6",
        }
    }

    /// Force application flag shared by every technology
    pub fn force_application(&self) -> i64 {
        match self {
            SupportParams::EndAnchored {
                force_application, ..
            }
            | SupportParams::GeoTextile {
                force_application, ..
            }
            | SupportParams::GroutedTieback {
                force_application, ..
            }
            | SupportParams::GroutedTiebackFriction {
                force_application, ..
            }
            | SupportParams::MicroPile {
                force_application, ..
            }
            | SupportParams::SoilNail {
                force_application, ..
            } => *force_application,
        }
    }
}

/// A material of the property catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyMaterial {
    /// Stable key `soil<N>`
    pub id: String,
    /// Display name from the style table
    pub name: String,
    pub color: Color,
    /// Hatch pattern from the style table
    pub hatch: Option<u32>,
    pub unit_weight: f64,
    /// Unit weight below the water table
    pub saturated_unit_weight: Option<f64>,
    pub material_params: MaterialParams,
}

/// A support (anchor) type of the property catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertySupport {
    /// Stable key `anchor<N>`
    pub id: String,
    /// Display name from the style table
    pub name: String,
    pub color: Color,
    pub support_params: SupportParams,
}

/// Material and support catalogs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectProperties {
    pub materials: Vec<PropertyMaterial>,
    pub supports: Vec<PropertySupport>,
}

impl ProjectProperties {
    /// Find a material by its `soil<N>` id
    pub fn material(&self, id: &str) -> Option<&PropertyMaterial> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Find a support type by its `anchor<N>` id
    pub fn support(&self, id: &str) -> Option<&PropertySupport> {
        self.supports.iter().find(|s| s.id == id)
    }
}
