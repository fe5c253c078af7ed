// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Variant record factories for material and support properties

use crate::styles::StyleTable;
use crate::tokenizer::{records, LineRecord};
use rustc_hash::FxHashSet;
use slide_model::{
    MaterialParams, ParseError, ProjectProperties, PropertyMaterial, PropertySupport, Result,
    SupportParams,
};

/// Builds one parameter variant from a record's type code
///
/// Codes outside the closed set fail with `UnknownVariant`; a field required
/// by the selected variant that is missing fails with `MalformedRecord`.
pub trait ParamsFactory: Sized {
    /// Record family name used in log and error output
    const FAMILY: &'static str;

    fn from_code(code: &str, record: &LineRecord) -> Result<Self>;

    /// Read the `type` field and dispatch on it
    fn from_record(record: &LineRecord) -> Result<Self> {
        let code = record.require("type")?;
        Self::from_code(code, record)
    }
}

impl ParamsFactory for MaterialParams {
    const FAMILY: &'static str = "material";

    fn from_code(code: &str, r: &LineRecord) -> Result<Self> {
        let params = match code {
            "0" => MaterialParams::MohrCoulomb {
                cohesion: r.f64("c")?,
                friction_angle: r.f64("phi")?,
            },
            "1" => MaterialParams::Undrained {
                cohesion: r.f64("c")?,
                c_type: r.i64("ctype")?,
            },
            "2" => MaterialParams::NoStrength,
            "3" => MaterialParams::InfiniteStrength,
            "7" => MaterialParams::HoekBrown {
                sigc: r.f64("sigc")?,
                mb: r.f64("mb")?,
                s: r.f64("s")?,
            },
            "8" => MaterialParams::GeneralHoekBrown {
                sigc: r.f64("sigc")?,
                mb: r.f64("mb")?,
                s: r.f64("s")?,
                a: r.f64("a")?,
            },
            other => return Err(ParseError::UnknownVariant(other.to_string())),
        };
        Ok(params)
    }
}

impl ParamsFactory for SupportParams {
    const FAMILY: &'static str = "support";

    fn from_code(code: &str, r: &LineRecord) -> Result<Self> {
        let params = match code {
            "1" => SupportParams::EndAnchored {
                force_application: r.i64("fa")?,
                spacing: r.f64("sp")?,
                tensile_capacity: r.f64("cap")?,
            },
            "2" => SupportParams::GroutedTieback {
                force_application: r.i64("fa")?,
                spacing: r.f64("sp")?,
                tensile_capacity: r.f64("cap")?,
                plate_capacity: r.f64("pc")?,
                bond_strength: r.f64("bs")?,
                bond_length_type: r.i64("bt")?,
                bond_length: r.f64("bl")?,
            },
            "3" => SupportParams::SoilNail {
                force_application: r.i64("fa")?,
                spacing: r.f64("sp")?,
                tensile_capacity: r.f64("cap")?,
                plate_capacity: r.f64("pc")?,
                bond_strength: r.f64("bs")?,
            },
            "4" => SupportParams::GeoTextile {
                force_application: r.i64("fa")?,
                tensile_strength: r.f64("ts")?,
                adhesion: r.f64("po_adh")?,
                friction_angle: r.f64("po_fric")?,
            },
            "5" => SupportParams::GroutedTiebackFriction {
                force_application: r.i64("fa")?,
                spacing: r.f64("sp")?,
                tensile_capacity: r.f64("cap")?,
                plate_capacity: r.f64("pc")?,
                bond_length_type: r.i64("bt")?,
                bond_length: r.f64("bl")?,
                adhesion: r.f64("po_adh")?,
                friction_angle: r.f64("po_fric")?,
            },
            "6" => SupportParams::MicroPile {
                force_application: r.i64("fa")?,
                spacing: r.f64("sp")?,
                shear_strength: r.f64("mpss")?,
                force_direction: r.i64("mpforcedirection")?,
            },
            other => return Err(ParseError::UnknownVariant(other.to_string())),
        };
        Ok(params)
    }
}

/// Record id, rejecting repeats
fn claim_id<'a>(record: &LineRecord<'a>, claimed: &mut FxHashSet<&'a str>) -> Result<&'a str> {
    let id = record
        .id()
        .ok_or_else(|| ParseError::malformed(record.line().trim(), "missing record id"))?;
    if !claimed.insert(id) {
        return Err(ParseError::malformed(id, "duplicate record id"));
    }
    Ok(id)
}

/// Build materials from the `material types` section
pub fn parse_materials<'a>(
    content: &'a str,
    styles: &StyleTable,
    claimed: &mut FxHashSet<&'a str>,
) -> Result<Vec<PropertyMaterial>> {
    records(content)
        .map(|record| {
            let id = claim_id(&record, claimed)?;
            let material_params = MaterialParams::from_record(&record)?;
            let style = styles.lookup(id)?;
            Ok(PropertyMaterial {
                id: id.to_string(),
                name: style.name.clone(),
                color: style.color,
                hatch: style.hatch,
                unit_weight: record.f64("uw")?,
                saturated_unit_weight: record.opt_f64("uwbwt")?,
                material_params,
            })
        })
        .collect()
}

/// Build supports from the `anchor types` section
pub fn parse_supports<'a>(
    content: &'a str,
    styles: &StyleTable,
    claimed: &mut FxHashSet<&'a str>,
) -> Result<Vec<PropertySupport>> {
    records(content)
        .map(|record| {
            let id = claim_id(&record, claimed)?;
            let support_params = SupportParams::from_record(&record)?;
            let style = styles.lookup(id)?;
            Ok(PropertySupport {
                id: id.to_string(),
                name: style.name.clone(),
                color: style.color,
                support_params,
            })
        })
        .collect()
}

/// Build the property catalogs and check that every style entry was used
pub fn parse_properties(
    styles: &StyleTable,
    material_types: &str,
    anchor_types: &str,
) -> Result<ProjectProperties> {
    let mut claimed = FxHashSet::default();
    let materials = parse_materials(material_types, styles, &mut claimed)?;
    let supports = parse_supports(anchor_types, styles, &mut claimed)?;
    styles.ensure_claimed(&claimed)?;

    log::debug!(
        "Parsed {} {} and {} {} records",
        materials.len(),
        MaterialParams::FAMILY,
        supports.len(),
        SupportParams::FAMILY
    );

    Ok(ProjectProperties {
        materials,
        supports,
    })
}
