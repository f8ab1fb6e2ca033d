//! Solar geometry checks on MTL metadata

use std::fmt;
use std::path::Path;

use log::{debug, info};

use crate::metadata::errors::{MetadataError, MetadataResult};
use crate::mtl::parser::{MtlDocument, MtlGroup};

/// Top-level group name used by pre-collection-2 MTL files
pub const LEGACY_SCHEMA: &str = "L1_METADATA_FILE";
/// Top-level group name used by current MTL files
pub const CURRENT_SCHEMA: &str = "LANDSAT_METADATA_FILE";
/// Schemas in lookup order
pub const SCHEMAS: [&str; 2] = [LEGACY_SCHEMA, CURRENT_SCHEMA];

pub const IMAGE_ATTRIBUTES: &str = "IMAGE_ATTRIBUTES";
pub const SUN_AZIMUTH: &str = "SUN_AZIMUTH";

/// Scenes with a solar zenith above this many degrees are rejected
pub const MAX_SOLAR_ZENITH: f64 = 76.0;

/// Outcome of the solar zenith check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Valid => "valid",
            Verdict::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a solar zenith angle in degrees
pub fn classify_solar_zenith(solar_zenith: f64) -> Verdict {
    if solar_zenith > MAX_SOLAR_ZENITH {
        Verdict::Invalid
    } else {
        Verdict::Valid
    }
}

/// Sun position read from an MTL file
#[derive(Debug, Clone, PartialEq)]
pub struct SolarGeometry {
    /// Sun azimuth in degrees
    pub sun_azimuth: f64,
    /// Top-level schema the value was found under
    pub schema: &'static str,
}

impl SolarGeometry {
    /// Read `IMAGE_ATTRIBUTES.SUN_AZIMUTH`, trying the legacy schema first
    ///
    /// # Errors
    /// `LookupError` if neither schema has the field, `InvalidValue` if it is
    /// not a number.
    pub fn from_mtl(doc: &MtlDocument) -> MetadataResult<Self> {
        for schema in SCHEMAS {
            if let Some(raw) = doc.lookup(&[schema, IMAGE_ATTRIBUTES, SUN_AZIMUTH]) {
                let sun_azimuth = parse_degrees(SUN_AZIMUTH, raw)?;
                debug!("Found {} = {} under {}", SUN_AZIMUTH, sun_azimuth, schema);
                return Ok(SolarGeometry { sun_azimuth, schema });
            }
            debug!("No {}.{} under {}", IMAGE_ATTRIBUTES, SUN_AZIMUTH, schema);
        }

        Err(MetadataError::LookupError(format!(
            "{}.{} under {} or {}",
            IMAGE_ATTRIBUTES, SUN_AZIMUTH, LEGACY_SCHEMA, CURRENT_SCHEMA
        )))
    }

    /// Solar zenith in degrees, taken as 90 minus the sun azimuth
    pub fn solar_zenith(&self) -> f64 {
        90.0 - self.sun_azimuth
    }

    pub fn verdict(&self) -> Verdict {
        classify_solar_zenith(self.solar_zenith())
    }
}

/// Scene identification fields, all optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneInfo {
    pub scene_id: Option<String>,
    pub product_id: Option<String>,
    pub spacecraft: Option<String>,
    pub sun_elevation: Option<f64>,
}

impl SceneInfo {
    /// Collect whatever identification is present under the first known schema
    pub fn from_mtl(doc: &MtlDocument) -> Self {
        let Some(group) = schema_group(doc) else {
            return SceneInfo::default();
        };

        SceneInfo {
            scene_id: group.find_field("LANDSAT_SCENE_ID").map(str::to_string),
            product_id: group.find_field("LANDSAT_PRODUCT_ID").map(str::to_string),
            spacecraft: group.find_field("SPACECRAFT_ID").map(str::to_string),
            sun_elevation: group
                .find_field("SUN_ELEVATION")
                .and_then(|v| v.trim().parse::<f64>().ok()),
        }
    }
}

fn schema_group(doc: &MtlDocument) -> Option<&MtlGroup> {
    SCHEMAS.iter().find_map(|schema| doc.root().group(schema))
}

fn parse_degrees(key: &str, raw: &str) -> MetadataResult<f64> {
    raw.trim().parse::<f64>().map_err(|_| MetadataError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// Parse an MTL file and classify its solar zenith
pub fn check_solar_zenith<P: AsRef<Path>>(path: P) -> MetadataResult<Verdict> {
    let doc = MtlDocument::from_file(path)?;

    let scene = SceneInfo::from_mtl(&doc);
    debug!(
        "Scene {} (product {}, spacecraft {}, sun elevation {:?})",
        scene.scene_id.as_deref().unwrap_or("unknown"),
        scene.product_id.as_deref().unwrap_or("unknown"),
        scene.spacecraft.as_deref().unwrap_or("unknown"),
        scene.sun_elevation
    );

    let geometry = SolarGeometry::from_mtl(&doc)?;
    let verdict = geometry.verdict();
    info!(
        "Solar zenith {:.2} (sun azimuth {:.2}, limit {}): {}",
        geometry.solar_zenith(),
        geometry.sun_azimuth,
        MAX_SOLAR_ZENITH,
        verdict
    );
    Ok(verdict)
}
