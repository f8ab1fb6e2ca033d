//! Tests for the solar zenith check

use std::fs;

use crate::metadata::errors::MetadataError;
use crate::mtl::parser::MtlDocument;
use crate::mtl::solar::{
    check_solar_zenith, classify_solar_zenith, SceneInfo, SolarGeometry, Verdict, CURRENT_SCHEMA,
    LEGACY_SCHEMA,
};

fn mtl(schema: &str, sun_azimuth: &str) -> String {
    format!(
        "GROUP = {schema}\n  GROUP = PRODUCT_CONTENTS\n    LANDSAT_PRODUCT_ID = \"LC08_L1TP_027039_20190901_20190901_01_RT\"\n  END_GROUP = PRODUCT_CONTENTS\n  GROUP = IMAGE_ATTRIBUTES\n    SPACECRAFT_ID = \"LANDSAT_8\"\n    SUN_AZIMUTH = {sun_azimuth}\n    SUN_ELEVATION = 55.5\n  END_GROUP = IMAGE_ATTRIBUTES\nEND_GROUP = {schema}\nEND\n"
    )
}

#[test]
fn test_classify_threshold() {
    assert_eq!(classify_solar_zenith(70.0), Verdict::Valid);
    assert_eq!(classify_solar_zenith(76.0), Verdict::Valid);
    assert_eq!(classify_solar_zenith(76.01), Verdict::Invalid);
    assert_eq!(classify_solar_zenith(85.0), Verdict::Invalid);
}

#[test]
fn test_azimuth_20_is_valid() {
    let doc = MtlDocument::parse(&mtl(LEGACY_SCHEMA, "20")).unwrap();
    let geometry = SolarGeometry::from_mtl(&doc).unwrap();

    assert_eq!(geometry.solar_zenith(), 70.0);
    assert_eq!(geometry.verdict(), Verdict::Valid);
    assert_eq!(geometry.verdict().to_string(), "valid");
}

#[test]
fn test_azimuth_5_is_invalid() {
    let doc = MtlDocument::parse(&mtl(CURRENT_SCHEMA, "5")).unwrap();
    let geometry = SolarGeometry::from_mtl(&doc).unwrap();

    assert_eq!(geometry.solar_zenith(), 85.0);
    assert_eq!(geometry.verdict(), Verdict::Invalid);
    assert_eq!(geometry.schema, CURRENT_SCHEMA);
}

#[test]
fn test_legacy_schema_takes_precedence() {
    let content = format!("{}{}", mtl(CURRENT_SCHEMA, "5"), mtl(LEGACY_SCHEMA, "20")).replace("END\n", "");
    let doc = MtlDocument::parse(&content).unwrap();
    let geometry = SolarGeometry::from_mtl(&doc).unwrap();

    assert_eq!(geometry.schema, LEGACY_SCHEMA);
    assert_eq!(geometry.sun_azimuth, 20.0);
}

#[test]
fn test_falls_back_when_legacy_group_lacks_field() {
    let content = format!(
        "GROUP = {LEGACY_SCHEMA}\n  GROUP = IMAGE_ATTRIBUTES\n  END_GROUP = IMAGE_ATTRIBUTES\nEND_GROUP = {LEGACY_SCHEMA}\n{}",
        mtl(CURRENT_SCHEMA, "30")
    );
    let doc = MtlDocument::parse(&content).unwrap();
    let geometry = SolarGeometry::from_mtl(&doc).unwrap();

    assert_eq!(geometry.schema, CURRENT_SCHEMA);
    assert_eq!(geometry.sun_azimuth, 30.0);
}

#[test]
fn test_missing_image_attributes_is_lookup_error() {
    let doc = MtlDocument::parse("GROUP = LANDSAT_METADATA_FILE\n  A = 1\nEND_GROUP = LANDSAT_METADATA_FILE\nEND\n").unwrap();
    let result = SolarGeometry::from_mtl(&doc);
    assert!(matches!(result, Err(MetadataError::LookupError(_))));
}

#[test]
fn test_non_numeric_azimuth_is_invalid_value() {
    let doc = MtlDocument::parse(&mtl(LEGACY_SCHEMA, "\"north\"")).unwrap();
    let result = SolarGeometry::from_mtl(&doc);
    match result {
        Err(MetadataError::InvalidValue { key, value }) => {
            assert_eq!(key, "SUN_AZIMUTH");
            assert_eq!(value, "north");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_scene_info() {
    let doc = MtlDocument::parse(&mtl(CURRENT_SCHEMA, "20")).unwrap();
    let scene = SceneInfo::from_mtl(&doc);

    assert_eq!(scene.scene_id, None);
    assert_eq!(scene.product_id.as_deref(), Some("LC08_L1TP_027039_20190901_20190901_01_RT"));
    assert_eq!(scene.spacecraft.as_deref(), Some("LANDSAT_8"));
    assert_eq!(scene.sun_elevation, Some(55.5));
}

#[test]
fn test_scene_info_without_schema() {
    let doc = MtlDocument::parse("A = 1\n").unwrap();
    assert_eq!(SceneInfo::from_mtl(&doc), SceneInfo::default());
}

#[test]
fn test_check_solar_zenith_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("LC08_MTL.txt");
    fs::write(&path, mtl(LEGACY_SCHEMA, "20")).unwrap();

    assert_eq!(check_solar_zenith(&path).unwrap(), Verdict::Valid);
}

#[test]
fn test_check_solar_zenith_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = check_solar_zenith(dir.path().join("missing.txt"));
    assert!(matches!(result, Err(MetadataError::IoError(_))));
}
