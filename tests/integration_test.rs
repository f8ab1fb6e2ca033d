//! Integration tests for the bandkit tools

use std::fs;
use std::path::Path;

use clap::error::ErrorKind;

use bandkit::cli::{remove_cli, rewrite_cli, solar_zenith_cli};
use bandkit::commands::{Command, RemoveCommand, RewriteCommand, SolarZenithCommand};
use bandkit::{MetadataDocument, MetadataError};

const ESPA_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<espa_metadata version="2.0" xmlns="http://espa.cr.usgs.gov/v2" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <global_metadata>
        <data_provider>USGS/EROS</data_provider>
        <satellite>LANDSAT_8</satellite>
        <instrument>OLI/TIRS_Combined</instrument>
    </global_metadata>
    <bands>
        <band product="L1TP" source="level1" name="b1" category="image" data_type="UINT16" nlines="7801" nsamps="7681" fill_value="0">
            <short_name>LC08DN</short_name>
            <long_name>band 1 digital numbers</long_name>
        </band>
        <band product="sr_refl" source="toa_refl" name="sr_band1" category="image" data_type="INT16" nlines="7801" nsamps="7681" fill_value="-9999">
            <short_name>LC08SR</short_name>
            <long_name>band 1 surface reflectance</long_name>
        </band>
        <band product="sr_refl" source="toa_refl" name="sr_band2" category="image" data_type="INT16" nlines="7801" nsamps="7681" fill_value="-9999">
            <short_name>LC08SR</short_name>
            <long_name>band 2 surface reflectance</long_name>
        </band>
        <band product="L1TP" source="level1" name="unknownband" category="qa" data_type="UINT16" nlines="7801" nsamps="7681"/>
    </bands>
</espa_metadata>
"#;

fn band_pairs(doc: &MetadataDocument) -> Vec<(String, String)> {
    doc.bands()
        .map(|b| (b.name().unwrap_or_default(), b.product().unwrap_or_default()))
        .collect()
}

fn write_input(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_rewrite_command_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "LC08_L1TP_027039_20190901_20190901_01_RT.xml", ESPA_XML);
    let output = dir.path().join("out.xml").to_string_lossy().into_owned();

    let matches = rewrite_cli()
        .try_get_matches_from(["alter_sr_band_names", "-i", input.as_str(), "-o", output.as_str()])
        .unwrap();
    let command = RewriteCommand::new(&matches).unwrap();

    let mut stdout = Vec::new();
    command.run(&mut stdout).unwrap();

    assert_eq!(String::from_utf8(stdout).unwrap(), "b1\nunknownband\n");

    let rewritten = MetadataDocument::from_file(&output).unwrap();
    assert_eq!(
        band_pairs(&rewritten),
        vec![
            ("band01".to_string(), "hls".to_string()),
            ("band02-blue".to_string(), "hls".to_string()),
        ]
    );

    // Input is left alone and everything outside <bands> survives
    assert_eq!(fs::read_to_string(&input).unwrap(), ESPA_XML);
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<espa_metadata version=\"2.0\""));
    assert!(text.contains("<instrument>OLI/TIRS_Combined</instrument>"));
    assert!(text.contains("<long_name>band 2 surface reflectance</long_name>"));
}

#[test]
fn test_rewrite_command_long_flags() {
    let matches = rewrite_cli()
        .try_get_matches_from(["alter_sr_band_names", "--inputxmlfile", "in.xml", "--outputxmlfile", "out.xml"])
        .unwrap();
    assert_eq!(matches.get_one::<String>("inputxmlfile").map(String::as_str), Some("in.xml"));
    assert_eq!(matches.get_one::<String>("outputxmlfile").map(String::as_str), Some("out.xml"));
}

#[test]
fn test_rewrite_command_rejects_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "bad.xml", "<espa_metadata><bands><band name=\"x\"></bands>");
    let output = dir.path().join("out.xml");
    let output_str = output.to_string_lossy().into_owned();

    let matches = rewrite_cli()
        .try_get_matches_from(["alter_sr_band_names", "-i", input.as_str(), "-o", output_str.as_str()])
        .unwrap();
    let result = RewriteCommand::new(&matches).unwrap().run(&mut Vec::<u8>::new());

    assert!(result.unwrap_err().is_parse_error());
    assert!(!output.exists());
}

#[test]
fn test_rewrite_command_unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "in.xml", ESPA_XML);
    let output = dir.path().join("no_such_dir").join("out.xml").to_string_lossy().into_owned();

    let matches = rewrite_cli()
        .try_get_matches_from(["alter_sr_band_names", "-i", input.as_str(), "-o", output.as_str()])
        .unwrap();
    let result = RewriteCommand::new(&matches).unwrap().run(&mut Vec::<u8>::new());

    assert!(matches!(result, Err(MetadataError::IoError(_))));
}

#[test]
fn test_remove_command_defaults_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "in.xml", ESPA_XML);
    let output = dir.path().join("removed.xml").to_string_lossy().into_owned();

    let defaults = remove_cli().try_get_matches_from(["remove_bands", "-i", input.as_str()]).unwrap();
    assert_eq!(defaults.get_one::<String>("outputxmlfile").map(String::as_str), Some("test_out.xml"));
    assert_eq!(defaults.get_one::<String>("product").map(String::as_str), Some("L1TP"));

    let matches = remove_cli()
        .try_get_matches_from(["remove_bands", "-i", input.as_str(), "-o", output.as_str()])
        .unwrap();
    let mut stdout = Vec::new();
    RemoveCommand::new(&matches).unwrap().run(&mut stdout).unwrap();

    assert_eq!(String::from_utf8(stdout).unwrap(), "b1\nunknownband\n");
    let doc = MetadataDocument::from_file(&output).unwrap();
    assert_eq!(
        band_pairs(&doc),
        vec![
            ("sr_band1".to_string(), "sr_refl".to_string()),
            ("sr_band2".to_string(), "sr_refl".to_string()),
        ]
    );
}

#[test]
fn test_solar_zenith_command_output() {
    let dir = tempfile::tempdir().unwrap();
    let valid = write_input(
        dir.path(),
        "valid_MTL.txt",
        "GROUP = L1_METADATA_FILE\n  GROUP = IMAGE_ATTRIBUTES\n    SUN_AZIMUTH = 20\n  END_GROUP = IMAGE_ATTRIBUTES\nEND_GROUP = L1_METADATA_FILE\nEND\n",
    );
    let invalid = write_input(
        dir.path(),
        "invalid_MTL.txt",
        "GROUP = LANDSAT_METADATA_FILE\n  GROUP = IMAGE_ATTRIBUTES\n    SUN_AZIMUTH = 5.0\n  END_GROUP = IMAGE_ATTRIBUTES\nEND_GROUP = LANDSAT_METADATA_FILE\nEND\n",
    );

    for (path, expected) in [(valid, "valid"), (invalid, "invalid")] {
        let matches = solar_zenith_cli()
            .try_get_matches_from(["check_solar_zenith", "--input_file", path.as_str()])
            .unwrap();
        let mut stdout = Vec::new();
        SolarZenithCommand::new(&matches).unwrap().run(&mut stdout).unwrap();
        assert_eq!(String::from_utf8(stdout).unwrap(), expected);
    }
}

#[test]
fn test_solar_zenith_command_missing_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(
        dir.path(),
        "MTL.txt",
        "GROUP = LANDSAT_METADATA_FILE\n  GROUP = PRODUCT_CONTENTS\n  END_GROUP = PRODUCT_CONTENTS\nEND_GROUP = LANDSAT_METADATA_FILE\nEND\n",
    );

    let matches = solar_zenith_cli().try_get_matches_from(["check_solar_zenith", "-i", path.as_str()]).unwrap();
    let mut stdout = Vec::new();
    let result = SolarZenithCommand::new(&matches).unwrap().run(&mut stdout);

    assert!(matches!(result, Err(MetadataError::LookupError(_))));
    assert!(stdout.is_empty());
}

#[test]
fn test_argument_errors_exit_with_status_2() {
    let missing = rewrite_cli().try_get_matches_from(["alter_sr_band_names", "-i", "in.xml"]).unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::MissingRequiredArgument);
    assert_eq!(missing.exit_code(), 2);

    let unknown = solar_zenith_cli().try_get_matches_from(["check_solar_zenith", "-x"]).unwrap_err();
    assert_eq!(unknown.exit_code(), 2);
}

#[test]
fn test_help_exits_with_status_0() {
    for command in [rewrite_cli(), remove_cli(), solar_zenith_cli()] {
        let name = command.get_name().to_string();
        let help = command.try_get_matches_from([name.as_str(), "-h"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        assert_eq!(help.exit_code(), 0);
    }
}
