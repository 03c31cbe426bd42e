use super::*;
use std::io::Write;
use tempfile::{Builder, NamedTempFile, TempDir};

use mpinput_core::Package;
use mpinput_loc::WriteStrategy;

fn json_file(content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn load_minimal_json_uses_defaults() {
    let file = json_file(
        r#"{
          "model": { "name": "ex01", "nlay": 3, "nrow": 10, "ncol": 12 },
          "simulation": {},
          "starting_locations": { "particle_count": 5 }
        }"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.model.nper, 1);
    let sim = config.simulation.as_ref().unwrap();
    assert_eq!(sim.option_flags, types::default_option_flags());
    assert_eq!(sim.groups.len(), 1);
    assert_eq!(sim.groups[0].name, "group_1");
    assert_eq!(sim.zone, ArrayInput::Constant(1));

    let loc = config.starting_locations.as_ref().unwrap();
    assert_eq!(loc.input_style, 1);
    assert_eq!(loc.strategy, WriteStrategy::Bulk);
    assert_eq!(loc.float_precision, 8);
}

#[test]
fn load_toml_config() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
[model]
name = "ex02"
nlay = 1
nrow = 2
ncol = 2

[simulation]
option_flags = [2, 1, 1, 1, 2, 3, 1, 3, 1, 2, 1, 1]
stop_time = 50.0
time_point_count = 2
time_points = [10.0, 50.0]
zone = [1, 2, 2, 1]

[simulation.ref_time_per_stp]
period = 0
step = 4
time_fraction = 0.25

[[simulation.groups]]
name = "recharge"
release_start_time = 5.0

[simulation.groups.region.layer_mask]
layer = 0
mask = 1

[simulation.groups.placement.cells]
layer_count = 1
row_count = 2
column_count = 2
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let sim = config.simulation.as_ref().unwrap();
    assert_eq!(sim.stop_time, Some(50.0));
    assert_eq!(sim.ref_time_per_stp.step, 4);
    assert!(matches!(sim.groups[0].region, RegionSettings::LayerMask { layer: 0, .. }));
    assert!(matches!(sim.groups[0].placement, PlacementSettings::Cells(_)));
    assert_eq!(sim.zone, ArrayInput::Values(vec![1, 2, 2, 1]));
}

#[test]
fn load_invalid_grid() {
    let file = json_file(r#"{ "model": { "name": "ex01", "nlay": 0, "nrow": 10, "ncol": 12 } }"#);
    let result = load_config(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn load_wrong_number_of_option_flags() {
    let file = json_file(
        r#"{
          "model": { "name": "ex01", "nlay": 1, "nrow": 1, "ncol": 1 },
          "simulation": { "option_flags": [1, 2, 1] }
        }"#,
    );
    let result = load_config(file.path());
    assert!(matches!(
        result,
        Err(ConfigError::PackageError(PackageError::InvalidOptions(msg))) if msg.contains("got 3")
    ));
}

#[test]
fn load_out_of_range_option_flag() {
    let file = json_file(
        r#"{
          "model": { "name": "ex01", "nlay": 1, "nrow": 1, "ncol": 1 },
          "simulation": { "option_flags": [4, 2, 1, 1, 1, 2, 2, 1, 2, 1, 1, 1] }
        }"#,
    );
    let result = load_config(file.path());
    assert!(matches!(
        result,
        Err(ConfigError::PackageError(PackageError::InvalidOptions(_)))
    ));
}

#[test]
fn load_unsupported_input_style() {
    let file = json_file(
        r#"{
          "model": { "name": "ex01", "nlay": 1, "nrow": 1, "ncol": 1 },
          "starting_locations": { "input_style": 2 }
        }"#,
    );
    let result = load_config(file.path());
    assert!(matches!(
        result,
        Err(ConfigError::PackageError(PackageError::UnsupportedInputStyle(2)))
    ));
}

#[test]
fn load_malformed_json() {
    let file = json_file("{ not json");
    assert!(matches!(load_config(file.path()), Err(ConfigError::JsonParseError(_))));
}

#[test]
fn load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_config(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::FileReadError(_))));
}

#[test]
fn assemble_builds_packages_in_order() {
    let dir = TempDir::new().unwrap();
    let file = json_file(&format!(
        r#"{{
          "model": {{ "name": "ex03", "model_ws": {:?}, "nlay": 1, "nrow": 2, "ncol": 2 }},
          "simulation": {{
            "files": {{ "endpoint_file": "custom.end" }}
          }},
          "starting_locations": {{ "particle_count": 2, "strategy": "row" }}
        }}"#,
        dir.path()
    ));
    let config = load_config(file.path()).unwrap();
    let model = config.assemble().unwrap();

    let names: Vec<&str> = model.packages().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["MPSIM", "LOC"]);

    model.write_input().unwrap();
    let mpsim = std::fs::read_to_string(dir.path().join("ex03.mpsim")).unwrap();
    assert!(mpsim.contains("custom.end\n"));
    assert!(mpsim.contains("ex03.loc\n"));
    let loc = std::fs::read_to_string(dir.path().join("ex03.loc")).unwrap();
    assert!(loc.contains("group1\n2\n"));
}

#[test]
fn assemble_rejects_wrong_array_length() {
    let file = json_file(
        r#"{
          "model": { "name": "ex04", "nlay": 1, "nrow": 2, "ncol": 2 },
          "simulation": { "zone": [1, 2, 3] }
        }"#,
    );
    let config = load_config(file.path()).unwrap();
    assert!(matches!(
        config.assemble(),
        Err(ConfigError::PackageError(PackageError::ArrayShapeError { expected: 4, actual: 3, .. }))
    ));
}

#[test]
fn explicit_particles_take_precedence_over_count() {
    let model = Modpath::new("ex05", ".", GridShape::default());
    let settings = StartingLocationSettings {
        input_style: 1,
        strategy: WriteStrategy::Row,
        float_precision: 4,
        text_policy: Default::default(),
        particles: ParticleRecord::empty_set(3),
        particle_count: Some(10),
    };
    let loc = build_starting_locations(&model, &settings).unwrap();
    assert_eq!(loc.data.len(), 3);
    assert_eq!(loc.float_format.precision, 4);
}
