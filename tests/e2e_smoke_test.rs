use std::fs;

use tempfile::tempdir;

use lolviz::{Config, Mode};

fn base_config(file: String, output: String, mode: Mode) -> Config {
    Config {
        log_level: "off".to_string(),
        file,
        output,
        mode,
        orientation: None,
        shape: Vec::new(),
        minimal: false,
        config: None,
    }
}

fn render(input_json: &str, mode: Mode, mutate: impl FnOnce(&mut Config)) -> String {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("input.json");
    let output_path = temp_dir.path().join("out.dot");
    fs::write(&input_path, input_json).expect("Failed to write input file");

    let mut cfg = base_config(
        input_path.to_string_lossy().to_string(),
        output_path.to_string_lossy().to_string(),
        mode,
    );
    mutate(&mut cfg);

    lolviz::run(&cfg).expect("run should succeed");
    fs::read_to_string(&output_path).expect("Failed to read output file")
}

#[test]
fn e2e_object_graph_from_json() {
    let dot = render(
        r#"{"name": "ada", "scores": [1, 2, 3]}"#,
        Mode::Obj,
        |_| {},
    );

    assert!(dot.starts_with("digraph G {"), "well-formed digraph:\n{dot}");
    assert!(dot.trim_end().ends_with('}'));
    assert!(dot.contains("'name'"), "mapping keys are quoted");
    assert!(dot.contains("-> node2"), "the scores list hangs off the mapping");
    assert!(dot.contains("rankdir=LR"));
}

#[test]
fn e2e_list_mode_renders_one_node() {
    let dot = render(r#"["a", "b", "c"]"#, Mode::List, |_| {});

    assert_eq!(dot.matches(" [").count() - dot.matches("node [").count(), 1,
        "exactly one node statement:\n{dot}");
    assert!(!dot.contains("->"), "a single node has no edges");
    assert!(dot.contains("'a'"));
    assert!(dot.contains("nodesep=0.5"));
}

#[test]
fn e2e_lol_mode_links_container_to_rows() {
    let dot = render(r#"[[1, 2], [3]]"#, Mode::Lol, |_| {});

    assert_eq!(dot.matches(":w [").count(), 2, "one container edge per row:\n{dot}");
    assert!(dot.contains("weight=100"));
}

#[test]
fn e2e_tensor_shape_flag() {
    let dot = render("[0, 1, 2, 3, 4, 5]", Mode::List, |cfg| {
        cfg.shape = vec![2, 3];
    });

    // 2x3 grid: element 3 opens the second row.
    assert!(dot.contains("port=\"3\""), "flat ports survive the grid layout:\n{dot}");
    assert!(!dot.contains("point-size=\"9\">0<"), "shape hides index labels");
}

#[test]
fn e2e_bad_shape_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("input.json");
    let output_path = temp_dir.path().join("out.dot");
    fs::write(&input_path, "[1, 2, 3]").expect("Failed to write input file");

    let mut cfg = base_config(
        input_path.to_string_lossy().to_string(),
        output_path.to_string_lossy().to_string(),
        Mode::List,
    );
    cfg.shape = vec![2, 2];

    let err = lolviz::run(&cfg).expect_err("shape/element mismatch must fail");
    assert!(
        matches!(err, lolviz::VizError::Shape(_)),
        "unexpected error: {err:?}"
    );
    assert!(!output_path.exists(), "no output on failure");
}

#[test]
fn e2e_tree_mode_top_to_bottom() {
    let dot = render(
        r#"{"value": 1, "left": {"value": 2}, "right": {"value": 3}}"#,
        Mode::Tree,
        |_| {},
    );

    assert!(dot.contains("rankdir=TB"));
    assert!(dot.contains(":left:c ->"), "child edges leave the kid ports:\n{dot}");
    assert!(dot.contains(":right:c ->"));
}

#[test]
fn e2e_class_mode_from_declarations() {
    let dot = render(
        r#"[
            {"name": "Animal", "fields": ["name"], "static_fields": ["population"],
             "methods": [{"name": "speak"}]},
            {"name": "Dog", "parent": "Animal"}
        ]"#,
        Mode::Class,
        |_| {},
    );

    assert!(dot.contains("shape=\"record\""));
    assert!(dot.contains("+speak()"));
    assert!(dot.contains("+name\\l#population\\l"), "field rows carry visibility prefixes:\n{dot}");
    assert!(dot.contains("\"Animal\" -> \"Dog\";"));
}

#[test]
fn e2e_prefs_override_via_toml_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("input.json");
    let output_path = temp_dir.path().join("out.dot");
    let config_path = temp_dir.path().join("prefs.toml");
    fs::write(&input_path, "[1, 2, 3]").expect("Failed to write input file");
    fs::write(&config_path, "[prefs]\ncolor_blue = \"#123456\"\n")
        .expect("Failed to write config file");

    let mut cfg = base_config(
        input_path.to_string_lossy().to_string(),
        output_path.to_string_lossy().to_string(),
        Mode::List,
    );
    cfg.config = Some(config_path.to_string_lossy().to_string());

    lolviz::run(&cfg).expect("run should succeed");
    let dot = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(dot.contains("#123456"), "configured fill color is used:\n{dot}");
    assert!(!dot.contains("#d9e6f5"), "default fill color is replaced");
}

#[test]
fn e2e_missing_config_file_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("input.json");
    fs::write(&input_path, "[1]").expect("Failed to write input file");

    let mut cfg = base_config(
        input_path.to_string_lossy().to_string(),
        temp_dir.path().join("out.dot").to_string_lossy().to_string(),
        Mode::List,
    );
    cfg.config = Some(
        temp_dir
            .path()
            .join("no-such.toml")
            .to_string_lossy()
            .to_string(),
    );

    let err = lolviz::run(&cfg).expect_err("missing config must fail");
    assert!(matches!(err, lolviz::VizError::ConfigMissing(_)));
}
