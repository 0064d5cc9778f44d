use super::{read_document, read_value, write_output};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use uo_sdk::UoDocument;

#[test]
fn read_document_decodes_yaml_node() {
    let path = temp_path("node", "yaml");
    fs::write(
        &path,
        "schema: uo-node/0.1\nnodeType: sdl1WashCleaning\nparameters:\n  cleaning_cycles: 2\n",
    )
    .expect("must write fixture");

    match read_document(&path).expect("must parse") {
        UoDocument::Node(node) => assert_eq!(node.node_type, "sdl1WashCleaning"),
        other => panic!("expected node document, got {other:?}"),
    }
}

#[test]
fn read_document_reports_missing_file_and_bad_schema() {
    let missing = temp_path("missing", "json");
    let issues = read_document(&missing).expect_err("missing file must fail");
    assert_eq!(issues[0].kind, "io_error");

    let path = temp_path("bad-schema", "json");
    fs::write(&path, r#"{"schema":"uo-other/1"}"#).expect("must write fixture");
    let issues = read_document(&path).expect_err("unknown schema must fail");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.starts_with(path.display().to_string().as_str()));
    assert!(issues[0].message.contains("unsupported document schema"));
}

#[test]
fn read_value_and_write_output_round_trip_through_disk() {
    let path = temp_path("nested", "json");
    let path = path.with_file_name(format!(
        "{}-dir/out.json",
        path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("uo")
    ));
    write_output(&path, r#"{"parameters":{"volume":10}}"#).expect("must write");
    let value = read_value(&path).expect("must read");
    assert_eq!(value["parameters"]["volume"], serde_json::json!(10));
}

fn temp_path(prefix: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "uo-runner-io-{prefix}-{}-{nanos}.{extension}",
        std::process::id()
    ))
}
