//! Unit tests for the import command.

use super::helpers::{campus_snapshot, utf8_tempdir, write_utf8};
use super::*;
use crate::import::{ImportArgs, ImportConfig, execute_import};
use crate::search::{SearchConfig, execute_search};
use camino::Utf8PathBuf;
use rstest::rstest;

#[rstest]
#[case(None, Some(Utf8PathBuf::from("campus.db")), ARG_SNAPSHOT, ENV_IMPORT_SNAPSHOT)]
#[case(
    Some(Utf8PathBuf::from("campus.json")),
    None,
    ARG_DATABASE,
    ENV_IMPORT_DATABASE
)]
fn converting_import_without_required_fields_errors(
    #[case] snapshot: Option<Utf8PathBuf>,
    #[case] database: Option<Utf8PathBuf>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = ImportArgs { snapshot, database };
    let err = ImportConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn import_creates_a_searchable_database() {
    let (_tmp, root) = utf8_tempdir();
    let snapshot_path = root.join("campus.json");
    let payload = serde_json::to_vec(&campus_snapshot()).expect("serialize snapshot");
    write_utf8(&snapshot_path, &payload);
    let database = root.join("nested").join("campus.db");
    let config = ImportConfig {
        snapshot: snapshot_path,
        database: database.clone(),
    };

    let mut output = Vec::new();
    execute_import(&config, &mut output).expect("import should succeed");

    let summary = String::from_utf8(output).expect("utf-8 summary");
    assert!(summary.starts_with("imported 2 custom POIs, 1 OSM points, 1 OSM polygons and 1 aliases"));

    let mut buffer = Vec::new();
    let search = SearchConfig {
        query: "grit".to_owned(),
        database,
        seed: Some(1),
    };
    execute_search(&search, &mut buffer).expect("search imported database");
    let collection: serde_json::Value = serde_json::from_slice(&buffer).expect("JSON output");
    assert_eq!(collection["features"][0]["properties"]["id"], 10);
}

#[rstest]
fn import_reports_missing_snapshot() {
    let (_tmp, root) = utf8_tempdir();
    let snapshot = root.join("missing.json");
    let config = ImportConfig {
        snapshot: snapshot.clone(),
        database: root.join("campus.db"),
    };

    let err = execute_import(&config, &mut Vec::new()).expect_err("snapshot missing");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_SNAPSHOT);
            assert_eq!(path, snapshot);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn import_reports_invalid_snapshot_json() {
    let (_tmp, root) = utf8_tempdir();
    let snapshot = root.join("campus.json");
    write_utf8(&snapshot, b"{ not json");
    let config = ImportConfig {
        snapshot,
        database: root.join("campus.db"),
    };

    let err = execute_import(&config, &mut Vec::new()).expect_err("invalid snapshot");
    match err {
        CliError::LoadSnapshot(_) => {}
        other => panic!("expected LoadSnapshot, found {other:?}"),
    }
}
