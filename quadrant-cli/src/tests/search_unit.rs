//! Focused unit tests covering the search and list commands.

use super::helpers::{seeded_database, utf8_tempdir};
use super::*;
use crate::search::{
    ListArgs, ListConfig, SearchArgs, SearchConfig, execute_list, execute_search,
    search_config_from_layers_for_test,
};
use camino::Utf8PathBuf;
use rstest::rstest;
use serde_json::Value;

fn run_search_to_json(config: &SearchConfig) -> Value {
    let mut buffer = Vec::new();
    execute_search(config, &mut buffer).expect("search should succeed");
    serde_json::from_slice(&buffer).expect("output should be JSON")
}

fn feature_ids(collection: &Value) -> Vec<u64> {
    collection["features"]
        .as_array()
        .expect("features array")
        .iter()
        .map(|feature| feature["properties"]["id"].as_u64().expect("numeric id"))
        .collect()
}

#[rstest]
#[case(None, Some(Utf8PathBuf::from("campus.db")), ARG_QUERY, ENV_SEARCH_QUERY)]
#[case(Some("library".to_owned()), None, ARG_DATABASE, ENV_SEARCH_DATABASE)]
fn converting_search_without_required_fields_errors(
    #[case] query: Option<String>,
    #[case] database: Option<Utf8PathBuf>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = SearchArgs {
        query,
        database,
        ..SearchArgs::default()
    };
    let err = SearchConfig::try_from(args).expect_err("missing field should error");
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
fn converting_list_without_database_names_list_env() {
    let err = ListConfig::try_from(ListArgs::default()).expect_err("missing database");
    let message = err.to_string();
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_DATABASE);
            assert_eq!(env, ENV_LIST_DATABASE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
    assert!(message.contains("QUADRANT_CMDS_LIST_DATABASE"));
}

#[rstest]
fn search_prints_direct_name_matches() {
    let (_tmp, root) = utf8_tempdir();
    let config = SearchConfig {
        query: "LIBRARY".to_owned(),
        database: seeded_database(&root),
        seed: Some(7),
    };

    let collection = run_search_to_json(&config);

    assert_eq!(collection["type"], "FeatureCollection");
    assert_eq!(feature_ids(&collection), vec![1]);
    let feature = &collection["features"][0];
    assert_eq!(feature["geometry"]["coordinates"][0], -76.7115);
    assert_eq!(feature["geometry"]["coordinates"][1], 39.2564);
    assert_eq!(feature["properties"]["source"], "custom");
}

#[rstest]
fn empty_query_lists_every_placeable_named_record() {
    let (_tmp, root) = utf8_tempdir();
    let config = SearchConfig {
        query: String::new(),
        database: seeded_database(&root),
        seed: Some(7),
    };

    let collection = run_search_to_json(&config);

    assert_eq!(feature_ids(&collection), vec![1, 10, 20]);
}

#[rstest]
fn alias_match_places_polygon_inside_its_ring() {
    let (_tmp, root) = utf8_tempdir();
    let config = SearchConfig {
        query: "rac".to_owned(),
        database: seeded_database(&root),
        seed: Some(11),
    };

    let collection = run_search_to_json(&config);

    assert_eq!(feature_ids(&collection), vec![20]);
    let coordinates = &collection["features"][0]["geometry"]["coordinates"];
    let lon = coordinates[0].as_f64().expect("longitude");
    let lat = coordinates[1].as_f64().expect("latitude");
    assert!((0.0..=1.0).contains(&lon), "longitude {lon} outside ring");
    assert!((0.0..=1.0).contains(&lat), "latitude {lat} outside ring");
    assert_eq!(collection["features"][0]["properties"]["source"], "osm_polygon");
}

#[rstest]
fn fixed_seed_gives_identical_output() {
    let (_tmp, root) = utf8_tempdir();
    let config = SearchConfig {
        query: String::new(),
        database: seeded_database(&root),
        seed: Some(99),
    };

    let mut first = Vec::new();
    let mut second = Vec::new();
    execute_search(&config, &mut first).expect("first search");
    execute_search(&config, &mut second).expect("second search");

    assert_eq!(first, second);
}

#[rstest]
fn list_prints_full_attributes_with_nulls() {
    let (_tmp, root) = utf8_tempdir();
    let config = ListConfig {
        database: seeded_database(&root),
        seed: Some(3),
    };

    let mut buffer = Vec::new();
    execute_list(&config, &mut buffer).expect("list should succeed");
    let collection: Value = serde_json::from_slice(&buffer).expect("output should be JSON");

    assert_eq!(feature_ids(&collection), vec![1]);
    let properties = &collection["features"][0]["properties"];
    assert_eq!(properties["name"], "Kuhn Library");
    assert_eq!(properties["type"], "library");
    assert_eq!(properties["description"], "Main campus library");
    assert_eq!(properties["website"], "https://library.example.edu");
    assert_eq!(properties["location_description"], Value::Null);
}

#[rstest]
fn search_reports_missing_database() {
    let (_tmp, root) = utf8_tempdir();
    let database = root.join("absent.db");
    let config = SearchConfig {
        query: "library".to_owned(),
        database: database.clone(),
        seed: None,
    };

    let err = execute_search(&config, &mut Vec::new()).expect_err("missing database");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_DATABASE);
            assert_eq!(path, database);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn search_rejects_directory_as_database() {
    let (_tmp, root) = utf8_tempdir();
    let config = ListConfig {
        database: root.clone(),
        seed: None,
    };

    let err = execute_list(&config, &mut Vec::new()).expect_err("directory database");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_DATABASE);
            assert_eq!(path, root);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn search_rejects_database_without_campus_tables() {
    let (_tmp, root) = utf8_tempdir();
    let database = root.join("empty.db");
    super::helpers::write_utf8(&database, b"");
    let config = SearchConfig {
        query: String::new(),
        database,
        seed: None,
    };

    let err = execute_search(&config, &mut Vec::new()).expect_err("schema missing");
    match err {
        CliError::OpenDatabase(_) => {}
        other => panic!("expected OpenDatabase, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "seed": "not-a-number" }));

    let err = search_config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "database": "from-file.db",
            "seed": 1,
            "query": "from file",
        }),
        None,
    );
    composer.push_environment(json!({
        "database": "from-env.db",
        "seed": 2,
    }));
    composer.push_cli(json!({
        "database": "from-cli.db",
    }));

    let config = search_config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.database, Utf8PathBuf::from("from-cli.db"));
    assert_eq!(config.seed, Some(2));
    assert_eq!(config.query, "from file");
}

#[rstest]
fn merge_layers_without_database_names_env_variable() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "query": "library" }));

    let err = search_config_from_layers_for_test(composer.layers())
        .expect_err("database is required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_DATABASE);
            assert_eq!(env, ENV_SEARCH_DATABASE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}
