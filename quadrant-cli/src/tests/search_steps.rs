//! Behaviour-driven step definitions for the search and list commands.

use super::helpers::{seeded_database, utf8_tempdir};
use super::*;
use crate::search::{execute_list, execute_search};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct SearchWorld {
    _tmp: TempDir,
    root: Utf8PathBuf,
    database: RefCell<Option<Utf8PathBuf>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SearchWorld {
    fn new() -> Self {
        let (tmp, root) = utf8_tempdir();
        Self {
            _tmp: tmp,
            root,
            database: RefCell::new(None),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn command_line(&self, subcommand: &str, query: Option<&str>) -> Vec<String> {
        let mut argv = vec!["quadrant".to_owned(), subcommand.to_owned()];
        if let Some(text) = query {
            argv.push(text.to_owned());
        }
        if let Some(database) = self.database.borrow().as_ref() {
            argv.extend([format!("--{ARG_DATABASE}"), database.as_str().to_owned()]);
        }
        argv.extend([format!("--{ARG_SEED}"), "5".to_owned()]);
        argv
    }

    fn run(&self, argv: Vec<String>) {
        let parsed = Cli::try_parse_from(argv).map_err(CliError::from);
        let outcome = parsed.and_then(|cli| {
            let mut buffer = self.stdout.borrow_mut();
            match cli.command {
                Command::Search(args) => {
                    args.into_config()
                        .and_then(|config| execute_search(&config, &mut *buffer))
                }
                Command::List(args) => {
                    args.into_config()
                        .and_then(|config| execute_list(&config, &mut *buffer))
                }
                other => panic!("expected search or list command, found {other:?}"),
            }
        });
        self.result.replace(Some(outcome));
    }

    fn printed_ids(&self) -> Vec<u64> {
        let collection: serde_json::Value =
            serde_json::from_slice(&self.stdout.borrow()).expect("output should be JSON");
        collection["features"]
            .as_array()
            .expect("features array")
            .iter()
            .map(|feature| feature["properties"]["id"].as_u64().expect("numeric id"))
            .collect()
    }
}

#[fixture]
fn world() -> SearchWorld {
    SearchWorld::new()
}

#[given("a campus database exists on disk")]
fn campus_database_exists(#[from(world)] world: &SearchWorld) {
    let database = seeded_database(&world.root);
    world.database.replace(Some(database));
}

#[given("no database is configured")]
fn no_database_configured(#[from(world)] world: &SearchWorld) {
    world.database.replace(None);
}

#[when("I search for {query:word}")]
fn search_for(#[from(world)] world: &SearchWorld, query: String) {
    let argv = world.command_line("search", Some(query.trim_matches('"')));
    world.run(argv);
}

#[when("I list the curated POIs")]
fn list_curated(#[from(world)] world: &SearchWorld) {
    let argv = world.command_line("list", None);
    world.run(argv);
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &SearchWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
}

#[then("the printed features have ids {ids:word}")]
fn printed_feature_ids(#[from(world)] world: &SearchWorld, ids: String) {
    let expected: Vec<u64> = ids
        .trim_matches('"')
        .split(',')
        .map(|id| id.parse().expect("numeric id in scenario"))
        .collect();
    assert_eq!(world.printed_ids(), expected);
}

#[then("the command fails naming {env:word}")]
fn command_fails_naming(#[from(world)] world: &SearchWorld, env: String) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, env: named } => {
            assert_eq!(*field, ARG_DATABASE);
            assert_eq!(*named, env.trim_matches('"'));
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_search_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/search_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SearchWorld) {
            let _ = world;
        }
    };
}

register_search_scenario!(
    search_by_alias,
    "Searching by alias prints the aliased building"
);
register_search_scenario!(search_ignores_case, "Searching by name ignores case");
register_search_scenario!(
    list_omits_unplaced,
    "Listing omits curated POIs without a location"
);
register_search_scenario!(
    search_without_database,
    "Searching without a database names the environment variable"
);
