//! Test helpers for building campus databases and scratch files.

use camino::{Utf8Path, Utf8PathBuf};
use geo::{Point, polygon};
use quadrant_core::{Alias, CampusSnapshot, CustomPoi, OsmPoint, OsmPolygon};
use quadrant_data::persist_snapshot;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

/// Temporary directory with a UTF-8 root path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// A small campus: a placed library, a lab that cannot be placed, a cafe
/// point and the activities centre polygon reachable through the "RAC" alias.
pub(super) fn campus_snapshot() -> CampusSnapshot {
    let mut library =
        CustomPoi::new(1, "Kuhn Library").with_coordinate(Point::new(-76.7115, 39.2564));
    library.kind = Some("library".to_owned());
    library.description = "Main campus library".to_owned();
    library.website = "https://library.example.edu".to_owned();

    CampusSnapshot {
        custom_pois: vec![library, CustomPoi::new(2, "Lost Lab")],
        osm_points: vec![OsmPoint::new(
            10,
            Some("True Grit's Cafe".to_owned()),
            Some(Point::new(-76.7120, 39.2550)),
        )],
        osm_polygons: vec![OsmPolygon::new(
            20,
            Some("Retriever Activities Center".to_owned()),
            Some(polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 1.0)
            ]),
        )],
        aliases: vec![Alias::for_osm_object("RAC", 20)],
    }
}

/// Writes [`campus_snapshot`] into `campus.db` under `root`.
pub(super) fn seeded_database(root: &Utf8Path) -> Utf8PathBuf {
    let database = root.join("campus.db");
    persist_snapshot(&database, &campus_snapshot()).expect("persist campus snapshot");
    database
}
