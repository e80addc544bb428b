//! Filesystem access for the snapshot importer and the CLI.
//!
//! Quadrant touches the disk in three places: reading a snapshot, creating
//! the directory a new database lands in, and checking that a configured
//! input file exists. Each goes through an ambient `cap-std` directory
//! handle opened on the nearest directory the path names.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir, fs_utf8::File};
use std::io;

/// What a configured input path names on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    /// Neither the path nor its parent directory exists.
    Missing,
    /// A regular file.
    File,
    /// A directory or another non-file entry.
    NotAFile,
}

/// Open a file for reading, e.g. a campus snapshot.
pub fn open_for_reading(path: &Utf8Path) -> io::Result<File> {
    File::open_ambient(path, ambient_authority())
}

/// Report whether `path` is a regular file, is missing, or is something else.
///
/// A missing parent directory counts as [`PathStatus::Missing`]; other I/O
/// failures, such as a permission error, are returned unchanged.
pub fn inspect_path(path: &Utf8Path) -> io::Result<PathStatus> {
    let Some(name) = path.file_name() else {
        return Ok(PathStatus::NotAFile);
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(PathStatus::Missing),
        Err(err) => return Err(err),
    };
    match dir.metadata(name) {
        Ok(meta) if meta.is_file() => Ok(PathStatus::File),
        Ok(_) => Ok(PathStatus::NotAFile),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(PathStatus::Missing),
        Err(err) => Err(err),
    }
}

/// Create every missing directory above `path`, e.g. before a SQLite
/// database is written there.
pub fn create_parent_dirs(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) else {
        return Ok(());
    };
    let (anchor, existing) = nearest_existing_dir(parent)?;
    let missing = parent
        .strip_prefix(existing)
        .map_err(|_| io::Error::other(format!("{existing} is not an ancestor of {parent}")))?;
    if missing.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(missing)
}

/// Open the deepest ancestor of `dir` (itself included) that already exists.
fn nearest_existing_dir(dir: &Utf8Path) -> io::Result<(Dir, &Utf8Path)> {
    for ancestor in dir.ancestors() {
        let target = if ancestor.as_str().is_empty() {
            Utf8Path::new(".")
        } else {
            ancestor
        };
        match Dir::open_ambient_dir(target, ambient_authority()) {
            Ok(opened) => return Ok((opened, ancestor)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no existing directory above {dir}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn utf8(dir: &TempDir, relative: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(relative)).expect("temp path is UTF-8")
    }

    #[rstest]
    fn creates_nested_database_directories(temp_dir: TempDir) {
        let target = utf8(&temp_dir, "exports/2024/campus.db");
        create_parent_dirs(&target).expect("create parents");
        assert!(temp_dir.path().join("exports/2024").is_dir());
    }

    #[rstest]
    fn existing_parent_needs_nothing(temp_dir: TempDir) {
        let target = utf8(&temp_dir, "campus.db");
        create_parent_dirs(&target).expect("parent already exists");
        create_parent_dirs(Utf8Path::new("campus.db")).expect("bare file name");
    }

    #[rstest]
    fn parent_below_a_file_is_rejected(temp_dir: TempDir) {
        let blocker = utf8(&temp_dir, "campus.json");
        fs::write(&blocker, "{}").expect("write file");
        let target = blocker.join("nested/campus.db");
        assert!(create_parent_dirs(&target).is_err());
    }

    #[rstest]
    fn inspect_reports_each_status(temp_dir: TempDir) {
        let snapshot = utf8(&temp_dir, "campus.json");
        fs::write(&snapshot, "{}").expect("write file");
        let folder = utf8(&temp_dir, "exports");
        fs::create_dir(&folder).expect("create dir");

        assert_eq!(inspect_path(&snapshot).expect("inspect"), PathStatus::File);
        assert_eq!(inspect_path(&folder).expect("inspect"), PathStatus::NotAFile);
        assert_eq!(
            inspect_path(&utf8(&temp_dir, "campus.db")).expect("inspect"),
            PathStatus::Missing
        );
        assert_eq!(
            inspect_path(&utf8(&temp_dir, "absent/campus.db")).expect("inspect"),
            PathStatus::Missing
        );
    }

    #[rstest]
    fn opens_snapshot_for_reading(temp_dir: TempDir) {
        let snapshot = utf8(&temp_dir, "campus.json");
        fs::write(&snapshot, r#"{"aliases":[]}"#).expect("write file");
        let mut contents = String::new();
        open_for_reading(&snapshot)
            .expect("open file")
            .read_to_string(&mut contents)
            .expect("read file");
        assert_eq!(contents, r#"{"aliases":[]}"#);
    }
}
