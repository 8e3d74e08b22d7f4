//! Integration tests for file-backed resource loading.

use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};
use trcplay_core::{
    DataReader, Error, MemoryMapping, ReaderError, ResourceBundle, ResourceError, ResourceKind,
};

/// Create a data folder with tables of the given sizes; `None` skips a file.
fn data_folder(sizes: [Option<usize>; 3]) -> TempDir {
    let dir = tempdir().unwrap();
    for (kind, size) in ResourceKind::ALL.iter().zip(sizes) {
        if let Some(size) = size {
            let fill = match kind {
                ResourceKind::Pictures => 0x01,
                ResourceKind::Sprites => 0x02,
                ResourceKind::Types => 0x03,
            };
            fs::write(dir.path().join(kind.file_name()), vec![fill; size]).unwrap();
        }
    }
    dir
}

fn expect_open_failure(dir: &Path, expected: ResourceKind) {
    match ResourceBundle::open(dir) {
        Err(Error::Resource(ResourceError::Open { kind, path, .. })) => {
            assert_eq!(kind, expected);
            assert_eq!(path, dir.join(expected.file_name()));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(bundle) => panic!("expected failure, opened {bundle:?}"),
    }
}

// =============================================================================
// Bundle Tests
// =============================================================================

#[test]
fn test_bundle_reader_lengths() {
    let dir = data_folder([Some(100), Some(200), Some(50)]);

    let bundle = ResourceBundle::open(dir.path()).unwrap();
    let resources = bundle.readers();

    assert_eq!(resources.pictures.len(), 100);
    assert_eq!(resources.sprites.len(), 200);
    assert_eq!(resources.types.len(), 50);

    assert_eq!(resources.pictures.as_slice()[0], 0x01);
    assert_eq!(resources.sprites.as_slice()[199], 0x02);
    assert_eq!(resources.types.as_slice()[49], 0x03);

    bundle.close();
}

#[test]
fn test_bundle_handles_are_mappings() {
    let dir = data_folder([Some(4), Some(8), Some(12)]);

    let bundle = ResourceBundle::open(dir.path()).unwrap();
    let types = bundle.get(ResourceKind::Types);
    assert!(types.is_open());
    assert_eq!(types.size(), 12);
    assert_eq!(types.path(), dir.path().join("Tibia.dat"));
}

#[test]
fn test_missing_data_folder() {
    let dir = tempdir().unwrap();
    expect_open_failure(&dir.path().join("nowhere"), ResourceKind::Pictures);
}

#[test]
fn test_missing_sprites() {
    let dir = data_folder([Some(10), None, Some(10)]);
    expect_open_failure(dir.path(), ResourceKind::Sprites);
}

#[test]
fn test_missing_types() {
    let dir = data_folder([Some(10), Some(10), None]);
    expect_open_failure(dir.path(), ResourceKind::Types);
}

#[test]
fn test_directory_in_place_of_table_rejected() {
    let dir = data_folder([Some(10), None, Some(10)]);
    fs::create_dir(dir.path().join("Tibia.spr")).unwrap();
    expect_open_failure(dir.path(), ResourceKind::Sprites);
}

#[test]
fn test_zero_length_table_accepted() {
    let dir = data_folder([Some(10), Some(0), Some(10)]);

    let bundle = ResourceBundle::open(dir.path()).unwrap();
    let mut resources = bundle.readers();

    assert_eq!(resources.sprites.len(), 0);
    assert!(resources.sprites.is_exhausted());
    assert!(matches!(
        resources.sprites.read_u8(),
        Err(ReaderError::OutOfBounds { length: 0, .. })
    ));
}

#[test]
fn test_readers_are_independent() {
    let dir = data_folder([Some(8), Some(8), Some(8)]);
    let bundle = ResourceBundle::open(dir.path()).unwrap();

    let mut first = bundle.readers();
    first.pictures.skip(8).unwrap();

    let second = bundle.readers();
    assert_eq!(second.pictures.position(), 0);
    assert!(first.pictures.is_exhausted());
}

// =============================================================================
// Mapping + Reader Tests
// =============================================================================

#[test]
fn test_reader_over_mapping_rejects_overrun() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capture.trc");
    fs::write(&path, [0x10, 0x20, 0x30, 0x40, 0x50]).unwrap();

    let mapping = MemoryMapping::open(&path).unwrap();
    let mut reader = DataReader::from_mapping(&mapping);

    assert_eq!(reader.read_u32().unwrap(), 0x40302010);
    let err = reader.read_u32().unwrap_err();
    assert_eq!(
        err,
        ReaderError::OutOfBounds {
            position: 4,
            requested: 4,
            length: 5,
        }
    );
    assert_eq!(reader.read_u8().unwrap(), 0x50);
}

#[test]
fn test_missing_mapping_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.trc");

    let err = MemoryMapping::open(&path).unwrap_err();
    assert!(err.to_string().contains("missing.trc"), "message: {err}");
}
