//! Shared test utilities for integration tests
//!
//! Copies source fixtures into a temporary directory so tests can run the
//! binary against them and rewrite them in place.

#![allow(dead_code)]

use assert_fs::prelude::*;

/// Fixture directory relative to the crate root.
const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

/// Temp dir holding a copy of the named fixture files.
pub fn fixture_dir(names: &[&str]) -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    for name in names
    {
        tmp.child(name)
            .write_file(std::path::Path::new(&format!("{FIXTURES}/{name}")))
            .expect("copy fixture");
    }

    tmp
}

/// Temp dir with a single file holding `body`.
pub fn source_dir(
    name: &str,
    body: &str,
) -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child(name)
        .write_str(body)
        .expect("write source");
    tmp
}
