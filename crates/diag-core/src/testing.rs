//! Fixtures shared by the crate's tests

use crate::error::{DiagError, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write an executable `java` shell script into `dir`
pub fn write_stub(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("java");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Retry `f` while exec fails with ETXTBSY
///
/// Other test threads forking while a stub was open for writing can briefly
/// hold it busy.
pub fn retry_busy<T>(f: impl Fn() -> Result<T>) -> Result<T> {
    for _ in 0..10 {
        match f() {
            Err(DiagError::Spawn { source, .. }) if source.raw_os_error() == Some(26) => {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            other => return other,
        }
    }
    f()
}
