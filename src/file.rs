// src/file.rs

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::ReportError;

pub fn ensure_directory(dir: &Path) -> Result<(), ReportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ReportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| ReportError::Write { path: dir.to_path_buf(), source })?;
    }
    Ok(())
}

/// Sibling temp path used while a file is being replaced.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to a temp file next to `path`, then rename over `path`.
/// Readers see either the old file or the new one, never a partial write.
pub fn write_replacing(path: &Path, contents: &[u8]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let tmp = temp_path_for(path);
    let werr = |source| ReportError::Write { path: path.to_path_buf(), source };

    let mut f = fs::File::create(&tmp).map_err(werr)?;
    f.write_all(contents).map_err(werr)?;
    f.sync_all().map_err(werr)?;
    drop(f);

    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        ReportError::Write { path: path.to_path_buf(), source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("guild_file_{}", name));
        let _ = fs::remove_dir_all(&p);
        p
    }

    #[test]
    fn write_replacing_creates_parents_and_overwrites() {
        let dir = tmp_dir("replace");
        let path = dir.join("nested").join("out.csv");

        write_replacing(&path, b"first").unwrap();
        write_replacing(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let dir = tmp_dir("notdir");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("plain");
        fs::write(&file, "x").unwrap();
        assert!(matches!(ensure_directory(&file), Err(ReportError::NotADirectory(_))));
    }
}
