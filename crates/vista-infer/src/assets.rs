//! First-run fetching of model weights, label files and server config.
//!
//! Every helper is idempotent: an artifact that already exists on disk is
//! left alone and no network access happens.

use crate::InferError;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Last path segment of `url`, without query or fragment.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    let name = path.rsplit('/').next()?;
    (!name.is_empty()).then_some(name)
}

fn part_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Download `url` into `dir/<file name of url>` unless that file exists.
///
/// The body is written to a `.part` file first and renamed on success, so an
/// interrupted download is retried on the next run.
pub async fn download_file(url: &str, dir: &Path) -> Result<PathBuf, InferError> {
    let name = file_name_from_url(url)
        .ok_or_else(|| InferError::Request(format!("no file name in {url}")))?;
    let target = dir.join(name);
    if target.exists() {
        log::info!("{} already exists", target.display());
        return Ok(target);
    }

    fs::create_dir_all(dir)?;
    log::info!("downloading {url}");
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(InferError::Server {
            status: status.as_u16(),
            message: format!("GET {url}"),
        });
    }
    let body = response.bytes().await?;

    let part = part_path(&target);
    fs::write(&part, &body)?;
    fs::rename(&part, &target)?;
    log::info!("saved {} ({} bytes)", target.display(), body.len());
    Ok(target)
}

/// Copy the first `.onnx` member of the gzip'd tarball `archive` to
/// `dir/target`, unless that file exists.
pub fn extract_onnx(archive: &Path, dir: &Path, target: &str) -> Result<PathBuf, InferError> {
    let destination = dir.join(target);
    if destination.exists() {
        log::info!("{} already exists", destination.display());
        return Ok(destination);
    }

    let file = File::open(archive).map_err(|e| InferError::Io(format!("{}: {e}", archive.display())))?;
    let mut tarball = tar::Archive::new(GzDecoder::new(file));
    let entries = tarball
        .entries()
        .map_err(|e| InferError::Archive(format!("{}: {e}", archive.display())))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| InferError::Archive(e.to_string()))?;
        let is_onnx = entry
            .path()
            .map_err(|e| InferError::Archive(e.to_string()))?
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("onnx"));
        if !is_onnx || !entry.header().entry_type().is_file() {
            continue;
        }

        fs::create_dir_all(dir)?;
        let part = part_path(&destination);
        let mut out = File::create(&part)?;
        io::copy(&mut entry, &mut out).map_err(|e| InferError::Archive(e.to_string()))?;
        drop(out);
        fs::rename(&part, &destination)?;
        log::info!("extracted {}", destination.display());
        return Ok(destination);
    }

    Err(InferError::Archive(format!(
        "{} holds no .onnx file",
        archive.display()
    )))
}

/// Write a static configuration blob to `dir/name`, replacing any previous
/// contents.
pub fn write_config(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, InferError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}
