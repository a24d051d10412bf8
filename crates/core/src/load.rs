use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::config::BlogConfig;
use crate::{ChronicleError, Result};

/// Reads the export document from a local file.
///
/// # Errors
///
/// [`ChronicleError::MissingInput`] when the file does not exist,
/// [`ChronicleError::InvalidEncoding`] when it is not UTF-8.
pub fn read_export(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ChronicleError::MissingInput(path.to_path_buf()));
    }

    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => ChronicleError::InvalidEncoding,
        _ => ChronicleError::from(e),
    })
}

/// Reads the export document from standard input.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => ChronicleError::InvalidEncoding,
        _ => ChronicleError::from(e),
    })?;

    Ok(buffer)
}

/// Where the page goes when no explicit output path is given.
///
/// `{output_dir}/{output_prefix}-{YYYYmmdd-HHMMSS}.{extension}`, without the
/// stamp when `include_timestamp` is off.
pub fn output_path(config: &BlogConfig, now: NaiveDateTime, extension: &str) -> PathBuf {
    let file_name = if config.include_timestamp {
        format!("{}-{}.{}", config.output_prefix, now.format("%Y%m%d-%H%M%S"), extension)
    } else {
        format!("{}.{}", config.output_prefix, extension)
    };

    config.output_dir.join(file_name)
}

/// Writes the rendered output, creating missing parent directories.
///
/// An existing file at `path` is overwritten.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, contents)?;
    Ok(())
}
