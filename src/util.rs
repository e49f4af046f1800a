use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Could not access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Could not parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

pub fn read_serialized<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| InputError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn write_serialized<T: Serialize>(path: &Path, value: &T) -> Result<(), InputError> {
    let io_error = |source| InputError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
    }

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| InputError::Json {
        path: path.display().to_string(),
        source,
    })?;
    writer.flush().map_err(io_error)?;

    Ok(())
}
