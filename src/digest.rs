// ABOUTME: SHA-256 digest utilities
// ABOUTME: Hex digests of strings, byte slices, readers and files

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

const BUFFER_SIZE: usize = 4096;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Lowercase hex SHA-256 of the UTF-8 bytes of `data`
pub fn sha256_hex(data: &str) -> String {
    sha256_bytes_hex(data.as_bytes())
}

pub fn sha256_bytes_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Stream a reader through SHA-256
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUFFER_SIZE];
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

pub fn sha256_file(path: &Path) -> Result<String, DigestError> {
    let io_error = |source| DigestError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    sha256_reader(file).map_err(io_error)
}
