//! SHA-256 content checksums

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

/// Read buffer size for streaming digests
pub const CHUNK_SIZE: usize = 8192;

/// Lowercase hex SHA-256 of a file, streamed in `CHUNK_SIZE` reads.
pub fn checksum_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let file = File::open(path.as_ref())?;
    checksum_reader(file, CHUNK_SIZE)
}

/// Lowercase hex SHA-256 of everything `reader` yields.
pub fn checksum_reader<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Lowercase hex SHA-256 of an in-memory buffer.
pub fn sha256_hex(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}

/// Size of a file in bytes.
pub fn file_length<P: AsRef<Path>>(path: P) -> io::Result<u64> {
    Ok(std::fs::metadata(path.as_ref())?.len())
}
