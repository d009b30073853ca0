//! Reading the boot loader image into memory.

use crate::error::LoadError;
use log::{debug, warn};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Largest image the loader reads, header included.
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Image lengths sent to the iROM are multiples of this.
pub const IMAGE_ALIGN: usize = 16;

/// A boot loader image, with room for its Boot Header at the start.
#[derive(Debug)]
pub struct Image {
    /// Header region followed by the padded payload.
    pub bytes: Vec<u8>,

    /// Length of the header region at the start of `bytes`; zero when an
    /// existing header is only validated.
    pub header_offset: usize,
}

impl Image {
    /// Bytes following the header region.
    #[must_use]
    pub fn payload_size(&self) -> usize {
        self.bytes.len() - self.header_offset
    }
}

/// Read the image from `path`, or from standard input if it is `-`.
pub fn read_image(path: &Path, header_offset: usize, in_place: bool) -> Result<Image, LoadError> {
    if path == Path::new("-") {
        return read_from(io::stdin().lock(), header_offset, in_place, MAX_IMAGE_SIZE);
    }
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_from(file, header_offset, in_place, MAX_IMAGE_SIZE)
}

/// Read up to `capacity` image bytes from `reader`.
///
/// The freshly read length is zero-padded to a multiple of
/// [`IMAGE_ALIGN`]. Unless `in_place` is set, `header_offset` zero bytes
/// are reserved in front of the data; otherwise the header is expected in
/// the data itself and the input must be at least that long.
pub fn read_from<R: Read>(
    mut reader: R,
    header_offset: usize,
    in_place: bool,
    capacity: usize,
) -> Result<Image, LoadError> {
    let reserved = if in_place { 0 } else { header_offset };
    let limit = capacity.saturating_sub(reserved);

    let mut bytes = vec![0u8; reserved];
    let read = reader
        .by_ref()
        .take(u64::try_from(limit).unwrap_or(u64::MAX))
        .read_to_end(&mut bytes)
        .map_err(LoadError::Read)?;

    if read == limit {
        let mut probe = [0u8; 1];
        if reader.read(&mut probe).map_err(LoadError::Read)? > 0 {
            warn!("input truncated to {limit} bytes");
        }
    }

    let padded = read.next_multiple_of(IMAGE_ALIGN);
    bytes.resize(reserved + padded, 0);
    debug!("read {read} bytes, padded to {padded}");

    if bytes.len() < header_offset {
        return Err(LoadError::InputTooShort);
    }

    Ok(Image {
        bytes,
        header_offset,
    })
}
