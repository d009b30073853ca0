//! Where the finished image goes.

// Built with --no-default-features only tests drive a transport.
#![cfg_attr(not(feature = "usb"), allow(dead_code))]

use crate::error::LoadError;
use log::{debug, warn};
use nsih::{MAX_TRANSFER_UNIT, chunks};
use std::fs;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Consumer of the finished image.
pub trait OutputSink {
    /// Hand over `image`; returns how many bytes were accepted.
    fn deliver(&mut self, image: &[u8]) -> Result<usize, LoadError>;
}

/// A device link accepting one bulk write at a time.
pub trait Transport {
    /// Send `data`; returns how many bytes the device took.
    fn bulk_write(&mut self, data: &[u8]) -> Result<usize, LoadError>;
}

/// Writes the image to a file, or to stdout for `-`.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for FileSink {
    fn deliver(&mut self, image: &[u8]) -> Result<usize, LoadError> {
        let result = if self.path == Path::new("-") {
            let mut out = io::stdout().lock();
            out.write_all(image).and_then(|()| out.flush())
        } else {
            fs::write(&self.path, image)
        };
        result.map_err(|source| LoadError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("wrote {} bytes to {}", image.len(), self.path.display());
        Ok(image.len())
    }
}

/// Feeds the image to a [`Transport`] in pieces of at most `max_unit` bytes.
#[derive(Debug)]
pub struct TransportSink<T> {
    transport: T,
    max_unit: NonZeroUsize,
}

impl<T: Transport> TransportSink<T> {
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self::with_max_unit(transport, MAX_TRANSFER_UNIT)
    }

    #[must_use]
    pub const fn with_max_unit(transport: T, max_unit: NonZeroUsize) -> Self {
        Self {
            transport,
            max_unit,
        }
    }
}

impl<T: Transport> OutputSink for TransportSink<T> {
    fn deliver(&mut self, image: &[u8]) -> Result<usize, LoadError> {
        let size = image.len();
        debug!("Start transfer, size={size}");

        let mut transferred = 0;
        for (off, len) in chunks(image, size, self.max_unit) {
            let accepted = self.transport.bulk_write(&image[off..off + len])?;
            transferred += accepted;
            if accepted < len {
                break;
            }
        }

        debug!("Finish transfer, transferred={transferred}");
        if transferred == size {
            debug!("OK");
        } else {
            warn!("short load: size={size}, transferred={transferred}");
        }
        Ok(transferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every write; accepts at most `cap` bytes of each one.
    #[derive(Default)]
    struct MockTransport {
        writes: Vec<Vec<u8>>,
        cap: Option<usize>,
        fail_on: Option<usize>,
    }

    impl Transport for MockTransport {
        fn bulk_write(&mut self, data: &[u8]) -> Result<usize, LoadError> {
            if self.fail_on == Some(self.writes.len()) {
                return Err(LoadError::DeviceNotFound);
            }
            let n = self.cap.map_or(data.len(), |cap| cap.min(data.len()));
            self.writes.push(data[..n].to_vec());
            Ok(n)
        }
    }

    fn unit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn sends_in_order_in_bounded_pieces() {
        let image: Vec<u8> = (0..=255).collect();
        let mut sink = TransportSink::with_max_unit(MockTransport::default(), unit(100));

        assert_eq!(sink.deliver(&image).unwrap(), 256);
        let mock = sink.transport;
        assert_eq!(
            mock.writes.iter().map(Vec::len).collect::<Vec<_>>(),
            [100, 100, 56]
        );
        assert_eq!(mock.writes.concat(), image);
    }

    #[test]
    fn stops_after_short_write() {
        let transport = MockTransport {
            cap: Some(30),
            ..MockTransport::default()
        };
        let mut sink = TransportSink::with_max_unit(transport, unit(64));

        assert_eq!(sink.deliver(&[0u8; 200]).unwrap(), 30);
        assert_eq!(sink.transport.writes.len(), 1);
    }

    #[test]
    fn transport_error_propagates() {
        let transport = MockTransport {
            fail_on: Some(1),
            ..MockTransport::default()
        };
        let mut sink = TransportSink::with_max_unit(transport, unit(8));
        assert!(matches!(
            sink.deliver(&[0u8; 32]),
            Err(LoadError::DeviceNotFound)
        ));
    }

    #[test]
    fn file_sink_writes_whole_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.bin");

        let mut sink = FileSink::new(&path);
        assert_eq!(sink.deliver(b"NSIH payload").unwrap(), 12);
        assert_eq!(fs::read(&path).unwrap(), b"NSIH payload");
    }

    #[test]
    fn file_sink_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("missing").join("image.bin"));
        assert!(matches!(
            sink.deliver(b"x"),
            Err(LoadError::Write { .. })
        ));
    }
}
