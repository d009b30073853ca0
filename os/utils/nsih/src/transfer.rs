//! Splitting an image into transport-sized pieces.

use core::iter::FusedIterator;
use core::num::NonZeroUsize;

/// Largest piece handed to the USB transport in one bulk write.
pub const MAX_TRANSFER_UNIT: NonZeroUsize = NonZeroUsize::new(1024 * 1024).unwrap();

/// Iterator over `(offset, len)` pairs covering `0..total` in pieces of
/// at most `max_unit` bytes. Clone it to start over.
#[derive(Debug, Clone)]
pub struct Chunks {
    offset: usize,
    total: usize,
    max_unit: usize,
}

/// Chunk the first `total` bytes of `buf`, clamped to its length.
#[must_use]
pub fn chunks(buf: &[u8], total: usize, max_unit: NonZeroUsize) -> Chunks {
    Chunks::new(total.min(buf.len()), max_unit)
}

impl Chunks {
    #[must_use]
    pub const fn new(total: usize, max_unit: NonZeroUsize) -> Self {
        Self {
            offset: 0,
            total,
            max_unit: max_unit.get(),
        }
    }
}

impl Iterator for Chunks {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.total {
            return None;
        }
        let off = self.offset;
        let len = self.max_unit.min(self.total - off);
        self.offset += len;
        Some((off, len))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let r = (self.total - self.offset).div_ceil(self.max_unit);
        (r, Some(r))
    }
}

impl ExactSizeIterator for Chunks {}

impl FusedIterator for Chunks {}
