//! # NSIH Boot Header
//!
//! The S5P6818 iROM only accepts a second-stage loader over USB if the
//! image starts with a Boot Header: a fixed-size block carrying the load
//! size, load address and launch address, tagged with the ASCII signature
//! `"NSIH"` at offset `0x1fc`.
//!
//! Two on-disk layouts exist, see [`HeaderVariant`]:
//!
//! | field | Standard | Artik | width |
//! |---|---|---|---|
//! | load size | `0x44` | `0x50` | 4 bytes LE |
//! | load address | `0x48` | `0x58` | 4 bytes LE |
//! | launch address | `0x4c` | `0x60` | 4 bytes LE |
//! | boot method | `0x57` | – | 1 byte |
//! | signature | `0x1fc` | `0x1fc` | `"NSIH"` |
//! | header size | 512 | 1024 | – |
//!
//! All functions operate in place on a caller-owned buffer; nothing here
//! allocates or performs I/O.
//!
//! ```
//! use nsih::{BootHeader, HeaderVariant, encode, validate};
//!
//! let mut image = [0u8; 1024];
//! let header = BootHeader::new(512, 0x4000_0000, 0x4000_0200);
//! encode(&mut image, HeaderVariant::Standard, &header, false);
//!
//! let report = validate(&mut image, 1024, HeaderVariant::Standard, false, None).unwrap();
//! assert!(report.size_matches());
//! assert_eq!(report.launch_addr, 0x4000_0200);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

mod bytes;
mod encode;
mod error;
mod layout;
mod transfer;
mod trampoline;

#[cfg(feature = "validate")]
mod validate;

pub use bytes::{read_u32_le, write_u32_le};
pub use encode::{BootHeader, encode};
pub use error::{HeaderError, Severity};
pub use layout::{BootMethod, HeaderLayout, HeaderVariant};
pub use transfer::{Chunks, MAX_TRANSFER_UNIT, chunks};
pub use trampoline::{ARM64_SWITCH, TRAMPOLINE_LEN, inject_trampoline};

#[cfg(feature = "validate")]
pub use validate::{HeaderReport, validate};

/// Signature bytes identifying a Boot Header.
pub const SIGNATURE: [u8; 4] = *b"NSIH";

/// The [`SIGNATURE`] read as a little-endian `u32`.
pub const SIGNATURE_MAGIC: u32 = 0x4849_534E; // "HISN"

/// Byte offset of the [`SIGNATURE`], identical for both variants.
pub const SIGNATURE_OFFSET: usize = 0x1fc;
