use crate::bytes::{read_u32_le, write_u32_le};
use crate::encode::write_boot_method;
use crate::{BootMethod, HeaderError, HeaderVariant, SIGNATURE_MAGIC, SIGNATURE_OFFSET};
use core::fmt;
use log::debug;

/// What [`validate`] found in an existing Boot Header.
///
/// Only produced for headers whose `"NSIH"` signature checked out; a bad
/// signature is [`HeaderError::BadSignature`] instead.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HeaderReport {
    pub variant: HeaderVariant,

    /// Load size declared by the header, as read before any fix.
    pub declared_size: u32,

    /// Payload length actually present behind the header.
    pub actual_size: u32,

    /// Whether the size field was rewritten to `actual_size`.
    pub size_fixed: bool,

    pub load_addr: u32,
    pub launch_addr: u32,

    /// Boot method byte after any patch; `None` for layouts without one.
    pub boot_method: Option<u8>,
}

impl HeaderReport {
    /// Whether the declared size agreed with the payload length.
    #[must_use]
    pub const fn size_matches(&self) -> bool {
        self.declared_size == self.actual_size
    }

    #[must_use]
    pub fn boot_method_name(&self) -> Option<&'static str> {
        self.boot_method.map(BootMethod::name_of)
    }
}

impl fmt::Display for HeaderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Boot Header:")?;
        write!(f, "  size:           {} ", self.declared_size)?;
        if self.size_matches() {
            writeln!(f, "(OK)")?;
        } else {
            writeln!(
                f,
                "(real: {}{})",
                self.actual_size,
                if self.size_fixed { ", fixed" } else { "" }
            )?;
        }
        writeln!(f, "  load address:   {:#x}", self.load_addr)?;
        writeln!(f, "  launch address: {:#x}", self.launch_addr)?;
        if let Some(method) = self.boot_method {
            writeln!(f, "  boot method:    {} ({method})", BootMethod::name_of(method))?;
        }
        write!(f, "  signature:      OK")
    }
}

/// Check the Boot Header at the start of `buf`.
///
/// `read_size` is the number of image bytes present in `buf`, header
/// included. With `fix_size` the size field is rewritten to the real
/// payload length. A `boot_method` is patched in when the variant has the
/// field and ignored with a warning otherwise.
///
/// A size mismatch is only reported through [`HeaderReport::size_matches`];
/// whether an error should abort is up to [`HeaderError::severity`].
///
/// # Errors
/// [`HeaderError::TooShort`] if the image cannot hold a header of this
/// variant, [`HeaderError::BadSignature`] if the `"NSIH"` signature is
/// missing. `buf` is not modified in either case.
pub fn validate(
    buf: &mut [u8],
    read_size: u32,
    variant: HeaderVariant,
    fix_size: bool,
    boot_method: Option<u8>,
) -> Result<HeaderReport, HeaderError> {
    let layout = variant.layout();
    let header_size = layout.header_size;

    let too_short = HeaderError::TooShort {
        read_size,
        header_size,
    };
    let read_len = usize::try_from(read_size).map_err(|_| too_short)?;
    if read_len < header_size || buf.len() < header_size {
        return Err(too_short);
    }

    let signature = read_u32_le(buf, SIGNATURE_OFFSET);
    if signature != SIGNATURE_MAGIC {
        return Err(HeaderError::BadSignature { found: signature });
    }

    // header_size is at most 1024 and read_len came from a u32
    #[allow(clippy::cast_possible_truncation)]
    let actual_size = (read_len - header_size) as u32;
    let declared_size = read_u32_le(buf, layout.size);
    if fix_size {
        write_u32_le(buf, layout.size, actual_size);
        debug!("load size fixed: {declared_size} -> {actual_size}");
    }

    if let Some(method) = boot_method {
        write_boot_method(buf, variant, method);
    }

    Ok(HeaderReport {
        variant,
        declared_size,
        actual_size,
        size_fixed: fix_size,
        load_addr: read_u32_le(buf, layout.load_addr),
        launch_addr: read_u32_le(buf, layout.launch_addr),
        boot_method: layout.boot_method.map(|off| buf[off]),
    })
}
