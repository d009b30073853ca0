use crate::bytes::write_u32_le;
use crate::trampoline::inject_trampoline;
use crate::{HeaderError, HeaderVariant, SIGNATURE, SIGNATURE_OFFSET};
use log::{debug, warn};

/// Values written into a Boot Header.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BootHeader {
    /// Length of the payload following the header.
    pub size: u32,

    /// Address the iROM copies the payload to.
    pub load_addr: u32,

    /// Address the iROM jumps to.
    pub launch_addr: u32,

    /// Raw boot method byte; only the standard layout stores it.
    pub boot_method: Option<u8>,
}

impl BootHeader {
    #[must_use]
    pub const fn new(size: u32, load_addr: u32, launch_addr: u32) -> Self {
        Self {
            size,
            load_addr,
            launch_addr,
            boot_method: None,
        }
    }

    #[must_use]
    pub const fn with_boot_method(mut self, boot_method: u8) -> Self {
        self.boot_method = Some(boot_method);
        self
    }
}

/// Write `header` into the first [`HeaderVariant::header_size`] bytes of `buf`.
///
/// With `switch_to_64bit` the 64-bit switch stub is placed at offset 0
/// and the launch address field points at the stub (`load_addr`); the
/// stub then restarts the cores at `header.launch_addr`.
///
/// A boot method on a variant without that field is dropped with a
/// warning. Bytes past the signature are left alone.
///
/// # Panics
/// Panics if `buf` is shorter than the variant's header size.
pub fn encode(buf: &mut [u8], variant: HeaderVariant, header: &BootHeader, switch_to_64bit: bool) {
    let layout = variant.layout();
    assert!(
        buf.len() >= layout.header_size,
        "buffer of {} bytes cannot hold a {variant} boot header",
        buf.len()
    );

    let launch_addr = if switch_to_64bit {
        inject_trampoline(buf, header.load_addr, header.launch_addr)
    } else {
        header.launch_addr
    };

    write_u32_le(buf, layout.size, header.size);
    write_u32_le(buf, layout.load_addr, header.load_addr);
    write_u32_le(buf, layout.launch_addr, launch_addr);

    if let Some(method) = header.boot_method {
        write_boot_method(buf, variant, method);
    }

    buf[SIGNATURE_OFFSET..SIGNATURE_OFFSET + SIGNATURE.len()].copy_from_slice(&SIGNATURE);
    debug!(
        "encoded {variant} boot header: size={}, load={:#x}, launch={launch_addr:#x}",
        header.size, header.load_addr
    );
}

/// Store a boot method byte, or warn and leave `buf` untouched if the
/// variant has no such field.
pub(crate) fn write_boot_method(buf: &mut [u8], variant: HeaderVariant, method: u8) {
    match variant.layout().boot_method {
        Some(off) => {
            buf[off] = method;
            debug!("boot method set to {method}");
        }
        None => {
            let err = HeaderError::UnsupportedBootMethodForVariant { variant };
            warn!("{err}, boot method {method} ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::read_u32_le;

    #[test]
    fn standard_fields_land_at_their_offsets() {
        let mut buf = [0u8; 512];
        let header = BootHeader::new(0x1234, 0x4000_0000, 0x4000_0200).with_boot_method(3);
        encode(&mut buf, HeaderVariant::Standard, &header, false);

        assert_eq!(read_u32_le(&buf, 0x44), 0x1234);
        assert_eq!(read_u32_le(&buf, 0x48), 0x4000_0000);
        assert_eq!(read_u32_le(&buf, 0x4c), 0x4000_0200);
        assert_eq!(buf[0x57], 3);
        assert_eq!(&buf[0x1fc..0x200], b"NSIH");
        assert!(buf[..0x44].iter().all(|&b| b == 0));
    }

    #[test]
    fn artik_ignores_boot_method() {
        let mut buf = [0u8; 1024];
        let header = BootHeader::new(16, 0x4300_0000, 0x4300_0400).with_boot_method(1);
        encode(&mut buf, HeaderVariant::Artik, &header, false);

        assert_eq!(read_u32_le(&buf, 0x50), 16);
        assert_eq!(read_u32_le(&buf, 0x58), 0x4300_0000);
        assert_eq!(read_u32_le(&buf, 0x60), 0x4300_0400);
        assert_eq!(buf[0x57], 0);
    }

    #[test]
    fn payload_after_header_is_untouched() {
        let mut buf = [0x5Au8; 600];
        encode(&mut buf, HeaderVariant::Standard, &BootHeader::new(88, 0, 0), true);
        assert!(buf[512..].iter().all(|&b| b == 0x5A));
    }

    #[test]
    #[should_panic(expected = "cannot hold")]
    fn undersized_buffer_panics() {
        let mut buf = [0u8; 512];
        encode(&mut buf, HeaderVariant::Artik, &BootHeader::default(), false);
    }
}
