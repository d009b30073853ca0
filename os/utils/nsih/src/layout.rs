//! Field offsets of the two Boot Header layouts.

use core::fmt;

/// Byte offsets of the Boot Header fields for one [`HeaderVariant`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HeaderLayout {
    /// Offset of the 32-bit load size.
    pub size: usize,

    /// Offset of the 32-bit load address.
    pub load_addr: usize,

    /// Offset of the 32-bit launch address.
    pub launch_addr: usize,

    /// Offset of the boot method byte, if the layout has one.
    pub boot_method: Option<usize>,

    /// Size of the whole header region; also the minimum image length
    /// that can hold a header of this layout.
    pub header_size: usize,
}

impl HeaderLayout {
    /// The iROM's own layout.
    pub const STANDARD: Self = Self {
        size: 0x44,
        load_addr: 0x48,
        launch_addr: 0x4c,
        boot_method: Some(0x57),
        header_size: 512,
    };

    /// The layout used by Samsung ARTIK boot loaders.
    pub const ARTIK: Self = Self {
        size: 0x50,
        load_addr: 0x58,
        launch_addr: 0x60,
        boot_method: None,
        header_size: 1024,
    };
}

/// Selects one of the two supported Boot Header layouts.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum HeaderVariant {
    /// 512-byte header with a boot method byte.
    #[default]
    Standard,
    /// 1024-byte ARTIK header; no boot method byte.
    Artik,
}

impl HeaderVariant {
    #[must_use]
    pub const fn layout(self) -> &'static HeaderLayout {
        match self {
            Self::Standard => &HeaderLayout::STANDARD,
            Self::Artik => &HeaderLayout::ARTIK,
        }
    }

    /// Size of the header region in bytes.
    #[must_use]
    pub const fn header_size(self) -> usize {
        self.layout().header_size
    }

}

impl fmt::Display for HeaderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Artik => f.write_str("ARTIK"),
        }
    }
}

/// Boot media understood by the iROM, as encoded in the boot method byte.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BootMethod {
    Usb = 0,
    Spi = 1,
    Nand = 2,
    SdMmc = 3,
    SdFs = 4,
}

impl BootMethod {
    /// All methods, indexed by their byte value.
    pub const ALL: [Self; 5] = [Self::Usb, Self::Spi, Self::Nand, Self::SdMmc, Self::SdFs];

    /// Resolve a raw boot method byte; `None` for values outside the table.
    const fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Usb),
            1 => Some(Self::Spi),
            2 => Some(Self::Nand),
            3 => Some(Self::SdMmc),
            4 => Some(Self::SdFs),
            _ => None,
        }
    }

    /// Name of a raw boot method byte, `"unknown"` if it is not in the table.
    #[must_use]
    pub const fn name_of(value: u8) -> &'static str {
        match Self::from_byte(value) {
            Some(method) => method.name(),
            None => "unknown",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Usb => "USB",
            Self::Spi => "SPI",
            Self::Nand => "NAND",
            Self::SdMmc => "SDMMC",
            Self::SdFs => "SDFS",
        }
    }

    /// Case-insensitive lookup by [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(name))
    }
}

impl From<BootMethod> for u8 {
    fn from(method: BootMethod) -> Self {
        method as u8
    }
}

impl fmt::Display for BootMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
