use clap::Parser;
use nsih::{BootMethod, HeaderVariant};
use std::path::PathBuf;

/// Send a boot loader to an S5P6818 waiting in iROM USB boot mode.
#[derive(Debug, Parser)]
#[command(
    name = "nanopi-load",
    version,
    after_help = "If <LOADADDR> is given, the image is prepended with a Boot Header \
                  (512 bytes, 1024 with -A).\n\
                  If <STARTADDR> is not given, <LOADADDR> + header size is assumed.\n\
                  If <BOOTLOADER> is \"-\", standard input is read."
)]
pub struct Cli {
    /// Boot Header format for Samsung ARTIK boot loader
    #[arg(short = 'A')]
    pub artik: bool,

    /// Dry run (implies -v)
    #[arg(short = 'c')]
    pub dry_run: bool,

    /// Fix load size in Boot Header
    #[arg(short = 'f')]
    pub fix_size: bool,

    /// Embed Boot Header in the first header-size bytes read
    #[arg(short = 'i')]
    pub in_place: bool,

    /// Be verbose
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Add code to the Boot Header that switches the iROM boot to 64-bit
    #[arg(short = 'x')]
    pub arm64: bool,

    /// Boot method byte: usb, spi, nand, sdmmc, sdfs or a number
    #[arg(short = 'b', value_name = "METHOD", value_parser = parse_boot_method)]
    pub boot_method: Option<u8>,

    /// Write the image to a file ("-" for stdout) instead of the device
    #[arg(short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Boot loader image, "-" for standard input
    #[arg(value_name = "BOOTLOADER")]
    pub input: PathBuf,

    /// Load address (hex)
    #[arg(value_name = "LOADADDR", value_parser = parse_hex)]
    pub load_addr: Option<u32>,

    /// Start address (hex)
    #[arg(value_name = "STARTADDR", value_parser = parse_hex)]
    pub start_addr: Option<u32>,
}

impl Cli {
    #[must_use]
    pub const fn variant(&self) -> HeaderVariant {
        if self.artik {
            HeaderVariant::Artik
        } else {
            HeaderVariant::Standard
        }
    }

    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose || self.dry_run
    }
}

fn parse_hex(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex address {s:?}: {e}"))
}

fn parse_boot_method(s: &str) -> Result<u8, String> {
    if let Some(method) = BootMethod::from_name(s) {
        return Ok(method.into());
    }
    s.parse::<u8>()
        .map_err(|_| format!("unknown boot method {s:?}, expected usb, spi, nand, sdmmc, sdfs or 0-255"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_short_flags() {
        let cli = Cli::try_parse_from(["nanopi-load", "-Acfivx", "u-boot.bin"]).unwrap();
        assert!(cli.artik && cli.dry_run && cli.fix_size && cli.in_place && cli.verbose && cli.arm64);
        assert_eq!(cli.variant(), HeaderVariant::Artik);
        assert_eq!(cli.load_addr, None);
    }

    #[test]
    fn addresses_are_hex() {
        let cli =
            Cli::try_parse_from(["nanopi-load", "-", "43c00000", "0x43C00200"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("-"));
        assert_eq!(cli.load_addr, Some(0x43c0_0000));
        assert_eq!(cli.start_addr, Some(0x43c0_0200));
        assert_eq!(cli.variant(), HeaderVariant::Standard);
    }

    #[test]
    fn bad_address_is_rejected() {
        assert!(Cli::try_parse_from(["nanopi-load", "a.bin", "xyz"]).is_err());
        assert!(Cli::try_parse_from(["nanopi-load", "a.bin", "100000000"]).is_err());
    }

    #[test]
    fn boot_method_by_name_or_number() {
        let cli = Cli::try_parse_from(["nanopi-load", "-b", "NAND", "a.bin"]).unwrap();
        assert_eq!(cli.boot_method, Some(2));
        let cli = Cli::try_parse_from(["nanopi-load", "-b", "7", "a.bin"]).unwrap();
        assert_eq!(cli.boot_method, Some(7));
        assert!(Cli::try_parse_from(["nanopi-load", "-b", "tape", "a.bin"]).is_err());
    }

    #[test]
    fn dry_run_implies_verbose() {
        let cli = Cli::try_parse_from(["nanopi-load", "-c", "a.bin"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.is_verbose());
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["nanopi-load", "-v"]).is_err());
    }
}
