//! `nanopi-load`: put a Boot Header on a boot loader image and send it to
//! an S5P6818 (`NanoPi` M3 and friends) waiting in iROM USB boot mode.

mod cli;
mod error;
mod input;
mod logger;
mod sink;
#[cfg(feature = "usb")]
mod usb;

use clap::Parser;
use cli::Cli;
use error::LoadError;
use input::Image;
use log::{LevelFilter, error, warn};
use nsih::{BootHeader, Severity};
use sink::{FileSink, OutputSink};
use std::fmt;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.is_verbose() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = logger::StderrLogger::new(level).init() {
        eprintln!("logger: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), LoadError> {
    let header_offset = if cli.load_addr.is_some() {
        cli.variant().header_size()
    } else {
        0
    };
    let mut image = input::read_image(&cli.input, header_offset, cli.in_place)?;

    match cli.load_addr {
        Some(load_addr) => add_header(cli, &mut image, load_addr)?,
        None => check_header(cli, &mut image)?,
    }

    if cli.dry_run {
        return Ok(());
    }

    let mut sink = open_sink(cli)?;
    sink.deliver(&image.bytes)?;
    Ok(())
}

fn add_header(cli: &Cli, image: &mut Image, load_addr: u32) -> Result<(), LoadError> {
    let variant = cli.variant();
    let size = u32::try_from(image.payload_size())
        .map_err(|_| LoadError::ImageTooLarge(image.payload_size()))?;

    // header sizes are 512 or 1024
    #[allow(clippy::cast_possible_truncation)]
    let default_launch = load_addr.wrapping_add(image.header_offset as u32);
    let launch_addr = cli.start_addr.unwrap_or(default_launch);

    let mut header = BootHeader::new(size, load_addr, launch_addr);
    header.boot_method = cli.boot_method;
    nsih::encode(&mut image.bytes, variant, &header, cli.arm64);

    if cli.is_verbose() {
        summary(
            cli,
            format_args!(
                "{} Boot Header: load={load_addr:#x}, launch={launch_addr:#x} size={size}{}",
                if cli.in_place { "Embedded" } else { "Added" },
                if cli.arm64 { " 64-bit" } else { "" }
            ),
        );
    }
    Ok(())
}

fn check_header(cli: &Cli, image: &mut Image) -> Result<(), LoadError> {
    let read_size = u32::try_from(image.bytes.len())
        .map_err(|_| LoadError::ImageTooLarge(image.bytes.len()))?;

    match nsih::validate(
        &mut image.bytes,
        read_size,
        cli.variant(),
        cli.fix_size,
        cli.boot_method,
    ) {
        Ok(report) => {
            if cli.is_verbose() {
                summary(cli, format_args!("{report}"));
            } else if !report.size_matches() && !report.size_fixed {
                warn!(
                    "wrong load size in header: {}, real: {}",
                    report.declared_size, report.actual_size
                );
            }
            Ok(())
        }
        Err(e) => match e.severity(cli.fix_size) {
            Severity::Error => Err(e.into()),
            Severity::Warning => {
                warn!("{e}");
                Ok(())
            }
        },
    }
}

/// Print a human-readable summary; goes to stderr when stdout carries the image.
fn summary(cli: &Cli, text: fmt::Arguments<'_>) {
    if cli.output.as_deref() == Some(Path::new("-")) {
        eprintln!("{text}");
    } else {
        println!("{text}");
    }
}

fn open_sink(cli: &Cli) -> Result<Box<dyn OutputSink>, LoadError> {
    if let Some(path) = &cli.output {
        return Ok(Box::new(FileSink::new(path)));
    }
    usb_sink()
}

#[cfg(feature = "usb")]
fn usb_sink() -> Result<Box<dyn OutputSink>, LoadError> {
    let transport = usb::UsbTransport::open()?;
    Ok(Box::new(sink::TransportSink::new(transport)))
}

#[cfg(not(feature = "usb"))]
fn usb_sink() -> Result<Box<dyn OutputSink>, LoadError> {
    Err(LoadError::UsbUnsupported)
}
