use nsih::HeaderError;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unable to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("read: {0}")]
    Read(#[source] io::Error),

    #[error("input file too short")]
    InputTooShort,

    #[error("image payload of {0} bytes does not fit the load size field")]
    ImageTooLarge(usize),

    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error("unable to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[cfg_attr(not(feature = "usb"), allow(dead_code))]
    #[error("failed to open device")]
    DeviceNotFound,

    #[cfg(feature = "usb")]
    #[error("usb: {0}")]
    Usb(#[from] rusb::Error),

    #[error("built without USB support, use -o to write the image instead")]
    UsbUnsupported,
}
