//! Bulk transport to the S5P6818 iROM USB boot device.

use crate::error::LoadError;
use crate::sink::Transport;
use log::{debug, warn};
use rusb::{DeviceHandle, GlobalContext};
use std::time::Duration;

pub const S5P6818_VID: u16 = 0x04e8;
pub const S5P6818_PID: u16 = 0x1234;
pub const S5P6818_INTERFACE: u8 = 0;
pub const S5P6818_EP_OUT: u8 = 0x02;

/// Claimed handle on the boot device; the interface is released on drop.
pub struct UsbTransport {
    handle: DeviceHandle<GlobalContext>,
}

impl UsbTransport {
    pub fn open() -> Result<Self, LoadError> {
        let mut handle = rusb::open_device_with_vid_pid(S5P6818_VID, S5P6818_PID)
            .ok_or(LoadError::DeviceNotFound)?;
        handle.claim_interface(S5P6818_INTERFACE)?;
        debug!("claimed interface {S5P6818_INTERFACE} of {S5P6818_VID:04x}:{S5P6818_PID:04x}");
        Ok(Self { handle })
    }
}

impl Transport for UsbTransport {
    fn bulk_write(&mut self, data: &[u8]) -> Result<usize, LoadError> {
        // zero timeout waits for the iROM as long as it takes
        Ok(self.handle.write_bulk(S5P6818_EP_OUT, data, Duration::ZERO)?)
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(S5P6818_INTERFACE) {
            warn!("release interface: {e}");
        }
    }
}
