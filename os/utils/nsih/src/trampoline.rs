//! 32-bit ARM stub that restarts the Cortex-A53 cluster in 64-bit state.
//!
//! The iROM always enters the loaded image in 32-bit mode. The stub
//! programs the reset vector base of the cores, raises the 64-bit reset
//! request and halts; the cores come back up at the real launch address.

use crate::bytes::write_u32_le;
use log::debug;

/// The fixed part of the stub. The word after it holds `launch_addr >> 2`.
pub const ARM64_SWITCH: [u32; 15] = [
    0xE59F_0030, // ldr r0, =0xc0011000
    0xE590_113C, // ldr r1, [r0, #0x13c]
    0xE381_1A0F, // orr r1, r1, #0xf000
    0xE580_113C, // str r1, [r0, #0x13c]
    0xE59F_1024, // ldr r1, =launch_addr >> 2
    0xE580_1140, // str r1, [r0, #0x140]
    0xE510_1D54, // ldr r1, [r0, #-0xd54]
    0xE381_1001, // orr r1, r1, #1
    0xE500_1D54, // str r1, [r0, #-0xd54]
    0xE590_1138, // ldr r1, [r0, #0x138]
    0xE381_160F, // orr r1, r1, #0xf00000
    0xE580_1138, // str r1, [r0, #0x138]
    0xE320_F003, // wfi
    0xEAFF_FFFE, // b .
    0xC001_1000, // literal: system control base
];

/// Bytes occupied by the stub including the launch address word.
pub const TRAMPOLINE_LEN: usize = (ARM64_SWITCH.len() + 1) * 4;

/// Write the stub to the start of `buf`.
///
/// Returns the address the header must launch instead of `launch_addr`:
/// the stub itself, which sits at `load_addr`.
///
/// # Panics
/// Panics if `buf` is shorter than [`TRAMPOLINE_LEN`].
pub fn inject_trampoline(buf: &mut [u8], load_addr: u32, launch_addr: u32) -> u32 {
    for (i, &word) in ARM64_SWITCH.iter().enumerate() {
        write_u32_le(buf, i * 4, word);
    }
    write_u32_le(buf, ARM64_SWITCH.len() * 4, launch_addr >> 2);
    debug!("injected 64-bit switch, reset vector {launch_addr:#x}");
    load_addr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::read_u32_le;

    #[test]
    fn writes_stub_and_reset_vector() {
        let mut buf = [0xAAu8; 80];
        let launch = inject_trampoline(&mut buf, 0x4000_0000, 0x4000_0400);

        assert_eq!(launch, 0x4000_0000);
        for (i, &word) in ARM64_SWITCH.iter().enumerate() {
            assert_eq!(read_u32_le(&buf, i * 4), word);
        }
        assert_eq!(read_u32_le(&buf, 60), 0x1000_0100);
        assert_eq!(&buf[TRAMPOLINE_LEN..], &[0xAA; 16]);
    }
}
