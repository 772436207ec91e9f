//! Battery-backed SRAM window.
//!
//! Registers 0x08-0x3F are 56 bytes of general purpose RAM retained on the
//! backup supply. The driver passes bytes through untouched; this module only
//! bounds-checks accesses so nothing outside the window is ever addressed.

/// First SRAM register address.
pub const SRAM_START: u8 = 0x08;

/// One past the last SRAM register address.
pub const SRAM_END: u8 = 0x40;

/// Size of the SRAM window in bytes.
pub const SRAM_SIZE: usize = (SRAM_END - SRAM_START) as usize;

/// The requested access does not fit inside 0x08-0x3F.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange;

/// Checks that `len` bytes starting at register `address` lie within the
/// SRAM window.
pub(crate) fn check_window(address: u8, len: usize) -> Result<(), OutOfRange> {
    if !(SRAM_START..SRAM_END).contains(&address) {
        return Err(OutOfRange);
    }
    if len > usize::from(SRAM_END - address) {
        return Err(OutOfRange);
    }
    Ok(())
}

/// Builds the `[address, data...]` frame for a single SRAM write.
///
/// Returns the frame buffer and the number of valid bytes in it.
pub(crate) fn write_frame(
    address: u8,
    data: &[u8],
) -> Result<([u8; SRAM_SIZE + 1], usize), OutOfRange> {
    check_window(address, data.len())?;
    let mut frame = [0u8; SRAM_SIZE + 1];
    frame[0] = address;
    frame[1..=data.len()].copy_from_slice(data);
    Ok((frame, data.len() + 1))
}
