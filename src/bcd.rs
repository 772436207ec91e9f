//! Binary-coded decimal helpers.
//!
//! Every time and date register on the DS1307 stores its value as two
//! decimal digits, the tens digit in the upper nibble and the units digit in
//! the lower nibble. These two functions are the only place that packing is
//! done; the register types and the datetime conversion both go through
//! them.

/// Encodes a value in `0..=99` as a BCD byte.
///
/// Values above 99 do not fit in two digits; callers validate their ranges
/// before encoding.
pub const fn encode(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decodes a BCD byte.
///
/// Defined for all 256 inputs. A byte whose nibbles are not decimal digits
/// still produces a number (e.g. `0x1A` decodes to 20), so range-sensitive
/// callers must check [`is_valid`] as well.
pub const fn decode(bcd: u8) -> u8 {
    ((bcd >> 4) & 0x0F) * 10 + (bcd & 0x0F)
}

/// Returns true when both nibbles of `bcd` are decimal digits.
pub const fn is_valid(bcd: u8) -> bool {
    (bcd >> 4) <= 9 && (bcd & 0x0F) <= 9
}

/// Decodes `bcd` and checks the result is within `min..=max`.
pub(crate) fn decode_checked(bcd: u8, min: u8, max: u8) -> Option<u8> {
    if !is_valid(bcd) {
        return None;
    }
    let value = decode(bcd);
    (min..=max).contains(&value).then_some(value)
}
