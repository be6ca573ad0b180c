//! Fixed-width byte swapping between host and network order.
//!
//! Every multi-byte integer on the viewer wire is big-endian. The `put_*`
//! helpers append a value in network order and the `get_*` helpers read one
//! back, using the swap functions only when the host is little-endian.

/// Reverse the byte order of a 16-bit value.
#[inline]
pub const fn swap16(value: u16) -> u16 {
    ((value & 0x00ff) << 8) | ((value >> 8) & 0x00ff)
}

/// Reverse the byte order of a 32-bit value.
#[inline]
pub const fn swap32(value: u32) -> u32 {
    ((value & 0x0000_00ff) << 24)
        | ((value & 0x0000_ff00) << 8)
        | ((value & 0x00ff_0000) >> 8)
        | ((value >> 24) & 0x0000_00ff)
}

/// Reverse the byte order of a 64-bit value.
///
/// Each 32-bit half is swapped on its own and the halves trade places.
#[inline]
pub const fn swap64(value: u64) -> u64 {
    let high = (value >> 32) as u32;
    let low = value as u32;
    ((swap32(low) as u64) << 32) | (swap32(high) as u64)
}

const LITTLE_ENDIAN_HOST: bool = cfg!(target_endian = "little");

#[inline]
const fn network_u16(value: u16) -> u16 {
    if LITTLE_ENDIAN_HOST { swap16(value) } else { value }
}

#[inline]
const fn network_u32(value: u32) -> u32 {
    if LITTLE_ENDIAN_HOST { swap32(value) } else { value }
}

#[inline]
const fn network_u64(value: u64) -> u64 {
    if LITTLE_ENDIAN_HOST { swap64(value) } else { value }
}

/// Append `value` to `buf` in network order.
pub fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&network_u16(value).to_ne_bytes());
}

/// Append `value` to `buf` in network order.
pub fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&network_u32(value).to_ne_bytes());
}

/// Append `value` to `buf` in network order.
pub fn put_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&network_u64(value).to_ne_bytes());
}

/// Read a network-order value. The conversion is its own inverse.
pub fn get_u16(bytes: [u8; 2]) -> u16 {
    network_u16(u16::from_ne_bytes(bytes))
}

/// Read a network-order 32-bit value.
pub fn get_u32(bytes: [u8; 4]) -> u32 {
    network_u32(u32::from_ne_bytes(bytes))
}

/// Read a network-order 64-bit value.
pub fn get_u64(bytes: [u8; 8]) -> u64 {
    network_u64(u64::from_ne_bytes(bytes))
}
