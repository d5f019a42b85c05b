//! Primitive Codec
//!
//! Bounds-checked big-endian integer reads and writes over a byte buffer
//! with an explicit cursor. Every operation takes the current offset and
//! returns the advanced one, so callers thread the cursor through a chain
//! of calls with `?`.
//!
//! A failed bounds check reports [`DnsError::Overflow`] carrying the buffer
//! length and leaves the buffer untouched.

use super::error::{DnsError, DnsResult};

/// Ensure `width` bytes starting at `offset` lie inside a buffer of `len` bytes
fn check_bounds(len: usize, offset: usize, width: usize) -> DnsResult<()> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(()),
        _ => Err(DnsError::Overflow { boundary: len }),
    }
}

fn read_array<const N: usize>(buf: &[u8], offset: usize) -> DnsResult<([u8; N], usize)> {
    check_bounds(buf.len(), offset, N)?;
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&buf[offset..offset + N]);
    Ok((bytes, offset + N))
}

fn write_array<const N: usize>(bytes: [u8; N], buf: &mut [u8], offset: usize) -> DnsResult<usize> {
    check_bounds(buf.len(), offset, N)?;
    buf[offset..offset + N].copy_from_slice(&bytes);
    Ok(offset + N)
}

// =============================================================================
// DECODING
// =============================================================================

pub fn decode_u8(buf: &[u8], offset: usize) -> DnsResult<(u8, usize)> {
    let (bytes, offset) = read_array::<1>(buf, offset)?;
    Ok((bytes[0], offset))
}

pub fn decode_u16(buf: &[u8], offset: usize) -> DnsResult<(u16, usize)> {
    let (bytes, offset) = read_array::<2>(buf, offset)?;
    Ok((u16::from_be_bytes(bytes), offset))
}

pub fn decode_u32(buf: &[u8], offset: usize) -> DnsResult<(u32, usize)> {
    let (bytes, offset) = read_array::<4>(buf, offset)?;
    Ok((u32::from_be_bytes(bytes), offset))
}

pub fn decode_u64(buf: &[u8], offset: usize) -> DnsResult<(u64, usize)> {
    let (bytes, offset) = read_array::<8>(buf, offset)?;
    Ok((u64::from_be_bytes(bytes), offset))
}

/// Borrow `len` raw bytes starting at `offset`
pub fn decode_bytes(buf: &[u8], offset: usize, len: usize) -> DnsResult<(&[u8], usize)> {
    check_bounds(buf.len(), offset, len)?;
    Ok((&buf[offset..offset + len], offset + len))
}

// =============================================================================
// ENCODING
// =============================================================================

pub fn encode_u8(value: u8, buf: &mut [u8], offset: usize) -> DnsResult<usize> {
    write_array([value], buf, offset)
}

pub fn encode_u16(value: u16, buf: &mut [u8], offset: usize) -> DnsResult<usize> {
    write_array(value.to_be_bytes(), buf, offset)
}

pub fn encode_u32(value: u32, buf: &mut [u8], offset: usize) -> DnsResult<usize> {
    write_array(value.to_be_bytes(), buf, offset)
}

pub fn encode_u64(value: u64, buf: &mut [u8], offset: usize) -> DnsResult<usize> {
    write_array(value.to_be_bytes(), buf, offset)
}

/// Copy `bytes` verbatim into the buffer at `offset`
pub fn encode_bytes(bytes: &[u8], buf: &mut [u8], offset: usize) -> DnsResult<usize> {
    check_bounds(buf.len(), offset, bytes.len())?;
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    Ok(offset + bytes.len())
}
