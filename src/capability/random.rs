//! Random byte primitives backed by the installed provider.

use crate::capability::buffer::BinaryBuffer;
use crate::capability::provider;
use crate::capability::types::{CapabilityError, CapabilityResult};

/// Return `n` random bytes from the process-wide provider.
pub fn secure_random_bytes(n: usize) -> CapabilityResult<BinaryBuffer> {
    let mut buffer = BinaryBuffer::zeroed(n);
    if n > 0 {
        provider().fill_bytes(buffer.as_bytes_mut())?;
    }
    Ok(buffer)
}

/// Fill `buffer[offset..offset + length]` with random bytes.
///
/// The range is checked before any byte is written.
pub fn fill_random(buffer: &mut [u8], offset: usize, length: usize) -> CapabilityResult<()> {
    let size = buffer.len();
    let end = offset
        .checked_add(length)
        .filter(|&end| end <= size)
        .ok_or(CapabilityError::OutOfRange { offset, length, size })?;

    let bytes = secure_random_bytes(length)?;
    buffer[offset..end].copy_from_slice(&bytes);
    Ok(())
}
