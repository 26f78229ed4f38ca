//! Fixed-length binary buffer.

use std::ops::{Deref, DerefMut};

/// A fixed-length byte sequence.
///
/// Contents are mutable, length is not. No text encoding is ever applied;
/// conversions go to and from raw bytes only.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BinaryBuffer(Box<[u8]>);

impl BinaryBuffer {
    /// A buffer of `len` zero bytes.
    pub fn zeroed(len: usize) -> Self {
        Self(vec![0u8; len].into_boxed_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// Copy the contents out.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Consume the buffer, returning its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_vec()
    }
}

impl std::fmt::Debug for BinaryBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Buffers routinely hold salts and keys; print the size only.
        write!(f, "BinaryBuffer({} bytes)", self.0.len())
    }
}

impl From<Vec<u8>> for BinaryBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into_boxed_slice())
    }
}

impl From<&[u8]> for BinaryBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

impl<const N: usize> From<[u8; N]> for BinaryBuffer {
    fn from(bytes: [u8; N]) -> Self {
        Self(Box::new(bytes))
    }
}

impl From<BinaryBuffer> for Vec<u8> {
    fn from(buffer: BinaryBuffer) -> Self {
        buffer.into_vec()
    }
}

impl Deref for BinaryBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for BinaryBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<[u8]> for BinaryBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for BinaryBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_preserve_bytes() {
        let raw = vec![0u8, 1, 254, 255];
        let buffer = BinaryBuffer::from(raw.clone());
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.as_bytes(), &raw[..]);
        assert_eq!(Vec::from(buffer), raw);

        let fixed = BinaryBuffer::from([7u8; 3]);
        assert_eq!(fixed.to_vec(), vec![7, 7, 7]);
    }

    #[test]
    fn test_contents_mutable_length_fixed() {
        let mut buffer = BinaryBuffer::zeroed(4);
        buffer[1] = 9;
        buffer.as_bytes_mut()[3] = 1;
        assert_eq!(buffer.as_bytes(), &[0, 9, 0, 1]);
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_debug_hides_contents() {
        let buffer = BinaryBuffer::from(vec![0xde, 0xad]);
        assert_eq!(format!("{:?}", buffer), "BinaryBuffer(2 bytes)");
    }
}
