/// A trait for argument values that can be packed into the binary log format.
///
/// Fixed-width values are written as their exact little-endian byte
/// representation, with no type tag and no padding. Variable-width values
/// (strings, byte slices) are self-delimiting: a little-endian `u16` length
/// prefix followed by the raw bytes. Decoding is schema-driven: a reader
/// learns the argument count and kinds per slot from the index file, not
/// from tags in the log file.
pub trait Packable {
    /// Serializes self into the given buffer, returns number of bytes written.
    ///
    /// Panics if `buf` is too short for the packed value; size the buffer
    /// with [`Packable::packed_len`] first.
    fn pack(&self, buf: &mut [u8]) -> usize;

    /// Number of bytes [`Packable::pack`] will write for this value.
    fn packed_len(&self) -> usize;
}

macro_rules! impl_packable_le {
    ($($ty:ty),* $(,)?) => {$(
        impl Packable for $ty {
            #[inline]
            fn pack(&self, buf: &mut [u8]) -> usize {
                let bytes = self.to_le_bytes();
                buf[..bytes.len()].copy_from_slice(&bytes);
                bytes.len()
            }

            #[inline]
            fn packed_len(&self) -> usize {
                std::mem::size_of::<$ty>()
            }
        }
    )*};
}

impl_packable_le!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

// Pointer-width integers are pinned to 8 bytes so the wire format does not
// depend on the host.
impl Packable for usize {
    #[inline]
    fn pack(&self, buf: &mut [u8]) -> usize {
        (*self as u64).pack(buf)
    }

    #[inline]
    fn packed_len(&self) -> usize {
        8
    }
}

impl Packable for isize {
    #[inline]
    fn pack(&self, buf: &mut [u8]) -> usize {
        (*self as i64).pack(buf)
    }

    #[inline]
    fn packed_len(&self) -> usize {
        8
    }
}

impl Packable for bool {
    #[inline]
    fn pack(&self, buf: &mut [u8]) -> usize {
        buf[0] = *self as u8;
        1
    }

    #[inline]
    fn packed_len(&self) -> usize {
        1
    }
}

impl Packable for char {
    #[inline]
    fn pack(&self, buf: &mut [u8]) -> usize {
        (*self as u32).pack(buf)
    }

    #[inline]
    fn packed_len(&self) -> usize {
        4
    }
}

impl Packable for &str {
    fn pack(&self, buf: &mut [u8]) -> usize {
        pack_bytes(self.as_bytes(), buf)
    }

    fn packed_len(&self) -> usize {
        2 + self.len()
    }
}

impl Packable for String {
    fn pack(&self, buf: &mut [u8]) -> usize {
        pack_bytes(self.as_bytes(), buf)
    }

    fn packed_len(&self) -> usize {
        2 + self.len()
    }
}

impl Packable for &[u8] {
    fn pack(&self, buf: &mut [u8]) -> usize {
        pack_bytes(self, buf)
    }

    fn packed_len(&self) -> usize {
        2 + self.len()
    }
}

fn pack_bytes(bytes: &[u8], buf: &mut [u8]) -> usize {
    let len = u16::try_from(bytes.len()).expect("packed value larger than 64 KiB");
    buf[0..2].copy_from_slice(&len.to_le_bytes());
    buf[2..2 + bytes.len()].copy_from_slice(bytes);
    2 + bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_packing() {
        let mut buf = [0u8; 32];

        let len = 12345i32.pack(&mut buf);
        assert_eq!(len, 4);
        assert_eq!(&buf[..4], &12345i32.to_le_bytes());

        let len = 3.14159f64.pack(&mut buf);
        assert_eq!(len, 8);
        assert_eq!(&buf[..8], &3.14159f64.to_le_bytes());
    }

    #[test]
    fn test_pointer_width_is_fixed() {
        let mut buf = [0u8; 32];
        let len = 7usize.pack(&mut buf);
        assert_eq!(len, 8);
        assert_eq!(&buf[..8], &7u64.to_le_bytes());
    }

    #[test]
    fn test_string_packing() {
        let mut buf = [0u8; 32];
        let len = "Hello".pack(&mut buf);
        assert_eq!(len, 7); // 2 bytes length + 5 bytes for "Hello"
        assert_eq!(&buf[0..2], &5u16.to_le_bytes());
        assert_eq!(&buf[2..7], b"Hello");
    }

    #[test]
    fn test_empty_string_packing() {
        let mut buf = [0u8; 8];
        let len = "".pack(&mut buf);
        assert_eq!(len, 2);
        assert_eq!(&buf[0..2], &[0, 0]);
    }

    #[test]
    fn test_bool_packing() {
        let mut buf = [0u8; 4];
        assert_eq!(true.pack(&mut buf), 1);
        assert_eq!(buf[0], 1);
        assert_eq!(false.pack(&mut buf), 1);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn test_packed_len_matches_pack() {
        let mut buf = [0u8; 64];
        assert_eq!(42i32.packed_len(), 42i32.pack(&mut buf));
        assert_eq!(1.5f64.packed_len(), 1.5f64.pack(&mut buf));
        assert_eq!(7usize.packed_len(), 7usize.pack(&mut buf));
        assert_eq!(true.packed_len(), true.pack(&mut buf));
        assert_eq!('x'.packed_len(), 'x'.pack(&mut buf));
        assert_eq!("Hello".packed_len(), "Hello".pack(&mut buf));
    }

    #[test]
    fn test_char_packing() {
        let mut buf = [0u8; 4];
        let len = '界'.pack(&mut buf);
        assert_eq!(len, 4);
        assert_eq!(&buf[..4], &('界' as u32).to_le_bytes());
    }
}
