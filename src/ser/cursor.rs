use super::error::{SszError, SszResult};
use crate::schema::TypeKind;

/// Cursor over the fixed part of an encoding, reporting truncation with the
/// shape being decoded.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    /// Starts reading at the first byte of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Borrows the next `len` bytes, or reports how many were missing.
    pub fn read_exact(&mut self, len: usize, kind: TypeKind) -> SszResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(SszError::truncated(kind, len, self.remaining()));
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.bytes[start..start + len])
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self, kind: TypeKind) -> SszResult<[u8; N]> {
        let bytes = self.read_exact(N, kind)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a little-endian offset slot.
    pub fn read_offset(&mut self, kind: TypeKind) -> SszResult<usize> {
        let bytes = self.read_array::<4>(kind)?;
        Ok(u32::from_le_bytes(bytes) as usize)
    }
}

impl<'a> From<&'a [u8]> for ByteReader<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteReader::new(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BasicKind;

    #[test]
    fn read_past_end_reports_truncation() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteReader::new(&data);
        assert_eq!(cursor.read_exact(2, TypeKind::Container).unwrap(), &[1, 2]);
        let err = cursor
            .read_array::<4>(TypeKind::Basic(BasicKind::U32))
            .unwrap_err();
        assert_eq!(
            err,
            SszError::truncated(TypeKind::Basic(BasicKind::U32), 4, 1)
        );
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn offsets_are_little_endian() {
        let data = [0x0c, 0x00, 0x00, 0x00];
        let mut cursor = ByteReader::from(&data[..]);
        assert_eq!(cursor.read_offset(TypeKind::Container).unwrap(), 12);
        assert_eq!(cursor.remaining(), 0);
    }
}
