use core::fmt;

/// Packed bit sequence, low bit first within each byte.
///
/// Bit `i` lives at bit `i % 8` of byte `i / 8`. Bits beyond `len` in the
/// final byte are always zero, so equality on the packed form is equality
/// on the logical bits.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bits {
    bytes: Vec<u8>,
    len: usize,
}

impl Bits {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence of `len` zero bits.
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len.div_ceil(8)],
            len,
        }
    }

    /// Packs a slice of booleans.
    pub fn from_bools(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }

    /// Wraps already packed bytes.
    ///
    /// Returns `None` when the byte count does not match `len` or when any
    /// bit above `len` is set.
    pub fn from_packed(bytes: Vec<u8>, len: usize) -> Option<Self> {
        if bytes.len() != len.div_ceil(8) {
            return None;
        }
        let bits = Self { bytes, len };
        if bits.has_dirty_padding() {
            return None;
        }
        Some(bits)
    }

    /// Number of logical bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no bits are held.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads bit `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (index % 8)) != 0)
    }

    /// Overwrites bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn set(&mut self, index: usize, bit: bool) {
        assert!(index < self.len, "bit index {index} out of range {}", self.len);
        let mask = 1u8 << (index % 8);
        if bit {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Appends a bit.
    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        self.len += 1;
        self.set(self.len - 1, bit);
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    /// Iterates over the logical bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |index| self.bytes[index / 8] & (1 << (index % 8)) != 0)
    }

    /// Packed bytes without any length marker.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Packed bytes, padding bits zero.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Unpacks into one `bool` per bit.
    pub fn to_bools(&self) -> Vec<bool> {
        self.iter().collect()
    }

    fn has_dirty_padding(&self) -> bool {
        let used = self.len % 8;
        match self.bytes.last() {
            Some(last) if used != 0 => last >> used != 0,
            _ => false,
        }
    }
}

impl FromIterator<bool> for Bits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = Bits::new();
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits(")?;
        for bit in self.iter() {
            write!(f, "{}", bit as u8)?;
        }
        write!(f, ")")
    }
}
