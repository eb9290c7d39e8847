//! Layout queries derived purely from a descriptor.
//!
//! Every component of the engine asks the same two questions first: is the
//! shape fixed-size, and if so how many bytes does it occupy. Merkleization
//! additionally needs the leaf capacity of a shape ([`TypeDescriptor::chunk_count`]).

use super::types::TypeDescriptor;

/// Width of a single offset entry in a variable-size layout.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;

/// Width of a Merkle leaf.
pub const BYTES_PER_CHUNK: usize = 32;

/// Number of bits packed into one Merkle leaf.
pub const BITS_PER_CHUNK: usize = BYTES_PER_CHUNK * 8;

impl TypeDescriptor {
    /// Returns `true` when every conforming value has the same encoded length.
    pub fn is_fixed_size(&self) -> bool {
        match self {
            TypeDescriptor::Basic(_) | TypeDescriptor::Bitvector { .. } => true,
            TypeDescriptor::Vector { elem, .. } => elem.is_fixed_size(),
            TypeDescriptor::List { .. } | TypeDescriptor::Bitlist { .. } => false,
            TypeDescriptor::Container { fields, .. } => {
                fields.iter().all(|field| field.ty.is_fixed_size())
            }
        }
    }

    /// Encoded length shared by all values of a fixed-size shape.
    ///
    /// Returns `None` for variable-size shapes. Lengths saturate at
    /// `usize::MAX` for absurd schemas rather than wrapping.
    pub fn fixed_byte_length(&self) -> Option<usize> {
        match self {
            TypeDescriptor::Basic(kind) => Some(kind.byte_len()),
            TypeDescriptor::Bitvector { length } => Some(length.div_ceil(8)),
            TypeDescriptor::Vector { elem, length } => elem
                .fixed_byte_length()
                .map(|size| size.saturating_mul(*length)),
            TypeDescriptor::List { .. } | TypeDescriptor::Bitlist { .. } => None,
            TypeDescriptor::Container { fields, .. } => {
                fields.iter().try_fold(0usize, |acc, field| {
                    field
                        .ty
                        .fixed_byte_length()
                        .map(|size| acc.saturating_add(size))
                })
            }
        }
    }

    /// Size of the fixed part of a container layout: fixed fields contribute
    /// their own length, variable fields contribute one offset each.
    pub fn fixed_part_length(&self) -> usize {
        self.fields().iter().fold(0usize, |acc, field| {
            let width = field
                .ty
                .fixed_byte_length()
                .unwrap_or(BYTES_PER_LENGTH_OFFSET);
            acc.saturating_add(width)
        })
    }

    /// Smallest valid encoding length for the shape.
    pub fn min_byte_length(&self) -> usize {
        match self {
            TypeDescriptor::Basic(kind) => kind.byte_len(),
            TypeDescriptor::Bitvector { length } => length.div_ceil(8),
            TypeDescriptor::Bitlist { .. } => 1,
            TypeDescriptor::List { .. } => 0,
            TypeDescriptor::Vector { elem, length } => match elem.fixed_byte_length() {
                Some(size) => size.saturating_mul(*length),
                None => elem
                    .min_byte_length()
                    .saturating_add(BYTES_PER_LENGTH_OFFSET)
                    .saturating_mul(*length),
            },
            TypeDescriptor::Container { fields, .. } => {
                fields.iter().fold(0usize, |acc, field| {
                    let width = match field.ty.fixed_byte_length() {
                        Some(size) => size,
                        None => field
                            .ty
                            .min_byte_length()
                            .saturating_add(BYTES_PER_LENGTH_OFFSET),
                    };
                    acc.saturating_add(width)
                })
            }
        }
    }

    /// Largest valid encoding length, or `None` when it exceeds `usize`.
    pub fn max_byte_length(&self) -> Option<usize> {
        match self {
            TypeDescriptor::Basic(kind) => Some(kind.byte_len()),
            TypeDescriptor::Bitvector { length } => Some(length.div_ceil(8)),
            TypeDescriptor::Bitlist { limit } => Some(limit / 8 + 1),
            TypeDescriptor::Vector { elem, length } => {
                let per_elem = match elem.fixed_byte_length() {
                    Some(size) => size,
                    None => elem.max_byte_length()?.checked_add(BYTES_PER_LENGTH_OFFSET)?,
                };
                per_elem.checked_mul(*length)
            }
            TypeDescriptor::List { elem, limit } => {
                let per_elem = match elem.fixed_byte_length() {
                    Some(size) => size,
                    None => elem.max_byte_length()?.checked_add(BYTES_PER_LENGTH_OFFSET)?,
                };
                per_elem.checked_mul(*limit)
            }
            TypeDescriptor::Container { fields, .. } => {
                fields.iter().try_fold(0usize, |acc, field| {
                    let width = match field.ty.fixed_byte_length() {
                        Some(size) => size,
                        None => field
                            .ty
                            .max_byte_length()?
                            .checked_add(BYTES_PER_LENGTH_OFFSET)?,
                    };
                    acc.checked_add(width)
                })
            }
        }
    }

    /// Maximum number of Merkle leaves the shape's tree is sized for.
    ///
    /// Lists and bitlists are sized by their declared capacity, never by the
    /// length of a particular value. Computed in `u128` so that limits close
    /// to `usize::MAX` do not overflow.
    pub fn chunk_count(&self) -> u128 {
        let chunk = BYTES_PER_CHUNK as u128;
        match self {
            TypeDescriptor::Basic(_) => 1,
            TypeDescriptor::Bitvector { length } => (*length as u128).div_ceil(BITS_PER_CHUNK as u128),
            TypeDescriptor::Bitlist { limit } => (*limit as u128).div_ceil(BITS_PER_CHUNK as u128),
            TypeDescriptor::Vector { elem, length: count }
            | TypeDescriptor::List { elem, limit: count } => match elem.as_basic() {
                Some(kind) => (*count as u128 * kind.byte_len() as u128).div_ceil(chunk),
                None => *count as u128,
            },
            TypeDescriptor::Container { fields, .. } => fields.len() as u128,
        }
    }

    /// Number of descriptor levels below and including this one.
    pub fn nesting_depth(&self) -> usize {
        match self {
            TypeDescriptor::Basic(_)
            | TypeDescriptor::Bitvector { .. }
            | TypeDescriptor::Bitlist { .. } => 1,
            TypeDescriptor::Vector { elem, .. } | TypeDescriptor::List { elem, .. } => {
                1 + elem.nesting_depth()
            }
            TypeDescriptor::Container { fields, .. } => {
                1 + fields
                    .iter()
                    .map(|field| field.ty.nesting_depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}
