use core::ops::Range;

use super::error::{OffsetIssue, SszError, SszResult};
use crate::schema::{TypeKind, BYTES_PER_LENGTH_OFFSET};

/// Converts a relative position into a four-byte offset.
pub fn ensure_offset(offset: usize) -> SszResult<u32> {
    u32::try_from(offset).map_err(|_| SszError::OffsetOverflow { offset })
}

/// Reserves an offset slot and returns its position for later patching.
pub fn reserve_offset(out: &mut Vec<u8>) -> usize {
    let at = out.len();
    out.extend_from_slice(&[0u8; BYTES_PER_LENGTH_OFFSET]);
    at
}

/// Fills a slot previously returned by [`reserve_offset`].
pub fn patch_offset(out: &mut [u8], at: usize, offset: usize) -> SszResult<()> {
    let value = ensure_offset(offset)?;
    out[at..at + BYTES_PER_LENGTH_OFFSET].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

/// Validates an offset table and returns the byte range of each variable part.
///
/// `fixed_len` is where the variable part must start and `end` is the total
/// length of the enclosing encoding. Offsets must start exactly at
/// `fixed_len`, never decrease, and never point past `end`; the last part
/// runs to `end`. Any irregularity rejects the whole table.
pub fn variable_ranges(
    offsets: &[usize],
    fixed_len: usize,
    end: usize,
    kind: TypeKind,
) -> SszResult<Vec<Range<usize>>> {
    let Some(&first) = offsets.first() else {
        return Ok(Vec::new());
    };
    if first != fixed_len {
        return Err(SszError::malformed_offsets(
            kind,
            OffsetIssue::FirstOffsetMismatch {
                expected: fixed_len,
                got: first,
            },
        ));
    }

    let mut previous = first;
    for (index, &offset) in offsets.iter().enumerate() {
        if offset > end {
            return Err(SszError::malformed_offsets(
                kind,
                OffsetIssue::OutOfRange { index, offset, end },
            ));
        }
        if offset < previous {
            return Err(SszError::malformed_offsets(
                kind,
                OffsetIssue::Decreasing {
                    index,
                    previous,
                    offset,
                },
            ));
        }
        previous = offset;
    }

    let ranges = offsets
        .iter()
        .enumerate()
        .map(|(index, &start)| {
            let stop = offsets.get(index + 1).copied().unwrap_or(end);
            start..stop
        })
        .collect();
    Ok(ranges)
}
