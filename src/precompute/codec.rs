//! Binary format of a collocation index.
//!
//! ```text
//! magic "COLX"        u32 LE
//! version             u32 LE
//! FIRST_NONTERMINAL   u32 LE
//! SECOND_NONTERMINAL  u32 LE
//! entry count         varint
//! per entry:
//!   template length   varint
//!   template tokens   varint each
//!   record count      varint
//!   record positions  varint each, arity per record
//! ```

use super::index::CollocationIndex;
use super::types::{template_arity, Occurrence, FIRST_NONTERMINAL, SECOND_NONTERMINAL};
use crate::corpus::Position;
use crate::error::{Error, Result};
use crate::utils::{encode_varint, ByteCursor};

pub const MAGIC: u32 = 0x584C4F43; // "COLX" in little-endian
pub const VERSION: u32 = 1;
pub const HEADER_SIZE: usize = 16;

/// Serialize `index` in its iteration order
pub fn encode(index: &CollocationIndex) -> Vec<u8> {
    // Most values fit in one or two varint bytes
    let mut buf = Vec::with_capacity(HEADER_SIZE + index.occurrence_count() * 4 + index.len() * 8);

    buf.extend_from_slice(&MAGIC.to_le_bytes());
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&FIRST_NONTERMINAL.to_le_bytes());
    buf.extend_from_slice(&SECOND_NONTERMINAL.to_le_bytes());

    encode_varint(index.len() as u32, &mut buf);
    for (template, occurrences) in index.iter() {
        encode_varint(template.len() as u32, &mut buf);
        for &token in template {
            encode_varint(token, &mut buf);
        }
        encode_varint(occurrences.len() as u32, &mut buf);
        for occurrence in occurrences {
            for &start in occurrence.starts() {
                encode_varint(start, &mut buf);
            }
        }
    }

    buf
}

/// Deserialize an index written by [`encode`]
///
/// The whole buffer must be consumed. Any malformed input fails without
/// returning a partially filled index.
pub fn decode(bytes: &[u8]) -> Result<CollocationIndex> {
    let mut cursor = ByteCursor::new(bytes);

    let magic = cursor.read_u32_le("magic")?;
    if magic != MAGIC {
        return Err(Error::BadMagic(magic));
    }
    let version = cursor.read_u32_le("version")?;
    if version != VERSION {
        return Err(Error::UnsupportedVersion(version));
    }
    for expected in [FIRST_NONTERMINAL, SECOND_NONTERMINAL] {
        let found = cursor.read_u32_le("nonterminal marker")?;
        if found != expected {
            return Err(Error::MarkerMismatch { expected, found });
        }
    }

    let num_entries = cursor.read_varint("entry count")? as usize;
    let mut index = CollocationIndex::new();

    for _ in 0..num_entries {
        let template_len = cursor.read_varint("template length")? as usize;
        // Each token takes at least one byte
        if template_len > cursor.remaining() {
            return Err(Error::Truncated("template tokens"));
        }
        let template = (0..template_len)
            .map(|_| cursor.read_varint("template token"))
            .collect::<Result<Vec<_>>>()?;
        let arity = template_arity(&template)?;

        let num_records = cursor.read_varint("record count")? as usize;
        if num_records.saturating_mul(arity) > cursor.remaining() {
            return Err(Error::Truncated("occurrence records"));
        }
        let mut occurrences = Vec::with_capacity(num_records);
        let mut starts: [Position; 3] = [0; 3];
        for _ in 0..num_records {
            for start in starts.iter_mut().take(arity) {
                *start = cursor.read_varint("record position")?;
            }
            // Arity is 2 or 3 once the template validated
            let occurrence = Occurrence::from_starts(&starts[..arity])
                .ok_or_else(|| Error::InvalidTemplate(format!("unsupported arity {arity}")))?;
            occurrences.push(occurrence);
        }

        index.insert_entry(template, occurrences)?;
    }

    if cursor.remaining() > 0 {
        return Err(Error::TrailingBytes(cursor.remaining()));
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Token;

    const X: Token = FIRST_NONTERMINAL;
    const Y: Token = SECOND_NONTERMINAL;

    fn sample() -> CollocationIndex {
        let mut index = CollocationIndex::new();
        index.push(&[1, X, 2], Occurrence::Binary([0, 3]));
        index.push(&[300, 7, X, 2, Y, 90_000], Occurrence::Ternary([5, 9, 13]));
        index.push(&[1, X, 2], Occurrence::Binary([200, 1_000_000]));
        index
    }

    #[test]
    fn test_roundtrip() {
        let index = sample();
        let decoded = decode(&encode(&index)).unwrap();
        assert_eq!(decoded, index);

        // Iteration order survives too
        let original: Vec<_> = index.iter().collect();
        let restored: Vec<_> = decoded.iter().collect();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_empty_index() {
        let bytes = encode(&CollocationIndex::new());
        assert_eq!(bytes.len(), HEADER_SIZE + 1);
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode(&CollocationIndex::new());
        assert_eq!(&bytes[0..4], b"COLX");
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &u32::MAX.to_le_bytes());
        assert_eq!(&bytes[12..16], &(u32::MAX - 1).to_le_bytes());
        assert_eq!(bytes[16], 0);
    }

    #[test]
    fn test_every_truncation_fails() {
        let bytes = encode(&sample());
        for len in 0..bytes.len() {
            assert!(decode(&bytes[..len]).is_err(), "prefix of {len} bytes decoded");
        }
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = encode(&sample());
        bytes.push(0);
        assert!(matches!(decode(&bytes), Err(Error::TrailingBytes(1))));
    }

    #[test]
    fn test_bad_header() {
        let mut bytes = encode(&sample());
        bytes[0] = b'X';
        assert!(matches!(decode(&bytes), Err(Error::BadMagic(_))));

        let mut bytes = encode(&sample());
        bytes[4] = 2;
        assert!(matches!(decode(&bytes), Err(Error::UnsupportedVersion(2))));

        let mut bytes = encode(&sample());
        bytes[12..16].copy_from_slice(&7u32.to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(Error::MarkerMismatch { found: 7, .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_template() {
        let mut bytes = encode(&CollocationIndex::new());
        bytes.truncate(HEADER_SIZE);
        // One entry whose template has no marker
        for value in [1, 2, 4, 5, 0] {
            encode_varint(value, &mut bytes);
        }
        assert!(matches!(decode(&bytes), Err(Error::InvalidTemplate(_))));
    }

    #[test]
    fn test_rejects_duplicate_template() {
        let mut index = CollocationIndex::new();
        index.push(&[1, X, 2], Occurrence::Binary([0, 3]));
        let single = encode(&index);

        let mut bytes = single[..HEADER_SIZE].to_vec();
        encode_varint(2, &mut bytes);
        // Repeat the entry body, skipping the one-byte count
        let body = &single[HEADER_SIZE + 1..];
        bytes.extend_from_slice(body);
        bytes.extend_from_slice(body);
        assert!(matches!(decode(&bytes), Err(Error::DuplicateTemplate(_))));
    }

    #[test]
    fn test_huge_record_count_is_truncation() {
        let mut bytes = encode(&CollocationIndex::new());
        bytes.truncate(HEADER_SIZE);
        encode_varint(1, &mut bytes);
        encode_varint(3, &mut bytes);
        for token in [1, X, 2] {
            encode_varint(token, &mut bytes);
        }
        encode_varint(u32::MAX, &mut bytes);
        assert!(matches!(decode(&bytes), Err(Error::Truncated(_))));
    }
}
