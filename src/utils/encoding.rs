use crate::error::{Error, Result};
use std::io::{self, Read, Write};

/// Maximum bytes a u32 varint can occupy
pub const MAX_VARINT_BYTES: usize = 5;

/// Encode a u32 as a variable-length integer
pub fn encode_varint(mut value: u32, buf: &mut Vec<u8>) {
    loop {
        if value < 0x80 {
            buf.push(value as u8);
            break;
        }
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
}

/// Decode a variable-length integer from a slice
/// Returns (value, bytes_consumed), or `None` if the slice ends mid-varint
/// or the value does not fit in 32 bits
pub fn decode_varint(buf: &[u8]) -> Option<(u32, usize)> {
    let mut result: u32 = 0;
    let mut shift = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if shift >= 32 {
            return None; // Overflow
        }

        let bits = (byte & 0x7F) as u32;
        if shift == 28 && bits > 0x0F {
            return None;
        }
        result |= bits << shift;

        if byte & 0x80 == 0 {
            return Some((result, i + 1));
        }

        shift += 7;
    }

    None // Incomplete
}

/// Sequential reader over an encoded buffer.
///
/// Every read names the field being read so a short buffer reports where it
/// ended.
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn read_u32_le(&mut self, field: &'static str) -> Result<u32> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + 4)
            .ok_or(Error::Truncated(field))?;
        self.pos += 4;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_varint(&mut self, field: &'static str) -> Result<u32> {
        let rest = &self.buf[self.pos..];
        match decode_varint(rest) {
            Some((value, consumed)) => {
                self.pos += consumed;
                Ok(value)
            }
            // A complete but oversized varint is corruption, a cut-off one is truncation
            None if rest.len() >= MAX_VARINT_BYTES
                || rest.iter().any(|&b| b & 0x80 == 0) =>
            {
                Err(Error::VarintOverflow)
            }
            None => Err(Error::Truncated(field)),
        }
    }
}

/// Write a u32 in little-endian format
pub fn write_u32_le<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read a u32 in little-endian format
pub fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Write a u64 in little-endian format
pub fn write_u64_le<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read a u64 in little-endian format
pub fn read_u64_le<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
