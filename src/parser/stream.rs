use crate::error::{Result, VoltcraftError};
use crate::parser::helpers::decode_field;

/// Forward-only cursor over an in-memory data file
pub struct DataStream<'a> {
    data: &'a [u8],
    pub pos: usize,
    end: usize,
}

impl<'a> DataStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            end: data.len(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Look at the next `len` bytes without consuming them
    pub fn peek(&self, len: usize) -> Option<&'a [u8]> {
        self.data.get(self.pos..self.pos.checked_add(len)?)
    }

    /// True when the next `len` bytes are present and decode to `value`
    pub fn peek_matches(&self, len: usize, value: u64) -> bool {
        self.peek(len)
            .map(|bytes| decode_field(bytes) == value)
            .unwrap_or(false)
    }

    /// Consume exactly `len` bytes, failing without moving if fewer remain
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        match self.peek(len) {
            Some(bytes) => {
                self.pos += len;
                Ok(bytes)
            }
            None => Err(VoltcraftError::format(format!(
                "unexpected end of data at offset {}: needed {} bytes, {} remaining",
                self.pos,
                len,
                self.remaining()
            ))),
        }
    }

    /// Consume a fixed-size field
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }
}
