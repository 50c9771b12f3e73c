use crate::error::CodecError;

/// Packs bits most-significant-bit first into a growing byte buffer.
#[derive(Debug)]
pub struct BitWriter {
    os: Vec<u8>,
    pub written_bits: u64,
    current: u64,
    free: usize,
}

impl Default for BitWriter {
    fn default() -> Self {
        BitWriter {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer whose buffer can hold `bits` bits without reallocating.
    pub fn with_capacity(bits: usize) -> Self {
        BitWriter {
            os: Vec::with_capacity((bits + 7) / 8),
            ..Self::default()
        }
    }

    /// Flushes the partially filled byte (its low-order bits stay zero) and
    /// returns the packed bytes together with the number of meaningful bits.
    pub fn build(mut self) -> (Vec<u8>, u64) {
        if self.free != 8 {
            self.write(self.current);
        }

        (self.os, self.written_bits)
    }

    #[inline(always)]
    fn write(&mut self, b: u64) {
        self.os.push(b as u8);
    }

    #[inline(always)]
    fn write_in_current(&mut self, b: u64, len: u64) -> u64 {
        self.free -= len as usize;
        self.current |= (b & ((1 << len) - 1)) << self.free;

        if self.free == 0 {
            self.write(self.current);
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len;
        len
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) {
        self.write_in_current(bit as u64, 1);
    }

    /// Writes the `len` low-order bits of `x`, highest first.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: u64) -> u64 {
        assert!(len <= 64, "Cannot write {} bits from an integer", len);

        let mut remaining = len;
        while remaining != 0 {
            let chunk = remaining.min(self.free as u64);
            remaining -= chunk;
            self.write_in_current(x >> remaining, chunk);
        }

        len
    }

    pub fn push_slice(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.push_bit(bit);
        }
    }
}

/// Reads bits most-significant-bit first, stopping at a fixed bit limit so
/// trailing padding is never handed out.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    is: &'a [u8],
    limit: u64,
    pub position: usize,
    pub read_bits: u64,
    current: u64,
    fill: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(input_stream: &'a [u8]) -> Self {
        BitReader {
            is: input_stream,
            limit: input_stream.len() as u64 * 8,
            position: 0,
            read_bits: 0,
            current: 0,
            fill: 0,
        }
    }

    /// Creates a reader that yields exactly `valid_bits` bits of `input_stream`.
    pub fn with_limit(input_stream: &'a [u8], valid_bits: u64) -> Result<Self, CodecError> {
        if valid_bits > input_stream.len() as u64 * 8 {
            return Err(CodecError::TruncatedData("valid bit count exceeds the supplied bytes"));
        }

        Ok(BitReader {
            limit: valid_bits,
            ..Self::new(input_stream)
        })
    }

    #[inline(always)]
    fn read(&mut self) -> Option<u64> {
        let byte = *self.is.get(self.position)?;
        self.position += 1;
        Some(byte as u64)
    }

    /// Number of bits left before the limit.
    pub fn remaining(&self) -> u64 {
        self.limit - self.read_bits
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.read_bits >= self.limit {
            return None;
        }

        if self.fill == 0 {
            self.current = self.read()?;
            self.fill = 8;
        }

        self.fill -= 1;
        self.read_bits += 1;

        Some(self.current >> self.fill & 1 == 1)
    }

    /// Reads `len` bits as an unsigned integer, or `None` if fewer remain.
    pub fn read_int(&mut self, len: u64) -> Option<u64> {
        assert!(len <= 64, "Cannot read {} bits into an integer", len);

        if self.remaining() < len {
            return None;
        }

        let mut x = 0;
        for _ in 0..len {
            x = x << 1 | self.read_bit()? as u64;
        }

        Some(x)
    }

    /// Number of bytes touched so far, including a partially read one.
    pub fn bytes_consumed(&self) -> usize {
        self.position
    }

    /// True when the unread low-order bits of the current byte are all zero.
    pub fn padding_is_zero(&self) -> bool {
        self.current & ((1 << self.fill) - 1) == 0
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

/// Packs `bits` MSB-first. The last byte is zero-padded on its low-order bits;
/// the returned count says how many bits are meaningful.
pub fn pack(bits: &[bool]) -> (Vec<u8>, u64) {
    let mut writer = BitWriter::with_capacity(bits.len());
    writer.push_slice(bits);
    writer.build()
}

/// Inverse of [`pack`]: returns the first `valid_bits` bits of `bytes`.
pub fn unpack(bytes: &[u8], valid_bits: u64) -> Result<Vec<bool>, CodecError> {
    Ok(BitReader::with_limit(bytes, valid_bits)?.collect())
}
