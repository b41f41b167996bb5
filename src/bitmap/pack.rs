//! Bit packing shared by the hitmap and walkmap encoders.

/// Packs bits most-significant-bit first into bytes.
///
/// A byte is emitted once eight bits have been pushed. `finish` flushes a
/// trailing partial byte with its low bits zeroed.
#[derive(Debug, Default)]
pub struct BitPacker {
    bytes: Vec<u8>,
    current: u8,
    filled: u8,
}

impl BitPacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a packer expecting roughly `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            current: 0,
            filled: 0,
        }
    }

    pub fn push(&mut self, bit: bool) {
        self.current = (self.current << 1) | bit as u8;
        self.filled += 1;
        if self.filled == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    pub fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.bytes.push(self.current << (8 - self.filled));
        }
        self.bytes
    }
}
