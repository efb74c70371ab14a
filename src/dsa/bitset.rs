use std::fmt::Display;
use std::ops::Index;
use thiserror::Error;

#[derive(Error,Debug,PartialEq,Eq)]
pub enum BitSetError {
    #[error("bit {pos} was accessed, but storage only holds {capacity} bits")]
    OutOfRange{pos:usize,capacity:usize}
}

type Result<T> = std::result::Result<T,BitSetError>;

/// Number of bytes needed to hold `nbits` bits.
/// Zero bits still take one byte.
pub fn storage_words_needed(nbits:usize) -> usize {
    if nbits < 8 {
        1
    }else{
        // 1 + (nbits - 8) / 8 would drop the tail byte for 9..=15, 17..=23, ...
        nbits.div_ceil(8)
    }
}

fn pos_and_offset(pos:usize) -> (usize,usize) {
    (pos / 8, pos % 8)
}

/// A runtime sized array of bits, packed 8 to a byte.
///
/// Bit `pos` lives in byte `pos / 8` at offset `pos % 8`, offset 0 being the
/// least significant bit of the byte.
///
/// `set` and `at` do not check `pos` against `len()`: any position inside the
/// allocated bytes is accepted, including the spare bits of the last byte.
/// Positions past the allocated bytes are rejected with
/// [`BitSetError::OutOfRange`], and `bitset[pos]` panics for the same positions.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct DynamicBitSet {
    size:usize,
    // always storage_words_needed(size) long
    bytes:Vec<u8>
}

impl Default for DynamicBitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicBitSet {
    /// An empty bitset backed by a single zero byte.
    pub fn new() -> Self {
        Self::with_bits(0)
    }

    /// A bitset of `nbits` bits, all cleared.
    pub fn with_bits(nbits:usize) -> Self {
        Self {
            size:nbits,
            bytes:vec![0;storage_words_needed(nbits)]
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of allocated bytes.
    pub fn storage_len(&self) -> usize {
        self.bytes.len()
    }

    /// Changes the bit count, growing or truncating storage to match.
    ///
    /// Bytes that survive keep their content, so this is not a reset:
    /// shrinking and growing back brings old bits of the kept bytes with it.
    /// Newly appended bytes are zeroed.
    pub fn resize(&mut self,nbits:usize) {
        let words = storage_words_needed(nbits);
        log::trace!(
            "[DynamicBitSet::resize] {} -> {} bits, {} -> {} bytes",
            self.size, nbits, self.bytes.len(), words
        );
        self.size = nbits;
        self.bytes.resize(words,0);
    }

    /// Number of set bits among the first `len()` positions.
    pub fn count(&self) -> usize {
        (0..self.size).filter(|&pos| self.bit(pos)).count()
    }

    /// Clears every allocated byte. The bit count is kept.
    pub fn reset(&mut self) {
        log::trace!("[DynamicBitSet::reset] clearing {} bytes",self.bytes.len());
        self.bytes.fill(0);
    }

    pub fn set(&mut self,pos:usize,value:bool) -> Result<()> {
        self.check(pos)?;
        let (byte_pos,pos_in_byte) = pos_and_offset(pos);
        let mask = 1u8 << pos_in_byte;
        if value {
            self.bytes[byte_pos] |= mask;
        }else{
            self.bytes[byte_pos] &= !mask;
        }
        Ok(())
    }

    /// Same as `set(pos, true)`.
    pub fn set_on(&mut self,pos:usize) -> Result<()> {
        self.set(pos,true)
    }

    pub fn at(&self,pos:usize) -> Result<bool> {
        self.check(pos)?;
        Ok(self.bit(pos))
    }

    fn capacity(&self) -> usize {
        self.bytes.len() * 8
    }

    fn check(&self,pos:usize) -> Result<()> {
        let capacity = self.capacity();
        if pos >= capacity {
            log::debug!("[DynamicBitSet] rejected bit {pos}, capacity is {capacity}");
            return Err(BitSetError::OutOfRange{pos,capacity})
        }
        Ok(())
    }

    // caller has checked pos against capacity
    fn bit(&self,pos:usize) -> bool {
        let (byte_pos,pos_in_byte) = pos_and_offset(pos);
        (self.bytes[byte_pos] >> pos_in_byte) & 1 == 1
    }
}

impl Index<usize> for DynamicBitSet {
    type Output = bool;
    fn index(&self, pos: usize) -> &Self::Output {
        match self.at(pos) {
            Ok(true) => &true,
            Ok(false) => &false,
            Err(e) => panic!("{e}")
        }
    }
}

// highest bit first, like a binary literal
impl Display for DynamicBitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pos in (0..self.size).rev() {
            write!(f,"{}",if self.bit(pos) {'1'} else {'0'})?;
        }
        Ok(())
    }
}
