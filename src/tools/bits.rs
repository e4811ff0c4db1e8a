//! LSB-first bit streams on top of `bit_vec`.
//!
//! The wire formats in this crate number bits so that bit `i` of the stream
//! lands in bit `i & 7` (least significant first) of byte `i >> 3`.  The
//! `bit_vec` crate orders bits MSB-first within its bytes, so conversion
//! happens here at the byte boundary and nowhere else.  Writers are
//! append-only; readers keep an explicit bit pointer.

use bit_vec::BitVec;

/// Append-only bit sink.  Bit `i` pushed here becomes bit `i & 7` of
/// output byte `i >> 3`.
pub struct BitWriter {
    bits: BitVec
}

impl BitWriter {
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }
    pub fn len(&self) -> usize {
        self.bits.len()
    }
    pub fn push(&mut self,bit: bool) {
        self.bits.push(bit);
    }
    /// append the low `width` bits of `val`, least significant first
    pub fn push_lsb(&mut self,val: u16,width: usize) {
        for b in 0..width {
            self.bits.push(val & (1 << b) != 0);
        }
    }
    /// pack into bytes, zero-filling the unused high bits of the last byte
    pub fn into_bytes(self) -> Vec<u8> {
        let mut ans = vec![0;(self.bits.len() + 7) / 8];
        for i in 0..self.bits.len() {
            if self.bits.get(i).unwrap() {
                ans[i >> 3] |= 1 << (i & 7);
            }
        }
        ans
    }
}

/// Bit source with a cursor.  Reads never pass the end of the underlying
/// bytes; a short read returns `None` and leaves the cursor in place.
pub struct BitReader {
    bits: BitVec,
    ptr: usize
}

impl BitReader {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = BitVec::with_capacity(bytes.len() * 8);
        for byte in bytes {
            for b in 0..8 {
                bits.push(byte & (1 << b) != 0);
            }
        }
        Self { bits, ptr: 0 }
    }
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.ptr
    }
    pub fn get_bit(&mut self) -> Option<bool> {
        match self.bits.get(self.ptr) {
            Some(bit) => {
                self.ptr += 1;
                Some(bit)
            },
            None => None
        }
    }
    /// read `width` bits into a u16, least significant first
    pub fn get_lsb(&mut self,width: usize) -> Option<u16> {
        if self.remaining() < width {
            return None;
        }
        let mut ans: u16 = 0;
        for b in 0..width {
            if self.bits.get(self.ptr + b).unwrap() {
                ans |= 1 << b;
            }
        }
        self.ptr += width;
        Some(ans)
    }
}

#[test]
fn byte_layout() {
    let mut writer = BitWriter::new();
    writer.push_lsb(0b10001,5);
    writer.push_lsb(0b10001,5);
    writer.push_lsb(0b10001,5);
    assert_eq!(writer.len(),15);
    assert_eq!(writer.into_bytes(),vec![0x31,0x46]);
}

#[test]
fn round_trip() {
    let mut writer = BitWriter::new();
    writer.push(true);
    writer.push_lsb(0x5a5a,16);
    writer.push_lsb(0b101,3);
    let bytes = writer.into_bytes();
    let mut reader = BitReader::from_bytes(&bytes);
    assert_eq!(reader.get_bit(),Some(true));
    assert_eq!(reader.get_lsb(16),Some(0x5a5a));
    assert_eq!(reader.get_lsb(3),Some(0b101));
}

#[test]
fn short_read() {
    let mut reader = BitReader::from_bytes(&[0xff]);
    assert_eq!(reader.get_lsb(5),Some(0b11111));
    assert_eq!(reader.get_lsb(5),None);
    assert_eq!(reader.remaining(),3);
    assert_eq!(reader.get_lsb(3),Some(0b111));
    assert_eq!(reader.get_bit(),None);
}
