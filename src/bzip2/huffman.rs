//! Canonical Huffman decode tables for one bzip2 coding group.
//!
//! Built from a per-symbol code-length array using the standard
//! `base`/`limit`/`perm` scheme: symbols are grouped by length into `perm`
//! in canonical order, `base[len]` locates each length's first `perm`
//! index, and `limit[len]` is the largest valid code value of that length.

use crate::bzip2::bitstream::BitReader;
use crate::{Error, Result};

const MAX_CODE_LEN: usize = 23;

pub(crate) struct HuffmanTable {
    min_len: u32,
    max_len: u32,
    limit: [i32; MAX_CODE_LEN],
    base: [i32; MAX_CODE_LEN],
    perm: Vec<u16>,
}

impl HuffmanTable {
    /// Build decode tables from a per-symbol code-length array.
    ///
    /// `lengths[i]` is the bit length of symbol `i`, each in `[1, 20]`.
    pub(crate) fn build(lengths: &[u8]) -> Result<Self> {
        let alpha_size = lengths.len();
        let min_len = *lengths.iter().min().ok_or(Error::Malformed("empty Huffman alphabet"))? as u32;
        let max_len = *lengths.iter().max().unwrap() as u32;
        if max_len as usize >= MAX_CODE_LEN {
            return Err(Error::Malformed("Huffman code length exceeds limit"));
        }

        let mut perm = Vec::with_capacity(alpha_size);
        for len in min_len..=max_len {
            for (sym, &l) in lengths.iter().enumerate() {
                if l as u32 == len {
                    perm.push(sym as u16);
                }
            }
        }

        let mut base = [0i32; MAX_CODE_LEN];
        for &l in lengths {
            base[l as usize + 1] += 1;
        }
        for i in 1..MAX_CODE_LEN {
            base[i] += base[i - 1];
        }

        let mut limit = [0i32; MAX_CODE_LEN];
        let mut vec = 0i32;
        for len in min_len..=max_len {
            let len = len as usize;
            vec += base[len + 1] - base[len];
            limit[len] = vec - 1;
            vec <<= 1;
        }
        for len in (min_len as usize + 1)..=(max_len as usize) {
            base[len] = ((limit[len - 1] + 1) << 1) - base[len];
        }

        Ok(Self {
            min_len,
            max_len,
            limit,
            base,
            perm,
        })
    }

    /// Decode one symbol from the bit stream.
    pub(crate) fn decode(&self, r: &mut BitReader) -> Result<u16> {
        let mut len = self.min_len;
        let mut code = r.read_bits(len)? as i32;

        while len <= self.max_len && code > self.limit[len as usize] {
            len += 1;
            code = (code << 1) | r.read_bit()? as i32;
            if len > 20 {
                return Err(Error::Malformed("Huffman code exceeds 20 bits"));
            }
        }
        if len > self.max_len {
            return Err(Error::Malformed("Huffman code has no match"));
        }

        let idx = (code - self.base[len as usize]) as usize;
        self.perm
            .get(idx)
            .copied()
            .ok_or(Error::Malformed("Huffman symbol index out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_length_alphabet_round_trips() {
        // Four symbols, all length 2: canonical codes 00, 01, 10, 11.
        let lengths = [2u8, 2, 2, 2];
        let table = HuffmanTable::build(&lengths).unwrap();

        let bits = [0b00_01_10_11u8];
        let mut r = BitReader::new(&bits);
        assert_eq!(table.decode(&mut r).unwrap(), 0);
        assert_eq!(table.decode(&mut r).unwrap(), 1);
        assert_eq!(table.decode(&mut r).unwrap(), 2);
        assert_eq!(table.decode(&mut r).unwrap(), 3);
    }

    #[test]
    fn variable_length_alphabet_decodes_unambiguously() {
        // symbol 0 -> "0" (len 1), symbol 1 -> "10" (len 2), symbol 2 -> "11" (len 2)
        let lengths = [1u8, 2, 2];
        let table = HuffmanTable::build(&lengths).unwrap();

        // Encode 0, 1, 2, 0 -> "0" "10" "11" "0" = 0 10 11 0 = 0b0101_1000 (padded)
        let bits = [0b0_10_11_0_00u8];
        let mut r = BitReader::new(&bits);
        assert_eq!(table.decode(&mut r).unwrap(), 0);
        assert_eq!(table.decode(&mut r).unwrap(), 1);
        assert_eq!(table.decode(&mut r).unwrap(), 2);
        assert_eq!(table.decode(&mut r).unwrap(), 0);
    }
}
