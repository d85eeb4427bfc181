//! Per-block bzip2 decode: Huffman/MTF/RLE-2 decode followed by inverse
//! move-to-front and inverse Burrows-Wheeler transform.

use crate::bzip2::bitstream::BitReader;
use crate::bzip2::bwt::inverse_bwt;
use crate::bzip2::huffman::HuffmanTable;
use crate::bzip2::mtf::MoveToFront;
use crate::{Error, Result};

/// Largest permitted decoded block size (bzip2's 900k block-size ceiling).
pub(crate) const MAX_BLOCK_SIZE: usize = 900_000;

const GROUP_SIZE: usize = 50;

/// Decode one bzip2 block, returning its decompressed bytes.
///
/// `r` must be positioned immediately after the block's start magic
/// (`0x314159 0x265359`).
pub(crate) fn decode_block(r: &mut BitReader) -> Result<(Vec<u8>, u32)> {
    let crc = r.read_bits(32)?;

    let randomized = r.read_bit()?;
    if randomized != 0 {
        return Err(Error::Unsupported("randomized bzip2 blocks are not supported"));
    }

    let orig_ptr = r.read_bits(24)?;

    // Symbol map: 16-bit coarse map, then a 16-bit fine map per set coarse bit.
    let coarse = r.read_bits(16)?;
    let mut in_use = [false; 256];
    for i in 0..16 {
        if coarse & (1 << (15 - i)) != 0 {
            let fine = r.read_bits(16)?;
            for j in 0..16 {
                if fine & (1 << (15 - j)) != 0 {
                    in_use[i * 16 + j] = true;
                }
            }
        }
    }
    let seq_to_unseq: Vec<u8> = (0..256u16).filter(|&b| in_use[b as usize]).map(|b| b as u8).collect();
    let sym_total = seq_to_unseq.len();
    if sym_total == 0 {
        return Err(Error::Malformed("bzip2 block has an empty symbol map"));
    }
    let alpha_size = sym_total + 2;

    let n_groups = r.read_bits(3)?;
    if !(2..=6).contains(&n_groups) {
        return Err(Error::Malformed("bzip2 nGroups out of range"));
    }
    let n_selectors = r.read_bits(15)?;
    if n_selectors == 0 {
        return Err(Error::Malformed("bzip2 nSelectors is zero"));
    }

    let mut selectors_mtf = Vec::with_capacity(n_selectors as usize);
    for _ in 0..n_selectors {
        let j = r.read_unary()?;
        if j >= n_groups {
            return Err(Error::Malformed("bzip2 selector index out of range"));
        }
        selectors_mtf.push(j as u8);
    }
    let mut group_mtf = MoveToFront::identity(n_groups as usize);
    let selectors: Vec<u8> = selectors_mtf
        .into_iter()
        .map(|j| group_mtf.decode(j as usize))
        .collect();

    // Per-group canonical Huffman code lengths.
    let mut tables = Vec::with_capacity(n_groups as usize);
    for _ in 0..n_groups {
        let mut length = r.read_bits(5)? as i32;
        let mut lengths = Vec::with_capacity(alpha_size);
        for _ in 0..alpha_size {
            loop {
                if !(1..=20).contains(&length) {
                    return Err(Error::Malformed("bzip2 code length out of range"));
                }
                if r.read_bit()? == 0 {
                    break;
                }
                if r.read_bit()? == 0 {
                    length += 1;
                } else {
                    length -= 1;
                }
            }
            lengths.push(length as u8);
        }
        tables.push(HuffmanTable::build(&lengths)?);
    }

    // Symbol decode with RUNA/RUNB run-length expansion, tracking the live
    // MTF front for the run-fill byte (not a fixed seqToUnseq[0]: see the
    // note in `crate::bzip2`).
    let mut mtf = MoveToFront::from_alphabet(&seq_to_unseq);
    let eob = (alpha_size - 1) as u16;
    let mut block: Vec<u8> = Vec::new();
    let mut group_idx = 0usize;
    let mut group_pos = 0usize;
    let mut run_len: u64 = 0;
    let mut run_bit = 0u32;

    loop {
        if group_pos == 0 {
            if group_idx >= selectors.len() {
                return Err(Error::Malformed("bzip2 ran out of selectors mid-block"));
            }
        }
        let table = &tables[selectors[group_idx] as usize];
        let symbol = table.decode(r)?;
        group_pos += 1;
        if group_pos == GROUP_SIZE {
            group_pos = 0;
            group_idx += 1;
        }

        if symbol == eob {
            if run_len > 0 {
                flush_run(&mut block, mtf.front(), run_len, MAX_BLOCK_SIZE)?;
            }
            break;
        }

        if symbol == 0 || symbol == 1 {
            // RUNA = 0, RUNB = 1: base-2 run-length accumulation.
            run_len += (symbol as u64 + 1) << run_bit;
            run_bit += 1;
            continue;
        }

        if run_len > 0 {
            flush_run(&mut block, mtf.front(), run_len, MAX_BLOCK_SIZE)?;
            run_len = 0;
            run_bit = 0;
        }

        let byte = mtf.decode((symbol - 1) as usize);
        if block.len() >= MAX_BLOCK_SIZE {
            return Err(Error::Truncated);
        }
        block.push(byte);
    }

    if block.len() > MAX_BLOCK_SIZE {
        return Err(Error::Truncated);
    }
    if orig_ptr as usize >= block.len() {
        return Err(Error::Malformed("bzip2 origPtr out of range"));
    }

    let out = inverse_bwt(&block, orig_ptr);
    Ok((out, crc))
}

fn flush_run(block: &mut Vec<u8>, byte: u8, run_len: u64, limit: usize) -> Result<()> {
    if block.len() as u64 + run_len > limit as u64 {
        return Err(Error::Truncated);
    }
    block.extend(std::iter::repeat(byte).take(run_len as usize));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_randomized_blocks() {
        // CRC (32 bits of zero) then a 1-bit randomized flag set to 1.
        let mut bits = vec![0u8; 4];
        bits.push(0b1000_0000);
        let mut r = BitReader::new(&bits);
        let err = decode_block(&mut r).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }
}
