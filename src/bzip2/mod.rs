//! bzip2 decompressor: stream framing around the per-block decoder in
//! [`block`].
//!
//! Block CRCs and the stream CRC are read off the bit stream (keeping the
//! framing byte-accurate) but are not recomputed or checked; this decoder
//! trusts the compressed stream's block boundaries and does not attempt to
//! detect corruption the format's own CRC would catch.

mod bitstream;
mod block;
mod bwt;
mod huffman;
mod mtf;

use bitstream::BitReader;

use crate::{Error, Result};

const BLOCK_MAGIC_HI: u32 = 0x314159;
const BLOCK_MAGIC_LO: u32 = 0x265359;
const END_MAGIC_HI: u32 = 0x177245;
const END_MAGIC_LO: u32 = 0x385090;

/// Result of decoding a full bzip2 stream.
///
/// `block_crcs` and `stream_crc` are read off the wire but not verified
/// against recomputed CRC-32 values; a caller that cares can recompute and
/// compare them itself.
#[derive(Debug)]
pub struct Decompressed {
    pub data: Vec<u8>,
    pub block_crcs: Vec<u32>,
    pub stream_crc: u32,
}

/// Decompress a complete bzip2 stream, returning the concatenated
/// decompressed bytes.
///
/// Rejects streams containing a randomized block (`Error::Unsupported`);
/// bzip2's randomized-block mode was only ever a workaround for a
/// since-fixed encoder bug and real-world streams do not use it.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(decompress_full(data)?.data)
}

/// Like [`decompress`], but also returns the unverified block and stream
/// CRC-32 values recorded in the stream.
pub fn decompress_full(data: &[u8]) -> Result<Decompressed> {
    if data.len() < 4 || &data[0..2] != b"BZ" || data[2] != b'h' {
        return Err(Error::BadMagic);
    }
    let level = data[3];
    if !(b'1'..=b'9').contains(&level) {
        return Err(Error::BadMagic);
    }

    let mut r = BitReader::new(&data[4..]);
    let mut out = Vec::new();
    let mut block_crcs = Vec::new();

    let stream_crc = loop {
        let magic_hi = r.read_bits(24)?;
        let magic_lo = r.read_bits(24)?;

        if magic_hi == END_MAGIC_HI && magic_lo == END_MAGIC_LO {
            break r.read_bits(32)?;
        }
        if magic_hi != BLOCK_MAGIC_HI || magic_lo != BLOCK_MAGIC_LO {
            return Err(Error::BadMagic);
        }

        let (block, crc) = block::decode_block(&mut r)?;
        out.extend_from_slice(&block);
        block_crcs.push(crc);
    };

    Ok(Decompressed {
        data: out,
        block_crcs,
        stream_crc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn decompresses_empty_stream() {
        let data = hex("425a683117724538509000000000");
        assert_eq!(decompress(&data).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decompresses_hello_world() {
        let data = hex(
            "425a68313141592653595188d0790000025580001060040040060490802000220683208069a6891668ea41bb3bc5dc914e14241462341e40",
        );
        assert_eq!(decompress(&data).unwrap(), b"Hello, world!\n".to_vec());
    }

    #[test]
    fn decompresses_repeated_run_aaaaaaaaaa() {
        let data = hex("425a6831314159265359a2f84f0e00000244000100200020002100820b177245385090a2f84f0e");
        assert_eq!(decompress(&data).unwrap(), b"AAAAAAAAAA".to_vec());
    }

    #[test]
    fn decompresses_run_with_leading_mtf_shift() {
        // "baaaaaaaaaaaaaaaaaaaa": a leading non-repeated symbol shifts the
        // MTF front before a long run, which is exactly what exercises the
        // live-MTF-front fill byte rather than a fixed one.
        let data = hex(
            "425a6831314159265359a8181734000002a1004000300020002126419842b8bb9229c2848540c0b9a0",
        );
        assert_eq!(
            decompress(&data).unwrap(),
            b"baaaaaaaaaaaaaaaaaaaa".to_vec()
        );
    }

    #[test]
    fn decompresses_multi_selector_text() {
        let data = hex(
            "425a6831314159265359f4517fff000023918040003ffffff02000405554f4d4d34d30d11b46d4853468034000648510c5549569bb16c9362cb9c3a2c9bea4b90e1366aba4d472b26de50851e3b76fe2ee48a70a121e8a2fffe0",
        );
        let expected =
            b"the quick brown fox jumps over the lazy dog the quick brown fox jumps over the lazy dog".to_vec();
        assert_eq!(decompress(&data).unwrap(), expected);
    }

    #[test]
    fn rejects_bad_stream_magic() {
        let data = hex("000000000000");
        assert!(matches!(decompress(&data), Err(Error::BadMagic)));
    }

    #[test]
    fn exposes_unverified_crcs() {
        let data = hex(
            "425a68313141592653595188d0790000025580001060040040060490802000220683208069a6891668ea41bb3bc5dc914e14241462341e40",
        );
        let result = decompress_full(&data).unwrap();
        assert_eq!(result.data, b"Hello, world!\n".to_vec());
        assert_eq!(result.block_crcs.len(), 1);
    }
}
