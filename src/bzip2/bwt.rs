//! Inverse Burrows-Wheeler transform.

/// Invert the BWT given the post-MTF/RLE byte buffer `data` and the
/// original row index `orig_ptr`.
///
/// Builds the transformation vector `tt` by a stable counting sort on byte
/// value, then walks it starting at `orig_ptr` to emit the original byte
/// sequence.
pub(crate) fn inverse_bwt(data: &[u8], orig_ptr: u32) -> Vec<u8> {
    let n = data.len();
    let mut counts = [0u32; 256];
    for &b in data {
        counts[b as usize] += 1;
    }

    let mut cumulative = [0u32; 256];
    let mut total = 0u32;
    for (i, &c) in counts.iter().enumerate() {
        cumulative[i] = total;
        total += c;
    }

    let mut next = cumulative;
    let mut tt = vec![0u32; n];
    for (i, &b) in data.iter().enumerate() {
        tt[next[b as usize] as usize] = i as u32;
        next[b as usize] += 1;
    }

    let mut out = Vec::with_capacity(n);
    let mut idx = tt[orig_ptr as usize];
    for _ in 0..n {
        out.push(data[idx as usize]);
        idx = tt[idx as usize];
    }
    out
}
