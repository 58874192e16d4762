//! Value runs: `(count, value)` units over an unpacked pixel stream.
//!
//! - Wide (`RLE_8_8`): two bytes per run, `count` in 1..=255 then the raw value.
//! - Packed (`RLE_4_4`): one byte per run, high nibble = `count - 1` (so 0x0_ is a
//!   run of 1 and 0xF_ a run of 16), low nibble = `value & 0x0F`.
//!
//! Decoders are capacity-driven: they read a unit only while `dst` has room, fill
//! as much of the run as fits, and never check that `src` was consumed exactly.

use alloc::vec::Vec;

pub const WIDE_MAX_RUN: usize = 255;
pub const PACKED_MAX_RUN: usize = 16;

/// Split `pixels` into maximal equal-value runs no longer than `max_run`.
fn for_each_run(pixels: &[u8], max_run: usize, mut emit: impl FnMut(usize, u8)) {
  let mut i = 0;
  while i < pixels.len() {
    let val = pixels[i];
    let mut len = 1;
    while i + len < pixels.len() && pixels[i + len] == val && len < max_run {
      len += 1;
    }
    emit(len, val);
    i += len;
  }
}

pub fn encode_wide(pixels: &[u8]) -> Vec<u8> {
  let mut out = Vec::new();
  for_each_run(pixels, WIDE_MAX_RUN, |len, val| {
    out.push(len as u8);
    out.push(val);
  });
  out
}

/// Values are expected in 0..=15 already; higher bits are dropped silently.
pub fn encode_packed(pixels: &[u8]) -> Vec<u8> {
  let mut out = Vec::new();
  for_each_run(pixels, PACKED_MAX_RUN, |len, val| {
    out.push((((len - 1) as u8) << 4) | (val & 0x0F));
  });
  out
}

/// Returns the number of pixels written.
pub fn decode_wide(src: &[u8], dst: &mut [u8]) -> usize {
  let mut written = 0;
  for pair in src.chunks_exact(2) {
    if written >= dst.len() {
      break;
    }
    written += fill_run(&mut dst[written..], pair[0] as usize, pair[1]);
  }
  written
}

/// Returns the number of pixels written.
pub fn decode_packed(src: &[u8], dst: &mut [u8]) -> usize {
  let mut written = 0;
  for &b in src {
    if written >= dst.len() {
      break;
    }
    let count = ((b >> 4) & 0x0F) as usize + 1;
    written += fill_run(&mut dst[written..], count, b & 0x0F);
  }
  written
}

#[inline]
fn fill_run(dst: &mut [u8], count: usize, val: u8) -> usize {
  let n = count.min(dst.len());
  dst[..n].fill(val);
  n
}

#[cfg(test)]
mod tests {
  use super::{decode_packed, decode_wide, encode_packed, encode_wide};

  #[test]
  fn t_wide_letter_a_rows() {
    let px = [0x00, 0x18, 0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x00, 0x00];
    let enc = encode_wide(&px);
    assert_eq!(
      enc,
      [1, 0x00, 1, 0x18, 1, 0x3C, 2, 0x66, 1, 0x7E, 2, 0x66, 2, 0x00]
    );
    let mut out = [0xAAu8; 10];
    assert_eq!(decode_wide(&enc, &mut out), 10);
    assert_eq!(out, px);
  }

  #[test]
  fn t_wide_saturates_at_255() {
    let px = vec![7u8; 256];
    assert_eq!(encode_wide(&px), [255, 7, 1, 7]);
    let px = vec![7u8; 510];
    assert_eq!(encode_wide(&px), [255, 7, 255, 7]);
  }

  #[test]
  fn t_wide_keeps_full_value() {
    assert_eq!(encode_wide(&[0xF3, 0xF3]), [2, 0xF3]);
  }

  #[test]
  fn t_packed_boundary_16_and_17() {
    assert_eq!(encode_packed(&[0x9; 16]), [0xF9]);
    assert_eq!(encode_packed(&[0x9; 17]), [0xF9, 0x09]);
    assert_eq!(encode_packed(&[0x3]), [0x03]);
  }

  #[test]
  fn t_packed_masks_value() {
    assert_eq!(encode_packed(&[0x1C, 0x1C]), [0x1C]);
  }

  #[test]
  fn t_packed_roundtrip() {
    let px: Vec<u8> = (0..200).map(|i| ((i / 7) % 16) as u8).collect();
    let enc = encode_packed(&px);
    let mut out = vec![0u8; px.len()];
    assert_eq!(decode_packed(&enc, &mut out), px.len());
    assert_eq!(out, px);
  }

  #[test]
  fn t_empty() {
    assert!(encode_wide(&[]).is_empty());
    assert!(encode_packed(&[]).is_empty());
    let mut out = [0u8; 4];
    assert_eq!(decode_wide(&[], &mut out), 0);
    assert_eq!(decode_packed(&[3, 1], &mut []), 0);
  }

  #[test]
  fn t_decode_truncates_at_capacity() {
    // Second pair is read but only 2 of its 5 pixels fit.
    let src = [3, 0x11, 5, 0x22, 9, 0x33];
    let mut out = [0u8; 5];
    assert_eq!(decode_wide(&src, &mut out), 5);
    assert_eq!(out, [0x11, 0x11, 0x11, 0x22, 0x22]);

    let mut out = [0u8; 3];
    assert_eq!(decode_packed(&[0x21, 0x12], &mut out), 3);
    assert_eq!(out, [1, 1, 1]);
  }

  #[test]
  fn t_decode_short_source_leaves_tail() {
    let mut out = [0xEEu8; 6];
    assert_eq!(decode_wide(&[2, 0x01, 1], &mut out), 2);
    assert_eq!(out, [0x01, 0x01, 0xEE, 0xEE, 0xEE, 0xEE]);
  }

  #[test]
  fn t_decode_zero_count_pair_is_skipped() {
    let mut out = [0u8; 2];
    assert_eq!(decode_wide(&[0, 0x55, 2, 0x66], &mut out), 2);
    assert_eq!(out, [0x66, 0x66]);
  }
}
