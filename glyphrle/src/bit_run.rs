//! Alternating bit runs over a thresholded (0 / nonzero) pixel stream.
//!
//! Only counts are stored. The stream starts on bit 0; after each count the bit
//! toggles unless the count equals the mode's capacity, in which case the next
//! count continues the same bit. Consequences:
//! - input that starts with a 1 begins with a count of 0;
//! - a run of exactly `capacity` pixels followed by a change is `[cap, 0, ...]`.
//!
//! Wide (`BIT_STREAM_8`) stores one count per byte, capacity 255. Packed
//! (`BIT_STREAM_4`) stores two counts per byte (high nibble first), capacity 15,
//! and pads an odd count list with a trailing 0.
//!
//! Decoders write 1bpp MSB-first into `dst`, stop when `dst` is full or `src`
//! runs out, and flush a partial final byte with its remaining bits clear.

use alloc::vec::Vec;

pub const WIDE_MAX_RUN: u8 = 255;
pub const PACKED_MAX_RUN: u8 = 15;

/// Alternating run counts for `pixels`, each at most `max_run`.
pub fn run_counts(pixels: &[u8], max_run: u8) -> Vec<u8> {
  let mut counts = Vec::new();
  let mut target = false;
  let mut i = 0;
  while i < pixels.len() {
    let mut run = 0u8;
    while i < pixels.len() && (pixels[i] != 0) == target && run < max_run {
      run += 1;
      i += 1;
    }
    counts.push(run);
    // A saturated count keeps the bit for the next segment.
    if run < max_run {
      target = !target;
    }
  }
  counts
}

pub fn encode_wide(pixels: &[u8]) -> Vec<u8> {
  run_counts(pixels, WIDE_MAX_RUN)
}

pub fn encode_packed(pixels: &[u8]) -> Vec<u8> {
  run_counts(pixels, PACKED_MAX_RUN)
    .chunks(2)
    .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
    .collect()
}

/// Returns the number of bits written.
pub fn decode_wide(src: &[u8], dst: &mut [u8]) -> usize {
  let mut sink = BitSink::new(dst);
  let mut val = false;
  for &count in src {
    if sink.is_full() || !sink.put_run(count, val) {
      break;
    }
    if count < WIDE_MAX_RUN {
      val = !val;
    }
  }
  sink.finish()
}

/// Returns the number of bits written.
pub fn decode_packed(src: &[u8], dst: &mut [u8]) -> usize {
  let mut sink = BitSink::new(dst);
  let mut val = false;
  'src: for &b in src {
    if sink.is_full() {
      break;
    }
    for count in [(b >> 4) & 0x0F, b & 0x0F] {
      if !sink.put_run(count, val) {
        break 'src;
      }
      if count < PACKED_MAX_RUN {
        val = !val;
      }
    }
  }
  sink.finish()
}

/// MSB-first 1bpp writer bounded by the destination length.
struct BitSink<'a> {
  dst: &'a mut [u8],
  byte_idx: usize,
  bit_pos: u8,
  cur: u8,
  written: usize,
}

impl<'a> BitSink<'a> {
  fn new(dst: &'a mut [u8]) -> Self {
    Self { dst, byte_idx: 0, bit_pos: 7, cur: 0, written: 0 }
  }

  #[inline]
  fn is_full(&self) -> bool {
    self.byte_idx >= self.dst.len()
  }

  /// Emit `count` copies of `val`. Returns false once the last byte is stored.
  fn put_run(&mut self, count: u8, val: bool) -> bool {
    for _ in 0..count {
      if val {
        self.cur |= 1 << self.bit_pos;
      }
      self.written += 1;
      if self.bit_pos == 0 {
        self.dst[self.byte_idx] = self.cur;
        self.byte_idx += 1;
        self.cur = 0;
        self.bit_pos = 7;
        if self.is_full() {
          return false;
        }
      } else {
        self.bit_pos -= 1;
      }
    }
    true
  }

  fn finish(self) -> usize {
    if self.bit_pos != 7 && !self.is_full() {
      self.dst[self.byte_idx] = self.cur;
    }
    self.written
  }
}
