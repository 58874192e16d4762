#![cfg_attr(not(test), no_std)]

//! Minimal no_std run-length codecs for packed glyph/icon bitmaps.
//!
//! Source pixels are packed 1, 2, 4 or 8 bits per pixel, MSB-first. Four codecs:
//!
//! | Mode             | Unit                           | Max run |
//! |------------------|--------------------------------|---------|
//! | `RLE_8_8`        | `[count u8][value u8]`         | 255     |
//! | `RLE_4_4`        | `[(len-1) << 4 \| value & 0xF]` | 16      |
//! | `BIT_STREAM_8`   | `[count u8]`                   | 255     |
//! | `BIT_STREAM_4`   | `[count_a << 4 \| count_b]`     | 15      |
//!
//! Bit-stream modes carry no value field: pixels are thresholded to 0/1 and the
//! counts describe alternating runs starting from 0. A count equal to the mode's
//! capacity does not toggle the bit, so longer runs become a chain of full counts.
//!
//! Many glyphs share one blob via an offset table (see [`compress`]).
//!
//! Encoders need `alloc`; decoders write into caller buffers and never allocate.

extern crate alloc;

pub mod bit_run;
mod compress;
mod unpack;
pub mod value_run;

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

pub use compress::{Compressed, compress};
pub use unpack::{quantize, threshold_bits, unpack};

/// Selector parsing and chunk lookup errors
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
  /// Bits per pixel not in {1, 2, 4, 8}.
  BadBitWidth(u8),
  /// Mode name not recognized.
  UnknownMode,
  /// Chunk index past the end of the offset table.
  ChunkOutOfRange,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::BadBitWidth(n) => write!(f, "unsupported bits per pixel: {n} (expected 1, 2, 4 or 8)"),
      Error::UnknownMode => f.write_str("unknown mode (expected RLE_8_8, RLE_4_4, BIT_STREAM_8 or BIT_STREAM_4)"),
      Error::ChunkOutOfRange => f.write_str("chunk index out of range"),
    }
  }
}

impl core::error::Error for Error {}

/// Bits per source pixel, fixed for a whole compression run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitWidth {
  One,
  Two,
  Four,
  Eight,
}

impl BitWidth {
  #[inline]
  pub const fn bits(self) -> u8 {
    match self {
      BitWidth::One => 1,
      BitWidth::Two => 2,
      BitWidth::Four => 4,
      BitWidth::Eight => 8,
    }
  }

  #[inline]
  pub const fn pixels_per_byte(self) -> usize {
    8 / self.bits() as usize
  }

  /// Largest pixel value representable at this width.
  #[inline]
  pub const fn max_value(self) -> u8 {
    ((1u16 << self.bits()) - 1) as u8
  }
}

impl TryFrom<u8> for BitWidth {
  type Error = Error;

  fn try_from(bits: u8) -> Result<Self, Error> {
    match bits {
      1 => Ok(BitWidth::One),
      2 => Ok(BitWidth::Two),
      4 => Ok(BitWidth::Four),
      8 => Ok(BitWidth::Eight),
      n => Err(Error::BadBitWidth(n)),
    }
  }
}

impl fmt::Display for BitWidth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.bits())
  }
}

/// Encoding mode: one codec per variant, dispatched by tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
  /// 8-bit count + 8-bit value.
  ValueRunWide,
  /// 4-bit (count - 1) + 4-bit value in one byte.
  ValueRunPacked,
  /// 8-bit alternating bit-run counts.
  BitRunWide,
  /// 4-bit alternating bit-run counts, two per byte.
  BitRunPacked,
}

impl Mode {
  pub const ALL: [Mode; 4] = [Mode::ValueRunWide, Mode::ValueRunPacked, Mode::BitRunWide, Mode::BitRunPacked];

  /// Longest run a single unit can describe.
  #[inline]
  pub const fn capacity(self) -> usize {
    match self {
      Mode::ValueRunWide => value_run::WIDE_MAX_RUN,
      Mode::ValueRunPacked => value_run::PACKED_MAX_RUN,
      Mode::BitRunWide => bit_run::WIDE_MAX_RUN as usize,
      Mode::BitRunPacked => bit_run::PACKED_MAX_RUN as usize,
    }
  }

  #[inline]
  pub const fn label(self) -> &'static str {
    match self {
      Mode::ValueRunWide => "RLE_8_8",
      Mode::ValueRunPacked => "RLE_4_4",
      Mode::BitRunWide => "BIT_STREAM_8",
      Mode::BitRunPacked => "BIT_STREAM_4",
    }
  }

  #[inline]
  pub const fn is_bit_run(self) -> bool {
    matches!(self, Mode::BitRunWide | Mode::BitRunPacked)
  }

  /// Destination size a decoder needs for `pixels` source pixels: one byte per
  /// pixel for value runs, packed 1bpp bytes for bit runs.
  #[inline]
  pub const fn decoded_len(self, pixels: usize) -> usize {
    if self.is_bit_run() { pixels.div_ceil(8) } else { pixels }
  }

  /// Encode an unpacked (and, for `RLE_4_4`, quantized) pixel stream.
  pub fn encode(self, pixels: &[u8]) -> Vec<u8> {
    match self {
      Mode::ValueRunWide => value_run::encode_wide(pixels),
      Mode::ValueRunPacked => value_run::encode_packed(pixels),
      Mode::BitRunWide => bit_run::encode_wide(pixels),
      Mode::BitRunPacked => bit_run::encode_packed(pixels),
    }
  }

  /// Decode into `dst` until it is full or `src` runs out.
  /// Returns pixels written (value runs) or bits written (bit runs).
  pub fn decode(self, src: &[u8], dst: &mut [u8]) -> usize {
    match self {
      Mode::ValueRunWide => value_run::decode_wide(src, dst),
      Mode::ValueRunPacked => value_run::decode_packed(src, dst),
      Mode::BitRunWide => bit_run::decode_wide(src, dst),
      Mode::BitRunPacked => bit_run::decode_packed(src, dst),
    }
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for Mode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    let s = s.trim();
    Mode::ALL
      .into_iter()
      .find(|m| m.label().eq_ignore_ascii_case(s) || m.aliases().iter().any(|a| a.eq_ignore_ascii_case(s)))
      .ok_or(Error::UnknownMode)
  }
}

impl Mode {
  const fn aliases(self) -> &'static [&'static str] {
    match self {
      Mode::ValueRunWide => &["rle88", "rle-8-8", "value-run-wide"],
      Mode::ValueRunPacked => &["rle44", "rle-4-4", "value-run-packed"],
      Mode::BitRunWide => &["bit8", "bit-stream-8", "bit-run-wide"],
      Mode::BitRunPacked => &["bit4", "bit-stream-4", "bit-run-packed"],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{BitWidth, Error, Mode};

  #[test]
  fn t_bit_width_parse() {
    assert_eq!(BitWidth::try_from(4), Ok(BitWidth::Four));
    assert_eq!(BitWidth::try_from(3), Err(Error::BadBitWidth(3)));
    assert_eq!(BitWidth::Two.max_value(), 3);
    assert_eq!(BitWidth::Eight.max_value(), 255);
    assert_eq!(BitWidth::One.pixels_per_byte(), 8);
  }

  #[test]
  fn t_mode_parse() {
    assert_eq!("RLE_8_8".parse(), Ok(Mode::ValueRunWide));
    assert_eq!("rle_4_4".parse(), Ok(Mode::ValueRunPacked));
    assert_eq!("bit8".parse(), Ok(Mode::BitRunWide));
    assert_eq!(" Bit-Run-Packed ".parse(), Ok(Mode::BitRunPacked));
    assert_eq!("lz4".parse::<Mode>(), Err(Error::UnknownMode));
  }

  #[test]
  fn t_mode_capacity_and_sizes() {
    let caps: Vec<usize> = Mode::ALL.iter().map(|m| m.capacity()).collect();
    assert_eq!(caps, [255, 16, 255, 15]);
    assert_eq!(Mode::ValueRunPacked.decoded_len(17), 17);
    assert_eq!(Mode::BitRunPacked.decoded_len(17), 3);
  }
}
