use alloc::vec::Vec;

use crate::BitWidth;

/// Expand packed bytes into one value per pixel, most significant field first.
///
/// The result always has `bytes.len() * 8 / bits` entries.
pub fn unpack(bytes: &[u8], width: BitWidth) -> Vec<u8> {
  if width == BitWidth::Eight {
    return bytes.to_vec();
  }
  let bits = width.bits();
  let mask = width.max_value();
  let mut pixels = Vec::with_capacity(bytes.len() * width.pixels_per_byte());
  for &b in bytes {
    let mut shift = 8 - bits;
    loop {
      pixels.push((b >> shift) & mask);
      if shift == 0 {
        break;
      }
      shift -= bits;
    }
  }
  pixels
}

/// Reduce pixels to 4-bit values for `RLE_4_4`.
///
/// 8bpp sources keep their top nibble (lossy); narrower sources are masked.
pub fn quantize(pixels: &mut [u8], width: BitWidth) {
  if width == BitWidth::Eight {
    pixels.iter_mut().for_each(|p| *p >>= 4);
  } else {
    pixels.iter_mut().for_each(|p| *p &= 0x0F);
  }
}

/// Threshold pixels to 0/1 (any nonzero is 1) and pack them 8 per byte, MSB-first.
/// A trailing partial byte keeps its low bits clear.
///
/// This is exactly what a bit-run decoder writes for the same pixels.
pub fn threshold_bits(pixels: &[u8]) -> Vec<u8> {
  pixels
    .chunks(8)
    .map(|group| {
      group
        .iter()
        .enumerate()
        .fold(0u8, |acc, (i, &p)| if p != 0 { acc | (0x80u8 >> i) } else { acc })
    })
    .collect()
}
