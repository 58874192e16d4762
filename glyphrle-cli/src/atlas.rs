//! Glyph strips from raster images.
//!
//! An atlas is a single row of equally wide glyph cells. Each cell becomes one
//! chunk, packed row-major at the requested bits per pixel (top bits of 8-bit
//! coverage, MSB-first, every glyph row padded to a whole byte).

use anyhow::{Result, bail};
use glyphrle::BitWidth;
use image::GenericImageView;

#[derive(Debug, Clone)]
pub struct Atlas {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<u8>, // L8 coverage
}

impl Atlas {
  pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
    let need = width as usize * height as usize;
    if pixels.len() != need {
      bail!("atlas len {} != {}*{}", pixels.len(), width, height);
    }
    Ok(Self { width, height, pixels })
  }

  /// Decode PNG/BMP/GIF into 8-bit coverage: alpha when the image has it,
  /// BT.709 luma otherwise.
  pub fn decode(bytes: &[u8]) -> Result<Self> {
    use image::DynamicImage;
    use image::ImageReader;
    use std::io::Cursor;

    let img = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?.decode()?;
    let (w, h) = img.dimensions();

    let l8: Vec<u8> = match img {
      DynamicImage::ImageLuma8(l) => l.into_vec(),
      DynamicImage::ImageLumaA8(la) => la.into_vec().chunks_exact(2).map(|px| px[1]).collect(),
      DynamicImage::ImageRgba8(rgba) => rgba.into_vec().chunks_exact(4).map(|px| px[3]).collect(),
      DynamicImage::ImageRgb8(rgb) => rgb.into_vec().chunks_exact(3).map(|px| luma709(px[0], px[1], px[2])).collect(),
      other if other.color().has_alpha() => other.to_rgba8().into_vec().chunks_exact(4).map(|px| px[3]).collect(),
      other => other.to_luma8().into_vec(),
    };

    Self::new(w, h, l8)
  }

  /// Slice into `glyph_w`-pixel cells and pack each one at `bpp`.
  pub fn glyph_chunks(&self, glyph_w: u32, bpp: BitWidth) -> Result<Vec<Vec<u8>>> {
    if glyph_w == 0 {
      bail!("glyph width must be non-zero");
    }
    if self.width % glyph_w != 0 {
      bail!("atlas width {} is not a multiple of glyph width {}", self.width, glyph_w);
    }
    let (w, gw) = (self.width as usize, glyph_w as usize);
    let chunks: Vec<Vec<u8>> = (0..w / gw)
      .map(|g| {
        let mut out = Vec::with_capacity(self.height as usize * (gw * bpp.bits() as usize).div_ceil(8));
        for row in self.pixels.chunks_exact(w) {
          pack_row(&row[g * gw..(g + 1) * gw], bpp, &mut out);
        }
        out
      })
      .collect();
    tracing::debug!(glyphs = chunks.len(), width = glyph_w, height = self.height, "sliced atlas");
    Ok(chunks)
  }
}

/// Pack one row of coverage values MSB-first, padding the last byte with zeros.
fn pack_row(coverage: &[u8], bpp: BitWidth, out: &mut Vec<u8>) {
  let bits = bpp.bits();
  let mut cur = 0u8;
  let mut used = 0u8;
  for &c in coverage {
    let v = if bits == 8 { c } else { c >> (8 - bits) };
    cur |= v << (8 - bits - used);
    used += bits;
    if used == 8 {
      out.push(cur);
      cur = 0;
      used = 0;
    }
  }
  if used > 0 {
    out.push(cur);
  }
}

#[inline]
fn luma709(r: u8, g: u8, b: u8) -> u8 {
  let y = 0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32;
  y.round().clamp(0.0, 255.0) as u8
}
