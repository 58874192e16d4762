//! Text output: C array literals, offset table, summary and JSON report.

use glyphrle::Compressed;
use serde::Serialize;

use crate::template;

const ITEMS_PER_LINE: usize = 12;
const INDENT: &str = "    ";

/// Everything one compression run produces, ready to print or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct CompressResult {
  pub original_size: usize,
  pub compressed_size: usize,
  /// Percent saved; negative when the output is larger than the input.
  pub ratio: f64,
  pub mode: &'static str,
  pub bpp: u8,
  pub chunks: usize,
  pub offsets: Vec<u32>,
  /// Flat `0xHH, 0xHH, ...` list of the blob.
  pub hex: String,
  pub c_array: String,
  pub offset_table: String,
  pub decoder: String,
}

impl CompressResult {
  pub fn new(c: &Compressed, stamp: Option<&str>) -> Self {
    Self {
      original_size: c.original_size(),
      compressed_size: c.compressed_size(),
      ratio: c.ratio(),
      mode: c.mode().label(),
      bpp: c.width().bits(),
      chunks: c.chunk_count(),
      offsets: c.offsets().to_vec(),
      hex: c.blob().iter().map(|&b| hex_byte(b)).collect::<Vec<_>>().join(", "),
      c_array: c_array(c),
      offset_table: offset_table(c),
      decoder: template::emit(c.mode(), c.offset_table().is_some(), stamp),
    }
  }

  /// One line for stderr, e.g. `RLE_8_8 @ 8bpp: 10 -> 14 bytes (-40.00%), 1 chunk(s)`.
  pub fn summary(&self) -> String {
    format!(
      "{} @ {}bpp: {} -> {} bytes ({:.2}%), {} chunk(s)",
      self.mode, self.bpp, self.original_size, self.compressed_size, self.ratio, self.chunks
    )
  }

  /// Data arrays followed by the decoder, as one C source file.
  pub fn to_source(&self) -> String {
    format!("{}\n\n{}\n\n{}", self.c_array, self.offset_table, self.decoder)
  }
}

#[inline]
fn hex_byte(b: u8) -> String {
  format!("0x{b:02X}")
}

/// Items joined by `, `, wrapped every 12 entries.
fn wrap_items(items: &[String]) -> String {
  items
    .chunks(ITEMS_PER_LINE)
    .map(|line| format!("{INDENT}{}", line.join(", ")))
    .collect::<Vec<_>>()
    .join(",\n")
}

pub fn c_array(c: &Compressed) -> String {
  let items: Vec<String> = c.blob().iter().map(|&b| hex_byte(b)).collect();
  format!(
    "// Mode: {}, source: {} BPP\nconst unsigned char compressed_data[{}] = {{\n{}\n}};",
    c.mode().label(),
    c.width().bits(),
    items.len(),
    wrap_items(&items)
  )
}

pub fn offset_table(c: &Compressed) -> String {
  match c.offset_table() {
    Some(offsets) => {
      let items: Vec<String> = offsets.iter().map(u32::to_string).collect();
      format!(
        "// Offset table for {} glyphs (index -> start byte)\nconst unsigned int data_offsets[{}] = {{\n{}\n}};",
        items.len(),
        items.len(),
        wrap_items(&items)
      )
    }
    None => format!("// {} item(s): no offset table generated.", c.chunk_count()),
  }
}

#[cfg(test)]
mod tests {
  use super::{CompressResult, c_array, offset_table};
  use glyphrle::{BitWidth, Mode, compress};

  const LETTER_A: [u8; 10] = [0x00, 0x18, 0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x00, 0x00];

  #[test]
  fn t_c_array_wraps_at_12() {
    let c = compress(&[LETTER_A], Mode::ValueRunWide, BitWidth::Eight);
    assert_eq!(
      c_array(&c),
      "// Mode: RLE_8_8, source: 8 BPP\n\
       const unsigned char compressed_data[14] = {\n    \
       0x01, 0x00, 0x01, 0x18, 0x01, 0x3C, 0x02, 0x66, 0x01, 0x7E, 0x02, 0x66,\n    \
       0x02, 0x00\n\
       };"
    );
  }

  #[test]
  fn t_offset_table_or_placeholder() {
    let one = compress(&[LETTER_A], Mode::ValueRunWide, BitWidth::Eight);
    assert_eq!(offset_table(&one), "// 1 item(s): no offset table generated.");

    let two = compress(&[LETTER_A, LETTER_A], Mode::ValueRunWide, BitWidth::Eight);
    assert_eq!(
      offset_table(&two),
      "// Offset table for 2 glyphs (index -> start byte)\nconst unsigned int data_offsets[2] = {\n    0, 14\n};"
    );
  }

  #[test]
  fn t_result_fields() {
    let c = compress(&[vec![0xABu8; 3], vec![0x0Fu8]], Mode::ValueRunWide, BitWidth::Eight);
    let r = CompressResult::new(&c, None);
    assert_eq!(r.hex, "0x03, 0xAB, 0x01, 0x0F");
    assert_eq!((r.original_size, r.compressed_size, r.chunks), (4, 4, 2));
    assert_eq!(r.offsets, [0, 2]);
    assert_eq!(r.ratio, 0.0);
    assert!(r.decoder.contains("get_glyph_data"));
    assert_eq!(r.summary(), "RLE_8_8 @ 8bpp: 4 -> 4 bytes (0.00%), 2 chunk(s)");
    let src = r.to_source();
    assert!(src.starts_with("// Mode: RLE_8_8"));
    assert!(src.contains("data_offsets[2]"));
  }

  #[test]
  fn t_negative_ratio_summary() {
    let c = compress(&[LETTER_A], Mode::ValueRunWide, BitWidth::Eight);
    assert_eq!(CompressResult::new(&c, None).summary(), "RLE_8_8 @ 8bpp: 10 -> 14 bytes (-40.00%), 1 chunk(s)");
  }

  #[test]
  fn t_json_report() {
    let c = compress(&[[0xFFu8, 0x00]], Mode::BitRunWide, BitWidth::One);
    let v = serde_json::to_value(CompressResult::new(&c, Some("today"))).unwrap();
    assert_eq!(v["mode"], "BIT_STREAM_8");
    assert_eq!(v["bpp"], 1);
    assert_eq!(v["hex"], "0x00, 0x08, 0x08");
    assert!(v["decoder"].as_str().unwrap().contains("Generated: today"));
  }
}
