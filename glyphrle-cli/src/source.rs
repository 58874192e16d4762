//! Pull byte chunks out of C-like source text.
//!
//! Every innermost `{ ... }` group holding at least one hex literal is a chunk
//! (one glyph of a 2D array). Without such groups, all hex literals in the text
//! form a single chunk. Comments are stripped first; decimal and other tokens
//! are ignored.

use std::sync::LazyLock;

use anyhow::{Result, anyhow, bail};
use regex::Regex;

// One left-to-right pass: whichever comment opens first wins.
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)//[^\n]*|/\*.*?\*/").expect("valid regex"));
static INNER_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("valid regex"));
static HEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)0x[0-9a-f]+").expect("valid regex"));

/// Extract chunks from `text`.
///
/// Fails when no hex literal is found or a literal does not fit in a byte.
pub fn parse_chunks(text: &str) -> Result<Vec<Vec<u8>>> {
  let text = COMMENT.replace_all(text, " ").into_owned();

  let mut chunks = Vec::new();
  for cap in INNER_BLOCK.captures_iter(&text) {
    let body = &cap[1];
    if HEX.is_match(body) {
      let idx = chunks.len();
      chunks.push(hex_bytes(body).map_err(|e| anyhow!("chunk {idx}: {e}"))?);
    }
  }

  if chunks.is_empty() && HEX.is_match(&text) {
    chunks.push(hex_bytes(&text)?);
  }
  if chunks.is_empty() {
    bail!("no data found: expected hex literals such as 0x3C");
  }
  tracing::debug!(chunks = chunks.len(), "parsed source");
  Ok(chunks)
}

fn hex_bytes(body: &str) -> Result<Vec<u8>> {
  HEX
    .find_iter(body)
    .map(|m| {
      let tok = m.as_str();
      let v = u32::from_str_radix(&tok[2..], 16).map_err(|_| anyhow!("literal {tok} is too large"))?;
      u8::try_from(v).map_err(|_| anyhow!("literal {tok} exceeds 0xFF"))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::parse_chunks;

  #[test]
  fn t_flat_array_is_one_chunk() {
    let src = "const unsigned char a[] = { 0x00, 0x18, 0X3c, 0x66 };";
    assert_eq!(parse_chunks(src).unwrap(), vec![vec![0x00, 0x18, 0x3C, 0x66]]);
  }

  #[test]
  fn t_nested_groups_are_chunks() {
    let src = r#"
      const unsigned char font[][3] = {
        {0x01, 0x02, 0x03}, // 'A'
        {0x04, 0x05, 0x06}, /* 'B' { 0x99 } */
        {},
        {0x07, 8, 0x08},
      };
    "#;
    assert_eq!(parse_chunks(src).unwrap(), vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]);
  }

  #[test]
  fn t_bare_list_without_braces() {
    assert_eq!(parse_chunks("0xFF 0x00\n0x81").unwrap(), vec![vec![0xFF, 0x00, 0x81]]);
  }

  #[test]
  fn t_comments_are_ignored() {
    let src = "// 0x11\n/* 0x22\n 0x33 */ 0x44";
    assert_eq!(parse_chunks(src).unwrap(), vec![vec![0x44]]);
  }

  #[test]
  fn t_block_opener_inside_line_comment() {
    let src = "// legacy: /* old table\n{0x01, 0x02},\n{0x03}, // end */\n";
    assert_eq!(parse_chunks(src).unwrap(), vec![vec![1, 2], vec![3]]);
  }

  #[test]
  fn t_line_opener_inside_block_comment() {
    let src = "/* see http://example.org { 0x99 } */\n{0x0A}, {0x0B}";
    assert_eq!(parse_chunks(src).unwrap(), vec![vec![0x0A], vec![0x0B]]);
  }

  #[test]
  fn t_comment_separates_literals() {
    assert_eq!(parse_chunks("0x01/**/0x02").unwrap(), vec![vec![0x01, 0x02]]);
  }

  #[test]
  fn t_no_data() {
    let err = parse_chunks("int x = 5; { 1, 2, 3 }").unwrap_err();
    assert!(err.to_string().contains("no data found"));
  }

  #[test]
  fn t_wide_literal_rejected() {
    let err = parse_chunks("{0x01}, {0x1FF}").unwrap_err();
    assert!(err.to_string().contains("chunk 1"), "{err}");
    assert!(parse_chunks("0x123456789ABCDEF").is_err());
  }
}
