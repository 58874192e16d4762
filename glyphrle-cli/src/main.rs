mod atlas;
mod logging;
mod render;
mod source;
mod template;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use glyphrle::{BitWidth, Compressed, Mode, compress, quantize, threshold_bits, unpack};
use std::{fs, path::PathBuf};

use crate::render::CompressResult;

// ---------------------------------------------
// glyphrle: glyph RLE builder CLI
// Inputs:
//   1) --input <file.c>                     -> hex literals, one chunk per { } group
//   2) --image <png> --glyph-width <px>     -> atlas strip, one chunk per cell
// Produces: C source with compressed_data[], data_offsets[] (multi-chunk) and a
// matching decoder; optional JSON report.
// ---------------------------------------------
#[derive(Parser, Debug)]
#[command(name = "glyphrle", author, version, about = "glyphrle: RLE-compress glyph bitmaps and emit a C decoder", long_about = None)]
struct Cli {
  /// C/C++ source (or any text) holding 0x.. byte literals [alternative to --image]
  #[arg(short = 'i', long = "input")]
  input: Option<PathBuf>,

  /// Atlas image: one row of equally wide glyph cells [alternative to --input]
  #[arg(long = "image")]
  image: Option<PathBuf>,

  /// Cell width in pixels (required with --image)
  #[arg(long = "glyph-width")]
  glyph_width: Option<u32>,

  /// Encoding mode: RLE_8_8, RLE_4_4, BIT_STREAM_8, BIT_STREAM_4
  /// (aliases: rle88, rle44, bit8, bit4)
  #[arg(short, long, default_value = "RLE_8_8", value_parser = parse_mode)]
  mode: Mode,

  /// Source bits per pixel: 1, 2, 4 or 8
  #[arg(short, long = "bpp", default_value_t = 8)]
  bpp: u8,

  /// Output C file (stdout when omitted)
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Also write a JSON report (sizes, offsets, rendered text)
  #[arg(long = "json")]
  json: Option<PathBuf>,

  /// Decode every chunk again and compare with the source pixels
  #[arg(long = "verify", default_value_t = false)]
  verify: bool,

  /// Free-form stamp (e.g. a date) for the decoder header
  #[arg(long = "stamp")]
  stamp: Option<String>,

  /// Log as JSON lines instead of compact text
  #[arg(long = "log-json", default_value_t = false)]
  log_json: bool,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
  s.parse().map_err(|e: glyphrle::Error| e.to_string())
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  logging::setup_logging(cli.log_json);

  let bpp = BitWidth::try_from(cli.bpp)?;
  let chunks = load_chunks(&cli, bpp)?;

  let compressed = compress(&chunks, cli.mode, bpp);
  if cli.verify {
    verify(&chunks, &compressed)?;
    tracing::info!(chunks = chunks.len(), "verified round trip");
  }

  let result = CompressResult::new(&compressed, cli.stamp.as_deref());
  let text = result.to_source();
  match &cli.output {
    Some(path) => fs::write(path, &text).with_context(|| format!("write {:?}", path))?,
    None => println!("{text}"),
  }
  if let Some(path) = &cli.json {
    let json = serde_json::to_string_pretty(&result)?;
    fs::write(path, json).with_context(|| format!("write {:?}", path))?;
  }

  eprintln!("{}", result.summary());
  Ok(())
}

fn load_chunks(cli: &Cli, bpp: BitWidth) -> Result<Vec<Vec<u8>>> {
  match (&cli.input, &cli.image) {
    (Some(_), Some(_)) => bail!("Specify either --input or --image/--glyph-width, not both"),
    (Some(path), None) => {
      let text = fs::read_to_string(path).with_context(|| format!("read source {:?}", path))?;
      source::parse_chunks(&text).with_context(|| format!("parse {:?}", path))
    }
    (None, Some(path)) => {
      let glyph_w = cli.glyph_width.ok_or_else(|| anyhow!("--glyph-width is required with --image"))?;
      let bytes = fs::read(path).with_context(|| format!("read image {:?}", path))?;
      let atlas = atlas::Atlas::decode(&bytes).with_context(|| format!("decode image {:?}", path))?;
      atlas.glyph_chunks(glyph_w, bpp)
    }
    (None, None) => bail!("one of --input or --image is required"),
  }
}

/// Decode each chunk from the blob and compare with what the decoder must produce.
fn verify(chunks: &[Vec<u8>], compressed: &Compressed) -> Result<()> {
  let mode = compressed.mode();
  for (i, raw) in chunks.iter().enumerate() {
    let mut pixels = unpack(raw, compressed.width());
    if mode == Mode::ValueRunPacked {
      quantize(&mut pixels, compressed.width());
    }
    let want = if mode.is_bit_run() { threshold_bits(&pixels) } else { pixels.clone() };
    let mut out = vec![0u8; mode.decoded_len(pixels.len())];
    compressed.decode_chunk(i, &mut out).with_context(|| format!("chunk {i}"))?;
    if out != want {
      let at = out.iter().zip(&want).position(|(a, b)| a != b).unwrap_or(0);
      bail!("chunk {i}: round trip mismatch at output byte {at}");
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::{Cli, load_chunks, verify};
  use clap::Parser;
  use glyphrle::{BitWidth, Mode, compress};
  use test_case::test_case;

  #[test_case(Mode::ValueRunWide ; "rle88")]
  #[test_case(Mode::ValueRunPacked ; "rle44")]
  #[test_case(Mode::BitRunWide ; "bit8")]
  #[test_case(Mode::BitRunPacked ; "bit4")]
  fn t_verify_accepts_every_mode(mode: Mode) {
    let chunks = vec![vec![0x00, 0x18, 0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x00, 0x00], vec![0xFF; 40], vec![0x80]];
    for bpp in [BitWidth::One, BitWidth::Two, BitWidth::Four, BitWidth::Eight] {
      let c = compress(&chunks, mode, bpp);
      verify(&chunks, &c).unwrap();
    }
  }

  #[test]
  fn t_verify_detects_wrong_source() {
    let c = compress(&[vec![0x11u8; 4]], Mode::ValueRunWide, BitWidth::Eight);
    assert!(verify(&[vec![0x12u8; 4]], &c).is_err());
  }

  #[test]
  fn t_cli_args() {
    let cli = Cli::try_parse_from(["glyphrle", "-i", "font.c", "-m", "bit4", "-b", "1", "--verify"]).unwrap();
    assert_eq!(cli.mode, Mode::BitRunPacked);
    assert_eq!(cli.bpp, 1);
    assert!(cli.verify);

    let cli = Cli::try_parse_from(["glyphrle", "-i", "font.c"]).unwrap();
    assert_eq!(cli.mode, Mode::ValueRunWide);
    assert_eq!(cli.bpp, 8);

    assert!(Cli::try_parse_from(["glyphrle", "-i", "font.c", "--mode", "lzw"]).is_err());
  }

  fn load_err(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    load_chunks(&cli, BitWidth::Eight).unwrap_err().to_string()
  }

  #[test]
  fn t_input_and_image_conflict() {
    let err = load_err(&["glyphrle", "-i", "font.c", "--image", "atlas.png", "--glyph-width", "8"]);
    assert!(err.contains("not both"), "{err}");
  }

  #[test]
  fn t_no_input() {
    let err = load_err(&["glyphrle"]);
    assert!(err.contains("one of --input or --image is required"), "{err}");
  }

  #[test]
  fn t_image_needs_glyph_width() {
    let err = load_err(&["glyphrle", "--image", "atlas.png"]);
    assert!(err.contains("--glyph-width is required"), "{err}");
  }
}
