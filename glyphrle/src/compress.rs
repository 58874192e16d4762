use alloc::vec::Vec;

use crate::{BitWidth, Error, Mode, quantize, unpack};

/// Many chunks (glyphs) encoded back-to-back into one blob.
///
/// `offsets[i]` is the sum of the encoded lengths of chunks `0..i`, so
/// `offsets[0] == 0` and the blob slice for chunk `i` ends where chunk `i + 1`
/// starts (or at the end of the blob).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compressed {
  mode: Mode,
  width: BitWidth,
  original_size: usize,
  blob: Vec<u8>,
  offsets: Vec<u32>,
}

/// Unpack, quantize (`RLE_4_4` only) and encode every chunk independently.
///
/// No state crosses a chunk boundary: value runs end and the bit-run target
/// resets to 0 at the start of every chunk. An empty chunk list yields an empty,
/// zero-sized result.
pub fn compress<C: AsRef<[u8]>>(chunks: &[C], mode: Mode, width: BitWidth) -> Compressed {
  let mut blob = Vec::new();
  let mut offsets = Vec::with_capacity(chunks.len());
  let mut original_size = 0usize;

  for (i, chunk) in chunks.iter().enumerate() {
    let raw = chunk.as_ref();
    original_size += raw.len();
    offsets.push(offset_u32(blob.len()));

    let mut pixels = unpack(raw, width);
    if mode == Mode::ValueRunPacked {
      quantize(&mut pixels, width);
    }
    let encoded = mode.encode(&pixels);
    log::trace!("chunk {}: {} bytes, {} px -> {} bytes", i, raw.len(), pixels.len(), encoded.len());
    blob.extend_from_slice(&encoded);
  }

  log::debug!(
    "{} chunk(s) {} @ {}bpp: {} -> {} bytes",
    chunks.len(),
    mode.label(),
    width.bits(),
    original_size,
    blob.len()
  );

  Compressed { mode, width, original_size, blob, offsets }
}

/// Offsets are emitted as `unsigned int`, so a blob is limited to `u32::MAX` bytes.
#[inline]
fn offset_u32(len: usize) -> u32 {
  debug_assert!(u32::try_from(len).is_ok(), "blob offset {len} exceeds u32");
  len as u32
}

impl Compressed {
  #[inline]
  pub fn mode(&self) -> Mode {
    self.mode
  }

  #[inline]
  pub fn width(&self) -> BitWidth {
    self.width
  }

  /// Total raw input bytes across all chunks.
  #[inline]
  pub fn original_size(&self) -> usize {
    self.original_size
  }

  #[inline]
  pub fn compressed_size(&self) -> usize {
    self.blob.len()
  }

  /// Space saved in percent, `(1 - compressed / original) * 100`.
  /// Negative when the encoding expands; 0 for empty input.
  pub fn ratio(&self) -> f64 {
    if self.original_size == 0 {
      return 0.0;
    }
    (1.0 - self.blob.len() as f64 / self.original_size as f64) * 100.0
  }

  #[inline]
  pub fn blob(&self) -> &[u8] {
    &self.blob
  }

  /// Start offset of every chunk, one entry per input chunk. Blobs past
  /// `u32::MAX` bytes are not supported.
  #[inline]
  pub fn offsets(&self) -> &[u32] {
    &self.offsets
  }

  /// The offset table as emitted: only present for more than one chunk.
  pub fn offset_table(&self) -> Option<&[u32]> {
    (self.offsets.len() > 1).then_some(self.offsets.as_slice())
  }

  #[inline]
  pub fn chunk_count(&self) -> usize {
    self.offsets.len()
  }

  /// Encoded bytes of chunk `index`.
  pub fn chunk(&self, index: usize) -> Option<&[u8]> {
    let start = *self.offsets.get(index)? as usize;
    let end = self.offsets.get(index + 1).map_or(self.blob.len(), |&o| o as usize);
    self.blob.get(start..end)
  }

  /// Decode chunk `index` into `dst` (sized with [`Mode::decoded_len`]).
  /// Returns pixels (value runs) or bits (bit runs) written.
  pub fn decode_chunk(&self, index: usize, dst: &mut [u8]) -> Result<usize, Error> {
    let src = self.chunk(index).ok_or(Error::ChunkOutOfRange)?;
    Ok(self.mode.decode(src, dst))
  }
}
