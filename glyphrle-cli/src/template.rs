//! Reference C decoder emitted next to the compressed arrays.
//!
//! Output depends only on the mode and on whether an offset table exists; the
//! blob itself is never inspected. Each decoder mirrors the matching Rust
//! decoder in `glyphrle` byte for byte: capacity is checked between pixel
//! writes, so the last unit may be read and only partly used.

use glyphrle::Mode;

/// Render the full decoder source.
///
/// `stamp` is an optional free-form line (e.g. a build date) for the header.
pub fn emit(mode: Mode, has_offsets: bool, stamp: Option<&str>) -> String {
  let mut blocks = vec![header(stamp), binary_search().to_owned()];
  if has_offsets {
    blocks.push(offsets_accessor().to_owned());
  }
  blocks.push(decoder(mode).to_owned());
  blocks.push(usage(mode, has_offsets));
  blocks.join("\n")
}

/// Name of the C decode function for `mode`.
pub fn decoder_name(mode: Mode) -> &'static str {
  match mode {
    Mode::ValueRunWide => "decode_rle_88",
    Mode::ValueRunPacked => "decode_rle_44",
    Mode::BitRunWide => "decode_bit_stream_8",
    Mode::BitRunPacked => "decode_bit_stream_4",
  }
}

fn header(stamp: Option<&str>) -> String {
  let mut s = String::from("/*\n * RLE glyph decoder\n");
  if let Some(stamp) = stamp {
    s.push_str(&format!(" * Generated: {stamp}\n"));
  }
  s.push_str(
    r#" * Generator: glyphrle
 *
 * Porting notes:
 * 1. Prefer <stdint.h> (uint8_t, uint32_t) for consistent widths across targets.
 * 2. compressed_data and data_offsets usually live in flash / rodata.
 * 3. Always pass the real destination size as max_dst_len / max_dst_bytes;
 *    decoding stops when it is reached.
 */

// Type aliases if <stdint.h> is unavailable
// typedef unsigned char  uint8_t;
// typedef unsigned short uint16_t;
// typedef unsigned int   uint32_t;
"#,
  );
  s
}

fn binary_search() -> &'static str {
  r#"/* =============================
 * Glyph index lookup (binary search)
 * ============================= */
/**
 * @brief Find the glyph index of a character code.
 *
 * @param code    character code (e.g. ASCII / Unicode)
 * @param charset sorted array of character codes
 * @param len     number of entries in charset
 * @return index into charset, or -1 when not found
 */
int get_glyph_index(unsigned short code, const unsigned short* charset, int len) {
    int left = 0;
    int right = len - 1;
    while (left <= right) {
        int mid = left + (right - left) / 2;
        if (charset[mid] == code) return mid;
        if (charset[mid] < code) left = mid + 1; else right = mid - 1;
    }
    return -1;
}
"#
}

fn offsets_accessor() -> &'static str {
  r#"/* =============================
 * Offset access
 * ============================= */
// Adjust these declarations to your project layout.
extern const unsigned char compressed_data[];
extern const unsigned int data_offsets[];
/**
 * @brief Start of the compressed stream for one glyph.
 * @param index glyph index (usually from get_glyph_index)
 * @return pointer into compressed_data, or 0 for a negative index
 */
const unsigned char* get_glyph_data(int index) {
    if (index < 0) return 0;
    // Change the addressing here if the data is split across sections.
    return &compressed_data[data_offsets[index]];
}
"#
}

fn decoder(mode: Mode) -> &'static str {
  match mode {
    Mode::ValueRunWide => {
      r#"/* =============================
 * RLE 8:8 decoder
 * ============================= */
/**
 * @brief Format: [count (8 bit)] [value (8 bit)]
 * @param src         compressed stream
 * @param dst         output, one byte per pixel
 * @param max_dst_len capacity of dst in bytes
 */
void decode_rle_88(const unsigned char* src, unsigned char* dst, int max_dst_len) {
    int src_idx = 0;
    int dst_idx = 0;
    while (dst_idx < max_dst_len) {
        unsigned char count = src[src_idx++];
        unsigned char val   = src[src_idx++];
        for (int i = 0; i < count; i++) {
            if (dst_idx >= max_dst_len) break;
            dst[dst_idx++] = val;
            // To draw directly instead of buffering:
            // PLOT_PIXEL(x++, y, val);
        }
    }
}
"#
    }
    Mode::ValueRunPacked => {
      r#"/* =============================
 * RLE 4:4 decoder
 * ============================= */
/**
 * @brief Format: [count - 1 (4 bit) | value (4 bit)] in one byte
 * 0x0N is a run of 1, 0xFN a run of 16, value N.
 * Output is one byte per pixel (0..15).
 */
void decode_rle_44(const unsigned char* src, unsigned char* dst, int max_dst_len) {
    int src_idx = 0;
    int dst_idx = 0;
    while (dst_idx < max_dst_len) {
        unsigned char byte  = src[src_idx++];
        unsigned char count = ((byte >> 4) & 0x0F) + 1;
        unsigned char val   = byte & 0x0F;
        for (int i = 0; i < count; i++) {
            if (dst_idx >= max_dst_len) break;
            dst[dst_idx++] = val;
            // PLOT_PIXEL(x++, y, val);
        }
    }
}
"#
    }
    Mode::BitRunWide => {
      r#"/* =============================
 * Bit stream 8 decoder (1bpp)
 * ============================= */
/**
 * @brief Alternating bit runs, one 8-bit count per byte.
 * The stream starts on 0. After a count < 255 the bit toggles;
 * a count of 255 keeps the bit for the next count.
 * Output is packed 1bpp, 8 pixels per byte, MSB first.
 */
void decode_bit_stream_8(const unsigned char* src, unsigned char* dst, int max_dst_bytes) {
    int src_idx = 0;
    int dst_byte_idx = 0;
    int dst_bit_pos  = 7;
    unsigned char current_byte = 0;
    unsigned char current_val  = 0;
    while (dst_byte_idx < max_dst_bytes) {
        unsigned char count = src[src_idx++];
        for (int i = 0; i < count; i++) {
            if (current_val) current_byte |= (1 << dst_bit_pos);
            // Per-pixel output: PLOT_PIXEL(x++, y, current_val);
            dst_bit_pos--;
            if (dst_bit_pos < 0) {
                dst[dst_byte_idx++] = current_byte;
                current_byte = 0;
                dst_bit_pos  = 7;
                if (dst_byte_idx >= max_dst_bytes) return;
            }
        }
        if (count < 255) current_val = !current_val;
    }
}
"#
    }
    Mode::BitRunPacked => {
      r#"/* =============================
 * Bit stream 4 decoder (1bpp)
 * ============================= */
/**
 * @brief Alternating bit runs, two 4-bit counts per byte (high nibble first).
 * After a count < 15 the bit toggles; a count of 15 keeps it.
 */
void decode_bit_stream_4(const unsigned char* src, unsigned char* dst, int max_dst_bytes) {
    int src_idx = 0;
    int dst_byte_idx = 0;
    int dst_bit_pos  = 7;
    unsigned char current_byte = 0;
    unsigned char current_val  = 0;
    while (dst_byte_idx < max_dst_bytes) {
        unsigned char byte = src[src_idx++];
        unsigned char counts[2];
        counts[0] = (byte >> 4) & 0x0F;
        counts[1] = byte & 0x0F;
        for (int k = 0; k < 2; k++) {
            unsigned char count = counts[k];
            for (int i = 0; i < count; i++) {
                if (current_val) current_byte |= (1 << dst_bit_pos);
                // PLOT_PIXEL(x++, y, current_val);
                dst_bit_pos--;
                if (dst_bit_pos < 0) {
                    dst[dst_byte_idx++] = current_byte;
                    current_byte = 0;
                    dst_bit_pos  = 7;
                    if (dst_byte_idx >= max_dst_bytes) return;
                }
            }
            if (count < 15) current_val = !current_val;
        }
    }
}
"#
    }
  }
}

fn usage(mode: Mode, has_offsets: bool) -> String {
  let src_line = if has_offsets {
    "    const unsigned char* src = get_glyph_data(idx);"
  } else {
    "    const unsigned char* src = compressed_data; // single item, no offset table"
  };
  let size = if mode.is_bit_run() { "(width * height + 7) / 8" } else { "width * height" };
  format!(
    r#"/* =============================
 * Usage (wire in your plot function)
 * ============================= */
/*
void YOUR_PLOT_FUNC(int x, int y, int val);
void example_render_glyph(unsigned short code, int x0, int y0, int width, int height) {{
    // const unsigned short* charset = ...; const int charset_len = ...;
    // int idx = get_glyph_index(code, charset, charset_len);
{src_line}
    // Decode into a scratch buffer or plot per pixel.
    // unsigned char* dst = frame_buffer + y0 * STRIDE + x0;
    // {name}(src, dst, {size});
    // Or call YOUR_PLOT_FUNC(x, y, val) inside the decode loop.
}}
*/
"#,
    name = decoder_name(mode),
  )
}
