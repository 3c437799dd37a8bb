//! Fast image type probe based on file magic bytes.
//!
//! Used before any full decode when type checking is enabled, so that
//! misnamed non-image files are rejected cheaply during discovery.

use std::io::Read;
use std::path::Path;

/// Check whether a file looks like a decodable image, by header only.
///
/// Unreadable files are reported as non-images rather than errors; the
/// probe is a filter, not a validator.
pub fn looks_like_image(path: &Path) -> bool {
    let Ok(mut file) = std::fs::File::open(path) else {
        return false;
    };

    let mut header = [0u8; 12];
    let bytes_read = file.read(&mut header).unwrap_or(0);

    is_valid_image_header(&header, bytes_read)
}

/// Check if the header bytes match known image formats.
fn is_valid_image_header(header: &[u8; 12], bytes_read: usize) -> bool {
    if bytes_read < 4 {
        return false;
    }

    // JPEG: FF D8 FF
    if header[0] == 0xFF && header[1] == 0xD8 && header[2] == 0xFF {
        return true;
    }

    // PNG: 89 50 4E 47
    if header[0] == 0x89 && header[1] == b'P' && header[2] == b'N' && header[3] == b'G' {
        return true;
    }

    // GIF: GIF8
    if header[0] == b'G' && header[1] == b'I' && header[2] == b'F' && header[3] == b'8' {
        return true;
    }

    // WebP: RIFF....WEBP. Other RIFF containers (WAV, AVI) and headers
    // truncated below the WEBP tag are rejected.
    if header[0] == b'R' && header[1] == b'I' && header[2] == b'F' && header[3] == b'F' {
        return bytes_read >= 12
            && header[8] == b'W'
            && header[9] == b'E'
            && header[10] == b'B'
            && header[11] == b'P';
    }

    // BMP: BM
    if header[0] == b'B' && header[1] == b'M' {
        return true;
    }

    // TIFF: II (little-endian) or MM (big-endian) followed by version 42
    let is_tiff_le = header[0] == b'I' && header[1] == b'I' && header[2] == 0x2A && header[3] == 0x00;
    let is_tiff_be = header[0] == b'M' && header[1] == b'M' && header[2] == 0x00 && header[3] == 0x2A;
    if is_tiff_le || is_tiff_be {
        return true;
    }

    false
}
