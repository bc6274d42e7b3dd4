//! Content sniffing - MIME classification from a buffer's leading bytes.
//!
//! Classification never looks at filenames or declared content types. A
//! buffer that matches no known signature is reported as
//! `application/octet-stream` so the caller can reject it explicitly.

use stikerin_core::Classification;

/// Number of leading bytes searched for container DocType markers
const EBML_SCAN_LIMIT: usize = 64;
/// MPEG transport stream packet size
const TS_PACKET_SIZE: usize = 188;

/// Classify a buffer by its magic bytes.
pub fn classify(data: &[u8]) -> Classification {
    match detect_from_magic(data) {
        Some((mime, extension)) => Classification::new(mime, extension),
        None => Classification::octet_stream(),
    }
}

/// Detect (mime, extension) from magic bytes.
fn detect_from_magic(data: &[u8]) -> Option<(&'static str, &'static str)> {
    if data.len() < 4 {
        return None;
    }

    // Box-structured containers go first: a 256-byte leading box starts
    // with the same four bytes as an ICO header
    detect_iso_bmff(data)
        .or_else(|| detect_image(data))
        .or_else(|| detect_riff(data))
        .or_else(|| detect_video(data))
        .or_else(|| detect_other(data))
}

fn detect_image(data: &[u8]) -> Option<(&'static str, &'static str)> {
    // PNG
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(("image/png", "png"));
    }

    // JPEG
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(("image/jpeg", "jpg"));
    }

    // GIF
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some(("image/gif", "gif"));
    }

    // TIFF, little and big endian
    if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
    {
        return Some(("image/tiff", "tif"));
    }

    // BMP: "BM" followed by a plausible header
    if data.len() >= 14 && data.starts_with(b"BM") && data[6..10] == [0, 0, 0, 0] {
        return Some(("image/bmp", "bmp"));
    }

    // ICO
    if data.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
        return Some(("image/x-icon", "ico"));
    }

    // JPEG XL codestream and container
    if data.starts_with(&[0xFF, 0x0A])
        || data.starts_with(&[
            0x00, 0x00, 0x00, 0x0C, 0x4A, 0x58, 0x4C, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
        ])
    {
        return Some(("image/jxl", "jxl"));
    }

    // Photoshop
    if data.starts_with(b"8BPS") {
        return Some(("image/vnd.adobe.photoshop", "psd"));
    }

    None
}

/// ISO base media file format: MP4, QuickTime, 3GP, AVIF, HEIF, M4A.
fn detect_iso_bmff(data: &[u8]) -> Option<(&'static str, &'static str)> {
    if data.len() < 8 {
        return None;
    }

    let box_type = &data[4..8];

    // QuickTime files without a leading ftyp box
    if matches!(box_type, b"moov" | b"mdat" | b"free" | b"wide") {
        return Some(("video/quicktime", "mov"));
    }

    if box_type != b"ftyp" {
        return None;
    }

    if data.len() < 12 {
        return Some(("video/mp4", "mp4"));
    }

    let brand = &data[8..12];
    let detected = match brand {
        b"avif" | b"avis" => ("image/avif", "avif"),
        b"heic" | b"heix" | b"hevc" | b"hevx" | b"heim" | b"heis" => ("image/heic", "heic"),
        b"mif1" | b"msf1" => ("image/heif", "heif"),
        b"qt  " => ("video/quicktime", "mov"),
        b"M4A " | b"M4B " | b"M4P " => ("audio/mp4", "m4a"),
        b"M4V " | b"M4VH" | b"M4VP" => ("video/x-m4v", "m4v"),
        _ if brand.starts_with(b"3g2") => ("video/3gpp2", "3g2"),
        _ if brand.starts_with(b"3gp") => ("video/3gpp", "3gp"),
        _ => ("video/mp4", "mp4"),
    };

    Some(detected)
}

/// RIFF containers: WebP, AVI, WAV.
fn detect_riff(data: &[u8]) -> Option<(&'static str, &'static str)> {
    if data.len() < 12 || &data[0..4] != b"RIFF" {
        return None;
    }

    match &data[8..12] {
        b"WEBP" => Some(("image/webp", "webp")),
        b"AVI " => Some(("video/x-msvideo", "avi")),
        b"WAVE" => Some(("audio/wav", "wav")),
        _ => None,
    }
}

fn detect_video(data: &[u8]) -> Option<(&'static str, &'static str)> {
    // EBML: WebM or Matroska, told apart by the DocType element
    if data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        let header = &data[..data.len().min(EBML_SCAN_LIMIT)];
        if contains(header, b"webm") {
            return Some(("video/webm", "webm"));
        }
        return Some(("video/x-matroska", "mkv"));
    }

    // Flash video
    if data.starts_with(b"FLV\x01") {
        return Some(("video/x-flv", "flv"));
    }

    // MPEG program stream / elementary video stream
    if data.starts_with(&[0x00, 0x00, 0x01, 0xBA]) || data.starts_with(&[0x00, 0x00, 0x01, 0xB3])
    {
        return Some(("video/mpeg", "mpg"));
    }

    // MPEG transport stream: sync byte repeated every packet
    if data[0] == 0x47 && data.len() > TS_PACKET_SIZE && data[TS_PACKET_SIZE] == 0x47 {
        return Some(("video/mp2t", "mts"));
    }

    // ASF / WMV
    if data.starts_with(&[0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11]) {
        return Some(("video/x-ms-asf", "wmv"));
    }

    // Ogg: video only when the first page carries a Theora or OGM video header
    if data.starts_with(b"OggS") {
        if data.len() >= 35 && (&data[28..35] == b"\x80theora" || &data[28..34] == b"\x01video")
        {
            return Some(("video/ogg", "ogv"));
        }
        return Some(("audio/ogg", "ogg"));
    }

    None
}

/// Well-known signatures that must never reach a transform.
fn detect_other(data: &[u8]) -> Option<(&'static str, &'static str)> {
    if data.starts_with(b"%PDF") {
        return Some(("application/pdf", "pdf"));
    }

    if data.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
        return Some(("application/zip", "zip"));
    }

    if data.starts_with(&[0x1F, 0x8B, 0x08]) {
        return Some(("application/gzip", "gz"));
    }

    if data.starts_with(b"fLaC") {
        return Some(("audio/x-flac", "flac"));
    }

    // MP3: ID3 tag or a bare MPEG audio frame sync
    if data.starts_with(b"ID3") || (data[0] == 0xFF && (data[1] & 0xE0) == 0xE0) {
        return Some(("audio/mpeg", "mp3"));
    }

    None
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
