// Signatures of the binary formats recognized, checked in order.
const MAGIC_NUMBERS: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b", "application/gzip"),
    (b"BM", "image/bmp"),
    (b"\x00\x00\x01\x00", "image/x-icon"),
    (b"OggS", "audio/ogg"),
    (b"fLaC", "audio/flac"),
    (b"ID3", "audio/mpeg"),
    (b"\x00asm", "application/wasm"),
    (b"\x7fELF", "application/x-executable"),
];

/// Guess the media type of `content`, returned as `type/subtype` followed by
/// a `charset` parameter for text.
///
/// Known binary signatures are matched first.  Content without any control
/// character other than whitespace is text: `us-ascii` when every byte is
/// ASCII, `utf-8` when it decodes as UTF-8.  Anything else is
/// `application/octet-stream`.
pub(crate) fn sniff(content: &[u8]) -> &'static str {
    if let Some((_, media_type)) = MAGIC_NUMBERS
        .iter()
        .find(|(magic, _)| content.starts_with(magic))
    {
        return media_type;
    }
    if content.len() >= 12 && &content[..4] == b"RIFF" && &content[8..12] == b"WEBP" {
        return "image/webp";
    }
    if content.iter().any(|&b| is_binary_control(b)) {
        return "application/octet-stream";
    }
    if content.is_ascii() {
        "text/plain;charset=us-ascii"
    } else if std::str::from_utf8(content).is_ok() {
        "text/plain;charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

fn is_binary_control(b: u8) -> bool {
    b.is_ascii_control() && !matches!(b, b'\t' | b'\n' | b'\r' | b'\x0c')
}
