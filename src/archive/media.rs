// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Media type detection and file extensions for archived images

use image::ImageFormat;

/// Media types we know a file extension for
const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/pjpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/avif", "avif"),
    ("image/bmp", "bmp"),
    ("image/x-ms-bmp", "bmp"),
    ("image/tiff", "tiff"),
    ("image/svg+xml", "svg"),
    ("image/x-icon", "ico"),
    ("image/vnd.microsoft.icon", "ico"),
    ("image/heic", "heic"),
    ("image/heif", "heif"),
];

/// Sniff the media type from the leading bytes of a raster image.
pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(bytes).ok()?;
    let mime = match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Avif => "image/avif",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        ImageFormat::Ico => "image/x-icon",
        _ => return None,
    };
    Some(mime)
}

/// Resolve the media type to store an image under.
///
/// Sniffed bytes win over the `Content-Type` header so that identical bytes
/// always map to the same key. Returns `None` when the result is not `image/*`.
pub fn resolve_media_type(bytes: &[u8], header: Option<&str>) -> Option<String> {
    if let Some(sniffed) = sniff_media_type(bytes) {
        return Some(sniffed.to_string());
    }

    header
        .map(|h| h.trim().to_ascii_lowercase())
        .filter(|h| h.starts_with("image/") && h.len() > "image/".len())
}

/// File extension for an image media type, `bin` for unknown image subtypes.
pub fn extension_for(media_type: &str) -> &'static str {
    IMAGE_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == media_type)
        .map(|(_, ext)| *ext)
        .unwrap_or("bin")
}
