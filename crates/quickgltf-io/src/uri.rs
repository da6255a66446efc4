//! Byte-source resolution for `uri` fields.
//!
//! A `data:` URI is decoded in place; anything else is a path relative to the
//! document's directory and is only recorded here, never opened.

use std::path::Path;

use quickgltf_core::base64_codec;
use quickgltf_core::{DataSource, GltfError, MimeType, Result};

/// Classifies `uri` and produces its data source.
///
/// `portable` selects the portable base64 decoder.
pub fn decode_uri(uri: &str, directory: &Path, portable: bool) -> Result<DataSource> {
    match uri.strip_prefix("data:") {
        Some(rest) => decode_data_uri(rest, portable),
        None => {
            let relative = String::from_utf8(percent_decode(uri)).map_err(|_| {
                GltfError::invalid(format!("URI is not valid UTF-8 once decoded: {}", uri))
            })?;
            let path = directory.join(relative);
            let mime_type = MimeType::from_extension(&path);
            Ok(DataSource::FilePath { path, byte_range: None, mime_type })
        }
    }
}

// Format: data:<mediatype>;base64,<data>
fn decode_data_uri(rest: &str, portable: bool) -> Result<DataSource> {
    let semicolon = rest
        .find(';')
        .ok_or_else(|| GltfError::invalid("Invalid data URI: no ';' after the media type"))?;
    let comma = rest[semicolon + 1..]
        .find(',')
        .map(|pos| semicolon + 1 + pos)
        .ok_or_else(|| GltfError::invalid("Invalid data URI: no ',' before the payload"))?;

    let encoding = &rest[semicolon + 1..comma];
    if encoding != "base64" {
        return Err(GltfError::restricted(format!(
            "Unsupported data URI encoding: {:?}",
            encoding
        )));
    }

    let mime_type = MimeType::from_mime_str(&rest[..semicolon]);
    let bytes = base64_codec::decode_with(&rest[comma + 1..], portable)?;
    Ok(DataSource::Vector { bytes, mime_type })
}

fn percent_decode(input: &str) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                output.push((h << 4) | l);
                i += 3;
                continue;
            }
        }
        output.push(bytes[i]);
        i += 1;
    }

    output
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
