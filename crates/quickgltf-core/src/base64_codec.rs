//! Base64 decoding for data URIs.
//!
//! [`decode`] uses the optimized engine of the `base64` crate; [`fallback_decode`]
//! is a portable table-driven decoder for environments where the accelerated
//! path must be avoided. Both accept padded and unpadded input.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::error::{GltfError, Result};

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// Maps ASCII to sextet values, -1 for characters outside the alphabet.
const DECODE_TABLE: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, 62, -1, -1,
    -1, 63, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, -1, -1, -1, -1, -1, -1, -1, 0, 1, 2, 3, 4,
    5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, -1, -1, -1,
    -1, -1, -1, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45,
    46, 47, 48, 49, 50, 51, -1, -1, -1, -1, -1,
];

/// Decodes with the accelerated engine.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    ENGINE
        .decode(input)
        .map_err(|e| GltfError::invalid(format!("Invalid base64 payload: {}", e)))
}

/// Decodes with the portable decoder.
///
/// Accepts exactly the inputs [`decode`] accepts: no whitespace, padding only
/// to complete the last quantum, and zero bits below the last decoded byte.
pub fn fallback_decode(input: &str) -> Result<Vec<u8>> {
    let input = input.as_bytes();

    let data_len = input
        .iter()
        .rposition(|&b| b != b'=')
        .map_or(0, |last| last + 1);
    let padding = input.len() - data_len;
    let remainder = data_len % 4;
    if padding > 0 && (remainder < 2 || remainder + padding > 4) {
        return Err(GltfError::invalid("Invalid base64 padding"));
    }
    let data = &input[..data_len];

    let mut output = Vec::with_capacity(data.len() * 3 / 4);
    for chunk in data.chunks(4) {
        if chunk.len() == 1 {
            return Err(GltfError::invalid("Truncated base64 payload"));
        }

        let mut n = 0u32;
        for (i, &byte) in chunk.iter().enumerate() {
            n |= (sextet(byte)? as u32) << (18 - 6 * i);
        }

        let trailing_bits = match chunk.len() {
            2 => n & 0xFFFF,
            3 => n & 0xFF,
            _ => 0,
        };
        if trailing_bits != 0 {
            return Err(GltfError::invalid("Invalid base64 payload: non-zero trailing bits"));
        }

        output.push((n >> 16) as u8);
        if chunk.len() > 2 {
            output.push((n >> 8) as u8);
        }
        if chunk.len() > 3 {
            output.push(n as u8);
        }
    }

    Ok(output)
}

/// Decodes with the portable decoder when `portable` is set, otherwise with the accelerated one.
pub fn decode_with(input: &str, portable: bool) -> Result<Vec<u8>> {
    if portable {
        fallback_decode(input)
    } else {
        decode(input)
    }
}

fn sextet(byte: u8) -> Result<u8> {
    let val = if byte < 128 { DECODE_TABLE[byte as usize] } else { -1 };
    if val < 0 {
        return Err(GltfError::invalid(format!(
            "Invalid base64 character: {:?}",
            byte as char
        )));
    }
    Ok(val as u8)
}
