//! Google encoded-polyline decoding.
//!
//! MBTA shapes carry their geometry as Google-encoded polylines at
//! precision 5 (coordinates scaled by 1e5, delta-encoded, 5 bits per
//! chunk). This module decodes an encoded string into lat/lng points so
//! the map layer never needs a decoder of its own.

use serde::Serialize;

/// A decoded coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Error returned for a malformed encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// A byte outside the valid encoding alphabet (`?`..`~`)
    #[error("invalid polyline character {byte:#04x} at offset {offset}")]
    InvalidChar { byte: u8, offset: usize },

    /// Input ended in the middle of a varint chunk sequence
    #[error("truncated polyline: input ended mid-coordinate")]
    Truncated,

    /// A value ran past the width of the accumulator
    #[error("overlong polyline value ending at offset {offset}")]
    Overlong { offset: usize },
}

/// Decode one varint-style value starting at `*pos`, advancing it.
fn decode_value(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*pos) else {
            return Err(PolylineError::Truncated);
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidChar {
                byte,
                offset: *pos,
            });
        }
        *pos += 1;

        // A real precision-5 value fits in seven chunks; an unbroken
        // continuation run would otherwise shift past the accumulator.
        if shift >= 64 {
            return Err(PolylineError::Overlong { offset: *pos });
        }

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    // Low bit is the sign; the rest is the magnitude
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

/// Decode an encoded polyline (precision 5) into coordinates.
///
/// An empty string decodes to an empty point list.
///
/// # Examples
///
/// ```
/// use transfer_server::polyline::decode_polyline;
///
/// let points = decode_polyline("_p~iF~ps|U").unwrap();
/// assert_eq!(points.len(), 1);
/// assert!((points[0].lat - 38.5).abs() < 1e-9);
/// assert!((points[0].lng + 120.2).abs() < 1e-9);
/// ```
pub fn decode_polyline(encoded: &str) -> Result<Vec<LatLng>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut pos = 0;

    let mut points = Vec::new();
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while pos < bytes.len() {
        lat += decode_value(bytes, &mut pos)?;
        lng += decode_value(bytes, &mut pos)?;

        points.push(LatLng {
            lat: lat as f64 / 1e5,
            lng: lng as f64 / 1e5,
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: LatLng, lat: f64, lng: f64) {
        assert!(
            (actual.lat - lat).abs() < 1e-9 && (actual.lng - lng).abs() < 1e-9,
            "expected ({lat}, {lng}), got ({}, {})",
            actual.lat,
            actual.lng
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(decode_polyline("").unwrap(), vec![]);
    }

    #[test]
    fn reference_polyline() {
        // The worked example from the encoding spec
        let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        assert_eq!(points.len(), 3);
        assert_close(points[0], 38.5, -120.2);
        assert_close(points[1], 40.7, -120.95);
        assert_close(points[2], 43.252, -126.453);
    }

    #[test]
    fn single_point() {
        let points = decode_polyline("_p~iF~ps|U").unwrap();
        assert_eq!(points.len(), 1);
        assert_close(points[0], 38.5, -120.2);
    }

    #[test]
    fn zero_deltas() {
        // "??" encodes (0, 0)
        let points = decode_polyline("??").unwrap();
        assert_eq!(points.len(), 1);
        assert_close(points[0], 0.0, 0.0);
    }

    #[test]
    fn truncated_input_is_rejected() {
        // A latitude with no longitude following it
        assert_eq!(decode_polyline("_p~iF").unwrap_err(), PolylineError::Truncated);

        // Continuation bit set on the final byte
        assert_eq!(decode_polyline("_").unwrap_err(), PolylineError::Truncated);
    }

    #[test]
    fn unbroken_continuation_run_is_rejected() {
        // Every byte keeps the continuation bit set, so the value never
        // terminates; the decoder must reject it rather than shift past
        // the accumulator.
        let err = decode_polyline(&"~".repeat(14)).unwrap_err();
        assert!(matches!(err, PolylineError::Overlong { .. }));

        // Same run with a terminator is still far too wide
        let mut encoded = "~".repeat(20);
        encoded.push('?');
        let err = decode_polyline(&encoded).unwrap_err();
        assert!(matches!(err, PolylineError::Overlong { .. }));
    }

    #[test]
    fn invalid_character_is_rejected() {
        let err = decode_polyline("_p~iF\npq").unwrap_err();
        assert!(matches!(err, PolylineError::InvalidChar { byte: b'\n', .. }));
    }
}
