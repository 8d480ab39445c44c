//! Encoded polyline format as used by the Google Maps APIs.
//!
//! Every coordinate is stored as the delta to its predecessor, scaled by
//! `10^5`, zig-zag encoded and split into 5-bit chunks offset by 63.

use std::error;
use std::fmt;

use crate::geo::Coordinate;

const PRECISION: f64 = 1e5;
const CHUNK_OFFSET: u8 = 63;
const CONTINUATION_BIT: u64 = 0x20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The string ended in the middle of a value.
    Truncated { offset: usize },
    /// A byte outside the `?`..`~` range.
    InvalidCharacter { offset: usize, character: char },
    /// A value spans more chunks than fit into 64 bits, or the running sum
    /// of deltas does.
    Overflow { offset: usize },
    /// The point starting at `offset` is not a valid latitude/longitude.
    OutOfRange { offset: usize },
}

impl error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::Truncated { offset } => {
                write!(f, "polyline truncated at byte {}", offset)
            }
            DecodeError::InvalidCharacter { offset, character } => {
                write!(
                    f,
                    "invalid polyline character {:?} at byte {}",
                    character, offset
                )
            }
            DecodeError::Overflow { offset } => {
                write!(f, "polyline value overflows at byte {}", offset)
            }
            DecodeError::OutOfRange { offset } => {
                write!(f, "polyline point at byte {} is outside the globe", offset)
            }
        }
    }
}

fn decode_value(bytes: &[u8], offset: &mut usize) -> Result<i64, DecodeError> {
    let mut result: u64 = 0;
    let mut shift = 0;
    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(DecodeError::Truncated { offset: *offset });
        };
        if !(CHUNK_OFFSET..=b'~').contains(&byte) {
            return Err(DecodeError::InvalidCharacter {
                offset: *offset,
                character: byte as char,
            });
        }
        if shift >= 64 {
            return Err(DecodeError::Overflow { offset: *offset });
        }
        let chunk = (byte - CHUNK_OFFSET) as u64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *offset += 1;
        if chunk < CONTINUATION_BIT {
            break;
        }
    }
    // undo zig-zag
    let value = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !value } else { value })
}

fn accumulate(total: i64, bytes: &[u8], offset: &mut usize) -> Result<i64, DecodeError> {
    let start = *offset;
    let delta = decode_value(bytes, offset)?;
    total
        .checked_add(delta)
        .ok_or(DecodeError::Overflow { offset: start })
}

/// Decodes a polyline into its coordinates, in order.
///
/// Fails on points outside of ±90° latitude or ±180° longitude.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut offset = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;
    let mut points = vec![];

    while offset < bytes.len() {
        let start = offset;
        latitude = accumulate(latitude, bytes, &mut offset)?;
        longitude = accumulate(longitude, bytes, &mut offset)?;
        let point = Coordinate::new(latitude as f64 / PRECISION, longitude as f64 / PRECISION);
        if point.latitude.abs() > 90.0 || point.longitude.abs() > 180.0 {
            return Err(DecodeError::OutOfRange { offset: start });
        }
        points.push(point);
    }

    Ok(points)
}

fn encode_value(value: i64, output: &mut String) {
    let mut value = if value < 0 {
        !((value as u64) << 1)
    } else {
        (value as u64) << 1
    };
    while value >= CONTINUATION_BIT {
        output.push(((CONTINUATION_BIT | (value & 0x1f)) as u8 + CHUNK_OFFSET) as char);
        value >>= 5;
    }
    output.push((value as u8 + CHUNK_OFFSET) as char);
}

/// Encodes coordinates with five decimal places of precision.
pub fn encode(points: &[Coordinate]) -> String {
    let mut output = String::new();
    let mut previous = (0i64, 0i64);
    for point in points {
        let latitude = (point.latitude * PRECISION).round() as i64;
        let longitude = (point.longitude * PRECISION).round() as i64;
        encode_value(latitude - previous.0, &mut output);
        encode_value(longitude - previous.1, &mut output);
        previous = (latitude, longitude);
    }
    output
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    // example from the format documentation
    const DOCUMENTED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn decodes_documented_example() {
        let points = decode(DOCUMENTED).unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        assert_eq!(points.len(), expected.len());
        for (point, (latitude, longitude)) in points.iter().zip(expected) {
            assert_abs_diff_eq!(point.latitude, latitude, epsilon = 1e-9);
            assert_abs_diff_eq!(point.longitude, longitude, epsilon = 1e-9);
        }
    }

    #[test]
    fn encodes_documented_example() {
        let points = [
            Coordinate::new(38.5, -120.2),
            Coordinate::new(40.7, -120.95),
            Coordinate::new(43.252, -126.453),
        ];
        assert_eq!(encode(&points), DOCUMENTED);
    }

    #[test]
    fn empty_string_has_no_points() {
        assert_eq!(decode("").unwrap(), vec![]);
    }

    #[test]
    fn missing_longitude_is_truncated() {
        // "_p~iF" is a complete latitude without a longitude
        assert_eq!(decode("_p~iF"), Err(DecodeError::Truncated { offset: 5 }));
    }

    #[test]
    fn unfinished_chunk_is_truncated() {
        assert_eq!(decode("_p~"), Err(DecodeError::Truncated { offset: 3 }));
    }

    #[test]
    fn rejects_characters_below_offset() {
        assert_eq!(
            decode("_p iF"),
            Err(DecodeError::InvalidCharacter {
                offset: 2,
                character: ' '
            })
        );
    }

    #[test]
    fn rejects_endless_continuation() {
        let encoded = "~".repeat(20);
        assert!(matches!(
            decode(&encoded),
            Err(DecodeError::Overflow { .. })
        ));
    }

    #[test]
    fn huge_deltas_are_rejected() {
        // "~" * 12 + "^" decodes to i64::MIN, "?" to zero
        let encoded = format!("{}^?", "~".repeat(12)).repeat(2);
        assert_eq!(
            decode(&encoded),
            Err(DecodeError::OutOfRange { offset: 0 })
        );
    }

    #[test]
    fn running_sum_overflow_is_reported() {
        let mut encoded = String::new();
        encode_value(1, &mut encoded);
        let mut offset = 0;
        assert_eq!(
            accumulate(i64::MAX, encoded.as_bytes(), &mut offset),
            Err(DecodeError::Overflow { offset: 0 })
        );
        let mut offset = 0;
        assert_eq!(accumulate(41, encoded.as_bytes(), &mut offset), Ok(42));
    }

    #[test]
    fn rejects_coordinates_outside_the_globe() {
        let inside = Coordinate::new(57.0, 9.9);
        let north = Coordinate::new(90.5, 9.9);
        let east = Coordinate::new(57.0, 180.5);

        let encoded = encode(&[inside, north]);
        let second = encode(&[inside]).len();
        assert_eq!(
            decode(&encoded),
            Err(DecodeError::OutOfRange { offset: second })
        );
        assert_eq!(
            decode(&encode(&[east])),
            Err(DecodeError::OutOfRange { offset: 0 })
        );
        assert_eq!(decode(&encode(&[Coordinate::new(-90.0, -180.0)])).unwrap().len(), 1);
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(
            raw in prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 0..32)
        ) {
            let points = raw
                .into_iter()
                .map(Coordinate::from)
                .collect::<Vec<_>>();
            let decoded = decode(&encode(&points)).unwrap();
            prop_assert_eq!(decoded.len(), points.len());
            for (a, b) in decoded.iter().zip(&points) {
                prop_assert!((a.latitude - b.latitude).abs() <= 0.5e-5 + 1e-9);
                prop_assert!((a.longitude - b.longitude).abs() <= 0.5e-5 + 1e-9);
            }
        }
    }
}
