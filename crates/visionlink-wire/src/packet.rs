use bytes::Bytes;

use crate::checksum::crc32;
use crate::cursor::Cursor;
use crate::error::{PacketError, Result};

/// Frame marker: every packet line starts with `"zz "` after optional
/// leading whitespace.
pub const FRAME_MARKER: &[u8] = b"zz ";

/// Maximum line length including the terminator. The sending side never
/// emits longer lines; truncation of longer input is owned by the line-read
/// primitive.
pub const MAX_LINE_LEN: usize = 128;

/// Heuristic minimum viable packet size: marker + one count digit + one
/// coordinate pair + checksum digits. A zero-count frame is legitimately
/// shorter and is exempted in [`decode_packet`].
pub const MIN_PACKET_LEN: usize = FRAME_MARKER.len() + 8;

/// One detected point: an immutable (x, y) coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Points decoded from one packet, in transmission order.
pub type TargetList = Vec<Point>;

// A 128-byte line cannot carry more pairs than this; caps the capacity
// reservation so a lying count field cannot trigger a huge allocation.
const MAX_POINT_CAPACITY: usize = MAX_LINE_LEN / 4;

/// Decode one packet line into its point list.
///
/// Wire format (ASCII decimal fields, whitespace separated):
/// ```text
/// ┌────────────┬─────────┬──────────────────────────┬────────────┐
/// │ Marker     │ Count   │ Coordinates              │ Checksum   │
/// │ "zz "      │ signed  │ x1 y1 x2 y2 ... xN yN    │ unsigned   │
/// └────────────┴─────────┴──────────────────────────┴────────────┘
/// ```
///
/// The checksum is the CRC32 of the exact transmitted coordinate span: the
/// bytes from one past the end of the count field to just past the last
/// coordinate digit. The span is checksummed as transmitted, separators
/// included — never re-serialized. For `count == 0` the span is empty.
///
/// Decoding is pure and never reads past the end of `line`; the trailing
/// newline must already be stripped.
pub fn decode_packet(line: &[u8]) -> Result<TargetList> {
    let mut cur = Cursor::new(line);

    cur.skip_whitespace();
    if !cur.expect(FRAME_MARKER) {
        if line.len() < MIN_PACKET_LEN {
            return Err(PacketError::TooShort {
                len: line.len(),
                min: MIN_PACKET_LEN,
            });
        }
        return Err(PacketError::BadHeader);
    }

    let Some(count) = cur.read_i32() else {
        if line.len() < MIN_PACKET_LEN {
            return Err(PacketError::TooShort {
                len: line.len(),
                min: MIN_PACKET_LEN,
            });
        }
        return Err(PacketError::BadField { pos: cur.pos() });
    };
    if count < 0 {
        return Err(PacketError::BadCount { count });
    }
    let count = count as usize;
    // The heuristic length floor assumes at least one coordinate pair; a
    // zero-count frame ("zz 0 <crc>") is complete below it.
    if count != 0 && line.len() < MIN_PACKET_LEN {
        return Err(PacketError::TooShort {
            len: line.len(),
            min: MIN_PACKET_LEN,
        });
    }

    // The single separator after the count is excluded from the payload
    // span; any further separators belong to it.
    let coords_start = (cur.pos() + 1).min(line.len());

    let mut points = Vec::with_capacity(count.min(MAX_POINT_CAPACITY));
    for _ in 0..count {
        let Some(x) = cur.read_i32() else {
            return Err(PacketError::Truncated {
                expected: count,
                parsed: points.len(),
            });
        };
        let Some(y) = cur.read_i32() else {
            return Err(PacketError::Truncated {
                expected: count,
                parsed: points.len(),
            });
        };
        points.push(Point::new(x, y));
    }
    let coords_end = if count == 0 { coords_start } else { cur.pos() };

    let Some(reported) = cur.read_u32() else {
        return Err(PacketError::BadField { pos: cur.pos() });
    };
    let computed = crc32(&line[coords_start..coords_end]);
    if reported != computed {
        return Err(PacketError::ChecksumMismatch { reported, computed });
    }

    Ok(points)
}

/// Encode a point list into a packet line, trailing newline included.
///
/// Fields are single-space separated; the checksum is computed over the
/// rendered coordinate substring, so the output decodes back to `points`.
pub fn encode_packet(points: &[Point]) -> Result<Bytes> {
    let body = points
        .iter()
        .map(|p| format!("{} {}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");
    let crc = crc32(body.as_bytes());

    let line = if body.is_empty() {
        format!("zz 0 {crc}\n")
    } else {
        format!("zz {} {body} {crc}\n", points.len())
    };
    if line.len() > MAX_LINE_LEN {
        return Err(PacketError::Oversize {
            len: line.len(),
            max: MAX_LINE_LEN,
        });
    }
    Ok(Bytes::from(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_two_point_packet() {
        // CRC32("10 20 30 40") == 3008523907
        let line = b"zz 2 10 20 30 40 3008523907";
        let points = decode_packet(line).unwrap();
        assert_eq!(points, vec![Point::new(10, 20), Point::new(30, 40)]);
    }

    #[test]
    fn decode_is_pure() {
        let line = b"zz 2 10 20 30 40 3008523907";
        assert_eq!(decode_packet(line).unwrap(), decode_packet(line).unwrap());
    }

    #[test]
    fn wrong_checksum_is_corrupt() {
        let line = b"zz 2 10 20 30 40 0";
        let err = decode_packet(line).unwrap_err();
        assert!(matches!(
            err,
            PacketError::ChecksumMismatch {
                reported: 0,
                computed: 3008523907,
            }
        ));
        assert!(!err.is_frame_reject());
    }

    #[test]
    fn bad_prefix_is_a_frame_reject() {
        let line = b"xx 2 10 20 30 40 3008523907";
        let err = decode_packet(line).unwrap_err();
        assert_eq!(err, PacketError::BadHeader);
        assert!(err.is_frame_reject());
    }

    #[test]
    fn below_minimum_is_a_frame_reject() {
        let err = decode_packet(b"zz 1").unwrap_err();
        assert!(matches!(err, PacketError::TooShort { len: 4, .. }));
        assert!(err.is_frame_reject());
    }

    #[test]
    fn zero_count_with_empty_span_checksum_is_valid() {
        // CRC32("") == 0
        let points = decode_packet(b"zz 0 0").unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn leading_whitespace_before_marker_is_skipped() {
        let line = b"  \tzz 2 10 20 30 40 3008523907";
        let points = decode_packet(line).unwrap();
        assert_eq!(points, vec![Point::new(10, 20), Point::new(30, 40)]);
    }

    #[test]
    fn extra_separators_stay_inside_the_span() {
        // Span starts one byte past the count field, so the second space
        // after the count and the doubled interior space are checksummed:
        // CRC32(" 10 20  30 40") == 2864580383
        let line = b"zz 2  10 20  30 40 2864580383";
        let points = decode_packet(line).unwrap();
        assert_eq!(points, vec![Point::new(10, 20), Point::new(30, 40)]);
    }

    #[test]
    fn negative_coordinates_decode() {
        // CRC32("-5 -6 1000000 -1000000") == 3602924058
        let line = b"zz 2 -5 -6 1000000 -1000000 3602924058";
        let points = decode_packet(line).unwrap();
        assert_eq!(points, vec![Point::new(-5, -6), Point::new(1_000_000, -1_000_000)]);
    }

    #[test]
    fn truncated_pair_list_is_malformed() {
        // Advertises 3 pairs, carries 1.
        let err = decode_packet(b"zz 3 10 20 99999").unwrap_err();
        assert!(matches!(
            err,
            PacketError::Truncated {
                expected: 3,
                parsed: _,
            }
        ));
        assert!(!err.is_frame_reject());
    }

    #[test]
    fn non_numeric_coordinate_is_malformed() {
        let err = decode_packet(b"zz 2 10 20 3a 40 12345").unwrap_err();
        assert!(matches!(err, PacketError::Truncated { .. }));
    }

    #[test]
    fn missing_checksum_field_is_malformed() {
        // CRC slot holds nothing after the last pair.
        let err = decode_packet(b"zz 1 10 20 ").unwrap_err();
        assert!(matches!(err, PacketError::BadField { .. }));
        assert!(!err.is_frame_reject());
    }

    #[test]
    fn negative_count_is_malformed() {
        let err = decode_packet(b"zz -1 10 20 12345").unwrap_err();
        assert_eq!(err, PacketError::BadCount { count: -1 });
        assert!(!err.is_frame_reject());
    }

    #[test]
    fn huge_count_fails_without_huge_allocation() {
        let err = decode_packet(b"zz 2000000000 1 2 3").unwrap_err();
        assert!(matches!(
            err,
            PacketError::Truncated {
                expected: 2_000_000_000,
                parsed: 1,
            }
        ));
    }

    #[test]
    fn roundtrip_reproduces_the_list() {
        let original = vec![
            Point::new(1, -1),
            Point::new(2, -2),
            Point::new(3, -3),
        ];
        let line = encode_packet(&original).unwrap();
        let stripped = &line[..line.len() - 1]; // drop the terminator
        assert_eq!(decode_packet(stripped).unwrap(), original);
    }

    #[test]
    fn roundtrip_empty_list() {
        let line = encode_packet(&[]).unwrap();
        assert_eq!(line.as_ref(), b"zz 0 0\n");
        assert!(decode_packet(&line[..line.len() - 1]).unwrap().is_empty());
    }

    #[test]
    fn roundtrip_single_point() {
        // CRC32("7 -3") == 3943653917
        let original = vec![Point::new(7, -3)];
        let line = encode_packet(&original).unwrap();
        assert_eq!(line.as_ref(), b"zz 1 7 -3 3943653917\n");
        assert_eq!(decode_packet(&line[..line.len() - 1]).unwrap(), original);
    }

    #[test]
    fn oversize_list_is_rejected_on_encode() {
        let points = vec![Point::new(-1_000_000_000, 1_000_000_000); 16];
        let err = encode_packet(&points).unwrap_err();
        assert!(matches!(err, PacketError::Oversize { max: MAX_LINE_LEN, .. }));
    }

    #[test]
    fn encoded_lines_fit_the_wire() {
        let points = vec![Point::new(-320, 240); 4];
        let line = encode_packet(&points).unwrap();
        assert!(line.len() <= MAX_LINE_LEN);
        assert!(line.ends_with(b"\n"));
    }
}
