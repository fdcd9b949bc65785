use crc32fast::Hasher;

/// Compute the standard 32-bit CRC (IEEE 802.3 / zlib polynomial) over a
/// byte span.
///
/// The sender computes the same CRC over the transmitted coordinate span,
/// so this must match that implementation bit-for-bit — `crc32fast` is the
/// zlib CRC32.
pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_span_is_zero() {
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn standard_check_value() {
        // The canonical CRC-32/ISO-HDLC check input.
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn coordinate_span_vector() {
        // Matches zlib's crc32 over the same ASCII span.
        assert_eq!(crc32(b"10 20 30 40"), 3008523907);
    }

    #[test]
    fn deterministic() {
        let span = b"-5 -6 1000000 -1000000";
        assert_eq!(crc32(span), crc32(span));
        assert_eq!(crc32(span), 3602924058);
    }
}
