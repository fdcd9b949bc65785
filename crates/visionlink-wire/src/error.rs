/// Errors that can occur while decoding or encoding a packet line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacketError {
    /// The line is shorter than the minimum viable packet.
    #[error("line too short ({len} bytes, min {min})")]
    TooShort { len: usize, min: usize },

    /// The line does not carry the frame marker after leading whitespace.
    #[error("missing frame marker (expected \"zz \")")]
    BadHeader,

    /// The point count field is negative.
    #[error("invalid point count {count}")]
    BadCount { count: i32 },

    /// A numeric field is absent or malformed at the given byte offset.
    #[error("malformed numeric field at byte {pos}")]
    BadField { pos: usize },

    /// The line ended before all advertised coordinate pairs were read.
    #[error("truncated packet ({parsed} of {expected} points)")]
    Truncated { expected: usize, parsed: usize },

    /// The reported checksum does not match the CRC32 of the payload span.
    #[error("checksum mismatch (reported {reported}, computed {computed})")]
    ChecksumMismatch { reported: u32, computed: u32 },

    /// An encoded line would exceed the maximum line length.
    #[error("encoded line too long ({len} bytes, max {max})")]
    Oversize { len: usize, max: usize },
}

impl PacketError {
    /// True for failures the frame scanner drops without publishing.
    ///
    /// Everything else still publishes an empty list, so a corrupt packet
    /// counts as a "no detections" frame rather than a skipped line.
    pub fn is_frame_reject(&self) -> bool {
        matches!(self, Self::TooShort { .. } | Self::BadHeader)
    }
}

pub type Result<T> = std::result::Result<T, PacketError>;
