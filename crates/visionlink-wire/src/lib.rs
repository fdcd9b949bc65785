//! Line-oriented vision packet codec with CRC32 payload integrity.
//!
//! This is the wire layer of visionlink. A vision sensor transmits one
//! packet per newline-terminated ASCII line:
//! - A 3-byte frame marker (`"zz "`) for line synchronization
//! - A signed decimal point count
//! - `count` pairs of signed decimal coordinates
//! - A trailing unsigned decimal CRC32 over the coordinate span
//!
//! Decoding is pure and bounds-checked; no partial point lists escape.

pub mod checksum;
pub mod cursor;
pub mod error;
pub mod packet;

pub use checksum::crc32;
pub use cursor::Cursor;
pub use error::{PacketError, Result};
pub use packet::{
    decode_packet, encode_packet, Point, TargetList, FRAME_MARKER, MAX_LINE_LEN, MIN_PACKET_LEN,
};
