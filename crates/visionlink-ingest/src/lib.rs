//! Serial ingestion loop with latest-value mailbox handoff.
//!
//! This is the "just works" layer of visionlink. Feed it a line-oriented
//! input stream and it runs the read-decode-publish cycle on its own
//! thread, handing each decoded packet to a single consumer with
//! latest-packet-wins semantics:
//!
//! ```text
//! raw line → FrameScanner filters → decode_packet validates
//!          → Mailbox publishes → VisionSource::targets() drains
//! ```
//!
//! Malformed or corrupt traffic never stops the loop: lines without a
//! frame are skipped, corrupt packets degrade to an empty "no detections"
//! list.

pub mod error;
pub mod heartbeat;
pub mod mailbox;
pub mod scanner;
pub mod source;

pub use error::{IngestError, Result};
pub use heartbeat::Heartbeat;
pub use mailbox::{mailbox, MailboxReceiver, MailboxSender};
pub use scanner::FrameScanner;
pub use source::VisionSource;
