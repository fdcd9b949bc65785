use std::io::{BufRead, ErrorKind};

use tracing::{debug, trace};
use visionlink_wire::{decode_packet, TargetList, MAX_LINE_LEN};

use crate::error::Result;
use crate::mailbox::MailboxSender;

/// Reads packet lines from a blocking input stream and drives the
/// decode-publish cycle.
///
/// Handles line framing internally — the mailbox only ever sees complete
/// decode outcomes. Lines that carry no frame (too short, wrong marker) are
/// dropped without touching the mailbox; malformed or corrupt packets
/// publish an empty "no detections" list instead.
pub struct FrameScanner<R> {
    inner: R,
    line: Vec<u8>,
}

impl<R: BufRead> FrameScanner<R> {
    /// Create a scanner over a line-oriented input stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::with_capacity(MAX_LINE_LEN),
        }
    }

    /// Run the ingestion loop until end of input.
    ///
    /// Blocks on the underlying read; parsing and publishing are
    /// synchronous and non-blocking. No packet-level failure terminates the
    /// loop — the next line is attempted immediately. Returns `Ok(())` at
    /// EOF; only genuine I/O errors propagate.
    pub fn run(mut self, sender: MailboxSender<TargetList>) -> Result<()> {
        while self.read_line()? {
            match decode_packet(&self.line) {
                Ok(points) => {
                    trace!(points = points.len(), "packet decoded");
                    sender.publish(points);
                }
                Err(err) if err.is_frame_reject() => {
                    trace!(%err, "line rejected");
                }
                Err(err) => {
                    debug!(%err, "corrupt packet, publishing empty frame");
                    sender.publish(TargetList::new());
                }
            }
        }
        trace!("input stream ended");
        Ok(())
    }

    /// Read one newline-terminated line into the internal buffer, stripping
    /// the terminator and capping retained bytes at [`MAX_LINE_LEN`].
    /// Returns `false` at EOF.
    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        loop {
            match self.inner.read_until(b'\n', &mut self.line) {
                Ok(0) => return Ok(false),
                Ok(_) => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        if self.line.last() == Some(&b'\n') {
            self.line.pop();
        }
        if self.line.last() == Some(&b'\r') {
            self.line.pop();
        }
        self.line.truncate(MAX_LINE_LEN);
        Ok(true)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the scanner and return the inner stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
