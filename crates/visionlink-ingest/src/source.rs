use std::io::BufRead;
use std::thread;

use tracing::warn;
use visionlink_wire::TargetList;

use crate::error::Result;
use crate::mailbox::{mailbox, MailboxReceiver};
use crate::scanner::FrameScanner;

/// Consumer-facing handle to a running ingestion loop.
///
/// Wires a [`FrameScanner`] producer thread to a fresh mailbox and exposes
/// the drain side. One source, one consumer: the handle is not `Clone`.
pub struct VisionSource {
    receiver: MailboxReceiver<TargetList>,
}

impl VisionSource {
    /// Spawn the producer thread over a blocking line-oriented input.
    ///
    /// The loop runs until the input reaches EOF or fails; either way the
    /// thread exits on its own, so the handle never joins it.
    pub fn spawn<R>(input: R) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (sender, receiver) = mailbox();
        thread::Builder::new()
            .name("visionlink-ingest".to_owned())
            .spawn(move || {
                if let Err(err) = FrameScanner::new(input).run(sender) {
                    warn!(%err, "ingestion loop terminated");
                }
            })?;
        Ok(Self { receiver })
    }

    /// Block until the next packet is published, then take it.
    ///
    /// Always returns a whole published list (possibly empty for a
    /// "no detections" frame); if the producer outpaces this call, only the
    /// most recent packet is returned.
    pub fn targets(&self) -> TargetList {
        self.receiver.take()
    }

    /// Take the pending packet without blocking, if there is one.
    pub fn try_targets(&self) -> Option<TargetList> {
        self.receiver.try_take()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use visionlink_wire::Point;

    use super::*;

    #[test]
    fn targets_blocks_until_a_packet_arrives() {
        let source = VisionSource::spawn(Cursor::new(
            "zz 2 10 20 30 40 3008523907\n".to_owned(),
        ))
        .unwrap();
        assert_eq!(
            source.targets(),
            vec![Point::new(10, 20), Point::new(30, 40)]
        );
    }

    #[test]
    fn corrupt_traffic_yields_an_empty_frame() {
        let source = VisionSource::spawn(Cursor::new("zz 2 10 20 30 40 1\n".to_owned())).unwrap();
        assert_eq!(source.targets(), vec![]);
    }

    #[test]
    fn try_targets_is_none_before_any_publish() {
        // Header-less input never publishes.
        let source = VisionSource::spawn(Cursor::new("no frames here\n".to_owned())).unwrap();
        assert_eq!(source.try_targets(), None);
    }
}
