use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::Result;

// Sleep in short naps so stop() stays responsive at long periods.
const MAX_NAP: Duration = Duration::from_millis(10);

/// Periodic liveness marker.
///
/// Writes a single newline to the sink at a fixed wall-clock period,
/// drift-corrected against a monotonic reference: each deadline advances by
/// exactly one period, so a late tick does not push subsequent ticks back.
pub struct Heartbeat {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Heartbeat {
    /// Period used by the vision link in production.
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    /// Spawn the heartbeat task over a blocking sink.
    ///
    /// A sink write failure ends the task; the heartbeat is peripheral and
    /// never takes the link down with it.
    pub fn spawn<W>(period: Duration, mut sink: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("visionlink-heartbeat".to_owned())
            .spawn(move || {
                let mut deadline = Instant::now() + period;
                while !flag.load(Ordering::Relaxed) {
                    let now = Instant::now();
                    if now < deadline {
                        thread::sleep((deadline - now).min(MAX_NAP));
                        continue;
                    }
                    deadline += period;
                    if let Err(err) = sink.write_all(b"\n").and_then(|()| sink.flush()) {
                        warn!(%err, "heartbeat sink failed");
                        break;
                    }
                }
            })?;
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stop the task and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        self.shutdown();
    }
}
