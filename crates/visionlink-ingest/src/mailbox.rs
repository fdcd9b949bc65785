use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

/// Bound on each blocking wait so a missed wakeup degrades to a slow poll
/// instead of a hang.
const TAKE_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Create a single-slot, latest-value-wins channel.
///
/// The slot holds at most one value; each publish replaces whatever is
/// there, read or not. Skipping a value when the producer outpaces the
/// consumer is the contract, not a bug — this is a depth-one last-writer-
/// wins channel, not a queue.
///
/// Neither handle is `Clone`: exactly one producer and exactly one consumer
/// exist by construction, so concurrent `take` races cannot be expressed.
pub fn mailbox<T>() -> (MailboxSender<T>, MailboxReceiver<T>) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(None),
        pending: AtomicBool::new(false),
        available: Condvar::new(),
    });
    (
        MailboxSender {
            shared: Arc::clone(&shared),
        },
        MailboxReceiver { shared },
    )
}

struct Shared<T> {
    slot: Mutex<Option<T>>,
    // Readable without the lock; only mutated while the slot lock is held,
    // so observers never see the flag and the slot disagree.
    pending: AtomicBool,
    available: Condvar,
}

impl<T> Shared<T> {
    fn lock_slot(&self) -> MutexGuard<'_, Option<T>> {
        // The slot is a plain Option swap and cannot be left logically
        // invalid by a panicking holder.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Producer handle: publishes into the slot, overwriting any unread value.
pub struct MailboxSender<T> {
    shared: Arc<Shared<T>>,
}

impl<T> MailboxSender<T> {
    /// Publish a value, taking ownership. Never blocks on the consumer;
    /// the lock is held only for the O(1) swap.
    pub fn publish(&self, value: T) {
        let mut slot = self.shared.lock_slot();
        let _overwritten = slot.replace(value);
        self.shared.pending.store(true, Ordering::SeqCst);
        drop(slot);
        self.shared.available.notify_one();
    }

    /// True if a published value has not been taken yet. Lock-free.
    pub fn is_pending(&self) -> bool {
        self.shared.pending.load(Ordering::SeqCst)
    }
}

/// Consumer handle: drains the most recently published value.
pub struct MailboxReceiver<T> {
    shared: Arc<Shared<T>>,
}

impl<T> MailboxReceiver<T> {
    /// Block until a value is pending, then take it, clearing the flag.
    ///
    /// Returns the most recent publish in its entirety — never a partial
    /// merge of two publishes, never the same value twice unless it was
    /// re-published.
    pub fn take(&self) -> T {
        let mut slot = self.shared.lock_slot();
        loop {
            if let Some(value) = slot.take() {
                self.shared.pending.store(false, Ordering::SeqCst);
                return value;
            }
            let (guard, _timed_out) = self
                .shared
                .available
                .wait_timeout(slot, TAKE_POLL_INTERVAL)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            slot = guard;
        }
    }

    /// Take the pending value if there is one, without blocking.
    pub fn try_take(&self) -> Option<T> {
        if !self.shared.pending.load(Ordering::SeqCst) {
            return None;
        }
        let mut slot = self.shared.lock_slot();
        let value = slot.take();
        if value.is_some() {
            self.shared.pending.store(false, Ordering::SeqCst);
        }
        value
    }

    /// True if a published value has not been taken yet. Lock-free.
    pub fn is_pending(&self) -> bool {
        self.shared.pending.load(Ordering::SeqCst)
    }
}
