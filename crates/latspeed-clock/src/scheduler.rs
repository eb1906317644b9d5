//! Tick delivery and cancellation.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

/// Callback invoked once per tick with the milliseconds since the previous
/// tick.
pub type TickCallback = Box<dyn FnMut(f64)>;

/// A source of display ticks.
///
/// Implementations deliver ticks to each started callback strictly in order
/// and never re-enter a callback while it is running.
pub trait TickSource {
    /// Registers `on_tick` and returns the handle that stops it.
    fn start(&mut self, on_tick: TickCallback) -> TickHandle;

    /// Stops the callback behind `handle`.
    ///
    /// Once this returns the callback is never invoked again, even when a
    /// tick is currently being dispatched. Stopping twice, or stopping a
    /// handle the source no longer knows, does nothing.
    fn stop(&mut self, handle: &TickHandle);
}

/// Handle to a started tick callback.
///
/// Clones share the cancellation flag, so any clone can stop the callback,
/// including the callback itself or a sibling callback running in the same
/// dispatch.
#[derive(Clone)]
pub struct TickHandle {
    id: u64,
    cancelled: Rc<Cell<bool>>,
}

impl TickHandle {
    /// Identifier unique within the source that issued the handle.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Marks the callback as stopped without access to its source.
    ///
    /// The source stops invoking it immediately and releases it at the end of
    /// the current or next dispatch.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns `true` once the callback has been stopped.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("id", &self.id)
            .field("cancelled", &self.cancelled.get())
            .finish()
    }
}

struct Subscriber {
    id: u64,
    cancelled: Rc<Cell<bool>>,
    on_tick: TickCallback,
}

/// Single-threaded tick source driven by explicit [`deliver`](Self::deliver)
/// calls from the host.
#[derive(Default)]
pub struct FrameScheduler {
    subscribers: Vec<Subscriber>,
    next_id: u64,
    dispatch_count: u64,
}

impl FrameScheduler {
    /// Creates a scheduler with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers one tick to every active callback in start order.
    ///
    /// The cancellation flag of each callback is checked right before it is
    /// invoked, so a callback stopped earlier in the same dispatch is skipped.
    /// Stopped callbacks are dropped once the dispatch completes, releasing
    /// whatever they own. Returns the number of callbacks invoked.
    pub fn deliver(&mut self, delta_ms: f64) -> usize {
        let mut invoked = 0;
        for sub in &mut self.subscribers {
            if sub.cancelled.get() {
                continue;
            }
            (sub.on_tick)(delta_ms);
            invoked += 1;
        }
        self.reap();
        self.dispatch_count += 1;
        trace!(delta_ms, invoked, "tick dispatched");
        invoked
    }

    /// Number of callbacks that have not been stopped.
    pub fn active_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|s| !s.cancelled.get())
            .count()
    }

    /// Returns `true` when no active callback remains.
    pub fn is_idle(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of dispatches run so far.
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    fn reap(&mut self) {
        self.subscribers.retain(|s| {
            let keep = !s.cancelled.get();
            if !keep {
                debug!(id = s.id, "tick callback released");
            }
            keep
        });
    }
}

impl TickSource for FrameScheduler {
    fn start(&mut self, on_tick: TickCallback) -> TickHandle {
        let id = self.next_id;
        self.next_id += 1;
        let cancelled = Rc::new(Cell::new(false));
        self.subscribers.push(Subscriber {
            id,
            cancelled: Rc::clone(&cancelled),
            on_tick,
        });
        debug!(id, "tick callback started");
        TickHandle { id, cancelled }
    }

    fn stop(&mut self, handle: &TickHandle) {
        handle.cancel();
        self.reap();
    }
}
