// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred work on the next turn of a single-threaded event loop.
//!
//! The manager defers two things: moving focus into a freshly opened menu, and
//! deciding what a blur meant. In both cases the platform's focus state is not
//! settled until the current call stack unwinds.
//!
//! Hosts with their own loop (a `setTimeout(.., 0)` bridge, a winit user event,
//! an idle callback) implement [`Scheduler`]. [`TurnQueue`] is a deterministic
//! implementation for hosts that pump turns themselves, and for tests.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_menu_button::{Scheduler, TurnQueue};
//!
//! let queue = TurnQueue::new();
//! let hits = Rc::new(Cell::new(0));
//!
//! let h = hits.clone();
//! queue.defer(Box::new(move || h.set(h.get() + 1)));
//! let cancelled = {
//!     let h = hits.clone();
//!     queue.defer(Box::new(move || h.set(h.get() + 10)))
//! };
//! queue.cancel(cancelled);
//!
//! // Nothing runs until the host turns the loop.
//! assert_eq!(hits.get(), 0);
//! assert_eq!(queue.run_turn(), 1);
//! assert_eq!(hits.get(), 1);
//! ```

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use core::cell::RefCell;
use core::fmt;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// Handle to a deferred task, used to cancel it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Runs tasks on a later turn of the event loop.
pub trait Scheduler {
    /// Schedule `task` to run after the current call stack unwinds.
    ///
    /// Implementations must never run `task` before returning.
    fn defer(&self, task: Task) -> TimerHandle;

    /// Cancel a deferred task.
    ///
    /// Cancelling a handle that already ran, was already cancelled, or was
    /// never issued is a no-op.
    fn cancel(&self, handle: TimerHandle);
}

/// FIFO turn queue driven explicitly by the host.
///
/// Each call to [`TurnQueue::run_turn`] runs the tasks that were pending when
/// the turn started. Tasks deferred while a turn is running wait for the next
/// one.
#[derive(Default)]
pub struct TurnQueue {
    inner: RefCell<QueueState>,
}

#[derive(Default)]
struct QueueState {
    next: u64,
    pending: VecDeque<(TimerHandle, Task)>,
}

impl TurnQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Whether no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().pending.is_empty()
    }

    /// Run one turn and return how many tasks ran.
    pub fn run_turn(&self) -> usize {
        // Handles are issued in increasing order, so everything below the
        // watermark was pending when this turn began.
        let watermark = self.inner.borrow().next;
        let mut ran = 0;
        loop {
            let task = {
                let mut state = self.inner.borrow_mut();
                match state.pending.front() {
                    Some((handle, _)) if handle.0 < watermark => {
                        state.pending.pop_front().map(|(_, task)| task)
                    }
                    _ => None,
                }
            };
            let Some(task) = task else {
                break;
            };
            task();
            ran += 1;
        }
        if ran > 0 {
            log::trace!("turn ran {ran} deferred task(s)");
        }
        ran
    }

    /// Run turns until no tasks are pending and return how many turns ran.
    ///
    /// A task that keeps rescheduling itself keeps this running.
    pub fn run_until_idle(&self) -> usize {
        let mut turns = 0;
        while !self.is_empty() {
            self.run_turn();
            turns += 1;
        }
        turns
    }
}

impl Scheduler for TurnQueue {
    fn defer(&self, task: Task) -> TimerHandle {
        let mut state = self.inner.borrow_mut();
        let handle = TimerHandle(state.next);
        state.next += 1;
        state.pending.push_back((handle, task));
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut state = self.inner.borrow_mut();
        if let Some(pos) = state.pending.iter().position(|(h, _)| *h == handle) {
            // Dropping the task may drop captured handles, so do it after the borrow.
            let removed = state.pending.remove(pos);
            drop(state);
            drop(removed);
        }
    }
}

impl fmt::Debug for TurnQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("TurnQueue")
            .field("next", &state.next)
            .field("pending", &state.pending.len())
            .finish()
    }
}
