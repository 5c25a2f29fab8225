//! A cooperative, single-threaded timer queue.
//!
//! Time only moves when the owner calls [`Scheduler::advance_to`], usually once per frame from the
//! main loop. Callbacks run on the caller's thread.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Periods below this are rounded up so a timer can never spin.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies a timer registered with [`Scheduler::set_interval`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

pub type TimerCallback = Box<dyn FnMut() + Send>;

/// A handle to a shared timer queue. Clones refer to the same queue.
#[derive(Clone, Default)]
pub struct Scheduler {
    state: Arc<Mutex<SchedulerState>>,
}

#[derive(Default)]
struct SchedulerState {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

struct Timer {
    id: TimerId,
    period: Duration,
    // `None` once the next deadline is past the largest representable time.
    deadline: Option<Duration>,
    // Taken out while the callback runs.
    callback: Option<TimerCallback>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The time the scheduler was last advanced to.
    pub fn now(&self) -> Duration {
        self.state().now
    }

    /// Run `callback` every `period`, starting one period from now.
    pub fn set_interval<F>(&self, period: Duration, callback: F) -> TimerId
    where
        F: FnMut() + Send + 'static,
    {
        let mut state = self.state();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let period = period.max(MIN_PERIOD);
        let deadline = state.now.checked_add(period);
        state.timers.push(Timer { id, period, deadline, callback: Some(Box::new(callback)) });
        id
    }

    /// Stop a timer. Returns `false` if it was already gone.
    pub fn clear_interval(&self, id: TimerId) -> bool {
        let mut state = self.state();
        let before = state.timers.len();
        state.timers.retain(|timer| timer.id != id);
        state.timers.len() != before
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.state().timers.iter().any(|timer| timer.id == id)
    }

    pub fn active_timers(&self) -> usize {
        self.state().timers.len()
    }

    /// Move the clock to `now`, firing every deadline reached on the way in chronological order.
    ///
    /// A timer that missed several periods fires once per missed period. Returns the number of
    /// callbacks that ran.
    pub fn advance_to(&self, now: Duration) -> usize {
        let mut fired = 0;
        loop {
            let (id, mut callback) = {
                let mut guard = self.state();
                let state = &mut *guard;
                let due = state
                    .timers
                    .iter_mut()
                    .filter(|timer| timer.callback.is_some())
                    .filter_map(|timer| {
                        let deadline = timer.deadline.filter(|deadline| *deadline <= now)?;
                        Some((deadline, timer))
                    })
                    .min_by_key(|(deadline, timer)| (*deadline, timer.id));
                let Some((deadline, timer)) = due else {
                    state.now = state.now.max(now);
                    break;
                };
                state.now = state.now.max(deadline);
                timer.deadline = deadline.checked_add(timer.period);
                let Some(callback) = timer.callback.take() else {
                    break;
                };
                (timer.id, callback)
            };

            callback();
            fired += 1;

            // The callback may have cleared its own timer, in which case it's simply dropped.
            if let Some(timer) = self.state().timers.iter_mut().find(|timer| timer.id == id) {
                timer.callback = Some(callback);
            }
        }
        fired
    }

    fn state(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Scheduler").field("now", &state.now).field("timers", &state.timers.len()).finish()
    }
}
