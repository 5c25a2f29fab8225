//! Keyframe animations driven by an externally advanced clock.
//!
//! Animations never look at the wall clock themselves: every poll receives the current time,
//! and an animation takes its start time from the first poll it sees.

mod transitions;

pub use transitions::{Mix, Still, Transition, TransitionStyle, Turn, get_transition};

use crate::geometry::Point;
use std::fmt;
use std::time::Duration;

/// The outcome of polling something that changes over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollableState {
    /// Nothing changed since the last poll.
    Unmodified,
    /// The value changed and needs to be redrawn.
    Modified,
    /// The animation reached its end and won't change anymore.
    Done,
}

/// Errors that can occur when building animations
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AnimationError {
    #[error("an animation needs at least one keyframe")]
    EmptyKeyframes,
}

/// A value that can be blended linearly between two keyframes.
pub trait Interpolate: Copy {
    fn interpolate(self, other: Self, t: f64) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, other: Self, t: f64) -> Self {
        self + (other - self) * t as f32
    }
}

impl Interpolate for Point {
    fn interpolate(self, other: Self, t: f64) -> Self {
        self.lerp(other, t)
    }
}

/// A non empty list of keyframes, spread evenly over an iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes<T> {
    frames: Vec<T>,
}

impl<T: Interpolate> Keyframes<T> {
    pub fn new(frames: Vec<T>) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::EmptyKeyframes);
        }
        Ok(Self { frames })
    }

    /// Keyframes going from `first` through every `middle` frame, in order, to `last`.
    pub fn through<I>(first: T, middle: I, last: T) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut frames = vec![first];
        frames.extend(middle);
        frames.push(last);
        Self { frames }
    }

    pub fn frames(&self) -> &[T] {
        &self.frames
    }

    pub fn first(&self) -> T {
        self.frames[0]
    }

    pub fn last(&self) -> T {
        self.frames[self.frames.len() - 1]
    }

    /// Sample the keyframes at `progress`, which is clamped to `[0, 1]`.
    ///
    /// Keyframe `k` out of `n` sits at offset `k / (n - 1)`.
    pub fn sample(&self, progress: f64) -> T {
        if self.frames.len() == 1 {
            return self.frames[0];
        }
        let progress = progress.clamp(0.0, 1.0);
        let intervals = self.frames.len() - 1;
        let scaled = progress * intervals as f64;
        let index = (scaled.floor() as usize).min(intervals - 1);
        self.frames[index].interpolate(self.frames[index + 1], scaled - index as f64)
    }
}

/// What happens to an animated value once its animation finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fill {
    /// Go back to the value the property had before the animation.
    #[default]
    None,
    /// Keep the last keyframe as the property's new value.
    Forwards,
}

/// How long and how many times an animation plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub duration: Duration,
    pub iterations: u32,
    pub fill: Fill,
}

impl Timing {
    /// A single iteration with no fill.
    pub fn once(duration: Duration) -> Self {
        Self { duration, iterations: 1, fill: Fill::None }
    }

    pub fn fill(self, fill: Fill) -> Self {
        Self { fill, ..self }
    }

    pub fn iterations(self, iterations: u32) -> Self {
        Self { iterations: iterations.max(1), ..self }
    }

    /// The total time the animation plays for.
    pub fn active_duration(&self) -> Duration {
        self.duration * self.iterations
    }

    /// The progress within the current iteration after `elapsed` time, and whether the
    /// animation is over.
    fn progress(&self, elapsed: Duration) -> (f64, bool) {
        if self.duration.is_zero() || elapsed >= self.active_duration() {
            return (1.0, true);
        }
        let within = elapsed.as_secs_f64() % self.duration.as_secs_f64();
        (within / self.duration.as_secs_f64(), false)
    }
}

/// The property an animation targets along with its keyframes.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Position(Keyframes<Point>),
    Opacity(Keyframes<f32>),
}

/// Invoked once an animation finishes.
pub type FinishCallback = Box<dyn FnOnce() + Send>;

/// A single running animation of a value of type `T`.
struct Animation<T> {
    keyframes: Keyframes<T>,
    timing: Timing,
    start: Option<Duration>,
    value: T,
    on_finish: Option<FinishCallback>,
}

impl<T: Interpolate> Animation<T> {
    fn new(keyframes: Keyframes<T>, timing: Timing, on_finish: Option<FinishCallback>) -> Self {
        let value = keyframes.first();
        Self { keyframes, timing, start: None, value, on_finish }
    }

    fn poll(&mut self, now: Duration) -> PollableState {
        // Start on first poll
        let start = *self.start.get_or_insert(now);
        let (progress, done) = self.timing.progress(now.saturating_sub(start));
        self.value = self.keyframes.sample(progress);
        if done { PollableState::Done } else { PollableState::Modified }
    }
}

/// A property's base value along with the animations currently applied to it.
///
/// When several animations run at once the most recently added one decides the value.
pub struct Track<T> {
    base: T,
    running: Vec<Animation<T>>,
}

impl<T: Interpolate> Track<T> {
    pub fn new(base: T) -> Self {
        Self { base, running: Vec::new() }
    }

    /// The value currently displayed.
    pub fn value(&self) -> T {
        self.running.last().map(|animation| animation.value).unwrap_or(self.base)
    }

    /// The value the property has when nothing animates it.
    pub fn base(&self) -> T {
        self.base
    }

    /// Jump straight to `value`, cancelling every running animation.
    ///
    /// The finish callbacks of the cancelled animations are pushed into `finished`.
    pub fn jump_to(&mut self, value: T, finished: &mut Vec<FinishCallback>) {
        finished.extend(self.running.drain(..).filter_map(|mut animation| animation.on_finish.take()));
        self.base = value;
    }

    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    /// The keyframes of every running animation, oldest first.
    pub fn keyframes(&self) -> impl Iterator<Item = &Keyframes<T>> {
        self.running.iter().map(|animation| &animation.keyframes)
    }

    pub fn animate(&mut self, keyframes: Keyframes<T>, timing: Timing, on_finish: Option<FinishCallback>) {
        self.running.push(Animation::new(keyframes, timing, on_finish));
    }

    /// Advance every animation to `now`.
    ///
    /// Callbacks of animations that finished are pushed into `finished` rather than invoked so the
    /// caller can run them once it releases any lock guarding this track.
    pub fn poll(&mut self, now: Duration, finished: &mut Vec<FinishCallback>) -> PollableState {
        if self.running.is_empty() {
            return PollableState::Unmodified;
        }
        let mut index = 0;
        while index < self.running.len() {
            let animation = &mut self.running[index];
            if animation.poll(now) == PollableState::Done {
                let mut animation = self.running.remove(index);
                if animation.timing.fill == Fill::Forwards {
                    self.base = animation.keyframes.last();
                }
                finished.extend(animation.on_finish.take());
            } else {
                index += 1;
            }
        }
        if self.running.is_empty() { PollableState::Done } else { PollableState::Modified }
    }
}

impl<T: fmt::Debug> fmt::Debug for Track<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track").field("base", &self.base).field("running", &self.running.len()).finish()
    }
}
