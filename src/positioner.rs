use crate::animation::{Effect, Fill, Keyframes, Timing, Transition};
use crate::config::{BlinkOptions, PositionerOptions};
use crate::container::{Container, Stage};
use crate::element::VisualElement;
use crate::path::{Path, layout_targets};
use crate::scheduler::{Scheduler, TimerId};
use std::time::Duration;
use tracing::{debug, trace};

/// Errors that can occur when positioning elements
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PositionerError {
    #[error("path index {index} is out of range, {len} path(s) are registered")]
    InvalidIndex { index: usize, len: usize },

    #[error("container '{0}' not found")]
    ContainerNotFound(String),
}

/// How elements move onto a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Factor applied to every point sampled from the path.
    pub scale: f64,

    /// Whether to animate from the current positions or jump straight to the targets.
    pub animate: bool,
}

impl LayoutOptions {
    /// Jump to the targets without animating.
    pub fn instant() -> Self {
        Self { animate: false, ..Default::default() }
    }

    pub fn scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self { scale: 1.0, animate: true }
    }
}

/// Owns a fixed set of elements and moves them onto registered paths.
///
/// Elements are spread evenly along a path's length, and while the highlight cycle runs a random
/// element pulses its opacity every blink interval.
pub struct Positioner<E: VisualElement> {
    elements: Vec<E>,
    paths: Vec<Box<dyn Path>>,
    transition: Box<dyn Transition>,
    animation_duration: Duration,
    blink: Option<BlinkOptions>,
    scheduler: Scheduler,
    blink_timer: Option<TimerId>,
    rng: fastrand::Rng,
}

impl<E: VisualElement> Positioner<E> {
    /// Create the elements inside the container `options.container` and place them on the first
    /// path.
    ///
    /// The highlight cycle starts right away if `options.blink` is set.
    pub fn new<I>(
        stage: &mut Stage<E>,
        paths: I,
        options: PositionerOptions<E>,
        scheduler: &Scheduler,
    ) -> Result<Self, PositionerError>
    where
        I: IntoIterator<Item = Box<dyn Path>>,
    {
        let container = stage
            .container_mut(&options.container)
            .ok_or_else(|| PositionerError::ContainerNotFound(options.container.clone()))?;
        let paths: Vec<Box<dyn Path>> = paths.into_iter().collect();
        if paths.is_empty() {
            return Err(PositionerError::InvalidIndex { index: 0, len: 0 });
        }

        let elements: Vec<E> = (0..options.elements)
            .map(|index| {
                let element = (options.element)(index);
                container.append_child(element.clone());
                element
            })
            .collect();
        debug!(container = %options.container, elements = elements.len(), "created elements");

        let mut positioner = Self {
            elements,
            paths,
            transition: options.transition,
            animation_duration: options.animation_duration,
            blink: options.blink,
            scheduler: scheduler.clone(),
            blink_timer: None,
            rng: options.rng,
        };
        positioner.layout(0, LayoutOptions::instant())?;
        positioner.start_highlighting();
        Ok(positioner)
    }

    /// Append a path, returning the index it can be laid out with.
    pub fn register_path<P: Path + 'static>(&mut self, path: P) -> usize {
        self.paths.push(Box::new(path));
        self.paths.len() - 1
    }

    pub fn path(&self, index: usize) -> Option<&dyn Path> {
        self.paths.get(index).map(|path| path.as_ref())
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    /// Move every element onto the path at `path_index`.
    ///
    /// Element `i` out of `n` goes to `i / (n + 1)` of the path's length. Animated layouts go from
    /// each element's current position through the transition's keyframes to its target, and the
    /// target sticks once the animation ends.
    pub fn layout(&mut self, path_index: usize, options: LayoutOptions) -> Result<(), PositionerError> {
        let path = self
            .paths
            .get(path_index)
            .ok_or(PositionerError::InvalidIndex { index: path_index, len: self.paths.len() })?;
        let targets = layout_targets(path.as_ref(), self.elements.len(), options.scale);
        debug!(path_index, scale = options.scale, animate = options.animate, "laying out elements");

        let timing = Timing::once(self.animation_duration).fill(Fill::Forwards);
        for (element, target) in self.elements.iter().zip(targets) {
            if options.animate {
                let middle = self.transition.keyframes(target.x, target.y);
                let keyframes = Keyframes::through(element.position(), middle, target);
                element.animate(Effect::Position(keyframes), timing, None);
            } else {
                element.set_position(target);
            }
        }
        Ok(())
    }

    /// Start the highlight cycle. Returns `false` if it's disabled or already running.
    pub fn start_highlighting(&mut self) -> bool {
        let Some(blink) = self.blink else {
            return false;
        };
        if self.blink_timer.is_some() {
            return false;
        }
        let elements = self.elements.clone();
        let mut rng = self.rng.fork();
        let timer = self.scheduler.set_interval(blink.interval, move || {
            highlight_random(&elements, &mut rng, &blink);
        });
        debug!(interval = ?blink.interval, "started highlight cycle");
        self.blink_timer = Some(timer);
        true
    }

    /// Stop the highlight cycle. Pulses already running play until they end.
    pub fn stop_highlighting(&mut self) {
        if let Some(timer) = self.blink_timer.take() {
            self.scheduler.clear_interval(timer);
            debug!("stopped highlight cycle");
        }
    }

    pub fn is_highlight_cycle_running(&self) -> bool {
        self.blink_timer.is_some()
    }

    /// Run a single highlight tick right now, regardless of the cycle's state.
    ///
    /// Returns the index of the element that started pulsing, if any.
    pub fn highlight_once(&mut self) -> Option<usize> {
        let blink = self.blink.unwrap_or_default();
        highlight_random(&self.elements, &mut self.rng, &blink)
    }
}

impl<E: VisualElement> Drop for Positioner<E> {
    fn drop(&mut self) {
        self.stop_highlighting();
    }
}

/// Pick a random element and pulse its opacity, unless it's already pulsing.
fn highlight_random<E: VisualElement>(elements: &[E], rng: &mut fastrand::Rng, blink: &BlinkOptions) -> Option<usize> {
    if elements.is_empty() {
        return None;
    }
    let index = rng.usize(..elements.len());
    let element = &elements[index];
    if element.is_highlighting() {
        trace!(index, "element is already highlighting, skipping");
        return None;
    }
    element.set_highlighting(true);
    let keyframes = Keyframes::through(1.0, [blink.opacity], 1.0);
    let target = element.clone();
    element.animate(
        Effect::Opacity(keyframes),
        Timing::once(blink.duration),
        Some(Box::new(move || target.set_highlighting(false))),
    );
    Some(index)
}
