use crate::animation::{Effect, FinishCallback, Keyframes, PollableState, Timing, Track};
use crate::geometry::Point;
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Something that can be placed and animated on a surface.
///
/// Implementations are handles: cloning one yields another reference to the same element, and
/// every method takes `&self`.
pub trait VisualElement: Clone + Send + 'static {
    /// The position currently displayed, including the effect of running animations.
    fn position(&self) -> Point;

    /// Place the element at `position` without animating.
    ///
    /// Running position animations are cancelled so they can't overwrite it once they end.
    fn set_position(&self, position: Point);

    /// The opacity currently displayed.
    fn opacity(&self) -> f32;

    /// Whether the element is in the middle of a highlight pulse.
    fn is_highlighting(&self) -> bool;

    fn set_highlighting(&self, highlighting: bool);

    /// Start an animation. `on_finish` runs once it completes.
    fn animate(&self, effect: Effect, timing: Timing, on_finish: Option<FinishCallback>);

    /// Advance this element's animations to `now`.
    fn poll(&self, now: Duration) -> PollableState;
}

/// Creates the element for a given 0-based ordinal.
pub type ElementFactory<E> = Box<dyn Fn(usize) -> E>;

/// The content the default element factory puts in each box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ElementStyle {
    /// The element's ordinal.
    #[default]
    Numbered,

    /// A random binary digit.
    Binary,
}

/// The default element factory: boxes showing their ordinal.
pub fn numbered_boxes() -> ElementFactory<TextBox> {
    Box::new(|index| TextBox::new(index.to_string()))
}

/// Boxes showing a random `0` or `1`.
pub fn binary_boxes(rng: fastrand::Rng) -> ElementFactory<TextBox> {
    let rng = Mutex::new(rng);
    Box::new(move |_| {
        let digit = rng.lock().unwrap_or_else(PoisonError::into_inner).bool();
        TextBox::new(if digit { "1" } else { "0" })
    })
}

/// Get the element factory for a given style
pub fn get_element_factory(style: ElementStyle, rng: fastrand::Rng) -> ElementFactory<TextBox> {
    match style {
        ElementStyle::Numbered => numbered_boxes(),
        ElementStyle::Binary => binary_boxes(rng),
    }
}

/// A box of text positioned by its top left corner.
#[derive(Clone, Debug)]
pub struct TextBox {
    state: Arc<Mutex<TextBoxState>>,
}

#[derive(Debug)]
struct TextBoxState {
    content: String,
    position: Track<Point>,
    opacity: Track<f32>,
    highlighting: bool,
}

impl TextBox {
    pub fn new<S: Into<String>>(content: S) -> Self {
        Self {
            state: Arc::new(Mutex::new(TextBoxState {
                content: content.into(),
                position: Track::new(Point::ORIGIN),
                opacity: Track::new(1.0),
                highlighting: false,
            })),
        }
    }

    pub fn content(&self) -> String {
        self.state().content.clone()
    }

    /// The keyframes of every position animation that hasn't finished yet, oldest first.
    pub fn position_keyframes(&self) -> Vec<Keyframes<Point>> {
        self.state().position.keyframes().cloned().collect()
    }

    /// Whether any animation is running on this box.
    pub fn is_animating(&self) -> bool {
        let state = self.state();
        state.position.is_animating() || state.opacity.is_animating()
    }

    fn state(&self) -> MutexGuard<'_, TextBoxState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VisualElement for TextBox {
    fn position(&self) -> Point {
        self.state().position.value()
    }

    fn set_position(&self, position: Point) {
        let mut finished = Vec::new();
        self.state().position.jump_to(position, &mut finished);
        for callback in finished {
            callback();
        }
    }

    fn opacity(&self) -> f32 {
        self.state().opacity.value()
    }

    fn is_highlighting(&self) -> bool {
        self.state().highlighting
    }

    fn set_highlighting(&self, highlighting: bool) {
        self.state().highlighting = highlighting;
    }

    fn animate(&self, effect: Effect, timing: Timing, on_finish: Option<FinishCallback>) {
        let mut state = self.state();
        match effect {
            Effect::Position(keyframes) => state.position.animate(keyframes, timing, on_finish),
            Effect::Opacity(keyframes) => state.opacity.animate(keyframes, timing, on_finish),
        }
    }

    fn poll(&self, now: Duration) -> PollableState {
        let mut finished = Vec::new();
        let changed = {
            let mut state = self.state();
            let position = state.position.poll(now, &mut finished);
            let opacity = state.opacity.poll(now, &mut finished);
            position != PollableState::Unmodified || opacity != PollableState::Unmodified
        };
        // The lock is released so callbacks can touch this same box.
        for callback in finished {
            callback();
        }
        if changed { PollableState::Modified } else { PollableState::Unmodified }
    }
}
