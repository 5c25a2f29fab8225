//! Elements that blink at random and glide onto points sampled along 2D paths.
//!
//! A [`Positioner`] creates a fixed number of [`VisualElement`]s inside a container of a
//! [`Stage`], spreads them evenly along one of its registered [`Path`]s, and optionally pulses the
//! opacity of a random element on every tick of a [`Scheduler`] interval.

pub mod animation;
pub mod config;
pub mod container;
pub mod element;
pub mod geometry;
pub mod path;
pub mod positioner;
pub mod render;
pub mod scheduler;

pub use animation::{Transition, TransitionStyle};
pub use config::{BlinkOptions, Config, PositionerOptions};
pub use container::{Container, Stage};
pub use element::{TextBox, VisualElement};
pub use geometry::Point;
pub use path::{Path, parse_svg_path};
pub use positioner::{LayoutOptions, Positioner, PositionerError};
pub use scheduler::Scheduler;
