mod mix;
mod still;
mod turn;

pub use mix::Mix;
pub use still::Still;
pub use turn::Turn;

use crate::geometry::Point;
use serde::Deserialize;

/// Produces the intermediate keyframes an element goes through on its way to a target.
///
/// Any `FnMut(f64, f64) -> Vec<Point>` closure is a transition.
pub trait Transition: Send {
    /// The positions to visit, in order, before reaching `(x, y)`.
    fn keyframes(&mut self, x: f64, y: f64) -> Vec<Point>;
}

impl<F> Transition for F
where
    F: FnMut(f64, f64) -> Vec<Point> + Send,
{
    fn keyframes(&mut self, x: f64, y: f64) -> Vec<Point> {
        self(x, y)
    }
}

/// The built-in transitions, selectable by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, strum::Display, strum::EnumIter, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransitionStyle {
    /// Move straight to the target.
    #[default]
    None,

    /// Wander through a few random positions first.
    Mix,

    /// Swing through the diagonal point `(y, y)` first.
    Turn,
}

/// Get the transition implementation for a given style
pub fn get_transition(style: TransitionStyle, rng: fastrand::Rng) -> Box<dyn Transition> {
    match style {
        TransitionStyle::None => Box::new(Still),
        TransitionStyle::Mix => Box::new(Mix::new(rng)),
        TransitionStyle::Turn => Box::new(Turn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("none", TransitionStyle::None)]
    #[case("mix", TransitionStyle::Mix)]
    #[case("turn", TransitionStyle::Turn)]
    fn style_names(#[case] name: &str, #[case] style: TransitionStyle) {
        assert_eq!(TransitionStyle::from_str(name).unwrap(), style);
        assert_eq!(style.to_string(), name);
    }

    #[test]
    fn every_style_has_an_implementation() {
        for style in TransitionStyle::iter() {
            let mut transition = get_transition(style, fastrand::Rng::with_seed(1));
            assert!(transition.keyframes(10.0, 20.0).len() <= 3);
        }
    }

    #[test]
    fn closures_are_transitions() {
        let mut transition: Box<dyn Transition> = Box::new(|x: f64, y: f64| vec![Point::new(y, x)]);
        assert_eq!(transition.keyframes(1.0, 2.0), vec![Point::new(2.0, 1.0)]);
    }
}
