//! The host's color scheme signal and the two fills it selects.  The
//! renderer itself never watches the environment; whoever embeds it
//! pushes scheme changes down a channel and the animation applies them
//! between frames.

use crossbeam::channel::{unbounded, Receiver, Sender};
use std::str::FromStr;

/// Shared translucency of both theme fills.  Well under full coverage
/// so overlapping points accumulate into visible density.
const FILL_ALPHA: f64 = 0.7;

/// A translucent RGBA fill, the diagram's only brush.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fill {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Coverage in `[0, 1]`.
    pub alpha: f64,
}

/// Host color scheme, as reported by the environment we render for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    /// Dark surroundings; orbits paint near-white.
    Dark,
    /// Light surroundings; orbits paint black.
    Light,
}

impl Theme {
    /// The fill painted for orbit points under this scheme.
    pub fn fill(self) -> Fill {
        match self {
            Theme::Dark => Fill {
                r: 245,
                g: 245,
                b: 245,
                alpha: FILL_ALPHA,
            },
            Theme::Light => Fill {
                r: 0,
                g: 0,
                b: 0,
                alpha: FILL_ALPHA,
            },
        }
    }

    /// The background a finished surface is flattened over when it
    /// leaves the renderer as a standalone image.
    pub fn background(self) -> [u8; 3] {
        match self {
            Theme::Dark => [0, 0, 0],
            Theme::Light => [255, 255, 255],
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Theme, String> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!(
                "Unknown theme {:?}; expected \"dark\" or \"light\".",
                other
            )),
        }
    }
}

/// The channel a host's theme watcher pushes scheme changes down.
/// The animation drains it once per frame; each message becomes a
/// single value write into the sink's fill, so a notification firing
/// at any moment relative to the sweep can never tear a paint.
pub fn theme_channel() -> (Sender<Theme>, Receiver<Theme>) {
    unbounded()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_parse_from_their_names() {
        assert_eq!(Theme::from_str("dark"), Ok(Theme::Dark));
        assert_eq!(Theme::from_str("light"), Ok(Theme::Light));
        assert!(Theme::from_str("mauve").is_err());
    }

    #[test]
    fn the_two_fills_differ_only_in_color() {
        let dark = Theme::Dark.fill();
        let light = Theme::Light.fill();
        assert_ne!((dark.r, dark.g, dark.b), (light.r, light.g, light.b));
        assert_eq!(dark.alpha, light.alpha);
    }

    #[test]
    fn the_channel_carries_scheme_changes() {
        let (tx, rx) = theme_channel();
        tx.send(Theme::Light).unwrap();
        assert_eq!(rx.try_recv(), Ok(Theme::Light));
        assert!(rx.try_recv().is_err());
    }
}
