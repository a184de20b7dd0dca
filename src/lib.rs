#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Bifurcation diagram renderer
//!
//! A bifurcation diagram shows what a one-dimensional map does in the
//! long run as its control parameter changes.  Take the logistic map,
//! `x' = r * x * (1 - x)`: for small `r` every orbit settles onto a
//! single value, then as `r` grows that value splits into a cycle of
//! two, then four, then eight, doubling faster and faster until the
//! orbit never settles at all.  Plotting the visited states vertically
//! against `r` horizontally draws the famous fig-tree picture of
//! period-doubling cascades and chaotic bands.
//!
//! This crate renders that picture incrementally.  A sweep walks the
//! parameter from the left edge of a viewport to the right edge in
//! half-pixel steps; at every stop it iterates the map and blends one
//! translucent square per visited state onto an accumulation surface,
//! so density builds up wherever orbits linger.  The work is sliced
//! into fixed-size batches, one batch per call, so a host can drive it
//! from a per-frame clock and watch the diagram fill in left to right.

extern crate crossbeam;
extern crate itertools;
extern crate num;
extern crate rand;

pub mod orbit;
pub mod raster;
pub mod scale;
pub mod sweep;
pub mod theme;

pub use orbit::{logistic, MapFn, Orbit, INITIAL_STATE, OBSERVED_LEN, TRANSIENT_LEN};
pub use raster::{RasterSink, POINT_WIDTH};
pub use scale::{random_viewport, scale, Viewport, INTERESTING_RANGES};
pub use sweep::{batch_size, Animation, Restart, Status, Sweep};
pub use theme::{theme_channel, Fill, Theme};
