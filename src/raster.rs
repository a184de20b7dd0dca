// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The raster sink: an RGBA accumulation surface.  Orbit points
//! arrive as (parameter, state) pairs, get scaled into pixel space,
//! and are blended in as small translucent squares.  Wherever orbits
//! linger the squares pile up and the surface darkens toward the
//! fill, which is how the diagram's structure becomes visible without
//! any explicit density counting.  The surface is never cleared while
//! a sweep is running; clearing happens only between sweeps.

use itertools::iproduct;
use num::clamp;
use std::collections::BTreeMap;

use scale::{scale, Viewport};
use theme::Fill;

/// Side of the square blended for each orbit point, in raster units.
pub const POINT_WIDTH: f64 = 0.8;

/// An RGBA8 surface plus the active fill and an optional trace of
/// every state value painted, kept for the export tooling.
pub struct RasterSink {
    width: usize,
    height: usize,
    data: Vec<u8>,
    fill: Fill,
    trace: Option<BTreeMap<u64, (f64, f64)>>,
}

impl RasterSink {
    /// A fully transparent surface of the given pixel dimensions,
    /// painting with `fill` until told otherwise.
    pub fn new(width: usize, height: usize, fill: Fill) -> RasterSink {
        RasterSink {
            width,
            height,
            data: vec![0; width * height * 4],
            fill,
            trace: None,
        }
    }

    /// Pixel width of the surface.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pixel height of the surface.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 bytes, row-major from the top-left corner.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// The active fill.
    pub fn fill(&self) -> Fill {
        self.fill
    }

    /// Replace the active fill.  Pixels already blended keep the color
    /// they were painted with; only subsequent paints see the change.
    pub fn set_fill(&mut self, fill: Fill) {
        self.fill = fill;
    }

    /// Wipe the surface back to transparent.  Called between sweeps,
    /// never within one.  The export trace survives a wipe, the way a
    /// debug log survives the thing it is logging.
    pub fn clear(&mut self) {
        for byte in self.data.iter_mut() {
            *byte = 0;
        }
    }

    /// Start recording every painted point into the export trace.
    pub fn enable_trace(&mut self) {
        if self.trace.is_none() {
            self.trace = Some(BTreeMap::new());
        }
    }

    /// Paint one orbit: every state in `states` becomes a translucent
    /// square centered on the scaled (parameter, state) position.  The
    /// horizontal coordinate is fixed by the parameter; the vertical
    /// axis is inverted so larger states sit higher on the surface.
    pub fn paint<I>(&mut self, viewport: &Viewport, parameter: f64, states: I)
    where
        I: IntoIterator<Item = f64>,
    {
        let fill = self.fill;
        let x = scale(
            viewport.param_min,
            viewport.param_max,
            0.0,
            self.width as f64,
            parameter,
        );
        for state in states {
            let y = scale(
                viewport.state_min,
                viewport.state_max,
                self.height as f64,
                0.0,
                state,
            );
            if let Some(ref mut trace) = self.trace {
                trace.insert(state.to_bits(), (x, y));
            }
            self.blend_square(x, y, fill);
        }
    }

    /// Serialize the trace as one `state x y` line per recorded state,
    /// or `None` if tracing was never enabled.
    pub fn export_trace(&self) -> Option<String> {
        self.trace.as_ref().map(|trace| {
            let mut blob = String::new();
            for (&bits, &(x, y)) in trace {
                blob.push_str(&format!("{} {} {}\n", f64::from_bits(bits), x, y));
            }
            blob
        })
    }

    // Anything landing outside the surface is clipped; NaN and
    // infinite coordinates fall out the same way.
    fn blend_square(&mut self, x: f64, y: f64, fill: Fill) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let half = POINT_WIDTH / 2.0;
        let x0 = (x - half).floor() as i64;
        let x1 = (x + half).ceil() as i64;
        let y0 = (y - half).floor() as i64;
        let y1 = (y + half).ceil() as i64;
        for (px, py) in iproduct!(x0..x1, y0..y1) {
            if px < 0 || py < 0 || px >= self.width as i64 || py >= self.height as i64 {
                continue;
            }
            self.blend_pixel(px as usize, py as usize, fill);
        }
    }

    // Source-over with straight alpha.  The fill's coverage is always
    // positive, so the divisor never vanishes.
    fn blend_pixel(&mut self, px: usize, py: usize, fill: Fill) {
        let offset = (py * self.width + px) * 4;
        let src_a = fill.alpha;
        let dst_a = f64::from(self.data[offset + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let src = [f64::from(fill.r), f64::from(fill.g), f64::from(fill.b)];
        for channel in 0..3 {
            let dst = f64::from(self.data[offset + channel]);
            let blended = (src[channel] * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
            self.data[offset + channel] = clamp(blended, 0.0, 255.0).round() as u8;
        }
        self.data[offset + 3] = clamp(out_a * 255.0, 0.0, 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theme::Theme;

    fn unit_viewport() -> Viewport {
        Viewport::new(0.0, 1.0, 0.0, 1.0, 10).unwrap()
    }

    fn alpha_at(sink: &RasterSink, px: usize, py: usize) -> u8 {
        sink.pixels()[(py * sink.width() + px) * 4 + 3]
    }

    fn red_at(sink: &RasterSink, px: usize, py: usize) -> u8 {
        sink.pixels()[(py * sink.width() + px) * 4]
    }

    fn painted_pixels(sink: &RasterSink) -> usize {
        sink.pixels().chunks(4).filter(|px| px[3] > 0).count()
    }

    #[test]
    fn painting_blends_a_small_square() {
        let mut sink = RasterSink::new(10, 10, Theme::Dark.fill());
        sink.paint(&unit_viewport(), 0.5, vec![0.5]);
        // The 0.8-wide square centered on (5, 5) straddles pixels 4..6
        // on both axes.
        assert!(alpha_at(&sink, 5, 5) > 0);
        assert!(alpha_at(&sink, 4, 4) > 0);
        assert_eq!(alpha_at(&sink, 7, 7), 0);
        assert_eq!(red_at(&sink, 5, 5), 245);
    }

    #[test]
    fn repeated_painting_accumulates_density() {
        let mut sink = RasterSink::new(10, 10, Theme::Dark.fill());
        sink.paint(&unit_viewport(), 0.5, vec![0.5]);
        let once = alpha_at(&sink, 5, 5);
        sink.paint(&unit_viewport(), 0.5, vec![0.5]);
        let twice = alpha_at(&sink, 5, 5);
        assert!(once > 0);
        assert!(twice > once);
    }

    #[test]
    fn clearing_wipes_the_surface() {
        let mut sink = RasterSink::new(10, 10, Theme::Dark.fill());
        sink.paint(&unit_viewport(), 0.5, vec![0.2, 0.5, 0.8]);
        assert!(painted_pixels(&sink) > 0);
        sink.clear();
        assert_eq!(painted_pixels(&sink), 0);
    }

    #[test]
    fn a_fill_switch_leaves_painted_pixels_alone() {
        let mut sink = RasterSink::new(10, 10, Theme::Dark.fill());
        sink.paint(&unit_viewport(), 0.25, vec![0.2]);
        assert_eq!(red_at(&sink, 2, 7), 245);

        sink.set_fill(Theme::Light.fill());
        sink.paint(&unit_viewport(), 0.75, vec![0.8]);

        assert_eq!(red_at(&sink, 2, 7), 245);
        assert_eq!(red_at(&sink, 7, 2), 0);
        assert!(alpha_at(&sink, 7, 2) > 0);
    }

    #[test]
    fn degenerate_states_paint_nothing() {
        let mut sink = RasterSink::new(10, 10, Theme::Dark.fill());
        sink.paint(
            &unit_viewport(),
            0.5,
            vec![::std::f64::NAN, ::std::f64::INFINITY],
        );
        assert_eq!(painted_pixels(&sink), 0);
    }

    #[test]
    fn off_surface_points_are_clipped() {
        let mut sink = RasterSink::new(10, 10, Theme::Dark.fill());
        sink.paint(&unit_viewport(), 2.0, vec![0.5]);
        sink.paint(&unit_viewport(), 0.5, vec![-3.0]);
        assert_eq!(painted_pixels(&sink), 0);
    }

    #[test]
    fn the_trace_records_painted_points() {
        let mut sink = RasterSink::new(10, 10, Theme::Dark.fill());
        assert!(sink.export_trace().is_none());

        sink.enable_trace();
        sink.paint(&unit_viewport(), 0.5, vec![0.25]);
        let blob = sink.export_trace().unwrap();
        assert!(blob.contains("0.25 5 7.5"));
    }

    #[test]
    fn the_trace_survives_a_clear() {
        let mut sink = RasterSink::new(10, 10, Theme::Dark.fill());
        sink.enable_trace();
        sink.paint(&unit_viewport(), 0.5, vec![0.25]);
        sink.clear();
        assert!(!sink.export_trace().unwrap().is_empty());
    }
}
