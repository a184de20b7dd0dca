//! Affine scaling between the diagram's numeric ranges and the raster
//! surface, and the Viewport carrying those ranges.  The same scale
//! function serves both axes; the vertical axis simply hands it an
//! inverted range so larger states land higher on the surface.

use rand::Rng;

/// Raster distance, in pixels, the sweep advances per sub-step.
const STEP_PIXELS: f64 = 0.5;

/// Parameter windows of the logistic family known to show rich
/// period-doubling and chaotic structure.  The state range is always
/// the unit interval.
pub const INTERESTING_RANGES: [(f64, f64); 3] = [
    (3.8483111, 3.8983999),
    (3.1, 4.0),
    (3.61211, 3.69299),
];

/// Affinely map `value` from `[domain_lo, domain_hi]` onto
/// `[range_lo, range_hi]`.  Exact at both endpoints.  A degenerate
/// domain divides by zero; the viewport invariants rule that out for
/// every call this crate makes.
pub fn scale(domain_lo: f64, domain_hi: f64, range_lo: f64, range_hi: f64, value: f64) -> f64 {
    range_lo + (value - domain_lo) / (domain_hi - domain_lo) * (range_hi - range_lo)
}

/// The parameter/state rectangle one sweep renders, plus the
/// parameter increment of a single sub-step.  The ranges never change
/// while a sweep runs; `step` is refit whenever a sweep (re)starts
/// against a surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Low edge of the swept parameter range.
    pub param_min: f64,
    /// High edge of the swept parameter range.
    pub param_max: f64,
    /// State value plotted at the bottom of the surface.
    pub state_min: f64,
    /// State value plotted at the top of the surface.
    pub state_max: f64,
    /// Parameter increment per sub-step.  Always positive.
    pub step: f64,
}

impl Viewport {
    /// Constructor.  Rejects empty or inverted ranges and a surface
    /// too narrow to derive a step from; the curated table in
    /// `INTERESTING_RANGES` always passes.
    pub fn new(
        param_min: f64,
        param_max: f64,
        state_min: f64,
        state_max: f64,
        width: usize,
    ) -> Result<Viewport, String> {
        if !(param_min < param_max) {
            return Err(
                "The low edge of the parameter range is not below the high edge.".to_string(),
            );
        }
        if !(state_min < state_max) {
            return Err("The low edge of the state range is not below the high edge.".to_string());
        }
        if width == 0 {
            return Err("The surface width must be at least one pixel.".to_string());
        }
        let mut viewport = Viewport {
            param_min,
            param_max,
            state_min,
            state_max,
            step: 0.0,
        };
        viewport.fit_step(width);
        Ok(viewport)
    }

    /// Recompute the sub-step so one sub-step moves the sweep by half
    /// a raster pixel, whatever the width of the parameter range.
    pub fn fit_step(&mut self, width: usize) {
        self.step = scale(
            0.0,
            width as f64,
            0.0,
            self.param_max - self.param_min,
            STEP_PIXELS,
        );
    }
}

/// Pick one of the curated parameter windows uniformly at random and
/// fit its step to a surface `width` pixels across.
pub fn random_viewport<R: Rng>(rng: &mut R, width: usize) -> Viewport {
    let (param_min, param_max) = INTERESTING_RANGES[rng.gen_range(0, INTERESTING_RANGES.len())];
    let mut viewport = Viewport {
        param_min,
        param_max,
        state_min: 0.0,
        state_max: 1.0,
        step: 0.0,
    };
    viewport.fit_step(width);
    viewport
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scale_is_exact_at_both_endpoints() {
        assert_eq!(scale(3.1, 4.0, 0.0, 800.0, 3.1), 0.0);
        assert_eq!(scale(3.1, 4.0, 0.0, 800.0, 4.0), 800.0);
    }

    #[test]
    fn scale_is_linear_between_the_endpoints() {
        assert_eq!(scale(0.0, 10.0, 0.0, 100.0, 5.0), 50.0);
        assert_eq!(scale(0.0, 10.0, 0.0, 100.0, 2.5), 25.0);
    }

    #[test]
    fn scale_handles_an_inverted_range() {
        // The vertical axis maps low states to the bottom of the surface.
        assert_eq!(scale(0.0, 1.0, 600.0, 0.0, 0.0), 600.0);
        assert_eq!(scale(0.0, 1.0, 600.0, 0.0, 1.0), 0.0);
        assert_eq!(scale(0.0, 1.0, 600.0, 0.0, 0.25), 450.0);
    }

    #[test]
    fn scale_is_monotonic_with_the_range_orientation() {
        let up_low = scale(0.0, 1.0, 0.0, 100.0, 0.2);
        let up_high = scale(0.0, 1.0, 0.0, 100.0, 0.8);
        assert!(up_low < up_high);

        let down_low = scale(0.0, 1.0, 100.0, 0.0, 0.2);
        let down_high = scale(0.0, 1.0, 100.0, 0.0, 0.8);
        assert!(down_low > down_high);
    }

    #[test]
    fn viewport_fails_on_an_inverted_parameter_range() {
        assert!(Viewport::new(4.0, 3.1, 0.0, 1.0, 800).is_err());
        assert!(Viewport::new(3.5, 3.5, 0.0, 1.0, 800).is_err());
    }

    #[test]
    fn viewport_fails_on_an_inverted_state_range() {
        assert!(Viewport::new(3.1, 4.0, 1.0, 0.0, 800).is_err());
    }

    #[test]
    fn viewport_fails_on_a_zero_width_surface() {
        assert!(Viewport::new(3.1, 4.0, 0.0, 1.0, 0).is_err());
    }

    #[test]
    fn step_advances_half_a_pixel_per_sub_step() {
        let viewport = Viewport::new(3.0, 4.0, 0.0, 1.0, 1000).unwrap();
        assert!((viewport.step - 0.0005).abs() < 1e-12);

        // A narrower range sweeps in proportionally finer steps.
        let narrow = Viewport::new(3.61211, 3.69299, 0.0, 1.0, 1000).unwrap();
        assert!(narrow.step < viewport.step);
        assert!(narrow.step > 0.0);
    }

    #[test]
    fn refitting_the_step_tracks_the_surface_width() {
        let mut viewport = Viewport::new(3.0, 4.0, 0.0, 1.0, 1000).unwrap();
        let coarse = viewport.step;
        viewport.fit_step(2000);
        assert!((viewport.step - coarse / 2.0).abs() < 1e-15);
    }

    #[test]
    fn random_viewport_draws_from_the_curated_table() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let viewport = random_viewport(&mut rng, 800);
            assert!(INTERESTING_RANGES
                .iter()
                .any(|&(lo, hi)| lo == viewport.param_min && hi == viewport.param_max));
            assert_eq!(viewport.state_min, 0.0);
            assert_eq!(viewport.state_max, 1.0);
            assert!(viewport.step > 0.0);
        }
    }
}
