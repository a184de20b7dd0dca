//! The sweep scheduler.  A sweep walks the control parameter from the
//! viewport's low edge to its high edge, one orbit per sub-step, a
//! fixed batch of sub-steps per tick.  The tick is a plain function
//! over plain state: the host calls it, it paints at most one batch,
//! and it returns, which is the whole cooperative contract.  An
//! `Animation` wraps a sweep together with its sink, the restart
//! policy, and the theme signal, and is what a host frame clock
//! actually drives.

use crossbeam::channel::Receiver;
use rand::Rng;

use orbit::{MapFn, Orbit, INITIAL_STATE};
use raster::RasterSink;
use scale::{random_viewport, Viewport};
use theme::Theme;

/// Ticks per second the host frame clock is assumed to deliver.
const FRAME_RATE: f64 = 60.0;

/// Wall-clock seconds one full sweep should take at that rate.
const SWEEP_SECONDS: f64 = 1.5;

/// Sub-steps executed per tick.  Derived from the sweep duration so
/// the total wall-clock time of a sweep stays roughly constant no
/// matter how the batch is sized.
pub fn batch_size() -> usize {
    (FRAME_RATE / SWEEP_SECONDS) as usize
}

/// What a tick left behind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Part of the parameter range remains; tick again next frame.
    Running,
    /// The sweep has visited the whole range.
    Done,
}

/// One in-flight sweep.  Owns the only mutable sweep state: the
/// current parameter, which moves strictly upward by the viewport's
/// step until it crosses the high edge.
#[derive(Clone, Debug)]
pub struct Sweep {
    map: MapFn,
    viewport: Viewport,
    current: f64,
    batch: usize,
}

impl Sweep {
    /// Start a sweep of `map` at the viewport's low parameter edge.
    pub fn new(map: MapFn, viewport: Viewport) -> Sweep {
        Sweep {
            map,
            viewport,
            current: viewport.param_min,
            batch: batch_size(),
        }
    }

    /// The viewport this sweep walks.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The next parameter value to be painted.
    pub fn current_param(&self) -> f64 {
        self.current
    }

    /// Run one frame's worth of sub-steps.  Each sub-step samples one
    /// orbit at the current parameter, paints it into `sink`, and
    /// advances by the viewport step; the batch ends early the moment
    /// the parameter crosses the high edge.  Parameters are visited
    /// strictly in increasing order, and a finished sweep stays
    /// finished no matter how often it is ticked again.
    pub fn tick(&mut self, sink: &mut RasterSink) -> Status {
        for _ in 0..self.batch {
            if self.current >= self.viewport.param_max {
                return Status::Done;
            }
            sink.paint(
                &self.viewport,
                self.current,
                Orbit::new(self.map, self.current, INITIAL_STATE),
            );
            self.current += self.viewport.step;
        }
        if self.current >= self.viewport.param_max {
            Status::Done
        } else {
            Status::Running
        }
    }
}

/// Restart policy once a sweep completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Restart {
    /// Halt permanently at the end of the range.
    Halt,
    /// Clear the surface, pick a fresh curated viewport, sweep again.
    Fresh,
}

/// A sweep, its sink, the restart policy, and the theme signal, tied
/// together behind the single entry point a frame clock calls.
pub struct Animation<R: Rng> {
    sink: RasterSink,
    sweep: Sweep,
    restart: Restart,
    rng: R,
    themes: Option<Receiver<Theme>>,
    finished: bool,
}

impl<R: Rng> Animation<R> {
    /// A fresh animation of `map` over a randomly drawn curated
    /// viewport, on a transparent surface of the given dimensions,
    /// painting in `theme`'s fill.
    pub fn new(
        map: MapFn,
        width: usize,
        height: usize,
        theme: Theme,
        restart: Restart,
        mut rng: R,
    ) -> Animation<R> {
        let viewport = random_viewport(&mut rng, width);
        Animation {
            sink: RasterSink::new(width, height, theme.fill()),
            sweep: Sweep::new(map, viewport),
            restart,
            rng,
            themes: None,
            finished: false,
        }
    }

    /// Attach the receiving end of a `theme_channel`.  Pending scheme
    /// changes are drained at the top of every frame, before anything
    /// is painted.
    pub fn watch_themes(&mut self, themes: Receiver<Theme>) {
        self.themes = Some(themes);
    }

    /// Record every painted point for later export.
    pub fn enable_trace(&mut self) {
        self.sink.enable_trace();
    }

    /// The surface being painted.
    pub fn sink(&self) -> &RasterSink {
        &self.sink
    }

    /// The sweep currently running.
    pub fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    /// One frame: apply any pending theme change, then tick the sweep.
    /// The frame that finishes the range returns `Done` with the
    /// finished surface intact; under `Restart::Fresh` the next frame
    /// clears, redraws the viewport, and re-enters `Running`, while
    /// under `Restart::Halt` every later frame is a no-op `Done`.
    pub fn frame(&mut self) -> Status {
        self.drain_themes();
        if self.finished {
            match self.restart {
                Restart::Halt => return Status::Done,
                Restart::Fresh => self.begin_sweep(),
            }
        }
        let status = self.sweep.tick(&mut self.sink);
        if status == Status::Done {
            self.finished = true;
        }
        status
    }

    // A restart gets a fresh curated viewport, a clean surface, and a
    // step refit to the surface width.
    fn begin_sweep(&mut self) {
        let viewport = random_viewport(&mut self.rng, self.sink.width());
        self.sink.clear();
        self.sweep = Sweep::new(self.sweep.map, viewport);
        self.finished = false;
    }

    fn drain_themes(&mut self) {
        if let Some(ref themes) = self.themes {
            while let Ok(theme) = themes.try_recv() {
                self.sink.set_fill(theme.fill());
            }
        }
    }
}
