//! Procedural handwritten signatures.
//!
//! Each character of a name becomes one wavy stroke and a trailing flourish
//! finishes the signature. Character identity does not matter, only position:
//! widths, amplitudes and per-point jitter come from the random source, so two
//! calls with the same name look different unless the source is seeded.

use crate::entities::{Stroke, StrokeTool};
use kurbo::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Horizontal advance per character, `[min, max)`.
const LETTER_WIDTH: (f64, f64) = (15.0, 25.0);
/// Vertical swing of a character's wave, `[min, max)`.
const LETTER_AMPLITUDE: (f64, f64) = (5.0, 13.0);
/// Segments per character stroke (one more sample point than this).
const LETTER_SEGMENTS: u32 = 10;
/// Total spread of the vertical jitter added to each letter point.
const LETTER_JITTER: f64 = 3.0;
/// Letter stroke widths fall in `[base, base + 1)`.
const LETTER_STROKE_BASE: f64 = 2.0;

const FLOURISH_SEGMENTS: u32 = 15;
const FLOURISH_STEP: f64 = 3.0;
const FLOURISH_AMPLITUDE: f64 = 10.0;
const FLOURISH_STROKE_WIDTH: f64 = 1.5;

/// Generates signature strokes from a random source.
#[derive(Debug, Clone)]
pub struct SignatureGenerator<R = StdRng> {
    rng: R,
}

impl SignatureGenerator<StdRng> {
    /// Generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic generator, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for SignatureGenerator<StdRng> {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl<R: Rng> SignatureGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Synthesize the strokes for `name` starting at `anchor`.
    ///
    /// Returns one stroke per character followed by the flourish, all pen
    /// strokes in `color`.
    pub fn generate(&mut self, name: &str, anchor: Point, color: &str) -> Vec<Stroke> {
        let mut lines = Vec::with_capacity(name.chars().count() + 1);
        let mut cursor = anchor.x;

        for _ in name.chars() {
            let width = self.uniform(LETTER_WIDTH);
            let amplitude = self.uniform(LETTER_AMPLITUDE);

            let mut stroke = Stroke::new(StrokeTool::Pen, color, 0.0);
            for t in 0..=LETTER_SEGMENTS {
                let phase = f64::from(t) / f64::from(LETTER_SEGMENTS);
                let jitter = (self.rng.random::<f64>() - 0.5) * LETTER_JITTER;
                stroke.add_point(Point::new(
                    cursor + width * phase,
                    anchor.y + (phase * 2.0 * PI).sin() * amplitude + jitter,
                ));
            }
            stroke.stroke_width = LETTER_STROKE_BASE + self.rng.random::<f64>();
            lines.push(stroke);

            cursor += width;
        }

        let mut flourish = Stroke::new(StrokeTool::Pen, color, FLOURISH_STROKE_WIDTH);
        for t in 0..=FLOURISH_SEGMENTS {
            let t = f64::from(t);
            flourish.add_point(Point::new(
                cursor + t * FLOURISH_STEP,
                anchor.y + (t / 5.0 * PI).sin() * FLOURISH_AMPLITUDE,
            ));
        }
        lines.push(flourish);

        lines
    }

    fn uniform(&mut self, (min, max): (f64, f64)) -> f64 {
        min + self.rng.random::<f64>() * (max - min)
    }
}
