//! Brightness / contrast / saturation pipeline.
//!
//! Two modes share the same parameters:
//! - preview: [`Adjustments::css_filter`] describes the adjustment for a
//!   compositor-side filter; the buffer is not touched.
//! - apply: [`Adjustments::apply`] bakes the adjustment into a [`PixelBuffer`].
//!
//! All three parameters are percentages with 100 as neutral and are clamped to
//! `0..=200`. Contrast maps to `c = (contrast - 100) / 100` in `[-1, 1]` before
//! entering the classic `259 (c·255 + 255) / (255 (259 − c·255))` curve, so the
//! curve's pole at `c = 259/255` is never reached; the resulting factor is also
//! capped at [`MAX_CONTRAST_FACTOR`].

use crate::draw::PixelBuffer;
use crate::util::format_percent;

/// Neutral value for every parameter.
pub const NEUTRAL: f64 = 100.0;

/// Lowest accepted parameter value.
pub const MIN_ADJUSTMENT: f64 = 0.0;

/// Highest accepted parameter value.
pub const MAX_ADJUSTMENT: f64 = 200.0;

/// Ceiling for the contrast multiplier; any larger factor already maps every
/// non-mid channel to 0 or 255.
pub const MAX_CONTRAST_FACTOR: f64 = 259.0;

/// Smallest denominator magnitude accepted before the factor is capped.
const DENOMINATOR_EPSILON: f64 = 1e-6;

/// Rec. 601 luma weights.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Brightness, contrast, and saturation percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Adjustments {
    pub const NEUTRAL: Adjustments = Adjustments {
        brightness: NEUTRAL,
        contrast: NEUTRAL,
        saturation: NEUTRAL,
    };

    /// Builds clamped parameters. Non-finite inputs fall back to neutral.
    pub fn new(brightness: f64, contrast: f64, saturation: f64) -> Self {
        Self {
            brightness: clamp_parameter(brightness),
            contrast: clamp_parameter(contrast),
            saturation: clamp_parameter(saturation),
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Preview descriptor, e.g. `brightness(120%) contrast(100%) saturate(80%)`.
    pub fn css_filter(&self) -> String {
        format!(
            "brightness({}) contrast({}) saturate({})",
            format_percent(self.brightness),
            format_percent(self.contrast),
            format_percent(self.saturation)
        )
    }

    /// Contrast multiplier applied around the 128 midpoint.
    ///
    /// The percentage is centred on 100 (`c = (contrast - 100) / 100`), so
    /// 100% yields a factor of exactly 1 and 0..=200 maps to `c` in -1..=1.
    pub fn contrast_factor(&self) -> f64 {
        let c = (clamp_parameter(self.contrast) - NEUTRAL) / 100.0;
        let numerator = 259.0 * (c * 255.0 + 255.0);
        let denominator = 255.0 * (259.0 - c * 255.0);
        if denominator.abs() < DENOMINATOR_EPSILON {
            return MAX_CONTRAST_FACTOR;
        }
        (numerator / denominator).clamp(0.0, MAX_CONTRAST_FACTOR)
    }

    /// Runs the three stages over one RGB triple.
    pub fn apply_rgb(&self, rgb: [u8; 3]) -> [u8; 3] {
        self.stages().run(rgb)
    }

    /// Bakes the adjustment into every pixel; alpha is left unchanged.
    pub fn apply(&self, buffer: &mut PixelBuffer) {
        if self.is_neutral() {
            return;
        }
        let stages = self.stages();
        for px in buffer.as_raw_mut().chunks_exact_mut(4) {
            let [r, g, b] = stages.run([px[0], px[1], px[2]]);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    }

    fn stages(&self) -> Stages {
        Stages {
            brightness: clamp_parameter(self.brightness) / 100.0,
            contrast: self.contrast_factor(),
            saturation: clamp_parameter(self.saturation) / 100.0,
        }
    }
}

/// Precomputed per-pixel multipliers.
struct Stages {
    brightness: f64,
    contrast: f64,
    saturation: f64,
}

impl Stages {
    fn run(&self, rgb: [u8; 3]) -> [u8; 3] {
        let mut ch = rgb.map(|v| v as f64);

        for v in &mut ch {
            *v = clamp_channel(*v * self.brightness);
        }
        for v in &mut ch {
            *v = clamp_channel(self.contrast * (*v - 128.0) + 128.0);
        }

        let luma = LUMA_WEIGHTS[0] * ch[0] + LUMA_WEIGHTS[1] * ch[1] + LUMA_WEIGHTS[2] * ch[2];
        for v in &mut ch {
            *v = clamp_channel(luma + (*v - luma) * self.saturation);
        }

        ch.map(|v| v.round() as u8)
    }
}

/// Clamps a parameter to the accepted range; non-finite values become neutral.
pub fn clamp_parameter(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(MIN_ADJUSTMENT, MAX_ADJUSTMENT)
    } else {
        NEUTRAL
    }
}

fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 255.0)
    }
}
