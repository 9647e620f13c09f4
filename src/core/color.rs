use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn to_array(self) -> [f64; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Channel-wise linear interpolation; `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            mix(self.alpha, other.alpha),
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Deterministic per-index color; the same index always yields the same color.
#[must_use]
pub fn index_palette(index: usize) -> Color {
    let i = index as f64;
    Color::rgb(
        (i * 0.7).sin().abs(),
        (i * 0.9).cos().abs(),
        (i * 1.1).sin().abs(),
    )
}

/// `a` for even indices, `b` for odd ones.
#[must_use]
pub fn alternating(index: usize, a: Color, b: Color) -> Color {
    if index % 2 == 0 { a } else { b }
}

/// Two-endpoint linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorGradient {
    pub low: Color,
    pub high: Color,
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self {
            low: Color::rgb(0.0, 0.0, 1.0),
            high: Color::rgb(1.0, 0.0, 0.0),
        }
    }
}

impl ColorGradient {
    #[must_use]
    pub fn sample(self, t: f64) -> Color {
        self.low.lerp(self.high, t)
    }
}

/// Why a color column cannot drive a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColorRangeUnavailable {
    NoSamples,
    ZeroRange { value: f64 },
}

/// Observed numeric span of a color column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

impl ColorRange {
    /// Builds a range from finite samples; a degenerate span is rejected.
    pub fn from_samples<I>(samples: I) -> Result<Self, ColorRangeUnavailable>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut bounds: Option<(f64, f64)> = None;
        for sample in samples.into_iter().filter(|value| value.is_finite()) {
            bounds = Some(match bounds {
                None => (sample, sample),
                Some((min, max)) => (min.min(sample), max.max(sample)),
            });
        }

        match bounds {
            None => Err(ColorRangeUnavailable::NoSamples),
            Some((min, max)) if max <= min => Err(ColorRangeUnavailable::ZeroRange { value: min }),
            Some((min, max)) => Ok(Self { min, max }),
        }
    }

    /// Maps `value` into [0, 1] over the observed span.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}
