use thiserror::Error;

/// Hue span of the color scale: 0.83 of the hue circle runs red through
/// blue without wrapping back to red at the weak end.
const HUE_SPAN: f32 = 0.83;

pub type Rgba = [u8; 4];

#[derive(Debug, Error)]
#[error("degenerate power bounds: min and max are both {min} dB")]
pub struct DegenerateRange {
    pub min: f32,
}

/// Validated dB bounds for the color scale. Construction rejects
/// `min == max` so the normalization below never divides by zero.
#[derive(Clone, Copy, Debug)]
pub struct PowerRange {
    min: f32,
    max: f32,
}

impl PowerRange {
    pub fn new(min: f32, max: f32) -> Result<Self, DegenerateRange> {
        if min == max {
            return Err(DegenerateRange { min });
        }
        Ok(Self { min, max })
    }

    /// 0.0 at `max` (strongest), 1.0 at `min` (noise floor), clamped outside.
    pub fn normalize(&self, db: f32) -> f32 {
        let span = (self.min - self.max).abs();
        (((db - self.max) * -1.0) / span).clamp(0.0, 1.0)
    }
}

/// Map one dB value onto the hue scale: strong signals are red and bright,
/// weak ones blue and dark. Monotonic in dB within the range.
pub fn map_to_color(db: f32, range: PowerRange) -> Rgba {
    let norm = range.normalize(db);
    let (r, g, b) = hsv_to_rgb(norm * HUE_SPAN, 1.0, 1.0 - norm);
    [r, g, b, 255]
}

/// Standard hexcone conversion; `h` is a fraction of the hue circle in
/// [0, 1], `s` and `v` in [0, 1].
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let h6 = (h.clamp(0.0, 1.0) * 6.0).min(5.999_999);
    let sector = h6 as u32;
    let f = h6 - sector as f32;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}
