//! Threshold-to-color policies for detection overlays.

/// Hue of the lowest threshold on the hue ramp; the ramp runs down towards red.
pub const HUE_MAX: f64 = 0.6;

/// How a threshold's position in the sequence maps to a paint color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPolicy {
    /// Fully saturated hues from blue (lowest threshold) towards red (highest).
    HueRamp,
    /// Near-white (lowest threshold) fading to pure blue (highest).
    BlueRamp,
}

impl ColorPolicy {
    /// Color of threshold `index` out of `count`.
    pub fn color(self, index: usize, count: usize) -> [u8; 3] {
        let i = index as f64;
        let n = count.max(1) as f64;
        match self {
            ColorPolicy::HueRamp => {
                let hue = HUE_MAX - i * (HUE_MAX / n);
                let (r, g, b) = hsv_to_rgb(hue, 1.0, 1.0);
                [(255.0 * r) as u8, (255.0 * g) as u8, (255.0 * b) as u8]
            }
            ColorPolicy::BlueRamp => {
                let level = (255.0 - i * (255.0 / n)) as u8;
                [level, level, 255]
            }
        }
    }
}

/// HSV to RGB, all components in `[0, 1]`. Hue wraps.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}
