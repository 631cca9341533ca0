//! Synthetic test rasters
//!
//! Small deterministic images with known region structure.

use pixseg_core::{Raster, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A raster with every pixel set to `color`.
pub fn uniform(width: u32, height: u32, color: Rgb) -> Raster {
    Raster::new_filled(width, height, color).expect("fixture dimensions are non-zero")
}

/// 2×2 raster with black on the main diagonal and white on the other.
///
/// ```text
/// B W
/// W B
/// ```
pub fn diagonal_2x2() -> Raster {
    Raster::from_fn(2, 2, |x, y| if x == y { Rgb::BLACK } else { Rgb::WHITE })
        .expect("fixture dimensions are non-zero")
}

/// Vertical stripes of width `stripe` cycling through `colors`.
pub fn vertical_stripes(width: u32, height: u32, stripe: u32, colors: &[Rgb]) -> Raster {
    assert!(stripe > 0 && !colors.is_empty());
    Raster::from_fn(width, height, |x, _| {
        colors[((x / stripe) as usize) % colors.len()]
    })
    .expect("fixture dimensions are non-zero")
}

/// Four quadrants; `colors` is top-left, top-right, bottom-left, bottom-right.
pub fn quadrants(width: u32, height: u32, colors: [Rgb; 4]) -> Raster {
    let (hw, hh) = (width / 2, height / 2);
    Raster::from_fn(width, height, |x, y| {
        let idx = (if y < hh { 0 } else { 2 }) + (if x < hw { 0 } else { 1 });
        colors[idx]
    })
    .expect("fixture dimensions are non-zero")
}

/// A filled rectangle of `fg` on a `bg` background.
pub fn rectangle(width: u32, height: u32, rect: (u32, u32, u32, u32), fg: Rgb, bg: Rgb) -> Raster {
    let (rx, ry, rw, rh) = rect;
    Raster::from_fn(width, height, |x, y| {
        if x >= rx && x < rx + rw && y >= ry && y < ry + rh {
            fg
        } else {
            bg
        }
    })
    .expect("fixture dimensions are non-zero")
}

/// Add seeded uniform noise in `[-amplitude, amplitude]` to every channel.
pub fn with_noise(raster: &Raster, amplitude: u8, seed: u64) -> Raster {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = amplitude as i16;
    let mut out = raster.to_mut();
    for c in out.data_mut() {
        let mut jitter = |v: u8| (v as i16 + rng.random_range(-a..=a)).clamp(0, 255) as u8;
        *c = Rgb::new(jitter(c.r), jitter(c.g), jitter(c.b));
    }
    out.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_layout() {
        let r = diagonal_2x2();
        assert_eq!(r.get_pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(r.get_pixel(1, 1), Some(Rgb::BLACK));
        assert_eq!(r.get_pixel(1, 0), Some(Rgb::WHITE));
        assert_eq!(r.get_pixel(0, 1), Some(Rgb::WHITE));
    }

    #[test]
    fn test_quadrants_layout() {
        let colors = [Rgb::BLACK, Rgb::WHITE, Rgb::gray(50), Rgb::gray(200)];
        let r = quadrants(4, 4, colors);
        assert_eq!(r.get_pixel(0, 0), Some(colors[0]));
        assert_eq!(r.get_pixel(3, 0), Some(colors[1]));
        assert_eq!(r.get_pixel(0, 3), Some(colors[2]));
        assert_eq!(r.get_pixel(3, 3), Some(colors[3]));
    }

    #[test]
    fn test_noise_is_seeded() {
        let base = uniform(8, 8, Rgb::gray(128));
        let a = with_noise(&base, 5, 7);
        let b = with_noise(&base, 5, 7);
        assert_eq!(a.data(), b.data());
        assert!(a.data().iter().all(|c| c.r.abs_diff(128) <= 5));
    }
}
