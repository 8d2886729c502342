//! Orthographic projection between the solar sphere and disk image pixels.
//!
//! Image axes follow the raster: x grows to the right (solar west), y grows
//! downwards. Longitudes are Stonyhurst, relative to the central meridian.

use serde::{Deserialize, Serialize};

use super::SolarOrientation;

/// Location of the solar disk in an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarDisk {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl SolarDisk {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self { cx, cy, radius }
    }

    /// Unit-sphere position under an image pixel: `(x, y, z)` with `z`
    /// towards the observer. Pixels off the disk get `z = 0`.
    pub fn sphere_point(&self, x: f64, y: f64) -> [f64; 3] {
        let nx = (x - self.cx) / self.radius;
        let ny = (y - self.cy) / self.radius;
        let rho2 = nx * nx + ny * ny;
        let nz = if rho2 <= 1.0 { (1.0 - rho2).sqrt() } else { 0.0 };
        [nx, ny, nz]
    }
}

/// Project a heliographic latitude/longitude (degrees) onto the image.
///
/// Returns `None` for points on the far hemisphere.
pub fn heliographic_to_image(
    lat_deg: f64,
    lon_deg: f64,
    orientation: &SolarOrientation,
    disk: &SolarDisk,
) -> Option<(f64, f64)> {
    let (phi, lambda) = (lat_deg.to_radians(), lon_deg.to_radians());
    let (b0, p0) = (orientation.b0.to_radians(), orientation.p0.to_radians());

    let depth = phi.sin() * b0.sin() + phi.cos() * lambda.cos() * b0.cos();
    if depth < 0.0 {
        return None;
    }

    // Observer frame with solar north up
    let west = phi.cos() * lambda.sin();
    let north = phi.sin() * b0.cos() - phi.cos() * lambda.cos() * b0.sin();

    // Rotate by the position angle of the axis
    let x = west * p0.cos() - north * p0.sin();
    let y = west * p0.sin() + north * p0.cos();

    Some((disk.cx + disk.radius * x, disk.cy - disk.radius * y))
}

pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn normalize(v: [f64; 3]) -> Option<[f64; 3]> {
    let len = dot(v, v).sqrt();
    (len > f64::EPSILON).then(|| [v[0] / len, v[1] / len, v[2] / len])
}
