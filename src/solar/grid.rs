//! Heliographic latitude/longitude graticule projected onto disk images.

use serde::{Deserialize, Serialize};

use super::projection::{cross, dot, heliographic_to_image, normalize};
use super::{SolarDisk, SolarOrientation};
use crate::constants::grid::{MAX_LATITUDE_DEG, STEP_DEG};
use crate::model::{GridLine, GridOverlay, Point};

/// One graticule line: its fixed latitude or longitude and its visible points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarGridLine {
    pub degrees: f64,
    pub points: Vec<(f64, f64)>,
}

/// Square patch cut out of a full-disk image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchRegion {
    /// Left edge in full-disk pixels
    pub x: f64,
    /// Top edge in full-disk pixels
    pub y: f64,
    /// Side length in pixels
    pub size: u32,
}

impl PatchRegion {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let size = self.size as f64;
        px >= self.x && px < self.x + size && py >= self.y && py < self.y + size
    }

    pub fn center(&self) -> (f64, f64) {
        let half = (self.size / 2) as f64;
        (self.x + half, self.y + half)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarGrid {
    pub latitude_lines: Vec<SolarGridLine>,
    pub longitude_lines: Vec<SolarGridLine>,
}

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(move |i| start + step * i as f64)
}

/// Multiples of [`STEP_DEG`] from `-limit` to `limit` inclusive.
fn graticule(limit: f64) -> impl Iterator<Item = f64> {
    let steps = (2.0 * limit / STEP_DEG).round() as i32;
    (0..=steps).map(move |i| -limit + STEP_DEG * i as f64)
}

impl SolarGrid {
    /// Full-disk graticule: latitudes every 15 degrees up to +-75, longitudes
    /// every 15 degrees around the whole sphere, each sampled at `samples`
    /// points. Far-side points are dropped, and so are lines left empty.
    pub fn global(orientation: &SolarOrientation, disk: &SolarDisk, samples: usize) -> Self {
        let samples = if samples < 2 {
            log::warn!("Grid needs at least 2 samples per line, got {}", samples);
            2
        } else {
            samples
        };

        let project_line = |degrees: f64, coords: &mut dyn Iterator<Item = (f64, f64)>| {
            let points: Vec<_> = coords
                .filter_map(|(lat, lon)| heliographic_to_image(lat, lon, orientation, disk))
                .collect();
            (!points.is_empty()).then_some(SolarGridLine { degrees, points })
        };

        let latitude_lines: Vec<_> = graticule(MAX_LATITUDE_DEG)
            .filter_map(|lat| {
                project_line(lat, &mut linspace(-180.0, 180.0, samples).map(|lon| (lat, lon)))
            })
            .collect();
        let longitude_lines: Vec<_> = graticule(180.0)
            .filter_map(|lon| {
                project_line(lon, &mut linspace(-90.0, 90.0, samples).map(|lat| (lat, lon)))
            })
            .collect();

        log::debug!(
            "Global grid: {} latitude and {} longitude lines",
            latitude_lines.len(),
            longitude_lines.len()
        );
        Self {
            latitude_lines,
            longitude_lines,
        }
    }

    /// The part of this full-disk grid inside `patch`, rectified into the
    /// patch's tangent frame so the lines match a rectified patch image.
    pub fn patch(
        &self,
        patch: &PatchRegion,
        disk: &SolarDisk,
        orientation: &SolarOrientation,
    ) -> Self {
        let Some(rectifier) = Rectifier::new(patch, disk, orientation) else {
            log::warn!("Patch {:?} has no tangent frame; grid left empty", patch);
            return Self::default();
        };

        let clip = |lines: &[SolarGridLine]| -> Vec<SolarGridLine> {
            lines
                .iter()
                .filter_map(|line| {
                    let points: Vec<_> = line
                        .points
                        .iter()
                        .filter(|&&(x, y)| patch.contains(x, y))
                        .filter_map(|&(x, y)| rectifier.apply(x, y))
                        .collect();
                    (!points.is_empty()).then(|| SolarGridLine {
                        degrees: line.degrees,
                        points,
                    })
                })
                .collect()
        };

        Self {
            latitude_lines: clip(&self.latitude_lines),
            longitude_lines: clip(&self.longitude_lines),
        }
    }

    /// Polylines for the canvas overlay.
    pub fn to_overlay(&self) -> GridOverlay {
        let convert = |lines: &[SolarGridLine]| -> Vec<GridLine> {
            lines
                .iter()
                .map(|line| {
                    GridLine::new(
                        line.points
                            .iter()
                            .map(|&(x, y)| Point::new(x as f32, y as f32))
                            .collect(),
                    )
                })
                .collect()
        };
        GridOverlay {
            latitude_lines: convert(&self.latitude_lines),
            longitude_lines: convert(&self.longitude_lines),
        }
    }
}

/// Maps full-disk pixels into the tangent plane at a patch center, with solar
/// north pointing up.
struct Rectifier {
    axes: [[f64; 3]; 2],
    disk: SolarDisk,
    offset: f64,
}

impl Rectifier {
    fn new(patch: &PatchRegion, disk: &SolarDisk, orientation: &SolarOrientation) -> Option<Self> {
        let (cx, cy) = patch.center();
        let normal = normalize(disk.sphere_point(cx, cy))?;

        let p0 = orientation.p0.to_radians();
        let north = [-p0.sin(), -p0.cos(), 0.0];
        let along = dot(north, normal);
        let north_tangent = normalize([
            north[0] - along * normal[0],
            north[1] - along * normal[1],
            north[2] - along * normal[2],
        ])?;

        let y_axis = north_tangent.map(|c| -c);
        let x_axis = normalize(cross(y_axis, normal))?;
        Some(Self {
            axes: [x_axis, y_axis],
            disk: *disk,
            offset: patch.size as f64 / 2.0,
        })
    }

    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let n = normalize(self.disk.sphere_point(x, y))?;
        Some((
            dot(self.axes[0], n) * self.disk.radius + self.offset,
            dot(self.axes[1], n) * self.disk.radius + self.offset,
        ))
    }
}
