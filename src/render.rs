use std::path::Path;

use rayon::prelude::*;

use crate::error::{GrowError, GrowResult};
use crate::grid::Grid;
use crate::grow::UNLABELED;
use crate::rng::hash_label;

const BLOCKED: [u8; 4] = [0, 0, 0, 255];
const UNREACHED: [u8; 4] = [110, 110, 110, 255];

fn check_slice(grid: &Grid<f64>, z: usize) -> GrowResult<()> {
    let depth = grid.shape.depth();
    if z >= depth {
        return Err(GrowError::SliceOutOfRange { z, depth });
    }
    Ok(())
}

#[inline]
fn label_color(label: f64) -> [u8; 4] {
    let h = hash_label(label);
    [
        (h & 0xFF) as u8 | 60,
        ((h >> 8) & 0xFF) as u8 | 60,
        ((h >> 16) & 0xFF) as u8 | 60,
        255,
    ]
}

/// Diagnostic: one colour per label at depth slice `z`.
/// Blocked = black, traversable but unreached = gray.
pub fn render_labels(labels: &Grid<f64>, z: usize) -> GrowResult<Vec<u8>> {
    check_slice(labels, z)?;
    let w = labels.shape.cols();
    let h = labels.shape.rows();
    let mut rgba = vec![0u8; w * h * 4];
    if rgba.is_empty() {
        return Ok(rgba);
    }

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(r, row)| {
        for c in 0..w {
            let v = labels.get(r, c, z);
            let color = if v.is_nan() {
                BLOCKED
            } else if v == UNLABELED {
                UNREACHED
            } else {
                label_color(v)
            };
            row[c * 4..c * 4 + 4].copy_from_slice(&color);
        }
    });

    Ok(rgba)
}

/// Diagnostic: grayscale distance at depth slice `z`, scaled to the largest
/// finite distance. Infinite cells render black.
pub fn render_distance(dist: &Grid<f64>, z: usize) -> GrowResult<Vec<u8>> {
    check_slice(dist, z)?;
    let max_d = dist
        .data
        .iter()
        .cloned()
        .filter(|d| d.is_finite())
        .fold(0.0f64, f64::max)
        .max(1.0);
    let w = dist.shape.cols();
    let h = dist.shape.rows();
    let mut rgba = vec![0u8; w * h * 4];
    if rgba.is_empty() {
        return Ok(rgba);
    }

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(r, row)| {
        for c in 0..w {
            let d = dist.get(r, c, z);
            let color = if d.is_finite() {
                let v = (255.0 - (d / max_d) * 215.0) as u8;
                [v, v, v, 255]
            } else {
                BLOCKED
            };
            row[c * 4..c * 4 + 4].copy_from_slice(&color);
        }
    });

    Ok(rgba)
}

pub fn save_png(path: &Path, rgba: &[u8], w: usize, h: usize) -> GrowResult<()> {
    image::save_buffer(path, rgba, w as u32, h as u32, image::ColorType::Rgba8)?;
    Ok(())
}
