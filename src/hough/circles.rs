//! Gradient-directed circle Hough transform.
//!
//! For each Canny edge pixel, votes are cast along ±its gradient direction at
//! every radius in `[min_radius, max_radius]`, stepping one accumulator cell
//! at a time. The accumulator is 2-D over centre positions at resolution
//! `1 / dp`; circle edges converge on their centre because gradients on a
//! circle point radially.
//!
//! Peak extraction
//! - Gradient noise spreads the votes of one centre over a small block of
//!   cells, so the gate works on the 3×3 neighbourhood sum of each cell. A
//!   cell becomes a centre candidate when that sum exceeds `center_threshold`
//!   and it is a 4-neighbour local maximum of the pooled sums (`>` towards
//!   left/up, `>=` towards right/down).
//! - The centre itself is the vote-weighted centroid of the raw votes in a
//!   5×5 block, starting at the peak cell and re-centred on the centroid
//!   until it settles.
//! - Candidates are ranked by pooled votes, ties by scan order, and greedily
//!   suppressed when they fall within `min_center_distance` of a previously
//!   kept candidate. Suppression runs over the accumulator before radius
//!   estimation, so raising `center_threshold` only ever drops candidates.
//! - The radius of each surviving centre is the distance bin (width `dp`)
//!   with the highest edge support per unit radius over a 3-bin window. The
//!   circle is accepted when that support also exceeds `center_threshold`.

use crate::edges::{canny_with_gradients, EDGE_ON};
use crate::image::ImageU8;
use crate::types::CircleCandidate;
use log::debug;

/// Parameters of a single circle voting pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleVoteParams {
    /// Inverse ratio of accumulator resolution to image resolution.
    pub dp: f32,
    /// Minimum distance between accepted centres (pixels).
    pub min_center_distance: f32,
    /// Canny high threshold; the low threshold is half of it.
    pub edge_threshold: f32,
    /// Vote gate for centre cells and radius support.
    pub center_threshold: u32,
    /// Smallest radius searched (pixels).
    pub min_radius: u32,
    /// Largest radius searched; 0 means `max(width, height)`.
    pub max_radius: u32,
}

struct EdgePixel {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
}

/// Centre accumulator over `(x, y)` at `1 / dp` resolution.
struct CenterAccumulator {
    votes: Vec<u32>,
    width: usize,
    height: usize,
    inv_dp: f32,
}

impl CenterAccumulator {
    fn new(img_w: usize, img_h: usize, dp: f32) -> Self {
        let width = ((img_w as f32 / dp).ceil() as usize).max(1);
        let height = ((img_h as f32 / dp).ceil() as usize).max(1);
        Self {
            votes: vec![0; width * height],
            width,
            height,
            inv_dp: 1.0 / dp,
        }
    }

    /// Cast votes along the ray `p ± r·d` for `r` in accumulator units.
    fn cast(&mut self, p: &EdgePixel, r_min: usize, r_max: usize) {
        let ax = p.x * self.inv_dp;
        let ay = p.y * self.inv_dp;
        for sign in [1.0f32, -1.0] {
            let (sx, sy) = (sign * p.dx, sign * p.dy);
            for r in r_min..=r_max {
                let cx = (ax + sx * r as f32).round();
                let cy = (ay + sy * r as f32).round();
                if cx < 0.0 || cy < 0.0 || cx >= self.width as f32 || cy >= self.height as f32 {
                    break;
                }
                self.votes[cy as usize * self.width + cx as usize] += 1;
            }
        }
    }

    /// Sum of the votes in the 3×3 block around every cell.
    fn pooled(&self) -> Vec<u32> {
        let (w, h) = (self.width, self.height);
        let mut rows = vec![0u32; w * h];
        for y in 0..h {
            let row = &self.votes[y * w..(y + 1) * w];
            for x in 0..w {
                let lo = x.saturating_sub(1);
                let hi = (x + 1).min(w - 1);
                rows[y * w + x] = row[lo..=hi].iter().sum();
            }
        }
        let mut pooled = vec![0u32; w * h];
        for y in 0..h {
            let lo = y.saturating_sub(1);
            let hi = (y + 1).min(h - 1);
            for x in 0..w {
                pooled[y * w + x] = (lo..=hi).map(|yy| rows[yy * w + x]).sum();
            }
        }
        pooled
    }

    /// Cells whose pooled votes exceed `threshold` and form a 4-neighbour
    /// local maximum, ordered by descending pooled votes (scan order on ties).
    fn peaks(&self, threshold: u32) -> Vec<(usize, usize, u32)> {
        let (w, h) = (self.width, self.height);
        let pooled = self.pooled();
        let at = |x: usize, y: usize| pooled[y * w + x];
        let mut peaks = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let v = at(x, y);
                if v <= threshold {
                    continue;
                }
                let left = if x > 0 { at(x - 1, y) } else { 0 };
                let right = if x + 1 < w { at(x + 1, y) } else { 0 };
                let up = if y > 0 { at(x, y - 1) } else { 0 };
                let down = if y + 1 < h { at(x, y + 1) } else { 0 };
                if v > left && v >= right && v > up && v >= down {
                    peaks.push((x, y, v));
                }
            }
        }
        peaks.sort_by(|a, b| b.2.cmp(&a.2));
        peaks
    }

    /// Vote-weighted centroid of the raw votes within 2 cells of `(x, y)`,
    /// in accumulator units.
    fn centroid(&self, x: usize, y: usize) -> (f32, f32) {
        let (w, h) = (self.width, self.height);
        let (mut sx, mut sy, mut total) = (0.0f32, 0.0f32, 0.0f32);
        for yy in y.saturating_sub(2)..=(y + 2).min(h - 1) {
            for xx in x.saturating_sub(2)..=(x + 2).min(w - 1) {
                let v = self.votes[yy * w + xx] as f32;
                sx += v * xx as f32;
                sy += v * yy as f32;
                total += v;
            }
        }
        if total <= 0.0 {
            return (x as f32, y as f32);
        }
        (sx / total, sy / total)
    }

    /// Shift the centroid window until it stops moving (a few steps at most).
    fn refine_center(&self, x: usize, y: usize) -> (f32, f32) {
        let (mut cell_x, mut cell_y) = (x, y);
        let mut center = self.centroid(cell_x, cell_y);
        for _ in 0..3 {
            let next = (center.0.round() as usize, center.1.round() as usize);
            if next == (cell_x, cell_y) {
                break;
            }
            (cell_x, cell_y) = next;
            center = self.centroid(cell_x, cell_y);
        }
        center
    }
}

/// Locate circles in a (typically pre-smoothed) grid.
///
/// Returns candidates strongest first; an empty vector when nothing clears the
/// thresholds or the grid is degenerate.
pub fn vote(grid: ImageU8<'_>, params: &CircleVoteParams) -> Vec<CircleCandidate> {
    let (w, h) = (grid.w, grid.h);
    if w < 3 || h < 3 || !(params.dp > 0.0) {
        return Vec::new();
    }
    let r_min = params.min_radius.max(1) as f32;
    let r_max = match params.max_radius {
        0 => w.max(h) as f32,
        r => r as f32,
    };
    if r_min > r_max || r_min > w.max(h) as f32 {
        return Vec::new();
    }

    let edges = collect_edges(grid, params.edge_threshold);
    if edges.is_empty() {
        return Vec::new();
    }

    let dp = params.dp;
    let mut acc = CenterAccumulator::new(w, h, dp);
    let acc_r_min = (r_min / dp).ceil() as usize;
    let acc_r_max = ((r_max / dp).floor() as usize).max(acc_r_min);
    for p in &edges {
        acc.cast(p, acc_r_min, acc_r_max);
    }

    let peaks = acc.peaks(params.center_threshold);
    let min_dist_sq = params.min_center_distance * params.min_center_distance;
    let mut kept: Vec<(f32, f32)> = Vec::new();
    let mut circles = Vec::new();
    for (ax, ay, votes) in peaks {
        let (fx, fy) = acc.refine_center(ax, ay);
        let (cx, cy) = (fx * dp, fy * dp);
        let crowded = kept.iter().any(|&(kx, ky)| {
            let (ddx, ddy) = (kx - cx, ky - cy);
            ddx * ddx + ddy * ddy < min_dist_sq
        });
        if crowded {
            continue;
        }
        kept.push((cx, cy));

        let Some((radius, support)) = estimate_radius(&edges, cx, cy, r_min, r_max, dp) else {
            continue;
        };
        if support <= params.center_threshold {
            continue;
        }
        circles.push(CircleCandidate {
            center_x: cx.round() as i32,
            center_y: cy.round() as i32,
            radius: radius.round().max(1.0) as i32,
            votes,
            radius_support: support,
        });
    }

    debug!(
        "circle vote: edges={} centres={} circles={}",
        edges.len(),
        kept.len(),
        circles.len()
    );
    circles
}

fn collect_edges(grid: ImageU8<'_>, edge_threshold: f32) -> Vec<EdgePixel> {
    let out = canny_with_gradients(grid, edge_threshold * 0.5, edge_threshold, 3);
    let w = grid.w;
    let mut edges = Vec::new();
    for (idx, &e) in out.edges.as_raw().iter().enumerate() {
        if e != EDGE_ON {
            continue;
        }
        let gx = out.grad.gx.data[idx];
        let gy = out.grad.gy.data[idx];
        let norm = (gx * gx + gy * gy).sqrt();
        if norm <= f32::EPSILON {
            continue;
        }
        edges.push(EdgePixel {
            x: (idx % w) as f32,
            y: (idx / w) as f32,
            dx: gx / norm,
            dy: gy / norm,
        });
    }
    edges
}

/// Radius with the highest support density around `(cx, cy)`, returned as
/// the vote-weighted mean of the winning 3-bin window.
fn estimate_radius(
    edges: &[EdgePixel],
    cx: f32,
    cy: f32,
    r_min: f32,
    r_max: f32,
    bin: f32,
) -> Option<(f32, u32)> {
    let bins = (r_max / bin).ceil() as usize + 2;
    let mut hist = vec![0u32; bins];
    for p in edges {
        let d = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
        if d < r_min || d > r_max {
            continue;
        }
        let i = (d / bin).round() as usize;
        if i < bins {
            hist[i] += 1;
        }
    }

    let first = ((r_min / bin).round() as usize).max(1);
    let last = ((r_max / bin).round() as usize).min(bins - 2);
    let mut best: Option<(usize, u32, f32)> = None;
    for i in first..=last {
        let support = hist[i - 1] + hist[i] + hist[i + 1];
        if support == 0 {
            continue;
        }
        let density = support as f32 / (i as f32 * bin);
        if best.map_or(true, |(_, _, d)| density > d) {
            best = Some((i, support, density));
        }
    }
    let (i, support, _) = best?;
    // density favours the inner edge of the window; recentre on its mass
    let weighted: u32 = (i - 1..=i + 1).map(|j| hist[j] * j as u32).sum();
    Some((weighted as f32 / support as f32 * bin, support))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::gaussian_blur;
    use crate::image::GrayImageU8;

    fn params() -> CircleVoteParams {
        CircleVoteParams {
            dp: 1.0,
            min_center_distance: 20.0,
            edge_threshold: 300.0,
            center_threshold: 40,
            min_radius: 5,
            max_radius: 0,
        }
    }

    fn disc(w: usize, h: usize, cx: f32, cy: f32, r: f32) -> GrayImageU8 {
        let sharp = GrayImageU8::from_fn(w, h, |x, y| {
            let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            if d <= r {
                220
            } else {
                30
            }
        });
        gaussian_blur(sharp.as_view(), 5, 0.0)
    }

    #[test]
    fn filled_disc_is_found() {
        let img = disc(120, 100, 58.0, 47.0, 30.0);
        let circles = vote(img.as_view(), &params());
        assert!(!circles.is_empty());
        let best = circles[0];
        assert!((best.center_x - 58).abs() <= 2, "{best:?}");
        assert!((best.center_y - 47).abs() <= 2, "{best:?}");
        assert!((best.radius - 30).abs() <= 2, "{best:?}");
    }

    #[test]
    fn spread_votes_are_pooled_into_one_peak() {
        let mut acc = CenterAccumulator::new(20, 20, 1.0);
        // 5×5 block of 10 votes per cell around (9, 11): no single cell
        // clears 40, every 3×3 sum inside the block does
        for y in 9..=13 {
            for x in 7..=11 {
                acc.votes[y * acc.width + x] = 10;
            }
        }
        let peaks = acc.peaks(40);
        assert_eq!(peaks.len(), 1, "{peaks:?}");
        assert_eq!(peaks[0], (8, 10, 90));
        let (cx, cy) = acc.refine_center(peaks[0].0, peaks[0].1);
        assert!((cx - 9.0).abs() < 1e-4 && (cy - 11.0).abs() < 1e-4, "({cx}, {cy})");
    }

    #[test]
    fn thin_ring_clears_default_gate() {
        let sharp = GrayImageU8::from_fn(200, 200, |x, y| {
            let d = ((x as f32 - 100.0).powi(2) + (y as f32 - 100.0).powi(2)).sqrt();
            if (d - 60.0).abs() <= 1.5 {
                255
            } else {
                0
            }
        });
        let img = gaussian_blur(sharp.as_view(), 5, 0.0);
        let p = CircleVoteParams {
            min_center_distance: 50.0,
            center_threshold: 100,
            min_radius: 10,
            ..params()
        };
        let circles = vote(img.as_view(), &p);
        let best = circles.first().expect("ring at the default gate");
        assert!((best.center_x - 100).abs() <= 2, "{best:?}");
        assert!((best.center_y - 100).abs() <= 2, "{best:?}");
        assert!((best.radius - 60).abs() <= 2, "{best:?}");
    }

    #[test]
    fn featureless_and_empty_grids_yield_nothing() {
        let flat = GrayImageU8::filled(64, 64, 0);
        assert!(vote(flat.as_view(), &params()).is_empty());
        let empty = GrayImageU8::empty();
        assert!(vote(empty.as_view(), &params()).is_empty());
    }

    #[test]
    fn minimum_radius_larger_than_grid_yields_nothing() {
        let img = disc(40, 40, 20.0, 20.0, 10.0);
        let p = CircleVoteParams {
            min_radius: 60,
            ..params()
        };
        assert!(vote(img.as_view(), &p).is_empty());
    }

    #[test]
    fn radius_estimate_prefers_dense_ring() {
        let mut edges = Vec::new();
        for k in 0..100 {
            let a = k as f32 * std::f32::consts::TAU / 100.0;
            edges.push(EdgePixel {
                x: 50.0 + 20.0 * a.cos(),
                y: 50.0 + 20.0 * a.sin(),
                dx: a.cos(),
                dy: a.sin(),
            });
        }
        // sparse clutter further out
        for k in 0..10 {
            edges.push(EdgePixel {
                x: 50.0 + 40.0,
                y: 40.0 + k as f32,
                dx: 1.0,
                dy: 0.0,
            });
        }
        let (r, support) = estimate_radius(&edges, 50.0, 50.0, 5.0, 80.0, 1.0).unwrap();
        assert!((r - 20.0).abs() <= 0.5, "r={r}");
        assert!(support >= 90);
    }
}
