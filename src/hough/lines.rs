//! Normal-form line Hough transform.
//!
//! Every non-zero pixel of a binary edge grid votes once per θ bin for
//! `ρ = x·cos θ + y·sin θ`, rounded to the nearest ρ bin. θ bins start at 0
//! and step by `theta_resolution` up to (but excluding) π; ρ bins are
//! symmetric around zero and cover the grid diagonal.
//!
//! Every cell with at least `vote_threshold` votes is emitted, sorted by
//! descending votes. Ties keep accumulator scan order (θ-major, then ρ
//! ascending). No peak suppression is applied: neighbouring cells of one
//! physical edge may all be reported.

use crate::image::{ImageU8, ImageView};
use crate::types::LineCandidate;
use std::f32::consts::PI;

/// Dense `(θ, ρ)` vote table with precomputed trigonometry.
pub struct LineAccumulator {
    votes: Vec<u32>,
    rho_bins: usize,
    rho_offset: usize,
    rho_resolution: f32,
    theta_resolution: f32,
    cos_table: Vec<f32>,
    sin_table: Vec<f32>,
}

impl LineAccumulator {
    /// Accumulator sized for a `width × height` grid.
    pub fn new(width: usize, height: usize, rho_resolution: f32, theta_resolution: f32) -> Self {
        let theta_bins = ((PI / theta_resolution).round() as usize).max(1);
        let max_rho = ((width * width + height * height) as f32).sqrt();
        let rho_offset = (max_rho / rho_resolution).ceil() as usize + 1;
        let rho_bins = 2 * rho_offset + 1;

        let (sin_table, cos_table) = (0..theta_bins)
            .map(|t| (t as f32 * theta_resolution).sin_cos())
            .unzip();

        Self {
            votes: vec![0; rho_bins * theta_bins],
            rho_bins,
            rho_offset,
            rho_resolution,
            theta_resolution,
            cos_table,
            sin_table,
        }
    }

    pub fn theta_bins(&self) -> usize {
        self.cos_table.len()
    }

    pub fn rho_bins(&self) -> usize {
        self.rho_bins
    }

    #[inline]
    fn rho_index(&self, rho: f32) -> usize {
        let idx = (rho / self.rho_resolution).round() as isize + self.rho_offset as isize;
        idx.clamp(0, self.rho_bins as isize - 1) as usize
    }

    /// Cast one vote per θ bin for the point `(x, y)`.
    pub fn add_point(&mut self, x: f32, y: f32) {
        for t in 0..self.theta_bins() {
            let rho = x * self.cos_table[t] + y * self.sin_table[t];
            let r = self.rho_index(rho);
            self.votes[t * self.rho_bins + r] += 1;
        }
    }

    pub fn votes_at(&self, theta_idx: usize, rho_idx: usize) -> u32 {
        self.votes[theta_idx * self.rho_bins + rho_idx]
    }

    /// Cells with at least `vote_threshold` votes, strongest first.
    pub fn candidates(&self, vote_threshold: u32) -> Vec<LineCandidate> {
        let mut out = Vec::new();
        for t in 0..self.theta_bins() {
            let row = &self.votes[t * self.rho_bins..(t + 1) * self.rho_bins];
            for (r, &votes) in row.iter().enumerate() {
                if votes < vote_threshold || votes == 0 {
                    continue;
                }
                out.push(LineCandidate {
                    rho: (r as f32 - self.rho_offset as f32) * self.rho_resolution,
                    theta: t as f32 * self.theta_resolution,
                    votes,
                });
            }
        }
        // stable: equal votes stay in scan order
        out.sort_by(|a, b| b.votes.cmp(&a.votes));
        out
    }
}

/// Vote over every non-zero pixel of `edges` and return the candidates.
pub fn vote(
    edges: ImageU8<'_>,
    rho_resolution: f32,
    theta_resolution: f32,
    vote_threshold: u32,
) -> Vec<LineCandidate> {
    if edges.is_empty() || !(rho_resolution > 0.0) || !(theta_resolution > 0.0) {
        return Vec::new();
    }
    let mut acc = LineAccumulator::new(edges.w, edges.h, rho_resolution, theta_resolution);
    for (y, row) in edges.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if v != 0 {
                acc.add_point(x as f32, y as f32);
            }
        }
    }
    acc.candidates(vote_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayImageU8;

    const DEG: f32 = PI / 180.0;

    #[test]
    fn horizontal_row_of_points_votes_for_theta_ninety() {
        let edges = GrayImageU8::from_fn(40, 30, |_, y| if y == 12 { 255 } else { 0 });
        let lines = vote(edges.as_view(), 1.0, DEG, 30);
        assert!(!lines.is_empty());
        let top = lines[0];
        assert_eq!(top.votes, 40);
        assert!((top.theta - 90.0 * DEG).abs() < 1e-4);
        assert!((top.rho - 12.0).abs() < 1e-4);
    }

    #[test]
    fn ties_keep_scan_order() {
        // two parallel vertical lines with identical support
        let edges = GrayImageU8::from_fn(30, 20, |x, _| if x == 5 || x == 20 { 255 } else { 0 });
        let lines = vote(edges.as_view(), 1.0, DEG, 20);
        assert!(lines.len() >= 2);
        assert_eq!(lines[0].votes, 20);
        assert_eq!(lines[1].votes, 20);
        assert_eq!(lines[0].theta, 0.0);
        assert_eq!(lines[1].theta, 0.0);
        assert!((lines[0].rho - 5.0).abs() < 1e-4);
        assert!((lines[1].rho - 20.0).abs() < 1e-4);
    }

    #[test]
    fn threshold_is_inclusive_and_filters() {
        let edges = GrayImageU8::from_fn(10, 10, |x, _| if x == 3 { 255 } else { 0 });
        assert!(!vote(edges.as_view(), 1.0, DEG, 10).is_empty());
        assert!(vote(edges.as_view(), 1.0, DEG, 11).is_empty());
    }

    #[test]
    fn empty_edges_yield_nothing() {
        let blank = GrayImageU8::filled(16, 16, 0);
        assert!(vote(blank.as_view(), 1.0, DEG, 1).is_empty());
        let empty = GrayImageU8::empty();
        assert!(vote(empty.as_view(), 1.0, DEG, 1).is_empty());
    }

    #[test]
    fn coarse_theta_resolution_keeps_range_below_pi() {
        let acc = LineAccumulator::new(10, 10, 1.0, PI);
        assert_eq!(acc.theta_bins(), 1);
        let acc = LineAccumulator::new(10, 10, 1.0, PI / 4.0);
        assert_eq!(acc.theta_bins(), 4);
        assert!(acc.rho_bins() > 2 * 14);
    }

    #[test]
    fn negative_rho_is_representable() {
        // line y = -x + 0 through the origin corner at theta = 135 degrees
        let mut acc = LineAccumulator::new(20, 20, 1.0, 45.0 * DEG);
        acc.add_point(10.0, 0.0);
        let rho = 10.0 * (135.0 * DEG).cos();
        let r = acc.rho_index(rho);
        assert_eq!(acc.votes_at(3, r), 1);
        let lines = acc.candidates(1);
        assert!(lines.iter().any(|l| l.rho < 0.0));
    }
}
