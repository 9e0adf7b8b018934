//! Matching utilities for frame-to-frame ball association.

use nalgebra::Point2;
use ndarray::Array2;
use serde::Deserialize;

/// How live tracks are paired with the detections of a new frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Greedy nearest-neighbor walk over all pairs sorted by distance.
    ///
    /// Crossing trajectories can swap identities; that is accepted.
    #[default]
    Greedy,
    /// Minimum total distance assignment (Jonker-Volgenant).
    Optimal,
}

/// Compute the Euclidean distance matrix between track and detection centroids.
pub fn euclidean_distance(tracks: &[Point2<f32>], detections: &[Point2<f32>]) -> Array2<f32> {
    let mut dists = Array2::zeros((tracks.len(), detections.len()));
    for (i, t) in tracks.iter().enumerate() {
        for (j, d) in detections.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(t, d);
        }
    }
    dists
}

#[derive(Debug, Clone)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

impl AssignmentResult {
    fn from_matches(matches: Vec<(usize, usize)>, num_rows: usize, num_cols: usize) -> Self {
        let mut row_used = vec![false; num_rows];
        let mut col_used = vec![false; num_cols];
        for &(row, col) in &matches {
            row_used[row] = true;
            col_used[col] = true;
        }

        Self {
            matches,
            unmatched_tracks: unused_indices(&row_used),
            unmatched_detections: unused_indices(&col_used),
        }
    }
}

fn unused_indices(used: &[bool]) -> Vec<usize> {
    used.iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { None } else { Some(i) })
        .collect()
}

/// Dispatch to the assignment routine selected by `strategy`.
pub fn assign(cost_matrix: &Array2<f32>, strategy: MatchStrategy, thresh: f32) -> AssignmentResult {
    match strategy {
        MatchStrategy::Greedy => greedy_assignment(cost_matrix, thresh),
        MatchStrategy::Optimal => linear_assignment(cost_matrix, thresh),
    }
}

/// Greedy assignment: sort every (row, col) pair by cost, then commit pairs
/// whose row and column are both still free.
///
/// The sort is stable over row-major order, so equal costs resolve in favor of
/// the lower row (the older track), then the lower column.
pub fn greedy_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    let mut pairs: Vec<(usize, usize, f32)> = Vec::with_capacity(num_rows * num_cols);
    for i in 0..num_rows {
        for j in 0..num_cols {
            pairs.push((i, j, cost_matrix[[i, j]]));
        }
    }
    pairs.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut row_used = vec![false; num_rows];
    let mut col_used = vec![false; num_cols];
    let mut matches = Vec::new();

    for (row, col, cost) in pairs {
        if cost > thresh {
            break;
        }
        if row_used[row] || col_used[col] {
            continue;
        }
        row_used[row] = true;
        col_used[col] = true;
        matches.push((row, col));
    }

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}

/// Optimal assignment through `lapjv` on a square padded matrix.
pub fn linear_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::from_matches(Vec::new(), num_rows, num_cols);
    }

    let finite_max = cost_matrix
        .iter()
        .copied()
        .filter(|c| c.is_finite())
        .fold(0.0_f64, |acc, c| acc.max(c as f64));
    let pad_cost = (finite_max + 1.0) * 1e3;

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), pad_cost);

    for i in 0..num_rows {
        for j in 0..num_cols {
            let cost = cost_matrix[[i, j]] as f64;
            padded[[i, j]] = if cost.is_finite() { cost } else { pad_cost };
        }
    }

    let mut matches = vec![];
    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
                if col_idx < num_cols && cost_matrix[[row_idx, col_idx]] <= thresh {
                    matches.push((row_idx, col_idx));
                }
            }
        }
        Err(_) => {
            tracing::warn!("linear assignment failed, leaving frame unmatched");
        }
    }

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}
