//! Fuzzy c-means: soft partitioning via alternating optimization.
//!
//! # The Algorithm (Dunn 1973, Bezdek 1981)
//!
//! Fuzzy c-means (FCM) is the soft counterpart of k-means. Instead of
//! assigning each point to exactly one cluster, it maintains a membership
//! matrix `u` where `u[i][k]` is the degree (in [0, 1]) to which point `k`
//! belongs to cluster `i`, and every point's memberships sum to 1.
//!
//! ## Core Concepts
//!
//! - **Fuzzifier (m)**: Exponent controlling boundary softness. `m` close to
//!   1 approaches hard k-means; larger `m` smears membership across clusters.
//!   `m = 2` is the common default.
//! - **Membership matrix**: c clusters × n points, columns summing to 1.
//! - **FPC**: The fuzzy partition coefficient `(1/n)·Σ u²`, a crispness score
//!   in (1/c, 1]. Used by the sweep for model selection.
//!
//! ## Algorithm Steps
//!
//! 1. Initialize memberships from a seeded RNG (each column is a random
//!    positive vector normalized to sum 1).
//!
//! 2. Repeat until the largest membership change drops below `tolerance`
//!    or `max_iter` is reached:
//!    - Centers: membership^m-weighted mean of all points.
//!    - Distances: Euclidean, every point to every center.
//!    - Memberships: `u[i][k] = 1 / Σ_j (d_ik / d_jk)^(2/(m-1))`.
//!
//! ## Complexity
//!
//! - **Time**: O(iterations · c · n · (d + c)).
//! - **Space**: O(c · n) for the membership matrix.
//!
//! ## When to Use
//!
//! - Points plausibly belong to several groups at once
//! - You want a per-point confidence, not just a label
//! - Cluster count is unknown (combine with the FPC sweep)
//!
//! ## Limitations
//!
//! - Same spherical-cluster bias as k-means
//! - Converges to a local optimum; the seed matters
//!
//! ## References
//!
//! Bezdek, J. C. (1981). "Pattern Recognition with Fuzzy Objective Function
//! Algorithms." Plenum Press.

use rand::prelude::*;

use super::traits::Clustering;
use super::util::squared_euclidean;
use crate::error::{Error, Result};

/// Fuzzy c-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct FuzzyCMeans {
    /// Number of clusters.
    c: usize,
    /// Fuzzifier exponent, > 1.
    m: f32,
    /// Convergence threshold on the max membership change per iteration.
    tolerance: f32,
    /// Hard cap on iterations.
    max_iter: usize,
    /// RNG seed for the initial membership matrix.
    seed: u64,
}

impl FuzzyCMeans {
    /// Create a new fuzzy c-means clusterer for `c` clusters.
    ///
    /// # Typical Values
    ///
    /// - `m`: 2.0 (the default). Must be > 1.
    /// - `tolerance`: 0.005.
    /// - `max_iter`: 1000.
    pub fn new(c: usize) -> Self {
        Self {
            c,
            m: 2.0,
            tolerance: 0.005,
            max_iter: 1000,
            seed: 42,
        }
    }

    /// Set the fuzzifier exponent (must be > 1).
    pub fn with_fuzzifier(mut self, m: f32) -> Self {
        self.m = m;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the RNG seed used for the initial membership matrix.
    ///
    /// The seed is the only source of randomness; two fits with identical
    /// data, parameters, and seed produce identical output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit the model and return centers, memberships, and the FPC.
    ///
    /// Runs alternating optimization from a seeded random initialization.
    /// Exhausting `max_iter` before the tolerance criterion is met is not an
    /// error; the returned [`FcmFit`] has `converged = false` and still holds
    /// a usable partition.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] for an empty dataset.
    /// - [`Error::InvalidClusterCount`] when `c < 1` or `c > n`.
    /// - [`Error::InvalidParameter`] for `m <= 1`, a negative tolerance,
    ///   `max_iter < 1`, or zero-dimensional points.
    /// - [`Error::DimensionMismatch`] for ragged input rows.
    /// - [`Error::NumericalFailure`] when the fit produces non-finite values
    ///   (NaN or infinite inputs end up here).
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<FcmFit> {
        let n = data.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let d = data[0].len();
        if d == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        for point in data.iter().skip(1) {
            if point.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: point.len(),
                });
            }
        }

        if self.c < 1 || self.c > n {
            return Err(Error::InvalidClusterCount {
                requested: self.c,
                n_items: n,
            });
        }
        if !(self.m > 1.0) {
            return Err(Error::InvalidParameter {
                name: "m",
                message: "fuzzifier must be greater than 1",
            });
        }
        if !(self.tolerance >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "tolerance",
                message: "must be non-negative",
            });
        }
        if self.max_iter < 1 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        // c = 1 needs no optimization: one center at the mean, full membership.
        if self.c == 1 {
            let mut center = vec![0.0f32; d];
            for point in data {
                for (acc, x) in center.iter_mut().zip(point) {
                    *acc += x;
                }
            }
            for acc in &mut center {
                *acc /= n as f32;
            }
            let fit = FcmFit {
                centers: vec![center],
                memberships: vec![vec![1.0; n]],
                fpc: 1.0,
                iterations: 0,
                converged: true,
            };
            check_finite(&fit)?;
            return Ok(fit);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut memberships = init_memberships(&mut rng, self.c, n);
        let mut centers = vec![vec![0.0f32; d]; self.c];

        // d_ik / d_jk ratios are raised to this power in the membership update.
        let exponent = 2.0 / (self.m - 1.0);

        let mut iterations = 0;
        let mut converged = false;
        let mut distances = vec![0.0f32; self.c * n];

        while iterations < self.max_iter {
            iterations += 1;

            update_centers(data, &memberships, self.m, &mut centers);

            for (i, center) in centers.iter().enumerate() {
                for (k, point) in data.iter().enumerate() {
                    distances[i * n + k] = squared_euclidean(center, point).sqrt();
                }
            }

            let delta = update_memberships(&distances, n, exponent, &mut memberships);
            if delta <= self.tolerance {
                converged = true;
                break;
            }
        }

        let fpc = partition_coefficient(&memberships);
        let fit = FcmFit {
            centers,
            memberships,
            fpc,
            iterations,
            converged,
        };
        check_finite(&fit)?;
        Ok(fit)
    }
}

impl Default for FuzzyCMeans {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Clustering for FuzzyCMeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.hard_assignments())
    }

    fn n_clusters(&self) -> usize {
        self.c
    }
}

/// A fitted fuzzy partition.
#[derive(Clone, Debug)]
pub struct FcmFit {
    /// Cluster centers: `c` rows × `d` columns.
    ///
    /// Each center is a weighted mean of the input, so it lies within the
    /// componentwise bounds of the data.
    pub centers: Vec<Vec<f32>>,

    /// Membership matrix: `c` rows × `n` columns, each point's column
    /// summing to 1.
    pub memberships: Vec<Vec<f32>>,

    /// Fuzzy partition coefficient, in (1/c, 1].
    pub fpc: f32,

    /// Outer iterations actually run.
    pub iterations: usize,

    /// Whether the tolerance criterion was met before the iteration cap.
    pub converged: bool,
}

impl FcmFit {
    /// Number of clusters in this fit.
    pub fn n_clusters(&self) -> usize {
        self.centers.len()
    }

    /// Collapse the fuzzy partition to one label per point.
    ///
    /// Picks the cluster with the highest membership; exact ties go to the
    /// lowest cluster index. Purely a reporting view, the soft partition in
    /// [`FcmFit::memberships`] stays authoritative.
    pub fn hard_assignments(&self) -> Vec<usize> {
        let n = self.memberships.first().map_or(0, Vec::len);
        (0..n)
            .map(|k| {
                let mut best = 0;
                for i in 1..self.memberships.len() {
                    if self.memberships[i][k] > self.memberships[best][k] {
                        best = i;
                    }
                }
                best
            })
            .collect()
    }

    /// Points per cluster under [`FcmFit::hard_assignments`].
    ///
    /// Returns `(cluster, count)` pairs in ascending cluster order, listing
    /// only occupied clusters.
    pub fn cluster_sizes(&self) -> Vec<(usize, usize)> {
        let mut counts = vec![0usize; self.n_clusters()];
        for label in self.hard_assignments() {
            counts[label] += 1;
        }
        counts
            .into_iter()
            .enumerate()
            .filter(|&(_, count)| count > 0)
            .collect()
    }
}

/// Draw the initial c×n membership matrix: each column is a random positive
/// vector normalized to sum 1.
fn init_memberships(rng: &mut StdRng, c: usize, n: usize) -> Vec<Vec<f32>> {
    let mut memberships = vec![vec![0.0f32; n]; c];
    for k in 0..n {
        let mut sum = 0.0f32;
        for row in memberships.iter_mut() {
            let v = rng.random::<f32>();
            row[k] = v;
            sum += v;
        }
        if sum > f32::EPSILON {
            for row in memberships.iter_mut() {
                row[k] /= sum;
            }
        } else {
            for row in memberships.iter_mut() {
                row[k] = 1.0 / c as f32;
            }
        }
    }
    memberships
}

/// Recompute each center as the membership^m-weighted mean of the points.
///
/// A cluster whose total weight collapses to zero keeps its previous center.
fn update_centers(data: &[Vec<f32>], memberships: &[Vec<f32>], m: f32, centers: &mut [Vec<f32>]) {
    let d = data[0].len();
    for (row, center) in memberships.iter().zip(centers.iter_mut()) {
        let mut weight_sum = 0.0f32;
        let mut weighted = vec![0.0f32; d];
        for (&u, point) in row.iter().zip(data) {
            let w = u.powf(m);
            weight_sum += w;
            for (acc, x) in weighted.iter_mut().zip(point) {
                *acc += w * x;
            }
        }
        if weight_sum > 0.0 {
            for (c_j, w_j) in center.iter_mut().zip(weighted) {
                *c_j = w_j / weight_sum;
            }
        }
    }
}

/// Recompute memberships from center distances; returns the largest absolute
/// change against the previous matrix.
///
/// `distances` is c×n, row-major. When a point coincides exactly with a
/// center, the ratio formula would divide by zero; that point instead gets
/// its full mass on the first coinciding cluster.
fn update_memberships(
    distances: &[f32],
    n: usize,
    exponent: f32,
    memberships: &mut [Vec<f32>],
) -> f32 {
    let c = memberships.len();
    let mut delta = 0.0f32;
    let mut column = vec![0.0f32; c];

    for k in 0..n {
        match (0..c).find(|&i| distances[i * n + k] == 0.0) {
            Some(hit) => {
                for (i, v) in column.iter_mut().enumerate() {
                    *v = if i == hit { 1.0 } else { 0.0 };
                }
            }
            None => {
                for (i, v) in column.iter_mut().enumerate() {
                    let d_ik = distances[i * n + k];
                    let denom: f32 = (0..c)
                        .map(|j| (d_ik / distances[j * n + k]).powf(exponent))
                        .sum();
                    *v = 1.0 / denom;
                }
            }
        }

        for (row, &v) in memberships.iter_mut().zip(&column) {
            let change = (v - row[k]).abs();
            if change > delta {
                delta = change;
            }
            row[k] = v;
        }
    }

    delta
}

/// Fuzzy partition coefficient: `(1/n)·Σ u²`.
fn partition_coefficient(memberships: &[Vec<f32>]) -> f32 {
    let n = memberships.first().map_or(0, Vec::len);
    let sum: f32 = memberships
        .iter()
        .flat_map(|row| row.iter().map(|&u| u * u))
        .sum();
    sum / n as f32
}

/// Reject fits poisoned by NaN/Inf rather than handing them to callers.
fn check_finite(fit: &FcmFit) -> Result<()> {
    if fit.centers.iter().flatten().any(|v| !v.is_finite()) {
        return Err(Error::NumericalFailure {
            quantity: "cluster center",
        });
    }
    if fit.memberships.iter().flatten().any(|v| !v.is_finite()) {
        return Err(Error::NumericalFailure {
            quantity: "membership",
        });
    }
    if !fit.fpc.is_finite() {
        return Err(Error::NumericalFailure {
            quantity: "partition coefficient",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_distr::{Distribution, Normal};

    fn column_sum(fit: &FcmFit, k: usize) -> f32 {
        fit.memberships.iter().map(|row| row[k]).sum()
    }

    /// Two Gaussian blobs of 50 points each, well separated in [0, 1]².
    fn two_blobs() -> Vec<Vec<f32>> {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Normal::new(0.0f32, 0.05).unwrap();
        let mut data = Vec::with_capacity(100);
        for &(cx, cy) in &[(0.2f32, 0.2f32), (0.8, 0.8)] {
            for _ in 0..50 {
                data.push(vec![cx + noise.sample(&mut rng), cy + noise.sample(&mut rng)]);
            }
        }
        data
    }

    #[test]
    fn test_fcm_two_blobs_end_to_end() {
        let data = two_blobs();
        let fit = FuzzyCMeans::new(2).with_seed(42).fit(&data).unwrap();

        assert!(fit.converged);
        assert!(fit.iterations >= 1);
        assert!(fit.fpc > 0.9, "fpc = {}", fit.fpc);

        // Hard labels should recover the two blobs almost perfectly.
        let labels = fit.hard_assignments();
        let first = labels[0];
        let miscount = labels[..50].iter().filter(|&&l| l != first).count()
            + labels[50..].iter().filter(|&&l| l == first).count();
        assert!(miscount <= 3, "miscount = {miscount}");

        let sizes = fit.cluster_sizes();
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes.iter().map(|&(_, count)| count).sum::<usize>(), 100);
    }

    #[test]
    fn test_fcm_columns_sum_to_one() {
        let data = two_blobs();
        let fit = FuzzyCMeans::new(3).with_seed(1).fit(&data).unwrap();

        for k in 0..data.len() {
            let sum = column_sum(&fit, k);
            assert!((sum - 1.0).abs() < 1e-4, "column {k} sums to {sum}");
        }
    }

    #[test]
    fn test_fcm_fpc_bounds() {
        let data = two_blobs();
        for c in 2..=4 {
            let fit = FuzzyCMeans::new(c).with_seed(42).fit(&data).unwrap();
            assert!(fit.fpc <= 1.0 + 1e-5);
            assert!(fit.fpc > 1.0 / c as f32, "fpc = {} for c = {c}", fit.fpc);
        }
    }

    #[test]
    fn test_fcm_deterministic() {
        let data = two_blobs();
        let model = FuzzyCMeans::new(3).with_seed(99);
        let a = model.fit(&data).unwrap();
        let b = model.fit(&data).unwrap();

        assert_eq!(a.centers, b.centers);
        assert_eq!(a.memberships, b.memberships);
        assert_eq!(a.fpc, b.fpc);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_fcm_centers_within_input_bounds() {
        let data = two_blobs();
        let fit = FuzzyCMeans::new(2).with_seed(42).fit(&data).unwrap();

        for dim in 0..2 {
            let lo = data.iter().map(|p| p[dim]).fold(f32::INFINITY, f32::min);
            let hi = data.iter().map(|p| p[dim]).fold(f32::NEG_INFINITY, f32::max);
            for center in &fit.centers {
                assert!(center[dim] >= lo - 1e-6 && center[dim] <= hi + 1e-6);
            }
        }
    }

    #[test]
    fn test_fcm_one_cluster_fast_path() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
        let fit = FuzzyCMeans::new(1).fit(&data).unwrap();

        assert_eq!(fit.centers, vec![vec![0.5, 0.5]]);
        assert_eq!(fit.memberships, vec![vec![1.0; 4]]);
        assert_eq!(fit.fpc, 1.0);
        assert_eq!(fit.iterations, 0);
        assert!(fit.converged);
    }

    #[test]
    fn test_fcm_c_equals_n() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![5.0, 5.0]];
        let fit = FuzzyCMeans::new(4).with_seed(42).fit(&data).unwrap();

        assert_eq!(fit.n_clusters(), 4);
        for k in 0..data.len() {
            assert!((column_sum(&fit, k) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_fcm_all_points_identical() {
        // Power-of-two coordinates keep the weighted mean bit-exact, so the
        // centers land on the point itself and the zero-distance branch
        // engages for every point.
        let data = vec![vec![0.5, 0.25]; 5];
        let fit = FuzzyCMeans::new(2).with_seed(42).fit(&data).unwrap();

        assert!(fit.converged);
        assert_eq!(fit.fpc, 1.0);
        for center in &fit.centers {
            assert_eq!(center, &vec![0.5, 0.25]);
        }
        for k in 0..5 {
            assert_eq!(fit.memberships[0][k], 1.0);
            assert_eq!(fit.memberships[1][k], 0.0);
        }
    }

    #[test]
    fn test_fcm_nonconvergence_is_not_an_error() {
        let data = two_blobs();
        let fit = FuzzyCMeans::new(3)
            .with_seed(42)
            .with_max_iter(1)
            .fit(&data)
            .unwrap();

        assert!(!fit.converged);
        assert_eq!(fit.iterations, 1);
        // Still a usable partition.
        for k in 0..data.len() {
            assert!((column_sum(&fit, k) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_fcm_empty_input() {
        let data: Vec<Vec<f32>> = vec![];
        assert!(matches!(
            FuzzyCMeans::new(2).fit(&data),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_fcm_invalid_params() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 1.0]];

        // c out of range for the dataset
        assert!(matches!(
            FuzzyCMeans::new(0).fit(&data),
            Err(Error::InvalidClusterCount { requested: 0, .. })
        ));
        assert!(matches!(
            FuzzyCMeans::new(3).fit(&data),
            Err(Error::InvalidClusterCount { requested: 3, .. })
        ));

        // fuzzifier must be > 1
        assert!(FuzzyCMeans::new(2).with_fuzzifier(1.0).fit(&data).is_err());
        assert!(FuzzyCMeans::new(2).with_fuzzifier(0.5).fit(&data).is_err());

        // negative tolerance
        assert!(FuzzyCMeans::new(2).with_tolerance(-1.0).fit(&data).is_err());

        // zero iterations
        assert!(FuzzyCMeans::new(2).with_max_iter(0).fit(&data).is_err());
    }

    #[test]
    fn test_fcm_ragged_rows() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            FuzzyCMeans::new(2).fit(&data),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_fcm_nan_input_is_numerical_failure() {
        let data = vec![vec![f32::NAN, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let result = FuzzyCMeans::new(2).with_max_iter(5).fit(&data);
        assert!(matches!(result, Err(Error::NumericalFailure { .. })));
    }

    #[test]
    fn test_fcm_fit_predict_matches_hard_assignments() {
        let data = two_blobs();
        let model = FuzzyCMeans::new(2).with_seed(42);
        let labels = model.fit_predict(&data).unwrap();
        let fit = model.fit(&data).unwrap();

        assert_eq!(labels, fit.hard_assignments());
        assert_eq!(model.n_clusters(), 2);
    }
}
