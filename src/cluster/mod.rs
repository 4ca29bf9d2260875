//! Clustering algorithms for grouping similar items.
//!
//! This module provides soft clustering for dense vectors.
//!
//! ## Hard vs Soft Clustering
//!
//! **Hard clustering** assigns each item to exactly one cluster. Simple, but
//! loses information when items genuinely span multiple groups.
//!
//! **Soft clustering** gives each item a graded membership in every cluster.
//! A customer might be 60% "high limit, high spend", 30% "high limit, low
//! spend", 10% "low limit". This reflects reality better than forcing a choice.
//!
//! ## Algorithms (implemented)
//!
//! ### Fuzzy c-means
//!
//! The classic soft analogue of k-means: alternately recompute centers as
//! membership-weighted means, then recompute memberships from distances to
//! the centers. Repeat until the memberships stop moving.
//!
//! **Objective**: Minimize the weighted within-cluster sum of squares:
//!
//! ```text
//! J = Σ_i Σ_k u_ik^m ||x_k - v_i||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - You know c in advance (or sweep over candidates, see below)
//!
//! ### FPC sweep
//!
//! When c is unknown, [`FpcSweep`] runs fuzzy c-means once per candidate c
//! and keeps the count whose partition is crispest, as measured by the fuzzy
//! partition coefficient (FPC). FPC lives in (1/c, 1]; 1 means every point
//! belongs fully to one cluster.
//!
//! ## Usage
//!
//! ```rust
//! use smudge::cluster::{Clustering, FpcSweep, FuzzyCMeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! // Soft clustering with fuzzy c-means
//! let fit = FuzzyCMeans::new(2).with_seed(42).fit(&data).unwrap();
//! assert!(fit.converged);
//! let labels = fit.hard_assignments();
//! assert_eq!(labels[0], labels[1]);  // First two together
//! assert_ne!(labels[0], labels[2]);  // Separate from last two
//!
//! // Model selection: how many clusters?
//! let result = FpcSweep::new(2..=3).with_seed(42).run(&data).unwrap();
//! assert_eq!(result.best_c(), Some(2));
//! ```

mod fcm;
mod sweep;
mod traits;
mod util;

pub use fcm::{FcmFit, FuzzyCMeans};
pub use sweep::{CandidateFit, CandidateRun, FpcSweep, SweepResult};
pub use traits::Clustering;
