//! Soft clustering primitives.
//!
//! `smudge` is a small, backend-agnostic library for fuzzy partitioning of dense vectors.
//!
//! The primary public API is under [`cluster`], which provides:
//! - fuzzy c-means (seeded initialization, alternating optimization)
//! - an FPC sweep for selecting the number of clusters

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    CandidateFit, CandidateRun, Clustering, FcmFit, FpcSweep, FuzzyCMeans, SweepResult,
};
pub use error::{Error, Result};
