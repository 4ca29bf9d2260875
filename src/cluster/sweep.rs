//! Model selection for fuzzy c-means: sweep candidate cluster counts and
//! keep the one with the crispest partition.
//!
//! The sweep runs the engine once per candidate c with identical parameters
//! and seed, records every run in full, and selects the c maximizing the
//! fuzzy partition coefficient. FPC tends to fall as c grows (more clusters
//! fuzz the boundary regions), but the sweep always scans the whole range
//! rather than stopping at the first local maximum.
//!
//! A failed candidate (c too large for the dataset, non-finite output) is
//! recorded and excluded from selection; the remaining candidates still run.

use super::fcm::{FcmFit, FuzzyCMeans};
use crate::error::{Error, Result};

/// FPC-based sweep over candidate cluster counts.
#[derive(Debug, Clone)]
pub struct FpcSweep {
    /// Candidate cluster counts, ascending and deduplicated.
    candidates: Vec<usize>,
    /// Fuzzifier passed to every engine run.
    m: f32,
    /// Convergence tolerance passed to every engine run.
    tolerance: f32,
    /// Iteration cap passed to every engine run.
    max_iter: usize,
    /// Seed shared by every engine run.
    seed: u64,
}

impl FpcSweep {
    /// Create a sweep over the given candidate cluster counts.
    ///
    /// Candidates are visited in ascending order; duplicates are dropped.
    /// Engine parameters default to the same values as [`FuzzyCMeans::new`].
    pub fn new<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut candidates: Vec<usize> = candidates.into_iter().collect();
        candidates.sort_unstable();
        candidates.dedup();
        Self {
            candidates,
            m: 2.0,
            tolerance: 0.005,
            max_iter: 1000,
            seed: 42,
        }
    }

    /// Set the fuzzifier exponent used for every run.
    pub fn with_fuzzifier(mut self, m: f32) -> Self {
        self.m = m;
        self
    }

    /// Set the convergence tolerance used for every run.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap used for every run.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the seed shared by every run.
    ///
    /// Every candidate starts from the same seed, so the whole sweep is
    /// deterministic; re-running the engine at the selected c reproduces the
    /// stored result exactly.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run the engine once per candidate and select the best c.
    ///
    /// Per-candidate failures are recorded in the corresponding
    /// [`CandidateRun`] and excluded from selection without aborting the
    /// rest of the sweep.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] for an empty dataset.
    /// - [`Error::InvalidParameter`] for an empty candidate list.
    pub fn run(&self, data: &[Vec<f32>]) -> Result<SweepResult> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.candidates.is_empty() {
            return Err(Error::InvalidParameter {
                name: "candidates",
                message: "must not be empty",
            });
        }

        let mut runs = Vec::with_capacity(self.candidates.len());
        for &c in &self.candidates {
            let engine = FuzzyCMeans::new(c)
                .with_fuzzifier(self.m)
                .with_tolerance(self.tolerance)
                .with_max_iter(self.max_iter)
                .with_seed(self.seed);
            let outcome = engine.fit(data).map(|fit| {
                let assignments = fit.hard_assignments();
                CandidateFit { fit, assignments }
            });
            runs.push(CandidateRun { c, outcome });
        }

        // Strict argmax over the ascending candidates keeps the smallest c
        // on ties.
        let mut best: Option<(usize, f32)> = None;
        for (idx, run) in runs.iter().enumerate() {
            if let Ok(candidate) = &run.outcome {
                let better = match best {
                    None => true,
                    Some((_, best_fpc)) => candidate.fit.fpc > best_fpc,
                };
                if better {
                    best = Some((idx, candidate.fit.fpc));
                }
            }
        }

        Ok(SweepResult {
            runs,
            best: best.map(|(idx, _)| idx),
        })
    }
}

impl Default for FpcSweep {
    /// Sweep c = 2..=10.
    fn default() -> Self {
        Self::new(2..=10)
    }
}

/// One candidate's outcome within a sweep.
#[derive(Debug)]
pub struct CandidateRun {
    /// The cluster count this run was configured with.
    pub c: usize,
    /// The fitted partition, or the error that excluded this candidate.
    pub outcome: Result<CandidateFit>,
}

/// A successful candidate fit plus its derived hard labels.
#[derive(Clone, Debug)]
pub struct CandidateFit {
    /// The engine output for this candidate.
    pub fit: FcmFit,
    /// Hard label per point (argmax membership). Diagnostic only; it feeds
    /// nothing back into the optimization.
    pub assignments: Vec<usize>,
}

/// All per-candidate runs of a sweep, ordered by c, plus the selection.
#[derive(Debug)]
pub struct SweepResult {
    runs: Vec<CandidateRun>,
    best: Option<usize>,
}

impl SweepResult {
    /// Every candidate run, in ascending c order.
    pub fn runs(&self) -> &[CandidateRun] {
        &self.runs
    }

    /// The selected run (highest FPC, ties to the smallest c), if any
    /// candidate succeeded.
    ///
    /// This is the stored output of the winning run; by the determinism
    /// contract it is identical to re-running the engine at
    /// [`SweepResult::best_c`] with the same parameters and seed.
    pub fn best(&self) -> Option<&CandidateRun> {
        self.best.map(|idx| &self.runs[idx])
    }

    /// The selected cluster count, if any candidate succeeded.
    pub fn best_c(&self) -> Option<usize> {
        self.best.map(|idx| self.runs[idx].c)
    }
}
