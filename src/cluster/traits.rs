use crate::error::Result;

/// Common interface for clustering algorithms that can produce one label per point.
///
/// Soft algorithms implement this by collapsing their membership matrix to the
/// dominant cluster per point; the full soft output stays available through the
/// algorithm's own `fit` method.
pub trait Clustering {
    /// Fit the model (if needed) and return one cluster label per input point.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// The configured number of clusters (if applicable).
    ///
    /// For algorithms that discover the number of clusters dynamically,
    /// this returns 0.
    fn n_clusters(&self) -> usize;
}
