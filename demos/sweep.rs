//! Fuzzy c-means and an FPC sweep on a simple 2D dataset.

use smudge::{FpcSweep, FuzzyCMeans};

fn main() {
    // Three well-separated clusters in [0, 1]², already scaled.
    let data: Vec<Vec<f32>> = vec![
        // Cluster A (low limit, low spend)
        vec![0.10, 0.10],
        vec![0.12, 0.08],
        vec![0.08, 0.12],
        vec![0.11, 0.11],
        // Cluster B (high limit, low spend)
        vec![0.90, 0.10],
        vec![0.88, 0.12],
        vec![0.92, 0.09],
        vec![0.91, 0.11],
        // Cluster C (mid limit, high spend)
        vec![0.50, 0.90],
        vec![0.52, 0.88],
        vec![0.48, 0.92],
        vec![0.51, 0.91],
    ];

    // --- Single informative run (c=2) ---
    let fit = FuzzyCMeans::new(2).with_seed(42).fit(&data).unwrap();
    println!("=== Fuzzy c-means (c=2) ===");
    println!("  FPC: {:.4}  (converged: {})", fit.fpc, fit.converged);
    let first: Vec<f32> = fit.memberships.iter().map(|row| row[0]).collect();
    println!(
        "  point 0 memberships: {:?}  sum = {:.4}",
        first,
        first.iter().sum::<f32>()
    );
    for (cluster, count) in fit.cluster_sizes() {
        println!("  cluster {} => {} points", cluster, count);
    }

    // --- Sweep c=2..=5 ---
    let result = FpcSweep::new(2..=5).with_seed(42).run(&data).unwrap();
    println!("\n=== FPC sweep (c=2..=5) ===");
    for run in result.runs() {
        match &run.outcome {
            Ok(candidate) => println!("  c={} | FPC={:.4}", run.c, candidate.fit.fpc),
            Err(err) => println!("  c={} | failed: {}", run.c, err),
        }
    }

    let best_c = result.best_c().unwrap();
    let best = result.best().unwrap().outcome.as_ref().unwrap();
    println!("\n=== Final partition (best c={}) ===", best_c);
    for (i, label) in best.assignments.iter().enumerate() {
        println!(
            "  point {:2} ({:4.2}, {:4.2}) => cluster {}",
            i, data[i][0], data[i][1], label
        );
    }
    for (i, center) in best.fit.centers.iter().enumerate() {
        println!("  center {} at ({:4.2}, {:4.2})", i, center[0], center[1]);
    }
}
