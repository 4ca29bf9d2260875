use proptest::prelude::*;
use smudge::FuzzyCMeans;

proptest! {
    #[test]
    fn prop_fcm_partition_is_valid(
        data in prop::collection::vec(prop::collection::vec(-10.0f32..10.0, 2), 1..20),
        c in 1usize..5
    ) {
        // Skip if c > n
        if c <= data.len() {
            let model = FuzzyCMeans::new(c).with_seed(42);
            let fit = model.fit(&data).unwrap();

            // Every point's membership column sums to 1.
            for k in 0..data.len() {
                let sum: f32 = fit.memberships.iter().map(|row| row[k]).sum();
                prop_assert!((sum - 1.0).abs() < 1e-4);
            }

            // FPC stays within its theoretical range.
            prop_assert!(fit.fpc <= 1.0 + 1e-5);
            prop_assert!(fit.fpc >= 1.0 / c as f32 - 1e-5);

            // Hard labels cover every point and stay in range.
            let labels = fit.hard_assignments();
            prop_assert_eq!(labels.len(), data.len());
            for &l in &labels {
                prop_assert!(l < c);
            }
        }
    }
}
