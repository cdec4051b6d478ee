//! Property tests for mediation aggregation and PAF integration.

use approx::assert_relative_eq;
use burden_core::types::{DiseaseId, RiskId};
use burden_paf::mediation::{proportional_split, MediationTensor};
use burden_paf::{Direction, PafIntegrator, RelativeRisk};
use proptest::prelude::*;

fn tensor_from(values: &[f64], risks: usize) -> MediationTensor {
    let mut tensor = MediationTensor::zeros(risks, 1);
    for (i, &v) in values.iter().enumerate() {
        tensor
            .set(RiskId(i / risks), RiskId(i % risks), DiseaseId(0), v)
            .unwrap();
    }
    tensor
}

proptest! {
    #[test]
    fn joint_paf_reduces_to_single_risk(p in 0.0f64..1.0, idx in 0usize..5) {
        let tensor = MediationTensor::zeros(5, 3);
        let mut pafs = vec![0.0; 5];
        pafs[idx] = p;
        let joint = tensor.joint_paf(&pafs, DiseaseId(2)).unwrap();
        assert_relative_eq!(joint, p, max_relative = 1e-12, epsilon = 1e-15);
    }

    #[test]
    fn joint_paf_is_a_fraction(
        pafs in prop::collection::vec(0.0f64..1.0, 4),
        overlaps in prop::collection::vec(0.0f64..=1.0, 16),
    ) {
        let tensor = tensor_from(&overlaps, 4);
        let joint = tensor.joint_paf(&pafs, DiseaseId(0)).unwrap();
        prop_assert!((0.0..=1.0).contains(&joint));
        prop_assert!(joint <= 1.0 - pafs.iter().map(|p| 1.0 - p).product::<f64>() + 1e-12);
    }

    #[test]
    fn non_joint_view_returns_own_paf(
        pafs in prop::collection::vec(0.0f64..1.0, 4),
        overlaps in prop::collection::vec(0.0f64..=1.0, 16),
        risk in 0usize..4,
    ) {
        let tensor = tensor_from(&overlaps, 4);
        let view = tensor.non_joint_view(RiskId(risk)).unwrap();
        let joint = view.joint_paf(&pafs, DiseaseId(0)).unwrap();
        assert_relative_eq!(joint, pafs[risk], max_relative = 1e-12, epsilon = 1e-15);
    }

    #[test]
    fn proportional_split_preserves_joint(
        pafs in prop::collection::vec(0.01f64..1.0, 1..10),
        joint in 0.0f64..1.0,
    ) {
        let shares = proportional_split(&pafs, joint);
        assert_relative_eq!(shares.iter().sum::<f64>(), joint, max_relative = 1e-10, epsilon = 1e-14);
    }

    #[test]
    fn paf_zero_below_tmrel(lo in 0.0f64..50.0, width in 1.0f64..50.0, rf in 1.01f64..3.0) {
        let sample: Vec<f64> = (0..500).map(|i| lo + width * i as f64 / 499.0).collect();
        let rr = RelativeRisk::new(lo + width + 1.0, rf, 1.0, Direction::High);
        prop_assert_eq!(PafIntegrator::default().paf(&sample, &rr).unwrap(), 0.0);
    }
}
