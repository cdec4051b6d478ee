//! Integration tests for module exports and cross-module behaviour.

use approx::assert_relative_eq;
use proptest::prelude::*;

/// Test that solver types are accessible via absolute path.
#[test]
fn test_solver_module_exports() {
    use burden_core::math::solvers::{
        BrentMinimiser, GoldenSectionMinimiser, GridSearchMinimiser, Interval,
        LevenbergMarquardtMinimiser, MinimisationMethod, MinimiserChain, NelderMeadMinimiser,
        SolverConfig,
    };

    let config = SolverConfig::default();
    let iv = Interval::new(0.0, 1.0).unwrap();
    let f = |x: f64| (x - 0.25).powi(2);
    let _ = NelderMeadMinimiser::new(config).minimise(f, 0.5, iv);
    let _ = BrentMinimiser::new(config).minimise(f, iv);
    let _ = LevenbergMarquardtMinimiser::new(config).minimise(f, 0.5, iv);
    let _ = GoldenSectionMinimiser::new(config).minimise(f, iv);
    let _ = GridSearchMinimiser::new(config).minimise(f, iv);
    assert_eq!(MinimiserChain::new(config).methods(), &MinimisationMethod::ALL);
}

/// Test that the sinc moment equation used for log-logistic calibration
/// is solved by the chain's first method.
#[test]
fn test_chain_solves_sinc_moment_equation() {
    use burden_core::math::solvers::{Interval, MinimiserChain, SolverConfig};
    use burden_core::math::special::sinc;

    // mean 10, sd 5: target (1 + 0.25) / 2
    let target = 0.625;
    let f = |b: f64| (sinc(1.0 / b) - target).powi(2);
    let iv = Interval::new(1e-15, std::f64::consts::PI).unwrap();
    let min = MinimiserChain::new(SolverConfig::default())
        .minimise(f, std::f64::consts::FRAC_PI_2, iv, |m| m.value < 1e-12)
        .unwrap();
    assert_relative_eq!(sinc(1.0 / min.x), target, epsilon = 1e-6);
}

/// Test histogram plus Simpson reproduces a known expectation.
#[test]
fn test_histogram_simpson_mean_of_uniform() {
    use burden_core::math::integration::{linspace, simpson, DensityHistogram};

    let sample = linspace(2.0, 4.0, 20_001);
    let hist = DensityHistogram::from_samples(&sample, 100).unwrap();
    let centres = hist.centres();
    let weighted: Vec<f64> = centres.iter().zip(hist.density()).map(|(x, d)| x * d).collect();
    let mass = simpson(hist.density(), &centres).unwrap();
    let first_moment = simpson(&weighted, &centres).unwrap();
    assert_relative_eq!(first_moment / mass, 3.0, epsilon = 1e-3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Golden-section search finds the vertex of any parabola inside its interval.
    #[test]
    fn prop_golden_section_finds_vertex(vertex in -50.0f64..50.0, scale in 0.1f64..10.0) {
        use burden_core::math::solvers::{GoldenSectionMinimiser, Interval, SolverConfig};

        let iv = Interval::new(-60.0, 60.0).unwrap();
        let min = GoldenSectionMinimiser::new(SolverConfig::default())
            .minimise(|x| scale * (x - vertex).powi(2), iv)
            .unwrap();
        prop_assert!((min.x - vertex).abs() < 1e-5);
    }

    /// ln Γ satisfies the recurrence ln Γ(x + 1) = ln Γ(x) + ln x.
    #[test]
    fn prop_ln_gamma_recurrence(x in 0.05f64..80.0) {
        use burden_core::math::special::ln_gamma;

        let lhs = ln_gamma(x + 1.0);
        let rhs = ln_gamma(x) + x.ln();
        prop_assert!((lhs - rhs).abs() < 1e-9 * (1.0 + lhs.abs()));
    }

    /// A density histogram always carries unit mass.
    #[test]
    fn prop_histogram_unit_mass(values in proptest::collection::vec(-1e3f64..1e3, 1..300), bins in 1usize..150) {
        use burden_core::math::integration::DensityHistogram;

        let hist = DensityHistogram::from_samples(&values, bins).unwrap();
        let mass: f64 = hist
            .density()
            .iter()
            .zip(hist.edges().windows(2))
            .map(|(d, w)| d * (w[1] - w[0]))
            .sum();
        prop_assert!((mass - 1.0).abs() < 1e-9);
    }
}
