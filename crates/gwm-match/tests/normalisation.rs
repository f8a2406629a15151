use gwm_match::{waveform_match, FlatPsd};
use gwm_wave::Waveform;
use num_complex::Complex64;
use proptest::prelude::*;

mod fixtures;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn match_ignores_overall_amplitude(scale in 0.01f64..100.0) {
        let a = fixtures::chirp(30.0, 20.0, 1.0 / 2048.0).unwrap();
        let strain = a.strain().map(|h| h * Complex64::new(scale, 0.0));
        let b = Waveform::new(strain, a.time().to_vec(), a.metadata().clone()).unwrap();
        let outcome = waveform_match(&a, &b, None, &FlatPsd).unwrap();
        prop_assert!((outcome.value - 1.0).abs() < 1e-9);
        prop_assert_eq!(outcome.peak_index, 0);
    }
}
