use gwm_wave::{Metadata, MetadataParams, Mode, Waveform};
use num_complex::Complex64;
use proptest::prelude::*;

fn single_mode(l: u32, m: i32, samples: &[(f64, f64)]) -> Waveform {
    let mode = Mode::new(l, m).unwrap();
    let metadata = Metadata::new(MetadataParams {
        library: "prop".into(),
        delta_t: 1.0,
        modes: vec![mode],
        dimensionless: true,
        ..MetadataParams::default()
    })
    .unwrap();
    let time: Vec<f64> = (0..samples.len()).map(|k| k as f64).collect();
    let row = samples
        .iter()
        .map(|&(re, im)| Complex64::new(re, im))
        .collect();
    Waveform::from_modes(vec![row], time, metadata).unwrap()
}

proptest! {
    #[test]
    fn negative_order_is_signed_conjugate(
        l in 2u32..7,
        m_frac in 0.0f64..=1.0,
        samples in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 2..32),
    ) {
        let m = ((m_frac * f64::from(l)).floor() as i32).max(1);
        let waveform = single_mode(l, m, &samples);
        let positive = waveform.mode(Mode::new(l, m).unwrap()).unwrap();
        let negative = waveform.mode(Mode::new(l, -m).unwrap()).unwrap();
        let sign = if l % 2 == 0 { 1.0 } else { -1.0 };
        for (p, n) in positive.iter().zip(&negative) {
            prop_assert_eq!(*n, p.conj() * sign);
        }
    }

    #[test]
    fn stored_row_is_returned_unchanged(
        samples in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 2..32),
    ) {
        let waveform = single_mode(3, 0, &samples);
        let stored = waveform.mode(Mode::new(3, 0).unwrap()).unwrap();
        for (value, &(re, im)) in stored.iter().zip(&samples) {
            prop_assert_eq!(*value, Complex64::new(re, im));
        }
    }
}
