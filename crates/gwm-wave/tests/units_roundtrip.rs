use gwm_wave::units::{
    frequency_geometric_to_si, frequency_si_to_geometric, strain_geometric_to_si,
    strain_si_to_geometric, time_geometric_to_si, time_si_to_geometric, MTSUN_SI,
};
use num_complex::Complex64;
use proptest::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1e-300)
}

proptest! {
    #[test]
    fn time_roundtrip(t in -1e6f64..1e6, mass in 0.1f64..1e4) {
        let si = time_geometric_to_si(t, mass);
        prop_assert!(close(time_si_to_geometric(si, mass), t));
    }

    #[test]
    fn frequency_roundtrip(f in 1e-6f64..1.0, mass in 0.1f64..1e4) {
        let si = frequency_geometric_to_si(f, mass);
        prop_assert!(close(frequency_si_to_geometric(si, mass), f));
    }

    #[test]
    fn complex_strain_roundtrip(
        re in -10.0f64..10.0,
        im in -10.0f64..10.0,
        mass in 0.1f64..1e4,
        distance in 0.01f64..1e4,
    ) {
        let h = Complex64::new(re, im);
        let back = strain_si_to_geometric(strain_geometric_to_si(h, mass, distance), mass, distance);
        prop_assert!(close(back.re, re));
        prop_assert!(close(back.im, im));
    }
}

#[test]
fn one_solar_mass_second() {
    assert_eq!(time_geometric_to_si(1.0, 1.0), MTSUN_SI);
    let f = frequency_geometric_to_si(1.0, 1.0);
    assert!((f * MTSUN_SI - 1.0).abs() < 1e-15);
}
