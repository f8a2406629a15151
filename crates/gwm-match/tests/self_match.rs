use gwm_match::{waveform_match, FlatPsd, AdvancedLigoAnalyticPsd};
use gwm_wave::WaveError;

mod fixtures;

#[test]
fn waveform_matches_itself_under_flat_noise() -> Result<(), WaveError> {
    let waveform = fixtures::chirp(30.0, 20.0, 1.0 / 4096.0)?;
    let outcome = waveform_match(&waveform, &waveform, None, &FlatPsd)?;
    assert!((outcome.value - 1.0).abs() < 1e-6, "match {}", outcome.value);
    assert_eq!(outcome.f_lower, 20.0);
    assert_eq!(outcome.peak_index, 0);
    assert!(outcome.padded_len.is_power_of_two());
    assert!(outcome.padded_len >= waveform.len() - 1);
    Ok(())
}

#[test]
fn waveform_matches_itself_under_detector_noise() -> Result<(), WaveError> {
    let waveform = fixtures::chirp(30.0, 20.0, 1.0 / 4096.0)?;
    let outcome = waveform_match(&waveform, &waveform, Some(25.0), &AdvancedLigoAnalyticPsd)?;
    assert!((outcome.value - 1.0).abs() < 1e-6);
    assert_eq!(outcome.f_lower, 25.0);
    Ok(())
}

#[test]
fn coarser_cadence_is_used_for_both() -> Result<(), WaveError> {
    let fine = fixtures::chirp(30.0, 20.0, 1.0 / 4096.0)?;
    let coarse = fixtures::chirp(30.0, 20.0, 1.0 / 2048.0)?;
    let outcome = waveform_match(&fine, &coarse, None, &FlatPsd)?;
    assert_eq!(outcome.delta_t, 1.0 / 2048.0);
    assert!(outcome.value > 0.995, "match {}", outcome.value);
    Ok(())
}

#[test]
fn time_translation_is_recovered() -> Result<(), WaveError> {
    let waveform = fixtures::chirp(25.0, 25.0, 1.0 / 4096.0)?;
    let moved = fixtures::shifted(&waveform, 0.125)?;
    let outcome = waveform_match(&waveform, &moved, None, &FlatPsd)?;
    assert!((outcome.value - 1.0).abs() < 1e-6);
    assert!((outcome.time_shift - 0.125).abs() < 1e-9);
    Ok(())
}
