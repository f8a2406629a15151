use gwm_wave::{Mode, WaveError};

mod fixtures;

#[test]
fn missing_mode_is_reported_without_mutation() -> Result<(), WaveError> {
    let waveform = fixtures::constant_frequency(vec![Mode::DOMINANT], 0.2, 16, 1.0)?;
    let before = waveform.clone();

    for request in [fixtures::mode(3, 3), fixtures::mode(3, -3), fixtures::mode(2, 1)] {
        let err = waveform.mode(request).unwrap_err();
        assert!(matches!(err, WaveError::ModeNotFound(_)));
        assert_eq!(err.info().code, "mode-not-found");
        assert_eq!(err.info().context["mode"], request.to_string());
    }
    assert_eq!(waveform, before);
    Ok(())
}

#[test]
fn accessors_follow_the_requested_mode() -> Result<(), WaveError> {
    let waveform = fixtures::constant_frequency(
        vec![Mode::DOMINANT, fixtures::mode(3, 3)],
        0.2,
        32,
        0.5,
    )?;
    let amp = waveform.amplitude(fixtures::mode(3, -3))?;
    assert!(amp.iter().all(|a| (a - 1.0 / 3.0).abs() < 1e-4));

    let omega = waveform.angular_frequency(Mode::DOMINANT)?;
    assert!(omega.iter().all(|w| (w - 0.2).abs() < 1e-9));
    let omega_33 = waveform.angular_frequency(fixtures::mode(3, 3))?;
    assert!(omega_33.iter().all(|w| (w - 0.3).abs() < 1e-9));

    assert_eq!(waveform.len(), 32);
    assert!((waveform.duration() - 15.5).abs() < 1e-12);
    assert_eq!(waveform.peak_time(Mode::DOMINANT)?, 0.0);
    assert_eq!(waveform.strain().nrows(), 2);
    Ok(())
}
