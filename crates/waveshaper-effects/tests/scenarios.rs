//! End-to-end behavior of the engine across blocks.

use std::sync::Arc;

use waveshaper_core::{AudioBuffer, db_to_linear};
use waveshaper_effects::{Curve, ParamKey, ParamStore, ProcessStatus, Waveshaper};

fn sine(len: usize, amp: f32) -> Vec<f32> {
    (0..len).map(|i| amp * (i as f32 * 0.05).sin()).collect()
}

fn process_mono(shaper: &mut Waveshaper, data: &mut [f32], bypass: bool) -> ProcessStatus {
    let mut channels: [&mut [f32]; 1] = [data];
    shaper.process(&mut AudioBuffer::new(&mut channels), bypass)
}

fn prepared(params: &Arc<ParamStore>, max_block: usize) -> Waveshaper {
    let mut shaper = Waveshaper::new(Arc::clone(params));
    shaper.prepare(48000.0, max_block, 2).unwrap();
    shaper
}

#[test]
fn unity_gains_leave_only_the_curve() {
    let params = Arc::new(ParamStore::new());
    for curve in Curve::ALL {
        params.set_curve(curve);
        let mut shaper = prepared(&params, 256);

        let input = sine(256, 0.8);
        let mut data = input.clone();
        assert_eq!(process_mono(&mut shaper, &mut data, false), ProcessStatus::Processed);

        let coeffs = curve.prepare(params.amount(curve));
        for (x, y) in input.iter().zip(&data) {
            assert_eq!(*y, coeffs.apply(*x), "{curve:?}");
        }
    }
}

#[test]
fn reference_values_through_engine() {
    let params = Arc::new(ParamStore::new());
    let mut shaper = prepared(&params, 64);

    let mut data = [0.1f32];
    process_mono(&mut shaper, &mut data, false);
    assert!((data[0] - 0.1564).abs() < 1e-4, "{}", data[0]);

    params.set_curve(Curve::Factor);
    let mut data = [0.5f32];
    process_mono(&mut shaper, &mut data, false);
    assert!((data[0] - 0.75).abs() < 1e-6);

    params.set_curve(Curve::Quadratic);
    let mut data = [1.0f32, 0.0];
    process_mono(&mut shaper, &mut data, false);
    assert!((data[0] - 1.0).abs() < 1e-6);
    assert_eq!(data[1], 0.0);
}

#[test]
fn curve_switch_lands_on_block_boundary() {
    let params = Arc::new(ParamStore::new());
    params.set_curve(Curve::Sinusoidal);
    let mut shaper = prepared(&params, 128);

    let mut first = vec![0.5f32; 128];
    process_mono(&mut shaper, &mut first, false);
    assert_eq!(shaper.active_curve(), Curve::Sinusoidal);

    params.set_curve(Curve::Factor);
    let mut second = vec![0.5f32; 128];
    process_mono(&mut shaper, &mut second, false);
    assert_eq!(shaper.active_curve(), Curve::Factor);

    let sin_value = Curve::Sinusoidal.apply(0.5, 0.5);
    assert!(first.iter().all(|&s| s == sin_value));
    assert!(second.iter().all(|&s| (s - 0.75).abs() < 1e-6));
}

#[test]
fn selection_holds_for_an_oversized_buffer() {
    // 1000 samples with a 64-sample maximum is walked in sub-blocks, but the
    // curve chosen at the start of the call is used throughout.
    let params = Arc::new(ParamStore::new());
    params.set_curve(Curve::Factor);
    let mut shaper = prepared(&params, 64);

    let mut data = vec![0.5f32; 1000];
    process_mono(&mut shaper, &mut data, false);
    assert!(data.iter().all(|&s| (s - 0.75).abs() < 1e-6));
}

#[test]
fn sub_blocking_matches_single_pass() {
    let params = Arc::new(ParamStore::new());
    params.set_curve(Curve::GloubiBoulga);
    params.set(ParamKey::GbAmount, 3.0);

    let mut small = prepared(&params, 32);
    let mut large = prepared(&params, 4096);

    // Warm both engines up, then start a gain ramp so it spans sub-blocks.
    let mut warm = sine(16, 0.5);
    process_mono(&mut small, &mut warm.clone(), false);
    process_mono(&mut large, &mut warm, false);
    params.set(ParamKey::InGain, 12.0);
    params.set(ParamKey::OutGain, -9.0);

    let input = sine(2000, 0.5);
    let mut a = input.clone();
    let mut b = input;
    process_mono(&mut small, &mut a, false);
    process_mono(&mut large, &mut b, false);
    assert_eq!(a, b);
}

#[test]
fn interleaved_matches_planar() {
    let params = Arc::new(ParamStore::new());
    params.set_curve(Curve::Quadratic);
    params.set(ParamKey::QuadAmount, 0.3);

    let mut planar = prepared(&params, 512);
    let mut interleaved = prepared(&params, 512);
    let mut warm = [0.0f32; 2];
    process_mono(&mut planar, &mut warm, false);
    interleaved.process_interleaved(&mut warm, 2, false);
    params.set(ParamKey::OutGain, 4.5);

    let mut left = sine(300, 0.9);
    let mut right = sine(300, -0.4);
    let mut frames: Vec<f32> = left.iter().zip(&right).flat_map(|(l, r)| [*l, *r]).collect();

    let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
    planar.process(&mut AudioBuffer::new(&mut channels), false);
    interleaved.process_interleaved(&mut frames, 2, false);

    for i in 0..300 {
        assert_eq!(frames[2 * i], left[i]);
        assert_eq!(frames[2 * i + 1], right[i]);
    }
}

#[test]
fn stereo_channels_share_gain_ramp() {
    let params = Arc::new(ParamStore::new());
    let mut shaper = prepared(&params, 512);
    let mut warm = [0.0f32; 4];
    process_mono(&mut shaper, &mut warm, false);

    params.set(ParamKey::InGain, -10.0);
    let mut left = sine(512, 0.3);
    let mut right = left.clone();
    let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
    shaper.process(&mut AudioBuffer::new(&mut channels), false);
    assert_eq!(left, right);
}

#[test]
fn bypass_release_snaps_gain() {
    let params = Arc::new(ParamStore::new());
    params.set_curve(Curve::Factor);
    let mut shaper = prepared(&params, 256);

    let mut data = vec![0.1f32; 256];
    process_mono(&mut shaper, &mut data, false);

    // Gain changes while bypassed must not replay as a ramp afterwards.
    let mut data = vec![0.1f32; 256];
    assert_eq!(process_mono(&mut shaper, &mut data, true), ProcessStatus::Bypassed);
    params.set(ParamKey::OutGain, -12.0);

    let mut data = vec![0.1f32; 4];
    assert_eq!(process_mono(&mut shaper, &mut data, false), ProcessStatus::Processed);
    let expected = Curve::Factor.apply(0.1, 0.5) * db_to_linear(-12.0);
    assert!((data[0] - expected).abs() < 1e-6, "{} vs {}", data[0], expected);
}

#[test]
fn gain_change_ramps_when_not_bypassed() {
    let params = Arc::new(ParamStore::new());
    params.set_curve(Curve::Factor);
    let mut shaper = prepared(&params, 256);

    let mut data = vec![0.1f32; 256];
    process_mono(&mut shaper, &mut data, false);
    params.set(ParamKey::OutGain, -12.0);

    let mut data = vec![0.1f32; 4];
    process_mono(&mut shaper, &mut data, false);
    let unity = Curve::Factor.apply(0.1, 0.5);
    assert!(data[0] < unity && data[0] > unity * 0.99);
}

#[test]
fn parameters_can_be_written_from_another_thread() {
    let params = Arc::new(ParamStore::new());
    let mut shaper = prepared(&params, 64);

    let writer = Arc::clone(&params);
    std::thread::spawn(move || writer.set_curve(Curve::GloubiBoulga))
        .join()
        .unwrap();

    let mut data = [0.2f32; 8];
    process_mono(&mut shaper, &mut data, false);
    assert_eq!(shaper.active_curve(), Curve::GloubiBoulga);
    assert_eq!(data[0], Curve::GloubiBoulga.apply(0.2, 1.0));
}

#[test]
fn reprepare_keeps_meter_reader_valid() {
    let params = Arc::new(ParamStore::new());
    let mut shaper = prepared(&params, 64);
    let reader = shaper.meter();

    shaper.prepare(96000.0, 128, 2).unwrap();
    let mut data = [0.5f32; 64];
    process_mono(&mut shaper, &mut data, false);
    assert!(reader.output_rms(0) > 0.0);
    assert!(reader.input_db(0) > -7.0);
}

#[test]
fn every_prepared_channel_is_metered() {
    let params = Arc::new(ParamStore::new());
    let curve = params.curve();
    let shaped = curve.prepare(params.amount(curve)).apply(0.5);
    let expected_out = waveshaper_core::linear_to_db(shaped.abs());
    let expected_in = waveshaper_core::linear_to_db(0.5);

    for count in [16, waveshaper_effects::MAX_CHANNELS] {
        let mut shaper = Waveshaper::new(Arc::clone(&params));
        shaper.prepare(48000.0, 64, count).unwrap();

        let mut storage = vec![[0.5f32; 64]; count];
        let mut channels: Vec<&mut [f32]> = storage.iter_mut().map(|c| &mut c[..]).collect();
        assert_eq!(
            shaper.process(&mut AudioBuffer::new(&mut channels), false),
            ProcessStatus::Processed
        );

        for ch in 0..count {
            let input = shaper.input_level_db(ch);
            let output = shaper.output_level_db(ch);
            assert!((input - expected_in).abs() < 0.01, "ch {ch}/{count}: in {input}");
            assert!((output - expected_out).abs() < 0.01, "ch {ch}/{count}: out {output}");
        }
    }
}

#[test]
fn interleaved_sub_blocks_match_one_pass() {
    let params = Arc::new(ParamStore::new());
    params.set_curve(Curve::Quadratic);
    params.set(ParamKey::InGain, 9.0);

    let mut small = prepared(&params, 7);
    let mut large = prepared(&params, 4096);
    let mut warm = [0.1f32; 8];
    small.process_interleaved(&mut warm, 2, false);
    let mut warm = [0.1f32; 8];
    large.process_interleaved(&mut warm, 2, false);

    params.set(ParamKey::InGain, -3.0);
    let input = sine(2 * 1500, 0.7);
    let mut a = input.clone();
    let mut b = input;
    small.process_interleaved(&mut a, 2, false);
    large.process_interleaved(&mut b, 2, false);
    assert_eq!(a, b);
}
