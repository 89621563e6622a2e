use graydrift::{
    ContainerBox, FrameStore, Phase, RasterSource, TransitionEngine, dither_frame, pixelate,
    resolve_phase, resolve_transition,
};

fn gradient_source(width: u32, height: u32, seed: u8) -> RasterSource {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 37 + y * 11) as u32 + u32::from(seed)) % 256;
            rgba.extend_from_slice(&[v as u8, (v / 2) as u8, 255 - v as u8, 255]);
        }
    }
    RasterSource::new(width, height, rgba).unwrap()
}

fn engine_over(sources: Vec<RasterSource>, max_pixelation: u32) -> TransitionEngine {
    let container = ContainerBox::new(sources[0].width(), sources[0].height()).unwrap();
    let store = FrameStore::load(&sources, container).unwrap();
    let mut engine = TransitionEngine::new(store, max_pixelation).unwrap();
    engine.activate();
    engine
}

#[test]
fn terminal_states_match_plain_source_frames() {
    let a = gradient_source(8, 6, 0);
    let b = gradient_source(8, 6, 90);
    let a_bytes = a.rgba().to_vec();
    let b_bytes = b.rgba().to_vec();
    let mut engine = engine_over(vec![a, b], 16);

    engine.update(0.0).unwrap();
    assert_eq!(engine.layer_a().rgba(), a_bytes);
    assert_eq!(engine.layer_a().opacity(), 1.0);
    assert_eq!(engine.layer_b().opacity(), 0.0);

    engine.update(1.0).unwrap();
    assert_eq!(engine.layer_a().rgba(), b_bytes);
    assert_eq!(engine.layer_a().opacity(), 1.0);
    assert_eq!(engine.layer_b().opacity(), 0.0);
}

#[test]
fn full_scrub_never_regresses_pair_index() {
    let sources: Vec<RasterSource> = (0..5).map(|i| gradient_source(6, 6, i * 40)).collect();
    let frame_count = sources.len();
    let mut engine = engine_over(sources, 8);

    let mut last_pair = 0usize;
    for i in 0..=500 {
        let p = i as f32 / 500.0;
        engine.update(p).unwrap();
        let state = engine.state();
        assert!(state.pair_index >= last_pair, "regressed at p={p}");
        assert!(state.pair_index <= frame_count - 2);
        last_pair = state.pair_index;
    }
    assert_eq!(last_pair, frame_count - 2);
}

#[test]
fn mid_transition_layers_match_the_effect_pipeline_directly() {
    let a = gradient_source(8, 8, 10);
    let b = gradient_source(8, 8, 200);
    let container = ContainerBox::new(8, 8).unwrap();
    let store = FrameStore::load(&[a, b], container).unwrap();
    let frame_a = store.frame(0).unwrap().clone();
    let frame_b = store.frame(1).unwrap().clone();

    let mut engine = TransitionEngine::new(store, 4).unwrap();
    engine.activate();

    // PixelSwap midpoint: both layers fully dithered and pixelated at max block.
    engine.update(0.5).unwrap();
    let expect_a = pixelate(&dither_frame(&frame_a, 1.0).unwrap(), 8, 8, 4).unwrap();
    let expect_b = pixelate(&dither_frame(&frame_b, 1.0).unwrap(), 8, 8, 4).unwrap();
    assert_eq!(engine.layer_a().rgba(), expect_a);
    assert_eq!(engine.layer_b().rgba(), expect_b);

    // DitherIn start: layer B is the dithered outgoing frame.
    engine.update(0.25).unwrap();
    let expect_b = dither_frame(&frame_a, 1.0).unwrap();
    assert_eq!(engine.layer_b().rgba(), expect_b);
}

#[test]
fn opacities_are_complementary_inside_crossfade_windows() {
    let sources = vec![gradient_source(6, 6, 0), gradient_source(6, 6, 128)];
    let mut engine = engine_over(sources, 8);

    for p in [0.25, 0.4, 0.5, 0.6, 0.7] {
        engine.update(p).unwrap();
        let sum = engine.layer_a().opacity() + engine.layer_b().opacity();
        assert!((sum - 1.0).abs() < 1e-4, "opacities at p={p} sum to {sum}");
    }
}

#[test]
fn repeated_updates_at_the_same_progress_are_stable() {
    let sources = vec![gradient_source(10, 7, 3), gradient_source(10, 7, 77)];
    let mut engine = engine_over(sources, 16);

    engine.update(0.42).unwrap();
    let a = engine.layer_a().rgba().to_vec();
    let b = engine.layer_b().rgba().to_vec();
    engine.update(0.42).unwrap();
    assert_eq!(engine.layer_a().rgba(), a);
    assert_eq!(engine.layer_b().rgba(), b);
}

#[test]
fn phase_schedule_per_pair_repeats_across_the_playlist() {
    // With 3 frames, total progress 0.5 lands on pair 1 at local 0.0.
    let state = resolve_transition(0.5, 3);
    assert_eq!(state.pair_index, 1);
    assert_eq!(resolve_phase(state.local_progress), Phase::RestA);

    let state = resolve_transition(0.25, 3);
    assert_eq!(state.pair_index, 0);
    assert!(matches!(
        resolve_phase(state.local_progress),
        Phase::PixelSwap { .. }
    ));
}
