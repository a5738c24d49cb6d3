//! Engine Tests
//!
//! Tests for:
//! - Running/Paused state machine and start/stop signals
//! - Pause freezing every pose and resume continuing from frozen time
//! - Determinism: poses depend on elapsed time only, not frame slicing
//! - RedrawTarget invocation and FrameState serialization
//! - Preset construction and settings validation

use myth_stage::animation::{Animator, FrameContext};
use myth_stage::{
    Camera, Engine, FrameState, Light, PlaybackState, RedrawTarget, Scene, SceneObject, ScenePreset,
    StageError, StageSettings,
};

const DT: f32 = 1.0 / 60.0;

fn engine(preset: ScenePreset) -> Engine {
    Engine::from_preset(preset, &StageSettings::default()).unwrap()
}

#[derive(Default)]
struct Recorder {
    frames: Vec<u64>,
}

impl RedrawTarget for Recorder {
    fn redraw(&mut self, _scene: &Scene, frame: &FrameState) {
        self.frames.push(frame.frame);
    }
}

// ============================================================================
// State machine
// ============================================================================

#[test]
fn engine_starts_running_by_default() {
    let engine = engine(ScenePreset::LampWalk);
    assert_eq!(engine.playback(), PlaybackState::Running);
}

#[test]
fn autostart_off_starts_paused() {
    let settings = StageSettings {
        autostart: false,
        ..StageSettings::default()
    };
    let mut engine = Engine::from_preset(ScenePreset::BouncingBall, &settings).unwrap();
    assert!(!engine.is_running());

    for _ in 0..10 {
        engine.update(DT);
    }
    assert_eq!(engine.elapsed(), 0.0);
    assert_eq!(engine.frame_count(), 10);
}

#[test]
fn redundant_signals_are_no_ops() {
    let mut engine = engine(ScenePreset::BouncingBall);
    engine.update(0.25);

    engine.start();
    engine.start();
    assert!(engine.is_running());
    assert_eq!(engine.elapsed(), 0.25);

    engine.stop();
    engine.stop();
    assert_eq!(engine.playback(), PlaybackState::Paused);
    assert_eq!(engine.elapsed(), 0.25);
}

// ============================================================================
// Pause / resume
// ============================================================================

#[test]
fn pause_freezes_every_pose_for_each_preset() {
    for preset in ScenePreset::ALL {
        let mut engine = engine(preset);
        for _ in 0..45 {
            engine.update(DT);
        }

        engine.stop();
        let frozen = engine.update(DT);
        for _ in 0..120 {
            let state = engine.update(DT);
            assert_eq!(state.elapsed, frozen.elapsed, "{preset}");
            assert_eq!(state.objects, frozen.objects, "{preset}");
            assert_eq!(state.camera, frozen.camera, "{preset}");
            assert_eq!(state.lights, frozen.lights, "{preset}");
            assert_eq!(state.playback, PlaybackState::Paused);
        }
    }
}

#[test]
fn resume_continues_from_frozen_elapsed() {
    let mut engine = engine(ScenePreset::LampWalk);
    for _ in 0..30 {
        engine.update(DT);
    }
    let frozen = engine.elapsed();
    assert!(frozen > 0.0);

    engine.stop();
    for _ in 0..30 {
        engine.update(DT);
    }
    engine.start();
    let state = engine.update(DT);

    assert!((state.elapsed - (frozen + DT)).abs() < 1e-6);
}

#[test]
fn malformed_deltas_do_not_advance_time() {
    let mut engine = engine(ScenePreset::LampWalk);
    engine.update(f32::NAN);
    engine.update(-0.5);
    assert_eq!(engine.elapsed(), 0.0);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn walk_poses_depend_on_elapsed_not_frame_slicing() {
    let mut fine = engine(ScenePreset::LampWalk);
    let mut coarse = engine(ScenePreset::LampWalk);

    let mut a = fine.frame_state();
    for _ in 0..120 {
        a = fine.update(1.0 / 120.0);
    }
    let mut b = coarse.frame_state();
    for _ in 0..30 {
        b = coarse.update(1.0 / 30.0);
    }

    assert!((a.elapsed - b.elapsed).abs() < 1e-4);
    for (pa, pb) in a.objects.iter().zip(&b.objects) {
        assert_eq!(pa.name, pb.name);
        assert!((pa.position - pb.position).length() < 1e-3, "{}", pa.name);
        assert!((pa.rotation - pb.rotation).length() < 1e-3, "{}", pa.name);
    }
}

// ============================================================================
// Host boundary
// ============================================================================

#[test]
fn frame_requests_one_redraw_per_call() {
    let mut engine = engine(ScenePreset::CanvasBounce);
    let mut recorder = Recorder::default();

    for _ in 0..5 {
        engine.frame(DT, &mut recorder);
    }
    engine.stop();
    engine.frame(DT, &mut recorder);

    assert_eq!(recorder.frames, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn frame_state_serializes_to_json() {
    let mut engine = engine(ScenePreset::Cutscene);
    let state = engine.update(DT);

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["frame"], 1);
    assert_eq!(json["playback"], "Running");
    assert!(json["objects"].as_array().unwrap().len() > 10);
    assert!(json["camera"]["position"].is_array());
}

#[test]
fn custom_animators_run_in_order() {
    struct Lift(f32);

    impl Animator for Lift {
        fn name(&self) -> &'static str {
            "lift"
        }

        fn update(&mut self, ctx: &FrameContext, scene: &mut Scene) {
            let keys: Vec<_> = scene.objects().map(|(key, _)| key).collect();
            for key in keys {
                if let Some(transform) = scene.transform_mut(key) {
                    transform.position.y = transform.position.y * 2.0 + self.0 * ctx.elapsed;
                }
            }
        }
    }

    let mut scene = Scene::new(Camera::new_perspective(50.0, 1.0, 0.1, 10.0));
    let key = scene.add_object(SceneObject::new("prop"));
    let mut engine = Engine::new(scene);
    engine.add_animator(Lift(1.0));
    engine.add_animator(Lift(0.0));

    let state = engine.update(1.0);
    // (0 * 2 + 1) * 2 + 0
    assert_eq!(state.object(key).unwrap().position.y, 2.0);
}

// ============================================================================
// Presets
// ============================================================================

#[test]
fn presets_build_expected_layouts() {
    let ball = engine(ScenePreset::BouncingBall);
    assert_eq!(ball.scene.object_count(), 1);
    assert!(ball.scene.find_by_name("ball").is_some());

    let walk = engine(ScenePreset::LampWalk);
    // mannequin root + 4 body parts + 8 limbs + 2 feet + 3 lamp props
    assert_eq!(walk.scene.object_count(), 18);
    assert_eq!(walk.scene.lights.len(), 4);
}

#[test]
fn frame_state_reports_light_colors() {
    let mut engine = engine(ScenePreset::LampWalk);
    let state = engine.update(DT);

    let spot = state.lights.iter().find(|light| light.name == "lamp_spot").unwrap();
    assert_eq!(spot.color, Light::hex(0x00ff_f7e6));
    assert!(spot.target.is_some());

    let rim = state.lights.iter().find(|light| light.name == "rim").unwrap();
    assert_eq!(rim.color, Light::hex(0x0040_4050));
    assert!(rim.target.is_none());
}

#[test]
fn invalid_settings_are_rejected_before_building() {
    let mut settings = StageSettings::default();
    settings.cutscene.frames_per_shot = 0;

    let err = Engine::from_preset(ScenePreset::Cutscene, &settings).err().unwrap();
    assert!(matches!(
        err,
        StageError::InvalidSetting { name: "cutscene.frames_per_shot", .. }
    ));
}
