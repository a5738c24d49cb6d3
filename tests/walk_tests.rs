//! Walk Cycle Tests
//!
//! Tests for:
//! - Closed-form horizontal sweep, torso bob and limb swing
//! - Opposition of left/right limbs
//! - WalkAnimator driving the mannequin rig and the spotlight

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use myth_stage::animation::{Limb, WalkCycle};
use myth_stage::scene::LightKind;
use myth_stage::settings::WalkSettings;
use myth_stage::{Engine, ScenePreset, StageSettings};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn cycle(walk_distance: f32, walk_speed: f32) -> WalkCycle {
    WalkCycle::new(WalkSettings {
        walk_distance,
        walk_speed,
        ..WalkSettings::default()
    })
}

fn sample_times() -> impl Iterator<Item = f32> {
    (0..2000).map(|i| i as f32 * 0.0173)
}

// ============================================================================
// Horizontal sweep
// ============================================================================

#[test]
fn horizontal_position_reference_points() {
    let cycle = cycle(6.0, 0.8);

    assert!(approx(cycle.horizontal_position(0.0), 0.0));

    let peak = PI / (2.0 * 0.8);
    let x = cycle.horizontal_position(peak);
    assert!(approx(x, 3.0), "Expected 3.0 at t={peak}, got {x}");
}

#[test]
fn horizontal_position_follows_sine_within_half_distance() {
    let cycle = cycle(6.0, 0.8);
    for t in sample_times() {
        let x = cycle.horizontal_position(t);
        assert!(approx(x, (t * 0.8).sin() * 3.0));
        assert!((-3.0..=3.0).contains(&x), "x={x} out of range at t={t}");
    }
}

#[test]
fn zero_walk_distance_stands_still() {
    let cycle = cycle(0.0, 0.9);
    for t in sample_times() {
        assert_eq!(cycle.horizontal_position(t), 0.0);
    }
}

// ============================================================================
// Torso bob
// ============================================================================

#[test]
fn torso_bob_is_non_negative_and_bounded() {
    let cycle = cycle(6.0, 0.9);
    for t in sample_times() {
        let bob = cycle.torso_bob(t);
        assert!(bob >= 0.0, "negative bob {bob} at t={t}");
        assert!(bob <= 0.12 + EPSILON);
    }
}

#[test]
fn torso_bob_repeats_twice_per_sweep() {
    let speed = 0.9;
    let cycle = cycle(6.0, speed);
    let sweep_period = TAU / speed;

    for t in (0..200).map(|i| i as f32 * 0.05) {
        let a = cycle.torso_bob(t);
        let b = cycle.torso_bob(t + sweep_period / 2.0);
        assert!((a - b).abs() < 1e-4, "bob({t})={a} but half a sweep later {b}");
    }

    // Half a sweep moves the figure to the mirrored spot, so the sweep itself
    // does not repeat there.
    let t = 0.7;
    let x = cycle.horizontal_position(t);
    assert!((cycle.horizontal_position(t + sweep_period / 2.0) + x).abs() < 1e-4);
}

// ============================================================================
// Limb swing
// ============================================================================

#[test]
fn swing_stays_within_amplitude() {
    let cycle = cycle(6.0, 0.9);
    for t in sample_times() {
        assert!(cycle.swing(t).abs() <= 0.6 + EPSILON);
    }
}

#[test]
fn paired_limbs_move_in_opposition() {
    let cycle = cycle(6.0, 0.9);
    for t in sample_times() {
        let pose = cycle.pose(t);
        // Linear pairs mirror around their shared rest angle.
        assert!(approx(pose.limb(Limb::LeftUpperArm) + pose.limb(Limb::RightUpperArm), 0.4));
        assert!(approx(pose.limb(Limb::LeftForearm) + pose.limb(Limb::RightForearm), -0.8));
        assert!(approx(pose.limb(Limb::LeftThigh) + pose.limb(Limb::RightThigh), 0.4));

        // At most one knee bends at a time.
        let left_bent = pose.limb(Limb::LeftShin) > -0.2 + EPSILON;
        let right_bent = pose.limb(Limb::RightShin) > -0.2 + EPSILON;
        assert!(!(left_bent && right_bent));
    }
}

#[test]
fn arm_swings_against_same_side_leg() {
    let cycle = cycle(6.0, 0.9);
    // Quarter of the swing period: swing at its positive peak.
    let t = PI / (4.0 * 0.9);
    let pose = cycle.pose(t);
    assert!(approx(pose.swing, 0.6));
    assert!(approx(pose.limb(Limb::LeftUpperArm), 0.2 + 0.3));
    assert!(approx(pose.limb(Limb::LeftThigh), 0.2 - 0.42));
    assert!(approx(pose.limb(Limb::RightShin), -0.2 + 0.3));
    assert!(approx(pose.limb(Limb::LeftShin), -0.2));
}

// ============================================================================
// WalkAnimator in a scene
// ============================================================================

#[test]
fn walk_scene_moves_root_torso_and_limbs() {
    let settings = StageSettings::default();
    let mut engine = Engine::from_preset(ScenePreset::LampWalk, &settings).unwrap();
    let root = engine.focus().unwrap();

    let state = engine.update(0.5);
    let cycle = WalkCycle::new(settings.walk.clone());
    let pose = cycle.pose(0.5);

    let root_pose = state.object(root).unwrap();
    assert!(approx(root_pose.position.x, pose.root_x));

    let torso = state.object_by_name("torso").unwrap();
    assert!(approx(torso.position.y, pose.torso_bob));
    assert!(approx(torso.world_position.x, pose.root_x));

    for limb in Limb::ALL {
        let part = state.object_by_name(limb.name()).unwrap();
        assert!(approx(part.rotation.x, pose.limb(limb)), "{limb:?}");
    }
}

#[test]
fn walk_keeps_rest_tilt_of_arms() {
    let mut engine = Engine::from_preset(ScenePreset::LampWalk, &StageSettings::default()).unwrap();
    let state = engine.update(1.3);

    let left = state.object_by_name("left_upper_arm").unwrap();
    let right_forearm = state.object_by_name("right_forearm").unwrap();
    assert!(approx(left.rotation.z, PI / 12.0));
    assert!(approx(right_forearm.rotation.z, PI / 6.0));
}

#[test]
fn spotlight_tracks_the_figure() {
    let mut engine = Engine::from_preset(ScenePreset::LampWalk, &StageSettings::default()).unwrap();
    let root = engine.focus().unwrap();

    for _ in 0..90 {
        let state = engine.update(1.0 / 30.0);
        let x = state.object(root).unwrap().world_position.x;

        let spot = engine
            .scene
            .lights
            .values()
            .find(|light| matches!(light.kind, LightKind::Spot(_)))
            .unwrap();
        let target = spot.target().unwrap();
        assert!((target - Vec3::new(x, 0.6, 0.0)).length() < EPSILON);
    }
}
