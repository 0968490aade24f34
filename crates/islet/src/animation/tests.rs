use glam::{Quat, Vec3};

use super::*;
use crate::{
    controls::{ControlKey, ControlRole, NudgeControl},
    procedural::{ClipMode, ClipRequest},
    transforms::{Transform, Transforms},
};

fn scalar_track() -> KeyframeTrack<f32> {
    KeyframeTrack::new_linear([(0.0, 0.0_f32), (10.0, 10.0)]).unwrap()
}

fn constant_track(translation: Vec3, rotation: Quat, scale: Vec3) -> TransformTrack {
    TransformTrack::new(
        KeyframeTrack::constant(translation),
        KeyframeTrack::constant(rotation),
        KeyframeTrack::constant(scale),
        LoopPolicy::default(),
    )
}

#[test]
fn clamps_outside_the_keyframe_range() {
    let track =
        KeyframeTrack::new_linear([(1.0, Vec3::X), (2.0, Vec3::Y), (4.0, Vec3::Z)]).unwrap();

    for time in [-100.0, 0.0, 0.999, 1.0] {
        assert_eq!(track.sample(time), Vec3::X);
    }
    for time in [4.0, 4.5, 1.0e9] {
        assert_eq!(track.sample(time), Vec3::Z);
    }
    assert_eq!(track.sample(f64::NAN), Vec3::X);
}

#[test]
fn exact_keyframe_times_return_stored_values() {
    let rotations = [
        Quat::IDENTITY,
        Quat::from_rotation_y(1.0),
        Quat::from_rotation_x(0.5),
        Quat::from_rotation_z(-2.0),
    ];
    let track = KeyframeTrack::new_linear(
        rotations
            .iter()
            .enumerate()
            .map(|(index, rotation)| (index as f64 * 0.5, *rotation)),
    )
    .unwrap();

    for (index, rotation) in rotations.iter().enumerate() {
        assert_eq!(track.sample(index as f64 * 0.5), *rotation);
    }
}

#[test]
fn linear_midpoints() {
    let track = scalar_track();

    assert_eq!(track.sample(5.0), 5.0);
    assert_eq!(track.sample(2.5), 2.5);
    assert_eq!(track.value(7.5), 7.5);
}

#[test]
fn single_keyframe_is_constant() {
    let track = KeyframeTrack::new_linear([(3.0, 42.0_f64)]).unwrap();

    for time in [-1.0, 3.0, 3.5, 1000.0] {
        assert_eq!(track.sample(time), 42.0);
    }
    assert_eq!(track.duration(), 0.0);
}

#[test]
fn unsorted_input_is_sorted_and_duplicates_keep_the_last_value() {
    let track =
        KeyframeTrack::new_linear([(3.0, 3.0_f32), (1.0, 1.0), (2.0, 20.0), (2.0, 2.0)]).unwrap();

    assert_eq!(track.times(), &[1.0, 2.0, 3.0]);
    assert_eq!(track.values(), &[1.0, 2.0, 3.0]);
    assert!(track.times().windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(track.sample(1.5), 1.5);
}

#[test]
fn malformed_keyframes_fail_to_build() {
    let empty: Vec<(f64, f32)> = Vec::new();
    assert!(matches!(
        KeyframeTrack::new_linear(empty),
        Err(IsletAnimationError::EmptyKeyframes)
    ));

    assert!(matches!(
        KeyframeTrack::new_linear([(0.0, 1.0_f32), (f64::NAN, 2.0)]),
        Err(IsletAnimationError::NonFiniteTime { index: 1, .. })
    ));

    assert!(matches!(
        KeyframeTrack::new_step([(f64::INFINITY, Vec3::ZERO)]),
        Err(IsletAnimationError::NonFiniteTime { index: 0, .. })
    ));

    assert!(matches!(
        KeyframeTrack::new_cubic_spline(vec![0.0, 1.0], vec![0.0_f32, 1.0], vec![0.0], vec![0.0, 0.0]),
        Err(IsletAnimationError::TangentLengthMismatch {
            keyframes: 2,
            in_tangents: 1,
            out_tangents: 2
        })
    ));

    assert!(matches!(
        KeyframeTrack::new_cubic_spline(vec![0.0, 1.0], vec![0.0_f32], vec![0.0, 0.0], vec![0.0, 0.0]),
        Err(IsletAnimationError::ValueLengthMismatch { times: 2, values: 1 })
    ));
}

#[test]
fn step_holds_until_the_next_keyframe() {
    let track = KeyframeTrack::new_step([(0.0, 1.0_f32), (1.0, 2.0), (2.0, 3.0)]).unwrap();

    assert_eq!(track.interpolation(), Interpolation::Step);
    assert_eq!(track.sample(0.99), 1.0);
    assert_eq!(track.sample(1.0), 2.0);
    assert_eq!(track.sample(1.5), 2.0);
}

#[test]
fn cubic_spline_with_flat_tangents_passes_the_midpoint() {
    let track = KeyframeTrack::new_cubic_spline(
        vec![1.0, 0.0],
        vec![10.0_f32, 0.0],
        vec![0.0, 0.0],
        vec![0.0, 0.0],
    )
    .unwrap();

    assert_eq!(track.times(), &[0.0, 1.0]);
    assert_eq!(track.sample(0.5), 5.0);
    // ease in: slower than linear at the start
    assert!(track.sample(0.25) < 2.5);
}

#[test]
fn rotation_blends_spherically() {
    let quarter_turn = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let track = KeyframeTrack::new_linear([(0.0, Quat::IDENTITY), (1.0, quarter_turn)]).unwrap();

    let halfway = track.sample(0.5);
    assert!(halfway.abs_diff_eq(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4), 1e-6));
    assert!((halfway.length() - 1.0).abs() < 1e-6);
}

#[test]
fn trs_applies_scale_then_rotation_then_translation() {
    let track = constant_track(Vec3::X, Quat::IDENTITY, Vec3::splat(2.0));
    let matrix = track.value(0.0);

    assert_eq!(matrix.transform_point3(Vec3::ZERO), Vec3::X);
    assert_eq!(matrix.transform_point3(Vec3::X), Vec3::new(3.0, 0.0, 0.0));

    let track = constant_track(
        Vec3::X,
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::splat(2.0),
    );
    // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (1,2,0)
    assert!(track
        .value(0.0)
        .transform_point3(Vec3::X)
        .abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
}

#[test]
fn loop_wraps_rotation_and_scale_but_not_translation() {
    let period = 10.0;
    let track = TransformTrack::new(
        KeyframeTrack::new_linear([(0.0, Vec3::ZERO), (100.0, Vec3::new(100.0, 0.0, 0.0))])
            .unwrap(),
        KeyframeTrack::new_linear([
            (0.0, Quat::IDENTITY),
            (10.0, Quat::from_rotation_y(1.0)),
        ])
        .unwrap(),
        KeyframeTrack::new_linear([(0.0, Vec3::ONE), (10.0, Vec3::splat(3.0))]).unwrap(),
        LoopPolicy::repeat(period),
    );

    for time in [2.5, 7.0, 13.0] {
        assert_eq!(track.rotation_at(time), track.rotation_at(time + period));
        assert_eq!(track.scale_at(time), track.scale_at(time + period));
        assert_ne!(track.translation_at(time), track.translation_at(time + period));
    }

    assert_eq!(track.translation_at(12.5), Vec3::new(12.5, 0.0, 0.0));
    assert_eq!(track.scale_at(12.5), track.scale.sample(2.5));
}

#[test]
fn loop_policy_wrap_modes() {
    assert_eq!(LoopPolicy::repeat(4.0).wrap_time(9.0), 1.0);
    assert_eq!(LoopPolicy::repeat(4.0).wrap_time(-1.0), 3.0);
    assert_eq!(LoopPolicy::ping_pong(4.0).wrap_time(3.0), 3.0);
    assert_eq!(LoopPolicy::ping_pong(4.0).wrap_time(5.0), 3.0);
    assert_eq!(LoopPolicy::ping_pong(4.0).wrap_time(9.0), 1.0);
    assert_eq!(LoopPolicy::CLAMP.wrap_time(12.0), 12.0);
    assert_eq!(LoopPolicy::repeat(0.0).wrap_time(12.0), 12.0);
}

#[test]
fn looping_clock_restarts_after_its_duration() {
    let mut clock = AnimationClock::looping(41.0);

    clock.update(40.0);
    assert_eq!(clock.time(), 40.0);

    clock.update(2.0);
    assert_eq!(clock.time(), 1.0);
    assert_eq!(clock.state(), AnimationState::Playing);
}

#[test]
fn finite_clock_ends_and_ping_pong_reverses() {
    let mut clock = AnimationClock::new(Some(5.0));
    clock.update(6.0);
    assert_eq!(clock.time(), 5.0);
    assert_eq!(clock.state(), AnimationState::Ended);

    clock.update(1.0);
    assert_eq!(clock.time(), 5.0);

    clock.play();
    assert_eq!(clock.time(), 0.0);

    let mut clock = AnimationClock::new(Some(2.0));
    clock.loop_style = Some(ClockLoopStyle::PingPong);
    clock.update(3.0);
    assert_eq!(clock.play_direction, PlayDirection::Backward);
    clock.update(0.5);
    assert_eq!(clock.time(), 1.5);

    clock.pause();
    clock.update(1.0);
    assert_eq!(clock.time(), 1.5);
}

#[test]
fn replacing_a_track_is_atomic() {
    let mut transforms = Transforms::new();
    let transform_key = transforms.insert(Transform::IDENTITY, None).unwrap();

    let old_track = constant_track(Vec3::X, Quat::from_rotation_x(1.0), Vec3::ONE);
    let new_track = constant_track(Vec3::Y, Quat::IDENTITY, Vec3::splat(2.0));

    let mut animations = Animations::new();
    let key = animations.insert(AnimatedNode::new(transform_key, old_track.clone()));

    let previous = animations.replace_track(key, new_track.clone()).unwrap();
    assert_eq!(previous.sample(3.0), old_track.sample(3.0));

    let sampled = animations.sample_local(key, 3.0).unwrap();
    assert_eq!(sampled, new_track.sample(3.0));

    animations.update(3.0, &mut transforms).unwrap();
    assert_eq!(*transforms.get_local(transform_key).unwrap(), new_track.sample(3.0));
}

#[test]
fn control_keys_only_move_nodes_with_a_role() {
    let mut transforms = Transforms::new();
    let pointer_transform = transforms.insert(Transform::IDENTITY, None).unwrap();
    let bystander_transform = transforms.insert(Transform::IDENTITY, None).unwrap();

    let hold = ClipRequest::new(ClipMode::Hold, 100)
        .with_origin(Vec3::new(1.0, 2.0, 3.0))
        .generate()
        .into_track(LoopPolicy::default())
        .unwrap();

    let mut animations = Animations::new();
    let pointer = animations.insert(
        AnimatedNode::new(pointer_transform, hold.clone())
            .with_role(ControlRole::Pointer(NudgeControl::default())),
    );
    let bystander = animations.insert(AnimatedNode::new(bystander_transform, hold.clone()));

    let replaced = animations.handle_control(ControlKey::Down, 12.0).unwrap();
    assert_eq!(replaced, 1);

    let moved = animations.sample_local(pointer, 12.0).unwrap();
    assert_eq!(moved.translation, Vec3::new(1.0, 2.0, 4.0));
    assert_eq!(moved.rotation, Quat::IDENTITY);

    let unmoved = animations.sample_local(bystander, 12.0).unwrap();
    assert_eq!(unmoved, hold.sample(12.0));

    animations.handle_control(ControlKey::Raise, 20.0).unwrap();
    assert_eq!(
        animations.sample_local(pointer, 20.0).unwrap().translation,
        Vec3::new(1.0, 3.0, 4.0)
    );
}

#[test]
fn missing_animation_key_is_an_error() {
    let mut animations = Animations::new();
    let key = animations.insert(AnimatedNode::new(
        Transforms::new().root(),
        constant_track(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE),
    ));
    animations.remove(key);

    assert!(matches!(
        animations.sample_local(key, 0.0),
        Err(IsletAnimationError::MissingKey(_))
    ));
}
