use glam::{Quat, Vec3};

use super::*;
use crate::animation::{IsletAnimationError, LoopPolicy};

#[test]
fn generation_is_deterministic() {
    let request = ClipRequest::new(
        ClipMode::Orbit {
            radius: 20.0,
            angular_step_degrees: -180.0,
            heading: 1.0,
        },
        1000,
    )
    .with_origin(Vec3::new(0.0, 1.0, 0.0));

    assert_eq!(request.generate(), request.generate());
}

#[test]
fn hold_stays_at_the_origin() {
    let origin = Vec3::new(3.0, -1.0, 2.0);
    let keyframes = ClipRequest::new(ClipMode::Hold, 5)
        .with_origin(origin)
        .generate();

    assert_eq!(keyframes.translation.len(), 5);
    assert!(keyframes.translation.iter().all(|(_, value)| *value == origin));
    assert!(keyframes
        .rotation
        .iter()
        .all(|(_, value)| *value == Quat::IDENTITY));
    assert!(keyframes.scale.iter().all(|(_, value)| *value == Vec3::ONE));
}

#[test]
fn missing_origin_defaults_to_zero() {
    let keyframes = ClipRequest::new(ClipMode::Hold, 1).generate();

    assert_eq!(keyframes.translation, vec![(0.0, Vec3::ZERO)]);
}

#[test]
fn nudge_moves_once_by_the_distance() {
    let keyframes = ClipRequest::new(
        ClipMode::Nudge {
            direction: Vec3::NEG_X,
            distance: 2.0,
        },
        100,
    )
    .with_origin(Vec3::new(1.0, 1.0, 1.0))
    .with_start_time(7.0)
    .generate();

    assert_eq!(keyframes.translation.first(), Some(&(7.0, Vec3::new(-1.0, 1.0, 1.0))));
    assert_eq!(keyframes.translation.last(), Some(&(106.0, Vec3::new(-1.0, 1.0, 1.0))));

    // rotation and scale keys stay in loop-local time
    assert_eq!(keyframes.rotation.first().map(|(time, _)| *time), Some(0.0));
    assert_eq!(keyframes.scale.last().map(|(time, _)| *time), Some(99.0));
}

#[test]
fn glide_climbs_and_travels_along_z() {
    let keyframes = ClipRequest::new(ClipMode::Glide { heading: -1.0 }, 100)
        .with_origin(Vec3::new(2.0, 0.0, 0.0))
        .generate();

    assert_eq!(keyframes.translation[0], (0.0, Vec3::new(2.0, 20.0, 0.0)));
    assert_eq!(keyframes.translation[2], (2.0, Vec3::new(2.0, 22.0, -9.0)));
    assert_eq!(keyframes.translation[99], (99.0, Vec3::new(2.0, 119.0, -445.5)));
}

#[test]
fn orbit_circles_and_yaws() {
    let keyframes = ClipRequest::new(
        ClipMode::Orbit {
            radius: 20.0,
            angular_step_degrees: -180.0,
            heading: 1.0,
        },
        1000,
    )
    .generate();

    assert_eq!(keyframes.translation.len(), 1000);
    assert_eq!(keyframes.translation[0].1, Vec3::new(20.0, 0.0, 0.0));

    for (_, position) in &keyframes.translation {
        assert!((position.length() - 20.0).abs() < 1e-3);
        assert_eq!(position.y, 0.0);
    }

    let (time, position) = keyframes.translation[1];
    assert_eq!(time, 1.0);
    assert!(position.abs_diff_eq(Vec3::new(20.0 * 1.0_f32.cos(), 0.0, 20.0 * 1.0_f32.sin()), 1e-5));

    // half a turn per step
    assert!(keyframes.rotation[1]
        .1
        .abs_diff_eq(Quat::from_rotation_y(-std::f32::consts::PI), 1e-6));
}

#[test]
fn zero_steps_cannot_become_a_track() {
    let keyframes = ClipRequest::new(ClipMode::Hold, 0).generate();

    assert!(keyframes.translation.is_empty());
    assert!(matches!(
        keyframes.into_track(LoopPolicy::default()),
        Err(IsletAnimationError::EmptyKeyframes)
    ));
}

#[test]
fn clip_tracks_sample_their_keyframes() {
    let track = ClipRequest::new(ClipMode::Glide { heading: 1.0 }, 100)
        .generate()
        .into_track(LoopPolicy::default())
        .unwrap();

    assert_eq!(track.translation_at(0.5), Vec3::new(0.0, 20.5, 2.25));
    assert_eq!(track.translation_at(500.0), Vec3::new(0.0, 119.0, 445.5));
    assert_eq!(track.scale_at(42.0), Vec3::ONE);
}
