use glam::Vec3;
use islet::controls::ControlKey;

use super::*;
use crate::config::KeyPress;

fn short_run(ticks: usize) -> ViewerConfig {
    ViewerConfig {
        ticks,
        key_presses: Vec::new(),
        ..ViewerConfig::default()
    }
}

#[test]
fn every_frame_draws_the_whole_island() {
    let report = run(&short_run(30)).unwrap();

    // six seagulls, the pointer, the galleon and the cylinder
    assert_eq!(report.frames, 30);
    assert_eq!(report.draws, 30 * 9);
    assert_eq!(report.skinned_draws, 30);
}

#[test]
fn scripted_keys_reach_the_pointer() {
    let config = ViewerConfig {
        key_presses: vec![
            KeyPress {
                at_tick: 0,
                key: ControlKey::Right,
            },
            KeyPress {
                at_tick: 3,
                key: ControlKey::Lower,
            },
        ],
        ..short_run(5)
    };

    let report = run(&config).unwrap();
    assert_eq!(report.control_responses, 2);

    let mut island = Island::build(&config.scene).unwrap();
    island.scene.handle_control(ControlKey::Right).unwrap();
    island.scene.tick(0.1).unwrap();

    let pointer = island.drivers["pointer"];
    assert_eq!(
        island.scene.transforms.get_local(pointer).unwrap().translation,
        Vec3::X
    );
}

#[test]
fn cylinder_bends_at_the_forearm() {
    let mut island = Island::build(&ViewerConfig::default().scene).unwrap();
    let tip = island.cylinder.rest_positions.len() - 1;
    let root = 0;

    island.scene.tick(0.0).unwrap();
    let rest_tip = island
        .cylinder
        .skinned_position(&island.scene, tip)
        .unwrap()
        .unwrap();
    let arm_world = *island.scene.transforms.get_world(island.cylinder.arm).unwrap();
    assert!(rest_tip.abs_diff_eq(
        arm_world.transform_point3(island.cylinder.rest_positions[tip]),
        1e-4
    ));

    island.scene.tick(1.0).unwrap();
    let bent_tip = island
        .cylinder
        .skinned_position(&island.scene, tip)
        .unwrap()
        .unwrap();
    assert!(!bent_tip.abs_diff_eq(rest_tip, 1e-2));

    // the end held by the arm alone doesn't move
    let root_position = island
        .cylinder
        .skinned_position(&island.scene, root)
        .unwrap()
        .unwrap();
    assert!(root_position.abs_diff_eq(
        arm_world.transform_point3(island.cylinder.rest_positions[root]),
        1e-4
    ));
}

#[test]
fn config_reads_partial_json() {
    let config: ViewerConfig =
        serde_json::from_str(r#"{ "ticks": 12, "key_presses": [{ "at_tick": 2, "key": "raise" }] }"#)
            .unwrap();

    assert_eq!(config.ticks, 12);
    assert_eq!(config.key_presses[0].key, ControlKey::Raise);
    assert_eq!(config.tick_delta, ViewerConfig::default().tick_delta);
}
