//! The island scene: a flock of seagulls, a movable pointer, a galleon circling
//! the island and a skinned cylinder arm.
//!
//! No geometry is loaded here, the meshes are records for the draw log only.
//! The cylinder is the exception since its bone attributes drive skinning.

use std::f32::consts::PI;

use glam::{Quat, Vec3};
use indexmap::IndexMap;
use islet::{
    animation::{KeyframeTrack, LoopPolicy, TransformTrack},
    config::SceneConfig,
    controls::ControlRole,
    error::Result,
    mesh::Mesh,
    procedural::{ClipMode, ClipRequest},
    skin::{BoneInfluence, SkinAttributes, SkinKey},
    transforms::{Transform, TransformKey},
    Scene,
};

const SEAGULL_COUNT: usize = 6;
const BOAT_YAW_DEGREES: f32 = -180.0;
const CYLINDER_SECTIONS: usize = 11;
const CYLINDER_QUARTERS: usize = 20;
const FOREARM_BEND_DEGREES: f32 = 60.0;

pub struct Island {
    pub scene: Scene,
    /// Animated driver nodes by name, in build order.
    pub drivers: IndexMap<String, TransformKey>,
    pub cylinder: SkinnedCylinder,
}

impl Island {
    pub fn build(config: &SceneConfig) -> Result<Self> {
        let mut scene = Scene::new(config.clone());
        let mut drivers = IndexMap::new();

        for index in 0..SEAGULL_COUNT {
            let angle = 2.0 * index as f32 * PI / 10.0;
            let name = format!("seagull_{index}");

            let track = scene.clip_track(&ClipRequest::new(
                ClipMode::Glide { heading: -1.0 },
                config.glide_steps,
            ))?;
            let placement = Transform {
                translation: Vec3::new(10.0 + 30.0 * angle.cos(), 20.0, 100.0 + 30.0 * angle.sin()),
                rotation: Quat::from_rotation_x(45.0_f32.to_radians()),
                scale: Vec3::splat(0.8),
            };

            let driver = add_driven_mesh(&mut scene, track, None, placement, &name)?;
            drivers.insert(name, driver);
        }

        let track = scene.clip_track(&ClipRequest::new(ClipMode::Hold, config.nudge.steps))?;
        let driver = add_driven_mesh(
            &mut scene,
            track,
            Some(ControlRole::Pointer(config.nudge)),
            Transform::IDENTITY.with_translation(Vec3::new(100.0, 30.0, 40.0)),
            "pointer",
        )?;
        drivers.insert("pointer".to_string(), driver);

        let track = scene.clip_track(&ClipRequest::new(
            ClipMode::Orbit {
                radius: config.orbit_radius,
                angular_step_degrees: BOAT_YAW_DEGREES,
                heading: 1.0,
            },
            config.orbit_steps,
        ))?;
        let driver = add_driven_mesh(
            &mut scene,
            track,
            None,
            Transform::IDENTITY
                .with_translation(Vec3::new(-10.0, -1.0, -40.0))
                .with_scale(Vec3::splat(0.3)),
            "galleon",
        )?;
        drivers.insert("galleon".to_string(), driver);

        let anchor = scene.add_node(
            Transform::IDENTITY
                .with_translation(Vec3::new(-15.0, 22.0, 50.0))
                .with_rotation(Quat::from_rotation_z(45.0_f32.to_radians())),
            None,
        )?;
        let cylinder = SkinnedCylinder::build(&mut scene, anchor, config.loop_policy)?;
        drivers.insert("arm".to_string(), cylinder.arm);
        drivers.insert("forearm".to_string(), cylinder.forearm);

        tracing::info!(
            "island built: {} nodes, {} animated, {} renderables",
            scene.transforms.len(),
            scene.animations.len(),
            scene.renderables.len()
        );

        Ok(Self {
            scene,
            drivers,
            cylinder,
        })
    }
}

// animated driver -> static placement -> mesh
fn add_driven_mesh(
    scene: &mut Scene,
    track: TransformTrack,
    role: Option<ControlRole>,
    placement: Transform,
    label: &str,
) -> Result<TransformKey> {
    let (driver, _) = scene.add_animated_node(track, None, role)?;
    let body = scene.add_node(placement, Some(driver))?;
    scene.add_mesh(Mesh::new(label, 0), body)?;
    Ok(driver)
}

/// A cylinder along X bent by two bones: the arm holds still and the forearm
/// swings up and back down.
pub struct SkinnedCylinder {
    pub arm: TransformKey,
    pub forearm: TransformKey,
    pub skin: SkinKey,
    pub rest_positions: Vec<Vec3>,
    pub influences: Vec<BoneInfluence>,
}

impl SkinnedCylinder {
    fn build(scene: &mut Scene, anchor: TransformKey, loop_policy: LoopPolicy) -> Result<Self> {
        let (arm, _) = scene.add_animated_node(
            TransformTrack::constant(Transform::IDENTITY),
            Some(anchor),
            None,
        )?;

        let bend = TransformTrack::new(
            KeyframeTrack::constant(Vec3::ZERO),
            KeyframeTrack::new_linear([
                (0.0, Quat::IDENTITY),
                (1.0, Quat::from_rotation_z(FOREARM_BEND_DEGREES.to_radians())),
                (2.0, Quat::IDENTITY),
            ])?,
            KeyframeTrack::constant(Vec3::ONE),
            loop_policy,
        );
        let (forearm, _) = scene.add_animated_node(bend, Some(arm), None)?;

        let (rest_positions, influences) = cylinder_geometry(CYLINDER_SECTIONS, CYLINDER_QUARTERS);

        let mesh = Mesh::new("cylinder", rest_positions.len())
            .with_skin(SkinAttributes::new(influences.clone()))?;

        // identity offsets: the bones bind where they stand
        let (_, skin, _) = scene.add_skinned_mesh(mesh, arm, vec![arm, forearm], Vec::new())?;

        Ok(Self {
            arm,
            forearm,
            skin,
            rest_positions,
            influences,
        })
    }

    /// Where the vertex at `index` lands with the scene's current bone matrices.
    pub fn skinned_position(&self, scene: &Scene, index: usize) -> Result<Option<Vec3>> {
        let matrices = scene.skins.joint_matrices(self.skin)?;

        Ok(self
            .influences
            .get(index)
            .zip(self.rest_positions.get(index))
            .and_then(|(influence, position)| influence.skin_position(*position, matrices)))
    }
}

// rings of `quarters` vertices from x = -sections/2 to x = sections/2, the
// forearm's weight growing linearly along the axis
fn cylinder_geometry(sections: usize, quarters: usize) -> (Vec<Vec3>, Vec<BoneInfluence>) {
    let mut positions = Vec::with_capacity((sections + 1) * quarters);
    let mut influences = Vec::with_capacity((sections + 1) * quarters);

    for ring in 0..=sections {
        for quarter in 0..quarters {
            let (z, y) = (2.0 * PI * quarter as f32 / quarters as f32).sin_cos();
            positions.push(Vec3::new(ring as f32 - sections as f32 / 2.0, y, z));

            let weight = 1.0 - ring as f32 / sections as f32;
            influences.push(BoneInfluence::new([0, 1, 0, 0], [weight, 1.0 - weight, 0.0, 0.0]));
        }
    }

    (positions, influences)
}
