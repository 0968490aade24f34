use glam::Mat4;

use crate::{
    animation::{AnimatedNode, AnimationClock, AnimationKey, Animations, TransformTrack},
    config::SceneConfig,
    controls::{ControlKey, ControlRole},
    debug::IsletLogging,
    error::Result,
    mesh::{Mesh, MeshKey, Meshes},
    procedural::ClipRequest,
    renderable::{Renderable, RenderableKey, Renderables},
    skin::{IsletSkinError, SkinKey, Skins},
    transforms::{IsletTransformError, Transform, TransformKey, Transforms},
};

/// Owns the scene graph and everything that animates or draws from it.
///
/// All mutation goes through `&mut self` between ticks, so a frame never sees
/// half of a replaced track or a bone matrix from the previous frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pub transforms: Transforms,
    pub animations: Animations,
    pub skins: Skins,
    pub meshes: Meshes,
    pub renderables: Renderables,
    pub clock: AnimationClock,
    pub logging: IsletLogging,
    config: SceneConfig,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let clock = match config.clock_reset_after {
            Some(duration) => AnimationClock::looping(duration),
            None => AnimationClock::new(None),
        };

        Self {
            transforms: Transforms::new(),
            animations: Animations::new(),
            skins: Skins::new(),
            meshes: Meshes::new(),
            renderables: Renderables::new(),
            clock,
            logging: config.logging.clone(),
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    /// One frame: clock, then animated locals, then world matrices, then bones.
    pub fn tick(&mut self, global_time_delta: f64) -> Result<()> {
        self.clock.update(global_time_delta);

        self.update_animations()?;
        self.update_transforms();
        self.update_skins()?;

        Ok(())
    }

    pub fn add_node(
        &mut self,
        transform: Transform,
        parent: Option<TransformKey>,
    ) -> Result<TransformKey> {
        Ok(self.transforms.insert(transform, parent)?)
    }

    /// Adds a node driven by `track`, starting at its pose for the current time.
    pub fn add_animated_node(
        &mut self,
        track: TransformTrack,
        parent: Option<TransformKey>,
        role: Option<ControlRole>,
    ) -> Result<(TransformKey, AnimationKey)> {
        let transform_key = self
            .transforms
            .insert(track.sample(self.time()), parent)?;

        let mut node = AnimatedNode::new(transform_key, track);
        node.role = role;

        Ok((transform_key, self.animations.insert(node)))
    }

    /// Builds a clip with the scene's loop policy.
    pub fn clip_track(&self, request: &ClipRequest) -> Result<TransformTrack> {
        Ok(request.generate().into_track(self.config.loop_policy)?)
    }

    pub fn add_mesh(
        &mut self,
        mesh: Mesh,
        transform: TransformKey,
    ) -> Result<(MeshKey, RenderableKey)> {
        if !self.transforms.contains(transform) {
            return Err(IsletTransformError::LocalNotFound(transform).into());
        }

        let mesh_key = self.meshes.insert(mesh);
        let renderable_key = self.renderables.insert(Renderable {
            mesh: mesh_key,
            transform,
            skin: None,
        });

        Ok((mesh_key, renderable_key))
    }

    /// Adds a skinned mesh bound to `joints`, with one offset per joint
    /// (or none, for identity offsets).
    ///
    /// Every joint must resolve in the scene graph and every bone index of the
    /// mesh must address one of them.
    pub fn add_skinned_mesh(
        &mut self,
        mesh: Mesh,
        transform: TransformKey,
        joints: Vec<TransformKey>,
        offsets: Vec<Mat4>,
    ) -> Result<(MeshKey, SkinKey, RenderableKey)> {
        if !self.transforms.contains(transform) {
            return Err(IsletTransformError::LocalNotFound(transform).into());
        }

        let max_joint_index = mesh.skin().map(|skin| skin.max_joint_index());

        let mesh_key = self.meshes.insert(mesh);

        let validated = match max_joint_index {
            None => Err(IsletSkinError::MissingSkinAttributes(mesh_key)),
            Some(Some(joint_index)) if joint_index as usize >= joints.len() => {
                Err(IsletSkinError::JointIndexOutOfRange {
                    mesh: mesh_key,
                    joint_index,
                    joint_len: joints.len(),
                })
            }
            Some(_) => self
                .skins
                .insert(mesh_key, joints, offsets, &self.transforms),
        };

        let skin_key = match validated {
            Ok(skin_key) => skin_key,
            Err(err) => {
                self.meshes.remove(mesh_key);
                return Err(err.into());
            }
        };

        let renderable_key = self.renderables.insert(Renderable {
            mesh: mesh_key,
            transform,
            skin: Some(skin_key),
        });

        Ok((mesh_key, skin_key, renderable_key))
    }

    /// Removes a node and its subtree, along with the animations,
    /// renderables, skins and meshes attached to it.
    ///
    /// A skin drawn from outside the subtree that used a removed node as a
    /// bone still fails on the next tick.
    pub fn remove_node(&mut self, key: TransformKey) -> Vec<TransformKey> {
        let removed = self.transforms.remove(key);
        self.animations.remove_for_transforms(&removed);

        for renderable in self.renderables.remove_for_transforms(&removed) {
            if let Some(skin_key) = renderable.skin {
                self.skins.remove(skin_key);
            }

            let still_drawn = self
                .renderables
                .iter()
                .any(|(_, other)| other.mesh == renderable.mesh);
            if !still_drawn {
                self.meshes.remove(renderable.mesh);
            }
        }

        removed
    }

    /// Delivers a control key to every animated node. Call between ticks.
    pub fn handle_control(&mut self, key: ControlKey) -> Result<usize> {
        Ok(self.animations.handle_control(key, self.clock.time())?)
    }
}
