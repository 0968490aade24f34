use slotmap::{new_key_type, DenseSlotMap};

use crate::{
    controls::{ControlKey, ControlRole},
    procedural::ClipRequest,
    transforms::{Transform, TransformKey, Transforms},
    Scene,
};

use super::{
    error::{IsletAnimationError, Result},
    transform_track::TransformTrack,
};

new_key_type! {
    pub struct AnimationKey;
}

/// A scene node whose local transform is driven by a [`TransformTrack`].
///
/// The local transform it writes is derived state: it is recomputed from the
/// clock every tick and nothing about previous ticks is kept.
#[derive(Debug, Clone)]
pub struct AnimatedNode {
    pub transform_key: TransformKey,
    pub track: TransformTrack,
    pub role: Option<ControlRole>,
}

impl AnimatedNode {
    pub fn new(transform_key: TransformKey, track: TransformTrack) -> Self {
        Self {
            transform_key,
            track,
            role: None,
        }
    }

    pub fn with_role(mut self, role: ControlRole) -> Self {
        self.role = Some(role);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Animations {
    nodes: DenseSlotMap<AnimationKey, AnimatedNode>,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: AnimatedNode) -> AnimationKey {
        self.nodes.insert(node)
    }

    pub fn remove(&mut self, key: AnimationKey) -> Option<AnimatedNode> {
        self.nodes.remove(key)
    }

    /// Drops every animated node that drives one of `transform_keys`.
    pub fn remove_for_transforms(&mut self, transform_keys: &[TransformKey]) {
        self.nodes
            .retain(|_, node| !transform_keys.contains(&node.transform_key));
    }

    pub fn get(&self, key: AnimationKey) -> Result<&AnimatedNode> {
        self.nodes
            .get(key)
            .ok_or(IsletAnimationError::MissingKey(key))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnimationKey, &AnimatedNode)> {
        self.nodes.iter()
    }

    /// Swaps in a whole new track and hands back the old one.
    pub fn replace_track(
        &mut self,
        key: AnimationKey,
        track: TransformTrack,
    ) -> Result<TransformTrack> {
        let node = self
            .nodes
            .get_mut(key)
            .ok_or(IsletAnimationError::MissingKey(key))?;

        tracing::debug!("replacing track of {:?}", key);

        Ok(std::mem::replace(&mut node.track, track))
    }

    pub fn sample_local(&self, key: AnimationKey, time: f64) -> Result<Transform> {
        Ok(self.get(key)?.track.sample(time))
    }

    /// Writes every node's sampled transform into the scene graph.
    pub fn update(&self, time: f64, transforms: &mut Transforms) -> Result<()> {
        for node in self.nodes.values() {
            transforms.set_local(node.transform_key, node.track.sample(time))?;
        }

        Ok(())
    }

    /// Routes a control key to every node whose role reacts to it, replacing
    /// their tracks with a clip that starts where they are at `time`.
    /// Returns how many nodes changed.
    pub fn handle_control(&mut self, key: ControlKey, time: f64) -> Result<usize> {
        let mut replaced = 0;

        for (animation_key, node) in self.nodes.iter_mut() {
            let Some(role) = node.role else {
                continue;
            };
            let Some(mode) = role.respond(key) else {
                continue;
            };

            let origin = node.track.translation_at(time);
            let track = ClipRequest::new(mode, role.clip_steps())
                .with_origin(origin)
                .with_start_time(time)
                .generate()
                .into_track(node.track.loop_policy)?;

            tracing::debug!(
                "{:?} reacting to {} from {:?} with {:?}",
                animation_key,
                key,
                origin,
                mode
            );

            node.track = track;
            replaced += 1;
        }

        if replaced == 0 {
            tracing::warn!("no animated node reacts to {}", key);
        }

        Ok(replaced)
    }
}

impl Scene {
    pub fn update_animations(&mut self) -> Result<()> {
        let _maybe_span_guard = self
            .logging
            .span("update_animations")
            .map(|span| span.entered());

        self.animations
            .update(self.clock.time(), &mut self.transforms)
    }
}
