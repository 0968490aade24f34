use std::collections::HashSet;

use glam::{Mat4, Quat, Vec3};
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

use crate::Scene;

impl Scene {
    pub fn update_transforms(&mut self) {
        let _maybe_span_guard = self
            .logging
            .span("update_transforms")
            .map(|span| span.entered());

        self.transforms.update_world();
    }
}

#[derive(Debug, Clone)]
struct SceneNode {
    local: Transform,
    world: Mat4,
    // only the root has none
    parent: Option<TransformKey>,
    children: Vec<TransformKey>,
}

impl SceneNode {
    fn new(local: Transform, parent: Option<TransformKey>) -> Self {
        Self {
            world: local.to_matrix(),
            local,
            parent,
            children: Vec::new(),
        }
    }
}

/// The scene graph: an arena of nodes under a fixed root, each with a local
/// TRS transform, a resolved world matrix and its children.
///
/// Locals are written freely; world matrices are only resolved by
/// [`Transforms::update_world`], which recomputes just the dirty subtrees.
#[derive(Debug, Clone)]
pub struct Transforms {
    nodes: SlotMap<TransformKey, SceneNode>,
    // locals written since the last update_world
    dirty: HashSet<TransformKey>,
    // nodes whose world matrix changed, drained by the skins
    moved: HashSet<TransformKey>,
    root: TransformKey,
}

impl Default for Transforms {
    fn default() -> Self {
        Self::new()
    }
}

impl Transforms {
    pub const INITIAL_CAPACITY: usize = 32;

    pub fn new() -> Self {
        let mut nodes = SlotMap::with_capacity_and_key(Self::INITIAL_CAPACITY);
        let root = nodes.insert(SceneNode::new(Transform::IDENTITY, None));

        Self {
            nodes,
            dirty: HashSet::new(),
            moved: HashSet::new(),
            root,
        }
    }

    pub fn root(&self) -> TransformKey {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    // the root is always there
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, key: TransformKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Adds a node under `parent`, or under the root when `None`.
    pub fn insert(
        &mut self,
        transform: Transform,
        parent: Option<TransformKey>,
    ) -> Result<TransformKey> {
        let parent = parent.unwrap_or(self.root);

        if !self.contains(parent) {
            return Err(IsletTransformError::LocalNotFound(parent));
        }

        let key = self.nodes.insert(SceneNode::new(transform, Some(parent)));

        self.nodes[parent].children.push(key);
        self.dirty.insert(key);

        Ok(key)
    }

    /// Removes a node together with its whole subtree, returning every removed key.
    /// The root and unknown keys remove nothing.
    pub fn remove(&mut self, key: TransformKey) -> Vec<TransformKey> {
        if key == self.root || !self.contains(key) {
            return Vec::new();
        }

        self.detach(key);

        let mut removed = Vec::new();
        let mut pending = vec![key];
        while let Some(key) = pending.pop() {
            if let Some(node) = self.nodes.remove(key) {
                pending.extend(node.children);
            }
            self.dirty.remove(&key);
            self.moved.remove(&key);
            removed.push(key);
        }

        removed
    }

    /// Overwrites a local transform. The world matrix follows on the next
    /// [`Self::update_world`].
    pub fn set_local(&mut self, key: TransformKey, transform: Transform) -> Result<()> {
        if key == self.root {
            return Err(IsletTransformError::CannotModifyRootNode);
        }

        let node = self
            .nodes
            .get_mut(key)
            .ok_or(IsletTransformError::LocalNotFound(key))?;
        node.local = transform;
        self.dirty.insert(key);

        Ok(())
    }

    /// Moves `child` under `parent`, or under the root when `None`.
    /// Fails without touching the graph if `parent` sits inside `child`'s subtree.
    pub fn set_parent(&mut self, child: TransformKey, parent: Option<TransformKey>) -> Result<()> {
        if child == self.root {
            return Err(IsletTransformError::CannotModifyRootNode);
        }
        let current = self
            .nodes
            .get(child)
            .ok_or(IsletTransformError::LocalNotFound(child))?
            .parent;

        let parent = parent.unwrap_or(self.root);
        if !self.contains(parent) {
            return Err(IsletTransformError::LocalNotFound(parent));
        }
        if current == Some(parent) {
            return Ok(());
        }

        let mut ancestor = Some(parent);
        while let Some(key) = ancestor {
            if key == child {
                return Err(IsletTransformError::CyclicParent { child, parent });
            }
            ancestor = self.nodes.get(key).and_then(|node| node.parent);
        }

        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.dirty.insert(child);

        Ok(())
    }

    pub fn get_parent(&self, child: TransformKey) -> Result<TransformKey> {
        if child == self.root {
            return Err(IsletTransformError::CannotGetParentOfRootNode);
        }

        self.nodes
            .get(child)
            .and_then(|node| node.parent)
            .ok_or(IsletTransformError::CannotGetParent(child))
    }

    pub fn children(&self, key: TransformKey) -> Result<&[TransformKey]> {
        self.nodes
            .get(key)
            .map(|node| node.children.as_slice())
            .ok_or(IsletTransformError::LocalNotFound(key))
    }

    pub fn get_local(&self, key: TransformKey) -> Result<&Transform> {
        self.nodes
            .get(key)
            .map(|node| &node.local)
            .ok_or(IsletTransformError::LocalNotFound(key))
    }

    /// The world matrix as of the last [`Self::update_world`].
    pub fn get_world(&self, key: TransformKey) -> Result<&Mat4> {
        self.nodes
            .get(key)
            .map(|node| &node.world)
            .ok_or(IsletTransformError::WorldNotFound(key))
    }

    /// Resolves `world = parent_world * local` for every dirty node and its
    /// descendants, depth first from the root.
    ///
    /// Returns at once when no local changed. Otherwise every node is visited,
    /// but clean nodes under a clean parent keep their world matrix.
    pub fn update_world(&mut self) {
        if self.dirty.is_empty() {
            return;
        }

        let mut pending = vec![(self.root, Mat4::IDENTITY, false)];

        while let Some((key, parent_world, parent_dirty)) = pending.pop() {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };

            let dirty = parent_dirty || self.dirty.contains(&key);
            if dirty {
                node.world = parent_world * node.local.to_matrix();
                self.moved.insert(key);
            }

            let world = node.world;
            pending.extend(node.children.iter().map(|child| (*child, world, dirty)));
        }

        self.dirty.clear();
    }

    /// Drains the nodes whose world matrix changed since the last call.
    pub fn take_dirty_skin_joints(&mut self) -> HashSet<TransformKey> {
        std::mem::take(&mut self.moved)
    }

    // unlinks `child` from its parent, callers reattach or drop it
    fn detach(&mut self, child: TransformKey) {
        let parent = self
            .nodes
            .get_mut(child)
            .and_then(|node| node.parent.take());

        if let Some(parent) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            parent.children.retain(|key| *key != child);
        }
    }
}

/// Translation, rotation and scale, composed as `T * R * S`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    // scale first, then rotate, then translate
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

new_key_type! {
    pub struct TransformKey;
}

pub type Result<T> = std::result::Result<T, IsletTransformError>;

#[derive(Error, Debug)]
pub enum IsletTransformError {
    #[error("[transform] local transform does not exist {0:?}")]
    LocalNotFound(TransformKey),

    #[error("[transform] world transform does not exist {0:?}")]
    WorldNotFound(TransformKey),

    #[error("[transform] cannot modify root node")]
    CannotModifyRootNode,

    #[error("[transform] cannot get parent of root node")]
    CannotGetParentOfRootNode,

    #[error("[transform] cannot get parent for {0:?}")]
    CannotGetParent(TransformKey),

    #[error("[transform] {parent:?} is a descendant of {child:?}, cannot reparent")]
    CyclicParent {
        child: TransformKey,
        parent: TransformKey,
    },
}
