use std::collections::HashSet;

use glam::Mat4;
use slotmap::{new_key_type, DenseSlotMap};

use crate::{
    mesh::MeshKey,
    transforms::{TransformKey, Transforms},
    Scene,
};

use super::error::{IsletSkinError, Result};

impl Scene {
    /// Refreshes bone matrices from the world matrices computed by the last
    /// [`Scene::update_transforms`]. Must run after it within the same tick.
    pub fn update_skins(&mut self) -> Result<()> {
        let _maybe_span_guard = self
            .logging
            .span("update_skins")
            .map(|span| span.entered());

        let dirty_skin_joints = self.transforms.take_dirty_skin_joints();
        self.skins.update(&dirty_skin_joints, &self.transforms)
    }
}

/// Binds a mesh to an ordered list of bone nodes.
///
/// Bones are arena keys into [`Transforms`], never owned. The matrix array
/// holds `world(joint[i]) * offset[i]` in joint order, which is the order the
/// vertex shader indexes with.
#[derive(Debug, Clone)]
pub struct SkinBinding {
    mesh: MeshKey,
    joints: Vec<TransformKey>,
    // inverse bind matrices, fixed at bind time
    offsets: Vec<Mat4>,
    matrices: Vec<Mat4>,
}

impl SkinBinding {
    pub fn mesh(&self) -> MeshKey {
        self.mesh
    }

    pub fn joints(&self) -> &[TransformKey] {
        &self.joints
    }

    pub fn offsets(&self) -> &[Mat4] {
        &self.offsets
    }

    pub fn joint_matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    // only the joints in `dirty` are recomputed, but every joint must still exist
    fn update(&mut self, dirty: Option<&HashSet<TransformKey>>, transforms: &Transforms) -> Result<()> {
        for (index, joint) in self.joints.iter().enumerate() {
            if dirty.is_some_and(|dirty| !dirty.contains(joint)) {
                if !transforms.contains(*joint) {
                    return Err(IsletSkinError::JointTransformNotFound {
                        joint_transform: *joint,
                    });
                }
                continue;
            }

            let world_matrix = transforms.get_world(*joint).map_err(|_| {
                IsletSkinError::JointTransformNotFound {
                    joint_transform: *joint,
                }
            })?;

            self.matrices[index] = *world_matrix * self.offsets[index];
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Skins {
    bindings: DenseSlotMap<SkinKey, SkinBinding>,
}

impl Skins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `mesh` to `joints`. An empty `offsets` list means identity offsets.
    ///
    /// Every joint must already be in `transforms`; the matrices are computed
    /// right away from its current world matrices.
    pub fn insert(
        &mut self,
        mesh: MeshKey,
        joints: Vec<TransformKey>,
        offsets: Vec<Mat4>,
        transforms: &Transforms,
    ) -> Result<SkinKey> {
        let offsets = if offsets.is_empty() {
            vec![Mat4::IDENTITY; joints.len()]
        } else {
            offsets
        };

        if offsets.len() != joints.len() {
            return Err(IsletSkinError::SkinJointMatrixMismatch {
                joint_len: joints.len(),
                offset_len: offsets.len(),
            });
        }

        let mut binding = SkinBinding {
            mesh,
            matrices: offsets.clone(),
            joints,
            offsets,
        };
        binding.update(None, transforms)?;

        tracing::debug!(
            "binding {} joints to mesh {:?}",
            binding.joints.len(),
            mesh
        );

        Ok(self.bindings.insert(binding))
    }

    pub fn remove(&mut self, skin_key: SkinKey) -> Option<SkinBinding> {
        self.bindings.remove(skin_key)
    }

    pub fn get(&self, skin_key: SkinKey) -> Result<&SkinBinding> {
        self.bindings
            .get(skin_key)
            .ok_or(IsletSkinError::SkinNotFound(skin_key))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn joint_matrices(&self, skin_key: SkinKey) -> Result<&[Mat4]> {
        self.get(skin_key).map(SkinBinding::joint_matrices)
    }

    /// The matrix array as the raw column-major f32 bytes a uniform buffer expects.
    pub fn joint_matrices_bytes(&self, skin_key: SkinKey) -> Result<&[u8]> {
        Ok(bytemuck::cast_slice(self.joint_matrices(skin_key)?))
    }

    // different skins can share the same joint, so every binding is visited
    pub fn update(
        &mut self,
        dirty_skin_joints: &HashSet<TransformKey>,
        transforms: &Transforms,
    ) -> Result<()> {
        for binding in self.bindings.values_mut() {
            binding.update(Some(dirty_skin_joints), transforms)?;
        }

        Ok(())
    }

    /// Recomputes every matrix regardless of dirty state.
    pub fn update_all(&mut self, transforms: &Transforms) -> Result<()> {
        for binding in self.bindings.values_mut() {
            binding.update(None, transforms)?;
        }

        Ok(())
    }
}

new_key_type! {
    pub struct SkinKey;
}
