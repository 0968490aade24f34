use glam::{Mat4, Vec3};

/// Bones that can influence a single vertex.
pub const MAX_BONE_INFLUENCES: usize = 4;

/// Per-vertex bone indices and their weights.
///
/// Weights are expected to sum to one but nothing here enforces it; call
/// [`BoneInfluence::normalized`] when the source data can't be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneInfluence {
    pub joints: [u32; MAX_BONE_INFLUENCES],
    pub weights: [f32; MAX_BONE_INFLUENCES],
}

impl BoneInfluence {
    pub fn new(joints: [u32; MAX_BONE_INFLUENCES], weights: [f32; MAX_BONE_INFLUENCES]) -> Self {
        Self { joints, weights }
    }

    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Rescales the weights to sum to one. A vertex with no weight at all is left as is.
    pub fn normalized(&self) -> Self {
        let sum = self.weight_sum();
        if sum <= f32::EPSILON {
            return *self;
        }

        Self {
            joints: self.joints,
            weights: self.weights.map(|weight| weight / sum),
        }
    }

    /// `Σ weight_k * matrices[joint_k]`, or `None` if a joint is out of range.
    pub fn skin_matrix(&self, matrices: &[Mat4]) -> Option<Mat4> {
        self.joints
            .iter()
            .zip(self.weights.iter())
            .try_fold(Mat4::ZERO, |acc, (joint, weight)| {
                matrices
                    .get(*joint as usize)
                    .map(|matrix| acc + *matrix * *weight)
            })
    }

    /// Linear blend skinning of one position, as the vertex shader does it.
    pub fn skin_position(&self, position: Vec3, matrices: &[Mat4]) -> Option<Vec3> {
        self.skin_matrix(matrices)
            .map(|matrix| matrix.transform_point3(position))
    }
}

/// Bone attributes for every vertex of a mesh, in vertex order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkinAttributes {
    pub influences: Vec<BoneInfluence>,
}

impl SkinAttributes {
    pub fn new(influences: Vec<BoneInfluence>) -> Self {
        Self { influences }
    }

    pub fn len(&self) -> usize {
        self.influences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.influences.is_empty()
    }

    pub fn max_joint_index(&self) -> Option<u32> {
        self.influences
            .iter()
            .flat_map(|influence| influence.joints)
            .max()
    }

    pub fn normalized(&self) -> Self {
        Self {
            influences: self
                .influences
                .iter()
                .map(BoneInfluence::normalized)
                .collect(),
        }
    }
}
