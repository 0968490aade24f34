use thiserror::Error;

use crate::{mesh::MeshKey, transforms::TransformKey};

use super::skins::SkinKey;

pub type Result<T> = std::result::Result<T, IsletSkinError>;

#[derive(Error, Debug)]
pub enum IsletSkinError {
    #[error("[skin] skin not found: {0:?}")]
    SkinNotFound(SkinKey),

    #[error("[skin] joint transform not found: {joint_transform:?}")]
    JointTransformNotFound { joint_transform: TransformKey },

    #[error("[skin] skin joint matrix mismatch, joint_len: {joint_len} offset_len: {offset_len}")]
    SkinJointMatrixMismatch { joint_len: usize, offset_len: usize },

    #[error("[skin] mesh {mesh:?} references joint {joint_index} but the skin only has {joint_len} joints")]
    JointIndexOutOfRange {
        mesh: MeshKey,
        joint_index: u32,
        joint_len: usize,
    },

    #[error("[skin] mesh {0:?} has no bone attributes")]
    MissingSkinAttributes(MeshKey),
}
