//! Mesh records as handed over by the asset loader.
//!
//! Geometry upload lives outside this crate; all the core needs is a label to
//! report, the vertex count and, for skinned meshes, the bone attributes.

use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

use crate::skin::SkinAttributes;

new_key_type! {
    pub struct MeshKey;
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub label: String,
    pub vertex_count: usize,
    skin: Option<SkinAttributes>,
}

impl Mesh {
    pub fn new(label: impl Into<String>, vertex_count: usize) -> Self {
        Self {
            label: label.into(),
            vertex_count,
            skin: None,
        }
    }

    /// Attaches bone attributes; there must be exactly one per vertex.
    pub fn with_skin(mut self, skin: SkinAttributes) -> Result<Self> {
        if skin.len() != self.vertex_count {
            return Err(IsletMeshError::AttributeLengthMismatch {
                label: self.label,
                vertex_count: self.vertex_count,
                attribute_count: skin.len(),
            });
        }
        self.skin = Some(skin);
        Ok(self)
    }

    pub fn skin(&self) -> Option<&SkinAttributes> {
        self.skin.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Meshes {
    list: SlotMap<MeshKey, Mesh>,
}

impl Meshes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mesh: Mesh) -> MeshKey {
        self.list.insert(mesh)
    }

    pub fn remove(&mut self, key: MeshKey) -> Option<Mesh> {
        self.list.remove(key)
    }

    pub fn get(&self, key: MeshKey) -> Result<&Mesh> {
        self.list.get(key).ok_or(IsletMeshError::MeshNotFound(key))
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

pub type Result<T> = std::result::Result<T, IsletMeshError>;

#[derive(Error, Debug)]
pub enum IsletMeshError {
    #[error("[mesh] mesh not found: {0:?}")]
    MeshNotFound(MeshKey),

    #[error("[mesh] {label}: {attribute_count} bone attributes for {vertex_count} vertices")]
    AttributeLengthMismatch {
        label: String,
        vertex_count: usize,
        attribute_count: usize,
    },
}
