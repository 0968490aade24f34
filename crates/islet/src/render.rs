//! The hand-off to whatever issues GPU draw calls.

use glam::Mat4;
use thiserror::Error;

use crate::{
    mesh::{IsletMeshError, MeshKey},
    skin::IsletSkinError,
    transforms::IsletTransformError,
    Scene,
};

/// Shader input carrying a node's world matrix.
pub const UNIFORM_MODEL: &str = "model";
/// Shader input carrying the ordered bone matrix array.
pub const UNIFORM_BONE_MATRIX: &str = "bone_matrix";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawUniforms<'a> {
    Static {
        model: Mat4,
    },
    Skinned {
        model: Mat4,
        bone_matrices: &'a [Mat4],
    },
}

impl DrawUniforms<'_> {
    pub fn model(&self) -> Mat4 {
        match self {
            Self::Static { model } => *model,
            Self::Skinned { model, .. } => *model,
        }
    }

    pub fn bone_matrices(&self) -> Option<&[Mat4]> {
        match self {
            Self::Static { .. } => None,
            Self::Skinned { bone_matrices, .. } => Some(*bone_matrices),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall<'a> {
    pub mesh: MeshKey,
    pub label: &'a str,
    pub uniforms: DrawUniforms<'a>,
}

/// Receives one draw call per renderable, in [`Renderables`](crate::renderable::Renderables) iteration order.
pub trait RenderSink {
    fn draw(&mut self, call: &DrawCall<'_>);
}

impl Scene {
    /// Issues the current frame's draw calls. Call after [`Scene::tick`].
    pub fn render(&self, sink: &mut impl RenderSink) -> Result<()> {
        let _maybe_span_guard = self.logging.span("render").map(|span| span.entered());

        for (_, renderable) in self.renderables.iter() {
            let mesh = self.meshes.get(renderable.mesh)?;
            let model = *self.transforms.get_world(renderable.transform)?;

            let uniforms = match renderable.skin {
                Some(skin_key) => DrawUniforms::Skinned {
                    model,
                    bone_matrices: self.skins.joint_matrices(skin_key)?,
                },
                None => DrawUniforms::Static { model },
            };

            sink.draw(&DrawCall {
                mesh: renderable.mesh,
                label: &mesh.label,
                uniforms,
            });
        }

        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, IsletRenderError>;

#[derive(Error, Debug)]
pub enum IsletRenderError {
    #[error("[render] {0:?}")]
    Mesh(#[from] IsletMeshError),

    #[error("[render] {0:?}")]
    Transform(#[from] IsletTransformError),

    #[error("[render] {0:?}")]
    Skin(#[from] IsletSkinError),
}
