use thiserror::Error;

use crate::{
    animation::IsletAnimationError, mesh::IsletMeshError, render::IsletRenderError,
    skin::IsletSkinError, transforms::IsletTransformError,
};

#[derive(Error, Debug)]
pub enum IsletError {
    #[error("{0}")]
    Animation(#[from] IsletAnimationError),

    #[error("{0}")]
    Transform(#[from] IsletTransformError),

    #[error("{0}")]
    Skin(#[from] IsletSkinError),

    #[error("{0}")]
    Mesh(#[from] IsletMeshError),

    #[error("{0}")]
    Render(#[from] IsletRenderError),
}

pub type Result<T> = std::result::Result<T, IsletError>;
