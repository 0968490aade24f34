mod attributes;
mod error;
mod skins;

pub use attributes::{BoneInfluence, SkinAttributes, MAX_BONE_INFLUENCES};
pub use error::{IsletSkinError, Result};
pub use skins::{SkinBinding, SkinKey, Skins};
