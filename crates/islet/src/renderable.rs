use slotmap::{new_key_type, DenseSlotMap};

use crate::{mesh::MeshKey, skin::SkinKey, transforms::TransformKey};

new_key_type! {
    pub struct RenderableKey;
}

/// One mesh placed in the scene graph, optionally deformed by a skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderable {
    pub mesh: MeshKey,
    pub transform: TransformKey,
    pub skin: Option<SkinKey>,
}

/// Everything drawn each frame.
///
/// Iterates in insertion order until something is removed: a removal moves the
/// last renderable into the freed position.
#[derive(Debug, Clone, Default)]
pub struct Renderables {
    list: DenseSlotMap<RenderableKey, Renderable>,
}

impl Renderables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, renderable: Renderable) -> RenderableKey {
        self.list.insert(renderable)
    }

    pub fn remove(&mut self, key: RenderableKey) -> Option<Renderable> {
        self.list.remove(key)
    }

    pub fn get(&self, key: RenderableKey) -> Option<&Renderable> {
        self.list.get(key)
    }

    /// Drops every renderable attached to one of `transform_keys`.
    pub fn remove_for_transforms(&mut self, transform_keys: &[TransformKey]) -> Vec<Renderable> {
        let keys: Vec<RenderableKey> = self
            .list
            .iter()
            .filter(|(_, renderable)| transform_keys.contains(&renderable.transform))
            .map(|(key, _)| key)
            .collect();

        keys.into_iter()
            .filter_map(|key| self.list.remove(key))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RenderableKey, &Renderable)> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn removal_moves_the_last_renderable_into_the_hole() {
        let mut meshes: SlotMap<MeshKey, ()> = SlotMap::with_key();
        let mut transforms: SlotMap<TransformKey, ()> = SlotMap::with_key();
        let transform = transforms.insert(());

        let mut renderables = Renderables::new();
        let keys: Vec<RenderableKey> = (0..3)
            .map(|_| {
                renderables.insert(Renderable {
                    mesh: meshes.insert(()),
                    transform,
                    skin: None,
                })
            })
            .collect();

        let order = |renderables: &Renderables| -> Vec<RenderableKey> {
            renderables.iter().map(|(key, _)| key).collect()
        };
        assert_eq!(order(&renderables), keys);

        renderables.remove(keys[0]);
        assert_eq!(order(&renderables), vec![keys[2], keys[1]]);
    }
}
