use crate::constants::VertexId;

#[derive(Clone, Copy, Debug)]
pub enum ContractionStrategy<'a> {
    /// Contract the vertices in exactly this order
    FixedOrder(&'a [VertexId]),
    LazyUpdate(UpdateStrategy),
}

impl Default for ContractionStrategy<'_> {
    fn default() -> Self {
        Self::LazyUpdate(UpdateStrategy::default())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct UpdateStrategy {
    update_jit: bool,
    update_local: bool,
}

impl Default for UpdateStrategy {
    fn default() -> Self {
        Self {
            update_jit: true,
            update_local: true,
        }
    }
}

impl UpdateStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the priority of a vertex right before contracting it
    pub fn update_jit(&self) -> bool {
        self.update_jit
    }

    /// Recompute the priorities of the neighbours of a contracted vertex
    pub fn update_local(&self) -> bool {
        self.update_local
    }

    pub fn set_update_jit(mut self, update_jit: bool) -> Self {
        self.update_jit = update_jit;
        self
    }

    pub fn set_update_local(mut self, update_local: bool) -> Self {
        self.update_local = update_local;
        self
    }
}
