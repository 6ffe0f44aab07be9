//! Rendering seam
//!
//! The core never talks to a scene graph directly. It needs four
//! capabilities (create a node, assign a texture, position it, mask a
//! region) plus a release hook for teardown.

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};
use crate::symbols::SymbolId;

/// Handle to a drawable node owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Handle to a backend texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Axis-aligned rectangle in stage coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scene backend capabilities used by the reels
pub trait RenderBackend {
    fn create_node(&mut self) -> NodeId;

    fn set_texture(&mut self, node: NodeId, texture: TextureId);

    fn set_position(&mut self, node: NodeId, x: f64, y: f64);

    /// Clip everything outside `bounds`
    fn mask_region(&mut self, bounds: Bounds);

    /// Release all rendering resources. Called at most once by the orchestrator.
    fn release(&mut self) {}
}

/// Symbol id → texture handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureAtlas {
    handles: Vec<TextureId>,
}

impl TextureAtlas {
    pub fn new(handles: Vec<TextureId>) -> SlotResult<Self> {
        if handles.is_empty() {
            return Err(SlotError::TextureCount {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self { handles })
    }

    /// Handles `0..count`, for headless hosts
    pub fn sequential(count: usize) -> Self {
        Self {
            handles: (0..count as u32).map(TextureId).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn get(&self, symbol: SymbolId) -> Option<TextureId> {
        self.handles.get(symbol as usize).copied()
    }

    /// Reverse lookup
    pub fn symbol_for(&self, texture: TextureId) -> Option<SymbolId> {
        self.handles
            .iter()
            .position(|&t| t == texture)
            .map(|i| i as SymbolId)
    }
}

/// Recorded state of one headless node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NodeState {
    pub texture: Option<TextureId>,
    pub x: f64,
    pub y: f64,
}

/// In-memory backend that records every call
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    nodes: Vec<NodeState>,
    masks: Vec<Bounds>,
    texture_writes: u64,
    released: u32,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, node: NodeId) -> Option<&NodeState> {
        self.nodes.get(node.0 as usize)
    }

    pub fn texture_of(&self, node: NodeId) -> Option<TextureId> {
        self.node(node).and_then(|n| n.texture)
    }

    pub fn position_of(&self, node: NodeId) -> Option<(f64, f64)> {
        self.node(node).map(|n| (n.x, n.y))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn masks(&self) -> &[Bounds] {
        &self.masks
    }

    pub fn texture_writes(&self) -> u64 {
        self.texture_writes
    }

    pub fn release_count(&self) -> u32 {
        self.released
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_node(&mut self) -> NodeId {
        self.nodes.push(NodeState::default());
        NodeId(self.nodes.len() as u32 - 1)
    }

    fn set_texture(&mut self, node: NodeId, texture: TextureId) {
        if let Some(state) = self.nodes.get_mut(node.0 as usize) {
            state.texture = Some(texture);
            self.texture_writes += 1;
        }
    }

    fn set_position(&mut self, node: NodeId, x: f64, y: f64) {
        if let Some(state) = self.nodes.get_mut(node.0 as usize) {
            state.x = x;
            state.y = y;
        }
    }

    fn mask_region(&mut self, bounds: Bounds) {
        self.masks.push(bounds);
    }

    fn release(&mut self) {
        self.released += 1;
        self.nodes.clear();
        self.masks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_lookup() {
        let atlas = TextureAtlas::new(vec![TextureId(40), TextureId(41)]).unwrap();
        assert_eq!(atlas.get(1), Some(TextureId(41)));
        assert_eq!(atlas.get(2), None);
        assert_eq!(atlas.symbol_for(TextureId(40)), Some(0));
        assert!(TextureAtlas::new(Vec::new()).is_err());
    }

    #[test]
    fn test_headless_records_calls() {
        let mut backend = HeadlessBackend::new();
        let node = backend.create_node();
        backend.set_texture(node, TextureId(3));
        backend.set_position(node, 10.0, 20.0);
        backend.mask_region(Bounds {
            x: 0.0,
            y: 0.0,
            width: 5.0,
            height: 5.0,
        });

        assert_eq!(backend.texture_of(node), Some(TextureId(3)));
        assert_eq!(backend.position_of(node), Some((10.0, 20.0)));
        assert_eq!(backend.masks().len(), 1);

        backend.release();
        assert_eq!(backend.release_count(), 1);
        assert_eq!(backend.node_count(), 0);
    }
}
