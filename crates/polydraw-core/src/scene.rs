//! Scene graph membership.

use crate::shapes::{NodeId, Renderable, VertexMarker};

/// A visible node resolved to its render data.
#[derive(Debug, Clone, Copy)]
pub enum SceneNode<'a> {
    /// Polygon fill and outline.
    Polygon(&'a Renderable),
    /// Pending vertex marker.
    Marker(&'a VertexMarker),
}

/// Ordered set of visible scene nodes (back to front).
///
/// The graph tracks membership and draw order only; node data is owned by
/// the shapes and markers the controller holds.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    z_order: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node on top of the scene. Adding a node twice keeps its first slot.
    pub fn add(&mut self, id: NodeId) {
        if !self.contains(id) {
            self.z_order.push(id);
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.z_order.contains(&id)
    }

    pub fn clear(&mut self) {
        self.z_order.clear();
    }

    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Node ids in draw order.
    pub fn ordered(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.z_order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_add_and_order() {
        let mut scene = SceneGraph::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        scene.add(a);
        scene.add(b);
        assert_eq!(scene.ordered().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_add_twice_is_idempotent() {
        let mut scene = SceneGraph::new();
        let a = Uuid::new_v4();
        scene.add(a);
        scene.add(a);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut scene = SceneGraph::new();
        scene.add(Uuid::new_v4());
        scene.add(Uuid::new_v4());
        scene.clear();
        assert!(scene.is_empty());
    }
}
