//! Minimal scene graph: an arena of nodes addressed by [`NodeId`].

use glam::{Affine3A, Quat, Vec3};

use crate::particles::ParticleSystem;

/// Handle to a node in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Local transform of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation:    Quat,
    pub scale:       f32,
}

impl Default for NodeTransform {
    fn default() -> Self {
        NodeTransform { translation: Vec3::ZERO, rotation: Quat::IDENTITY, scale: 1.0 }
    }
}

impl NodeTransform {
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.translation)
    }
}

#[derive(Debug)]
pub struct Node {
    pub name:      String,
    pub parent:    Option<NodeId>,
    pub children:  Vec<NodeId>,
    pub transform: NodeTransform,
    pub system:    Option<ParticleSystem>,
}

/// Owns every node.  Node 0 is the root.
#[derive(Debug)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            nodes: vec![Node {
                name:      "root".to_string(),
                parent:    None,
                children:  Vec::new(),
                transform: NodeTransform::default(),
                system:    None,
            }],
        }
    }

    pub fn root(&self) -> NodeId { NodeId(0) }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Append a child node under `parent`.
    pub fn add_child(&mut self, parent: NodeId, name: &str, transform: NodeTransform) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            transform,
            system: None,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId)         -> &Node     { &self.nodes[id.0] }
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node { &mut self.nodes[id.0] }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Node-local → world transform.
    pub fn world_transform(&self, id: NodeId) -> Affine3A {
        let node  = &self.nodes[id.0];
        let local = node.transform.to_affine();
        match node.parent {
            Some(p) => self.world_transform(p) * local,
            None    => local,
        }
    }

    /// Nodes carrying a particle system, in insertion order.
    pub fn systems(&self) -> impl Iterator<Item = (NodeId, &ParticleSystem)> {
        self.nodes.iter().enumerate()
            .filter_map(|(i, n)| n.system.as_ref().map(|s| (NodeId(i), s)))
    }

    pub fn systems_mut(&mut self) -> impl Iterator<Item = &mut ParticleSystem> {
        self.nodes.iter_mut().filter_map(|n| n.system.as_mut())
    }
}

impl Default for Scene {
    fn default() -> Self { Scene::new() }
}
