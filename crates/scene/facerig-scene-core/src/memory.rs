//! In-memory scene graph.
//!
//! `MemoryScene` implements [`SceneQuery`] and [`SceneGraph`] with the same contract a
//! host adapter must honour: history listings are nearest-to-shape first, deformers are
//! inserted according to [`ChainInsertion`], a mesh carries at most one skinCluster, and
//! `connect` replaces an existing input. Every mutation is recorded in a journal so
//! callers can check exactly what a pass touched.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::attr::{plug, split_plug, AttrValue};
use crate::graph::{
    ChainInsertion, CreateDeformer, GraphError, HistoryEntry, SceneGraph, SceneQuery, SkinBind,
};
use crate::kind::DeformerKind;

/// Role of a node in the memory scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRole {
    Transform,
    Mesh,
    Shape,
    Joint,
    Curve,
    Deformer(DeformerKind),
}

#[derive(Debug, Clone)]
struct Node {
    role: NodeRole,
    parent: Option<String>,
    attributes: HashMap<String, AttrValue>,
}

impl Node {
    fn new(role: NodeRole, parent: Option<&str>) -> Self {
        Self {
            role,
            parent: parent.map(str::to_string),
            attributes: HashMap::new(),
        }
    }
}

/// One mutation applied to the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "edit", rename_all = "snake_case")]
pub enum SceneEdit {
    Created {
        name: String,
        kind: DeformerKind,
        targets: Vec<String>,
        driver: Option<String>,
        skin: Option<SkinBind>,
    },
    Attached {
        deformer: String,
        mesh: String,
    },
    InfluencesAdded {
        skin_cluster: String,
        joints: Vec<String>,
    },
    AttributeSet {
        node: String,
        attr: String,
        value: AttrValue,
    },
    Connected {
        source: String,
        destination: String,
    },
    Renamed {
        from: String,
        to: String,
    },
}

impl SceneEdit {
    /// Whether this edit created, modified or renamed `node`.
    pub fn touches(&self, node: &str) -> bool {
        match self {
            SceneEdit::Created { name, .. } => name == node,
            SceneEdit::Attached { deformer, .. } => deformer == node,
            SceneEdit::InfluencesAdded { skin_cluster, .. } => skin_cluster == node,
            SceneEdit::AttributeSet { node: n, .. } => n == node,
            SceneEdit::Connected { destination, .. } => {
                split_plug(destination).map(|(n, _)| n) == Some(node)
            }
            SceneEdit::Renamed { from, to } => from == node || to == node,
        }
    }
}

/// Node categories accepted in a [`SceneDescription`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescribedRole {
    Transform,
    Mesh,
    Joint,
    Curve,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub role: DescribedRole,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeformerDescription {
    pub name: String,
    pub kind: DeformerKind,
    pub meshes: Vec<String>,
    #[serde(default)]
    pub influences: Vec<String>,
}

/// Serializable seed for a [`MemoryScene`]. Deformers are listed in chain order,
/// nearest-to-shape first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub insertion: ChainInsertion,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub deformers: Vec<DeformerDescription>,
    #[serde(default)]
    pub connections: Vec<(String, String)>,
}

impl SceneDescription {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryScene {
    nodes: HashMap<String, Node>,
    /// Node names in creation order, for stable child listings.
    order: Vec<String>,
    /// Mesh -> deformers, nearest-to-shape first.
    chains: HashMap<String, Vec<String>>,
    influences: HashMap<String, Vec<String>>,
    /// Binding options each skinCluster was created with.
    skin_binds: HashMap<String, SkinBind>,
    connections: Vec<(String, String)>,
    insertion: ChainInsertion,
    rejected: HashSet<String>,
    journal: Vec<SceneEdit>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_insertion(mut self, insertion: ChainInsertion) -> Self {
        self.insertion = insertion;
        self
    }

    /// Build a scene from a description. Seeding is not journaled.
    pub fn from_description(desc: &SceneDescription) -> Result<Self, GraphError> {
        let mut scene = MemoryScene::new().with_insertion(desc.insertion);
        for node in &desc.nodes {
            let parent = node.parent.as_deref();
            if let Some(p) = parent {
                if !scene.exists(p) {
                    return Err(GraphError::MissingNode(p.to_string()));
                }
            }
            if scene.exists(&node.name) {
                return Err(GraphError::NameClash(node.name.clone()));
            }
            match node.role {
                DescribedRole::Transform => scene.add_transform(&node.name, parent),
                DescribedRole::Mesh => scene.add_mesh(&node.name, parent),
                DescribedRole::Joint => scene.add_joint(&node.name, parent),
                DescribedRole::Curve => scene.add_curve(&node.name, parent),
            };
        }
        for deformer in &desc.deformers {
            for mesh in &deformer.meshes {
                if scene.role(mesh) != Some(&NodeRole::Mesh) {
                    return Err(GraphError::MissingNode(mesh.clone()));
                }
            }
            let meshes: Vec<&str> = deformer.meshes.iter().map(String::as_str).collect();
            scene.add_deformer(&deformer.name, deformer.kind.clone(), &meshes);
            if !deformer.influences.is_empty() {
                scene
                    .influences
                    .insert(deformer.name.clone(), deformer.influences.clone());
            }
        }
        for (src, dst) in &desc.connections {
            scene.connect(src, dst)?;
        }
        scene.journal.clear();
        Ok(scene)
    }

    fn insert_node(&mut self, name: &str, node: Node) {
        if self.nodes.contains_key(name) {
            log::warn!("memory scene: '{name}' already exists, keeping the first node");
            return;
        }
        self.nodes.insert(name.to_string(), node);
        self.order.push(name.to_string());
    }

    pub fn add_transform(&mut self, name: &str, parent: Option<&str>) -> &mut Self {
        self.insert_node(name, Node::new(NodeRole::Transform, parent));
        self
    }

    /// Add a mesh transform together with its `<name>Shape` shape node.
    pub fn add_mesh(&mut self, name: &str, parent: Option<&str>) -> &mut Self {
        self.insert_node(name, Node::new(NodeRole::Mesh, parent));
        self.insert_node(&format!("{name}Shape"), Node::new(NodeRole::Shape, Some(name)));
        self
    }

    pub fn add_joint(&mut self, name: &str, parent: Option<&str>) -> &mut Self {
        self.insert_node(name, Node::new(NodeRole::Joint, parent));
        self
    }

    pub fn add_curve(&mut self, name: &str, parent: Option<&str>) -> &mut Self {
        self.insert_node(name, Node::new(NodeRole::Curve, parent));
        self.insert_node(&format!("{name}Shape"), Node::new(NodeRole::Shape, Some(name)));
        self
    }

    /// Seed an existing deformer at the far end of each mesh's chain.
    pub fn add_deformer(&mut self, name: &str, kind: DeformerKind, meshes: &[&str]) -> &mut Self {
        self.insert_node(name, Node::new(NodeRole::Deformer(kind), None));
        for mesh in meshes {
            self.chains
                .entry(mesh.to_string())
                .or_default()
                .push(name.to_string());
        }
        self
    }

    /// Make every later creation of `name` fail, as a host command would.
    pub fn reject(&mut self, name: &str) -> &mut Self {
        self.rejected.insert(name.to_string());
        self
    }

    pub fn role(&self, name: &str) -> Option<&NodeRole> {
        self.nodes.get(name).map(|n| &n.role)
    }

    /// Deformer names on `mesh`, nearest-to-shape first.
    pub fn chain(&self, mesh: &str) -> Vec<String> {
        self.chains.get(mesh).cloned().unwrap_or_default()
    }

    pub fn influences(&self, skin_cluster: &str) -> &[String] {
        self.influences
            .get(skin_cluster)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn skin_bind(&self, skin_cluster: &str) -> Option<&SkinBind> {
        self.skin_binds.get(skin_cluster)
    }

    pub fn attribute(&self, node: &str, attr: &str) -> Option<&AttrValue> {
        self.nodes.get(node)?.attributes.get(attr)
    }

    pub fn connections(&self) -> &[(String, String)] {
        &self.connections
    }

    pub fn is_connected(&self, src_plug: &str, dst_plug: &str) -> bool {
        self.connections
            .iter()
            .any(|(s, d)| s == src_plug && d == dst_plug)
    }

    pub fn journal(&self) -> &[SceneEdit] {
        &self.journal
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn require(&self, name: &str) -> Result<&Node, GraphError> {
        self.nodes
            .get(name)
            .ok_or_else(|| GraphError::MissingNode(name.to_string()))
    }

    fn require_mesh(&self, name: &str) -> Result<(), GraphError> {
        match self.require(name)?.role {
            NodeRole::Mesh => Ok(()),
            _ => Err(GraphError::rejected("deform", name, "not a mesh")),
        }
    }

    fn has_skin_cluster(&self, mesh: &str) -> bool {
        self.chains.get(mesh).is_some_and(|chain| {
            chain
                .iter()
                .any(|d| self.deformer_kind(d) == Some(DeformerKind::SkinCluster))
        })
    }

    fn insert_in_chain(&mut self, mesh: &str, deformer: &str) {
        let chain = self.chains.entry(mesh.to_string()).or_default();
        match self.insertion {
            ChainInsertion::NearestShape => chain.insert(0, deformer.to_string()),
            ChainInsertion::FarthestShape => chain.push(deformer.to_string()),
        }
    }

    fn validate_joints(&self, skin_cluster: &str, joints: &[String]) -> Result<(), GraphError> {
        if joints.is_empty() {
            return Err(GraphError::rejected(
                "skinCluster",
                skin_cluster,
                "empty joint list",
            ));
        }
        for joint in joints {
            match self.nodes.get(joint).map(|n| &n.role) {
                Some(NodeRole::Joint) => {}
                Some(_) => {
                    return Err(GraphError::rejected(
                        "skinCluster",
                        skin_cluster,
                        format!("'{joint}' is not a joint"),
                    ))
                }
                None => return Err(GraphError::MissingNode(joint.clone())),
            }
        }
        Ok(())
    }
}

fn rename_plug(plug_str: &mut String, old: &str, new: &str) {
    if let Some((node, attr)) = split_plug(plug_str) {
        if node == old {
            *plug_str = plug(new, attr);
        }
    }
}

impl SceneQuery for MemoryScene {
    fn exists(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    fn deformer_history(
        &self,
        mesh: &str,
        kinds: &[DeformerKind],
    ) -> Result<Vec<HistoryEntry>, GraphError> {
        let node = self.require(mesh)?;
        let owner = match node.role {
            NodeRole::Shape => node.parent.as_deref().unwrap_or(mesh),
            _ => mesh,
        };
        let chain = match self.chains.get(owner) {
            Some(chain) => chain,
            None => return Ok(Vec::new()),
        };
        Ok(chain
            .iter()
            .filter_map(|name| {
                let kind = self.deformer_kind(name)?;
                (kinds.is_empty() || kinds.contains(&kind)).then(|| HistoryEntry {
                    name: name.clone(),
                    kind,
                })
            })
            .collect())
    }

    fn deformer_kind(&self, name: &str) -> Option<DeformerKind> {
        match &self.nodes.get(name)?.role {
            NodeRole::Deformer(kind) => Some(kind.clone()),
            _ => None,
        }
    }

    fn list_children(&self, node: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|name| {
                self.nodes.get(*name).is_some_and(|n| {
                    n.parent.as_deref() == Some(node) && n.role != NodeRole::Shape
                })
            })
            .cloned()
            .collect()
    }

    fn list_shapes(&self, node: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|name| {
                self.nodes.get(*name).is_some_and(|n| {
                    n.parent.as_deref() == Some(node) && n.role == NodeRole::Shape
                })
            })
            .cloned()
            .collect()
    }

    fn incoming_connections(&self, node: &str) -> Vec<(String, String)> {
        self.connections
            .iter()
            .filter(|(_, dst)| split_plug(dst).map(|(n, _)| n) == Some(node))
            .cloned()
            .collect()
    }

    fn chain_insertion(&self) -> ChainInsertion {
        self.insertion
    }
}

impl SceneGraph for MemoryScene {
    fn create_deformer(&mut self, request: &CreateDeformer) -> Result<String, GraphError> {
        let name = request.name.as_str();
        if name.is_empty() {
            return Err(GraphError::rejected(request.kind.as_str(), name, "empty name"));
        }
        if self.exists(name) {
            return Err(GraphError::NameClash(name.to_string()));
        }
        if self.rejected.contains(name) {
            return Err(GraphError::rejected(
                request.kind.as_str(),
                name,
                "host command failed",
            ));
        }
        if request.targets.is_empty() {
            return Err(GraphError::rejected(
                request.kind.as_str(),
                name,
                "no target geometry",
            ));
        }
        for target in &request.targets {
            self.require_mesh(target)?;
        }
        if request.kind.is_source_driven() || request.kind == DeformerKind::Wire {
            let driver = request.driver.as_deref().ok_or_else(|| {
                GraphError::rejected(request.kind.as_str(), name, "requires a driver")
            })?;
            self.require(driver)?;
        }
        if request.kind == DeformerKind::SkinCluster {
            let skin = request
                .skin
                .as_ref()
                .ok_or_else(|| GraphError::rejected("skinCluster", name, "no binding options"))?;
            self.validate_joints(name, &skin.joints)?;
            if let Some(bound) = request.targets.iter().find(|t| self.has_skin_cluster(t)) {
                return Err(GraphError::rejected(
                    "skinCluster",
                    name,
                    format!("'{bound}' is already bound to a skinCluster"),
                ));
            }
            self.influences.insert(name.to_string(), skin.joints.clone());
            self.skin_binds.insert(name.to_string(), skin.clone());
        }

        let mut node = Node::new(NodeRole::Deformer(request.kind.clone()), None);
        node.attributes
            .insert("envelope".to_string(), AttrValue::Float(1.0));
        self.insert_node(name, node);
        for target in &request.targets {
            self.insert_in_chain(target, name);
        }
        if let Some(driver) = &request.driver {
            self.connections
                .push((plug(driver, "worldSpace"), plug(name, "driver")));
        }
        self.journal.push(SceneEdit::Created {
            name: name.to_string(),
            kind: request.kind.clone(),
            targets: request.targets.clone(),
            driver: request.driver.clone(),
            skin: request.skin.clone(),
        });
        Ok(name.to_string())
    }

    fn add_influence(&mut self, skin_cluster: &str, joints: &[String]) -> Result<(), GraphError> {
        if self.deformer_kind(skin_cluster) != Some(DeformerKind::SkinCluster) {
            self.require(skin_cluster)?;
            return Err(GraphError::rejected(
                "addInfluence",
                skin_cluster,
                "not a skinCluster",
            ));
        }
        self.validate_joints(skin_cluster, joints)?;
        let current = self.influences.entry(skin_cluster.to_string()).or_default();
        let mut added = Vec::new();
        for joint in joints {
            if !current.contains(joint) {
                current.push(joint.clone());
                added.push(joint.clone());
            }
        }
        self.journal.push(SceneEdit::InfluencesAdded {
            skin_cluster: skin_cluster.to_string(),
            joints: added,
        });
        Ok(())
    }

    fn attach_geometry(&mut self, deformer: &str, mesh: &str) -> Result<(), GraphError> {
        let kind = self
            .deformer_kind(deformer)
            .ok_or_else(|| GraphError::MissingNode(deformer.to_string()))?;
        self.require_mesh(mesh)?;
        if self.chain(mesh).iter().any(|d| d == deformer) {
            return Ok(());
        }
        if kind == DeformerKind::SkinCluster && self.has_skin_cluster(mesh) {
            return Err(GraphError::rejected(
                "deformer",
                deformer,
                format!("'{mesh}' is already bound to a skinCluster"),
            ));
        }
        self.insert_in_chain(mesh, deformer);
        self.journal.push(SceneEdit::Attached {
            deformer: deformer.to_string(),
            mesh: mesh.to_string(),
        });
        Ok(())
    }

    fn set_attribute(
        &mut self,
        node: &str,
        attr: &str,
        value: AttrValue,
    ) -> Result<(), GraphError> {
        let entry = self
            .nodes
            .get_mut(node)
            .ok_or_else(|| GraphError::MissingNode(node.to_string()))?;
        entry.attributes.insert(attr.to_string(), value.clone());
        self.journal.push(SceneEdit::AttributeSet {
            node: node.to_string(),
            attr: attr.to_string(),
            value,
        });
        Ok(())
    }

    fn connect(&mut self, src_plug: &str, dst_plug: &str) -> Result<(), GraphError> {
        let (src_node, _) =
            split_plug(src_plug).ok_or_else(|| GraphError::InvalidPlug(src_plug.to_string()))?;
        let (dst_node, _) =
            split_plug(dst_plug).ok_or_else(|| GraphError::InvalidPlug(dst_plug.to_string()))?;
        self.require(src_node)?;
        self.require(dst_node)?;
        self.connections.retain(|(_, d)| d != dst_plug);
        self.connections
            .push((src_plug.to_string(), dst_plug.to_string()));
        self.journal.push(SceneEdit::Connected {
            source: src_plug.to_string(),
            destination: dst_plug.to_string(),
        });
        Ok(())
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<String, GraphError> {
        if new.is_empty() {
            return Err(GraphError::rejected("rename", old, "empty name"));
        }
        if self.exists(new) {
            return Err(GraphError::NameClash(new.to_string()));
        }
        let node = self
            .nodes
            .remove(old)
            .ok_or_else(|| GraphError::MissingNode(old.to_string()))?;
        self.nodes.insert(new.to_string(), node);

        for entry in self.order.iter_mut().filter(|n| *n == old) {
            *entry = new.to_string();
        }
        for child in self.nodes.values_mut() {
            if child.parent.as_deref() == Some(old) {
                child.parent = Some(new.to_string());
            }
        }
        if let Some(chain) = self.chains.remove(old) {
            self.chains.insert(new.to_string(), chain);
        }
        for chain in self.chains.values_mut() {
            for entry in chain.iter_mut().filter(|d| *d == old) {
                *entry = new.to_string();
            }
        }
        if let Some(joints) = self.influences.remove(old) {
            self.influences.insert(new.to_string(), joints);
        }
        if let Some(bind) = self.skin_binds.remove(old) {
            self.skin_binds.insert(new.to_string(), bind);
        }
        for joints in self.influences.values_mut() {
            for joint in joints.iter_mut().filter(|j| *j == old) {
                *joint = new.to_string();
            }
        }
        for (src, dst) in self.connections.iter_mut() {
            rename_plug(src, old, new);
            rename_plug(dst, old, new);
        }
        self.journal.push(SceneEdit::Renamed {
            from: old.to_string(),
            to: new.to_string(),
        });
        Ok(new.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skin(joints: &[&str]) -> SkinBind {
        SkinBind {
            joints: joints.iter().map(|j| j.to_string()).collect(),
            use_hierarchy: true,
            bind_method: 1,
            max_influences: 10,
            normalize_weights: 1,
            obey_max_influences: true,
        }
    }

    fn body_scene(insertion: ChainInsertion) -> MemoryScene {
        let mut scene = MemoryScene::new().with_insertion(insertion);
        scene
            .add_mesh("M_body_mesh", None)
            .add_joint("M_head_jnt", None);
        scene
    }

    #[test]
    fn nearest_shape_insertion_prepends() {
        let mut scene = body_scene(ChainInsertion::NearestShape);
        for name in ["a_cluster", "b_cluster"] {
            scene
                .create_deformer(&CreateDeformer::new(
                    DeformerKind::Cluster,
                    name,
                    "M_body_mesh",
                ))
                .unwrap();
        }
        assert_eq!(scene.chain("M_body_mesh"), vec!["b_cluster", "a_cluster"]);
    }

    #[test]
    fn farthest_shape_insertion_appends() {
        let mut scene = body_scene(ChainInsertion::FarthestShape);
        for name in ["a_cluster", "b_cluster"] {
            scene
                .create_deformer(&CreateDeformer::new(
                    DeformerKind::Cluster,
                    name,
                    "M_body_mesh",
                ))
                .unwrap();
        }
        assert_eq!(scene.chain("M_body_mesh"), vec!["a_cluster", "b_cluster"]);
    }

    #[test]
    fn history_filters_by_kind_and_resolves_shapes() {
        let mut scene = body_scene(ChainInsertion::NearestShape);
        scene
            .add_deformer("M_body_cluster", DeformerKind::Cluster, &["M_body_mesh"])
            .add_deformer("M_body_ffd", DeformerKind::Lattice, &["M_body_mesh"]);
        let lattices = scene
            .deformer_history("M_body_meshShape", &[DeformerKind::Lattice])
            .unwrap();
        assert_eq!(lattices.len(), 1);
        assert_eq!(lattices[0].name, "M_body_ffd");
        assert!(matches!(
            scene.deformer_history("ghost", &[]),
            Err(GraphError::MissingNode(_))
        ));
    }

    #[test]
    fn second_skin_cluster_is_rejected() {
        let mut scene = body_scene(ChainInsertion::NearestShape);
        let first = CreateDeformer::new(DeformerKind::SkinCluster, "a_skinCluster", "M_body_mesh")
            .with_skin(skin(&["M_head_jnt"]));
        scene.create_deformer(&first).unwrap();
        let second =
            CreateDeformer::new(DeformerKind::SkinCluster, "b_skinCluster", "M_body_mesh")
                .with_skin(skin(&["M_head_jnt"]));
        let err = scene.create_deformer(&second).unwrap_err();
        assert!(err.to_string().contains("already bound"));
    }

    #[test]
    fn skin_binding_options_follow_a_rename() {
        let mut scene = body_scene(ChainInsertion::NearestShape);
        let mut bind = skin(&["M_head_jnt"]);
        bind.use_hierarchy = false;
        let req = CreateDeformer::new(DeformerKind::SkinCluster, "skinCluster3", "M_body_mesh")
            .with_skin(bind.clone());
        scene.create_deformer(&req).unwrap();
        scene.rename("skinCluster3", "M_body_skinCluster").unwrap();
        assert_eq!(scene.skin_bind("M_body_skinCluster"), Some(&bind));
        assert_eq!(scene.skin_bind("skinCluster3"), None);
        assert!(matches!(
            &scene.journal()[0],
            SceneEdit::Created { skin: Some(s), driver: None, .. } if !s.use_hierarchy
        ));
    }

    #[test]
    fn skin_cluster_requires_existing_joints() {
        let mut scene = body_scene(ChainInsertion::NearestShape);
        let req = CreateDeformer::new(DeformerKind::SkinCluster, "a_skinCluster", "M_body_mesh")
            .with_skin(skin(&["M_ghost_jnt"]));
        assert_eq!(
            scene.create_deformer(&req),
            Err(GraphError::MissingNode("M_ghost_jnt".into()))
        );
        assert!(scene.journal().is_empty());
    }

    #[test]
    fn connect_replaces_existing_input() {
        let mut scene = body_scene(ChainInsertion::NearestShape);
        scene.add_transform("a_ctrl", None).add_transform("b_ctrl", None);
        scene.connect("a_ctrl.tx", "M_head_jnt.tx").unwrap();
        scene.connect("b_ctrl.tx", "M_head_jnt.tx").unwrap();
        assert_eq!(
            scene.incoming_connections("M_head_jnt"),
            vec![("b_ctrl.tx".to_string(), "M_head_jnt.tx".to_string())]
        );
        assert_eq!(
            scene.connect("ghost.tx", "M_head_jnt.tx"),
            Err(GraphError::MissingNode("ghost".into()))
        );
    }

    #[test]
    fn rename_updates_chains_and_connections() {
        let mut scene = body_scene(ChainInsertion::NearestShape);
        scene.add_deformer("old_cluster", DeformerKind::Cluster, &["M_body_mesh"]);
        scene.connect("M_head_jnt.matrix", "old_cluster.matrix").unwrap();
        scene.rename("old_cluster", "new_cluster").unwrap();
        assert_eq!(scene.chain("M_body_mesh"), vec!["new_cluster"]);
        assert!(scene.is_connected("M_head_jnt.matrix", "new_cluster.matrix"));
        assert!(!scene.exists("old_cluster"));
    }

    #[test]
    fn children_exclude_shapes() {
        let mut scene = MemoryScene::new();
        scene
            .add_transform("M_teeth_grp", None)
            .add_mesh("M_upperTeeth_mesh", Some("M_teeth_grp"))
            .add_mesh("M_lowerTeeth_mesh", Some("M_teeth_grp"));
        assert_eq!(
            scene.list_children("M_teeth_grp"),
            vec!["M_upperTeeth_mesh", "M_lowerTeeth_mesh"]
        );
        assert_eq!(
            scene.list_shapes("M_upperTeeth_mesh"),
            vec!["M_upperTeeth_meshShape"]
        );
        assert!(scene.list_children("M_upperTeeth_mesh").is_empty());
    }

    #[test]
    fn description_seeds_chain_in_listing_order() {
        let desc = SceneDescription::from_json_str(
            r#"{
                "nodes": [
                    {"name": "M_body_mesh", "type": "mesh"},
                    {"name": "M_head_jnt", "type": "joint"}
                ],
                "deformers": [
                    {"name": "M_body_cluster", "kind": "cluster", "meshes": ["M_body_mesh"]},
                    {"name": "M_body_skinCluster", "kind": "skinCluster",
                     "meshes": ["M_body_mesh"], "influences": ["M_head_jnt"]}
                ]
            }"#,
        )
        .unwrap();
        let scene = MemoryScene::from_description(&desc).unwrap();
        assert_eq!(
            scene.chain("M_body_mesh"),
            vec!["M_body_cluster", "M_body_skinCluster"]
        );
        assert_eq!(scene.influences("M_body_skinCluster"), ["M_head_jnt"]);
        assert!(scene.journal().is_empty());
    }
}
