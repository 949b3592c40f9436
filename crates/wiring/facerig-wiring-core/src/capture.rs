//! Recording a template section from the live connections of a scene.

use facerig_scene_core::{split_plug, templatize, SceneQuery, Side, SIDE_PLACEHOLDER};

use crate::map::ConnectionMap;

/// Name prefix of the conversion nodes a host inserts between plugs of different units.
pub const UNIT_CONVERSION: &str = "unitConversion";

/// Record the incoming connections of `nodes` as a `template` section.
///
/// Sided node and source names are written with the `{}` placeholder, so capturing
/// `L_brow_jnt` and `R_brow_jnt` yields a single `{}_brow_jnt` entry. A destination
/// attribute ending in its source's side letter is written with a trailing `{}`.
/// A source on a unit conversion node is replaced by the plug feeding that node.
/// The first occurrence of a node or source plug wins.
pub fn capture_template<Q: SceneQuery + ?Sized>(
    graph: &Q,
    template: &str,
    nodes: &[&str],
) -> ConnectionMap {
    let mut map = ConnectionMap::new();
    for node in nodes {
        let key = templatize(node).unwrap_or_else(|| node.to_string());
        if !map.add_destination(template, &key) {
            continue;
        }
        for (source, destination) in graph.incoming_connections(node) {
            let Some((_, attr)) = split_plug(&destination) else {
                continue;
            };
            let source = upstream_of_conversion(graph, &source).unwrap_or(source);
            let (source, attr) = match Side::of(&source) {
                Some(side) => {
                    let source = templatize(&source).unwrap_or(source);
                    let attr = match attr.strip_suffix(side.prefix()) {
                        Some(stem) => format!("{stem}{SIDE_PLACEHOLDER}"),
                        None => attr.to_string(),
                    };
                    (source, attr)
                }
                None => (source, attr.to_string()),
            };
            map.insert(template, &key, &source, &attr);
        }
        log::debug!("captured incoming connections of '{node}' as '{key}'");
    }
    map
}

fn upstream_of_conversion<Q: SceneQuery + ?Sized>(graph: &Q, source: &str) -> Option<String> {
    let (node, _) = split_plug(source)?;
    if !node.starts_with(UNIT_CONVERSION) {
        return None;
    }
    graph
        .incoming_connections(node)
        .into_iter()
        .next()
        .map(|(upstream, _)| upstream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facerig_scene_core::{MemoryScene, SceneGraph};

    #[test]
    fn sided_nodes_collapse_to_one_entry() {
        let mut scene = MemoryScene::new();
        scene
            .add_transform("L_brow_ctrl", None)
            .add_transform("R_brow_ctrl", None)
            .add_joint("L_brow_jnt", None)
            .add_joint("R_brow_jnt", None);
        scene
            .connect("L_brow_ctrl.rotate", "L_brow_jnt.rotate")
            .unwrap();
        scene
            .connect("R_brow_ctrl.rotate", "R_brow_jnt.rotate")
            .unwrap();

        let map = capture_template(&scene, "joint", &["L_brow_jnt", "R_brow_jnt"]);
        let section = map.template("joint").unwrap();
        assert_eq!(section.len(), 1);
        assert_eq!(section["{}_brow_jnt"]["{}_brow_ctrl.rotate"], "rotate");
    }

    #[test]
    fn side_letter_on_attribute_becomes_placeholder() {
        let mut scene = MemoryScene::new();
        scene
            .add_transform("L_brow_ctrl", None)
            .add_joint("M_jaw_jnt", None);
        scene
            .connect("L_brow_ctrl.translateY", "M_jaw_jnt.browRaiseL")
            .unwrap();
        let map = capture_template(&scene, "joint", &["M_jaw_jnt"]);
        assert_eq!(
            map.template("joint").unwrap()["M_jaw_jnt"]["{}_brow_ctrl.translateY"],
            "browRaise{}"
        );
    }

    #[test]
    fn unit_conversion_is_skipped_to_its_input() {
        let mut scene = MemoryScene::new();
        scene
            .add_transform("L_brow_ctrl", None)
            .add_transform("unitConversion3", None)
            .add_joint("L_brow_jnt", None);
        scene
            .connect("L_brow_ctrl.rotateZ", "unitConversion3.input")
            .unwrap();
        scene
            .connect("unitConversion3.output", "L_brow_jnt.rotate")
            .unwrap();
        let map = capture_template(&scene, "joint", &["L_brow_jnt"]);
        let entry = &map.template("joint").unwrap()["{}_brow_jnt"];
        assert_eq!(entry["{}_brow_ctrl.rotateZ"], "rotate");
        assert_eq!(entry.len(), 1);
    }

    #[test]
    fn unconnected_node_gets_an_empty_entry() {
        let mut scene = MemoryScene::new();
        scene.add_joint("M_jaw_jnt", None);
        let map = capture_template(&scene, "joint", &["M_jaw_jnt"]);
        assert!(map.template("joint").unwrap()["M_jaw_jnt"].is_empty());
    }
}
