use facerig_scene_core::{MemoryScene, SceneGraph};
use facerig_wiring::{capture_template, connect_templates, ConnectionMap, PlugLink};

fn templates() -> ConnectionMap {
    let text = facerig_test_fixtures::connections::json("facial-templates")
        .expect("load connection fixture");
    ConnectionMap::from_json_str(&text).expect("parse connection map")
}

fn rig_scene() -> MemoryScene {
    let mut scene = MemoryScene::new();
    scene
        .add_transform("M_face_ctrl", None)
        .add_transform("M_jaw_ctrl", Some("M_face_ctrl"))
        .add_transform("L_brow_ctrl", Some("M_face_ctrl"))
        .add_transform("R_brow_ctrl", Some("M_face_ctrl"))
        .add_joint("M_jaw_jnt", None)
        .add_joint("L_brow_jnt", None)
        .add_joint("R_brow_jnt", None);
    scene
}

/// it should connect every side-expanded link of the joint template
#[test]
fn joint_template_connects_all_sides() {
    let mut scene = rig_scene();
    let reports =
        connect_templates(&mut scene, &templates(), &["joint"]).expect("known template");
    let joint = &reports[0];
    assert!(joint.is_complete(), "{:?}", joint.missing);
    assert_eq!(joint.connected.len(), 7);
    assert!(joint
        .connected
        .contains(&PlugLink::new("R_brow_ctrl.rotate", "R_brow_jnt.rotate")));
    assert!(scene.is_connected("L_brow_ctrl.translateY", "M_jaw_jnt.browRaiseL"));
    assert!(scene.is_connected("R_brow_ctrl.translateY", "M_jaw_jnt.browRaiseR"));
}

/// it should report links whose nodes are absent without aborting later templates
#[test]
fn missing_nodes_are_reported_per_template() {
    let mut scene = rig_scene();
    let reports = connect_templates(&mut scene, &templates(), &["lattice", "controller"])
        .expect("known templates");
    assert_eq!(reports[0].template, "lattice");
    assert_eq!(reports[0].missing.len(), 1);
    assert!(reports[0].missing[0].reason.contains("does not exist"));
    assert_eq!(reports[1].connected.len(), 2);
    assert!(scene.is_connected("M_face_ctrl.browFollow", "L_brow_ctrl.follow"));
}

/// it should capture the wired joint template back to the section it came from
#[test]
fn capture_reproduces_wired_template() {
    let mut scene = rig_scene();
    let source = templates();
    connect_templates(&mut scene, &source, &["joint"]).expect("known template");

    let captured = capture_template(&scene, "joint", &["L_brow_jnt", "R_brow_jnt", "M_jaw_jnt"]);
    assert_eq!(captured.template("joint"), source.template("joint"));
}

/// it should wire a freshly built scene from a captured map
#[test]
fn captured_map_rewires_a_fresh_scene() {
    let mut wired = rig_scene();
    connect_templates(&mut wired, &templates(), &["joint"]).expect("known template");
    let captured = capture_template(&wired, "joint", &["L_brow_jnt", "R_brow_jnt", "M_jaw_jnt"]);
    let json = captured.to_json_string().expect("serialize");

    let mut fresh = rig_scene();
    let map = ConnectionMap::from_json_str(&json).expect("reparse");
    connect_templates(&mut fresh, &map, &["joint"]).expect("known template");
    let mut expected = wired.connections().to_vec();
    let mut actual = fresh.connections().to_vec();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);

    // wiring again only replaces inputs with themselves
    let before = fresh.connections().len();
    connect_templates(&mut fresh, &map, &["joint"]).expect("known template");
    assert_eq!(fresh.connections().len(), before);
    fresh
        .connect("M_jaw_ctrl.rotate", "M_jaw_jnt.rotate")
        .expect("reconnect");
    assert_eq!(fresh.connections().len(), before);
}
