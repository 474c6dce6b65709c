//! End-to-end document tests
//!
//! Each test builds a small snapshot, runs a full export pass, and inspects
//! the finished document text.

use crate::export::{CancelToken, ExportOptions, ExportSummary, StageExporter};
use crate::foundation::math::{Mat4, Quat, Vec3};
use crate::scene::camera::CameraSpec;
use crate::scene::light::LightSpec;
use crate::scene::node::{NodeKind, PrefabLink, SceneNode};
use crate::scene::properties::PropertyValue;
use crate::scene::snapshot::SceneSnapshot;
use crate::scene::world::{FogFalloff, WorldSettings};

const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

fn export(snapshot: &SceneSnapshot) -> (String, ExportSummary) {
    let exporter = StageExporter::new(ExportOptions {
        file_name: "scene.stage".into(),
        generator: "stage_export tests".into(),
        ..ExportOptions::default()
    });
    let mut sink = Vec::new();
    let summary = exporter
        .export(snapshot, &CancelToken::new(), &mut sink)
        .unwrap();
    (String::from_utf8(sink).unwrap(), summary)
}

fn prefab(name: &str, path: &str) -> SceneNode {
    SceneNode::new(
        name,
        NodeKind::PrefabInstance(PrefabLink {
            path: path.into(),
            bounding_box: [Vec3::zeros(); 8],
        }),
    )
}

#[test]
fn test_camera_document() {
    let mut snapshot = SceneSnapshot::new();
    snapshot.insert(
        SceneNode::new("Main Camera", NodeKind::Camera(CameraSpec::new(0.8)))
            .with_world_transform(Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0))),
    );

    let (text, summary) = export(&snapshot);

    assert!(text.contains("<camera id=\"Main_Camera\" fov=\"0.800\">"));
    assert!(text.contains("<position>1.00 2.00 3.00</position>"));
    assert!(text.contains("<orientation>0.00 0.00 0.00 1.00</orientation>"));
    assert_eq!(text.matches("<camera ").count(), 1);
    assert!(!text.contains("<light"));
    assert!(!text.contains("<fog"));
    assert_eq!(summary.nodes_exported, 1);
    assert_eq!(summary.warnings, 0);
}

#[test]
fn test_fog_document() {
    let mut snapshot = SceneSnapshot::new();
    snapshot.world = Some(
        WorldSettings::new(Vec3::zeros(), Vec3::new(2.0, 0.5, -1.0))
            .with_fog(FogFalloff::Linear, 10.0),
    );

    let (text, _) = export(&snapshot);

    assert!(text.contains("<fog type=\"LINEAR\" depth=\"10.000\">"));
    assert!(text.contains("<color>1.000 0.500 0.000</color>"));
    // Fog sits in the scene before any node elements
    assert!(text.find("<fog").unwrap() > text.find("<scene>").unwrap());
}

#[test]
fn test_exponential_fog_marker() {
    let mut snapshot = SceneSnapshot::new();
    snapshot.world =
        Some(WorldSettings::new(Vec3::zeros(), WHITE).with_fog(FogFalloff::Exponential, 25.0));

    let (text, _) = export(&snapshot);

    assert!(text.contains("<fog type=\"EXPONENTIAL\" depth=\"25.000\">"));
}

#[test]
fn test_spot_light_document() {
    // energy 1.75, distance 10, aperture 1 rad
    let mut snapshot = SceneSnapshot::new();
    snapshot.insert(SceneNode::new(
        "Spot",
        NodeKind::Light(LightSpec::spot(WHITE, 1.75, 10.0, 1.0)),
    ));

    let (text, _) = export(&snapshot);

    assert!(text.contains("type=\"Spot\""));
    assert!(text.contains("radius=\"9.3233\""));
    assert!(text.contains("intensity=\"1.0000\""));
    assert!(text.contains("spotsize=\"0.3700\""));
    assert!(text.contains("angle=\"0.4810\""));
    assert!(text.contains("<direction>"));
    assert!(text.contains("<location>0.0000 0.0000 0.0000</location>"));
}

#[test]
fn test_point_light_document() {
    let mut snapshot = SceneSnapshot::new();
    snapshot.world = Some(WorldSettings::new(Vec3::new(0.5, 1.0, 1.5), Vec3::zeros()));
    snapshot.insert(
        SceneNode::new("Bulb", NodeKind::Light(LightSpec::point(WHITE, 0.875, 12.5)))
            .with_world_transform(Mat4::new_translation(&Vec3::new(4.0, 5.0, 6.0))),
    );

    let (text, _) = export(&snapshot);

    assert!(text.contains("type=\"Point\""));
    assert!(text.contains("ambientintensity=\"0.4000\""));
    assert!(text.contains("intensity=\"0.5000\""));
    assert!(text.contains("radius=\"12.5000\""));
    assert!(text.contains("<location>4.0000 5.0000 6.0000</location>"));
    assert!(!text.contains("<direction>"));
}

#[test]
fn test_directional_light_document() {
    let mut snapshot = SceneSnapshot::new();
    snapshot.insert(SceneNode::new(
        "Sun",
        NodeKind::Light(LightSpec::directional(Vec3::new(2.0, 0.5, -1.0), 3.5)),
    ));

    let (text, _) = export(&snapshot);

    assert!(text.contains("type=\"Directional\""));
    // Energy clamps from above, color clamps per channel at emission
    assert!(text.contains("intensity=\"1.0000\""));
    assert!(text.contains("<color>1.0000 0.5000 0.0000</color>"));
    assert!(text.contains("<direction>0.0000 0.0000 -1.0000</direction>"));
    assert!(!text.contains("radius="));
    assert!(!text.contains("<location>"));
}

#[test]
fn test_element_document_with_properties() {
    let mut snapshot = SceneSnapshot::new();
    snapshot.insert(
        prefab("Barrel", "//props/barrel.blend")
            .with_property("health", PropertyValue::Int(50))
            .with_property("density", PropertyValue::Float(0.75))
            .with_property("faction", PropertyValue::Text("neutral".into()))
            .with_property("_rna_ui", PropertyValue::Int(0)),
    );

    let (text, _) = export(&snapshot);

    assert!(text.contains("<element id=\"Barrel\" link=\"props/barrel.dae\">"));
    assert!(text.contains("<property id=\"health\" type=\"Int\" Value=\"50\" />"));
    assert!(text.contains("<property id=\"density\" type=\"Float\" Value=\"0.75\" />"));
    assert!(text.contains("<property id=\"faction\" type=\"String\" Value=\"neutral\" />"));
    assert!(!text.contains("_rna_ui"));
}

#[test]
fn test_element_transform_precision() {
    let world = Mat4::new_translation(&Vec3::new(0.1234567, 0.0, 0.0))
        * Quat::from_axis_angle(&Vec3::y_axis(), 0.5).to_homogeneous()
        * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 2.0, 2.0));

    let mut snapshot = SceneSnapshot::new();
    snapshot.insert(prefab("Crate", "//crate.blend").with_world_transform(world));

    let (text, _) = export(&snapshot);

    assert!(text.contains("<translation>0.123457 0.000000 0.000000</translation>"));
    // sin(0.25) and cos(0.25) of the half angle
    assert!(text.contains("<rotation>0.000000 0.247404 0.000000 0.968912</rotation>"));
    assert!(text.contains("<scale>2.000000 2.000000 2.000000</scale>"));
}

#[test]
fn test_hierarchy_nests_over_skipped_ancestor() {
    // root element <- mesh (no stage representation) <- leaf element
    let mut snapshot = SceneSnapshot::new();
    let root = snapshot.insert(prefab("Root", "//a.blend"));
    let mesh = snapshot.insert(SceneNode::new("geo", NodeKind::Mesh).with_parent(root));
    snapshot.insert(prefab("Leaf", "//b.blend").with_parent(mesh));

    let (text, summary) = export(&snapshot);

    let root_open = text.find("id=\"Root\"").unwrap();
    let leaf_open = text.find("id=\"Leaf\"").unwrap();
    let first_close = text.find("</element>").unwrap();

    // Leaf opens inside Root; the first close belongs to Leaf
    assert!(root_open < leaf_open);
    assert!(leaf_open < first_close);
    assert_eq!(summary.nodes_exported, 2);
    assert_eq!(summary.nodes_skipped, 1);
}

#[test]
fn test_identifier_collisions_resolved_in_document() {
    let mut snapshot = SceneSnapshot::new();
    snapshot.insert(prefab("Crate.001", "//a.blend"));
    snapshot.insert(prefab("Crate,001", "//b.blend"));

    let (text, _) = export(&snapshot);

    assert!(text.contains("id=\"Crate_001\""));
    assert!(text.contains("id=\"Crate_001_1\""));
}

#[test]
fn test_lights_and_views_do_not_cross_suffix() {
    let mut snapshot = SceneSnapshot::new();
    snapshot.insert(SceneNode::new("Key", NodeKind::Camera(CameraSpec::new(0.8))));
    snapshot.insert(SceneNode::new(
        "Key",
        NodeKind::Light(LightSpec::point(WHITE, 1.0, 5.0)),
    ));

    let (text, _) = export(&snapshot);

    assert!(text.contains("<camera id=\"Key\""));
    assert!(text.contains("id=\"Key\" ambientintensity"));
    assert!(!text.contains("Key_1"));
}

#[test]
fn test_hidden_nodes_are_not_collected() {
    let mut snapshot = SceneSnapshot::new();
    let hidden = snapshot.insert(prefab("Hidden", "//a.blend"));
    snapshot.get_mut(hidden).unwrap().visible = false;
    snapshot.insert(prefab("Shown", "//b.blend"));

    let (text, summary) = export(&snapshot);

    assert!(!text.contains("Hidden"));
    assert!(text.contains("id=\"Shown\""));
    // Hidden nodes never enter the pass, so they are not counted as skipped
    assert_eq!(summary.nodes_skipped, 0);
}

#[test]
fn test_document_is_well_formed_bracketing() {
    let mut snapshot = SceneSnapshot::new();
    let root = snapshot.insert(prefab("Root", "//a.blend"));
    snapshot.insert(prefab("Child", "//b.blend").with_parent(root));
    snapshot.insert(SceneNode::new(
        "Lamp",
        NodeKind::Light(LightSpec::point(WHITE, 1.0, 5.0)),
    ));

    let (text, _) = export(&snapshot);

    assert_eq!(
        text.matches("<element ").count(),
        text.matches("</element>").count()
    );
    assert_eq!(
        text.matches("<light ").count(),
        text.matches("</light>").count()
    );
    assert!(text.ends_with("</scene></stage>"));
}
