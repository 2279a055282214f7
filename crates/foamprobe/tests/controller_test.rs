//! Integration tests for the reactive controller.
//!
//! The scene is built in memory so no dataset is needed.

use foamprobe::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn part(name: &str, offset: f64) -> SurfaceMesh {
    let points = vec![
        DVec3::new(offset, 0.0, 0.0),
        DVec3::new(offset + 1.0, 0.0, 0.0),
        DVec3::new(offset, 1.0, 0.0),
    ];
    SurfaceMesh::new(name, points, vec![vec![0, 1, 2]])
        .with_field(Field::vector(
            "U",
            vec![
                DVec3::new(3.0, 4.0, 0.0),
                DVec3::ZERO,
                DVec3::new(0.0, 0.0, 10.0),
            ],
        ))
        .unwrap()
        .with_field(Field::scalar("p", vec![1000.0, -4464.0, 0.5]))
        .unwrap()
}

fn controller() -> Controller {
    init_logging();
    let vehicle: MeshCache = [
        part("body", 0.0),
        part("front-wing_left", 10.0),
        part("rear-wing", 20.0),
    ]
    .into_iter()
    .collect();
    let isosurfaces: MeshCache = std::iter::once(SurfaceMesh::new("cp", Vec::new(), Vec::new()))
        .collect();
    Controller::new(Scene::new(vehicle, isosurfaces), Options::default())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn test_color_change_broadcasts_to_all_parts() {
    let controller = controller();
    let mut session = controller.new_session();

    let update = controller.on_color_change(&mut session, "U").unwrap();
    assert_eq!(update.render_token, Update::Set(RenderToken(1)));
    assert_eq!(update.mappers.len(), 3);
    assert_eq!(update.color_ranges.len(), 3);
    for mapper in &update.mappers {
        assert_eq!(mapper.value, Update::Set(MapperConfig::point_field("U")));
    }
    for range in &update.color_ranges {
        assert_eq!(range.value, Update::Set([0.0, 100.0]));
    }
    assert_eq!(session.color_by(), &ColorSelection::Field("U".into()));
}

#[test]
fn test_color_change_to_solid() {
    let controller = controller();
    let mut session = controller.new_session();
    controller.on_color_change(&mut session, "p").unwrap();

    let update = controller.on_color_change(&mut session, "solid").unwrap();
    assert_eq!(update.render_token, Update::Set(RenderToken(2)));
    assert!(update
        .mappers
        .iter()
        .all(|m| m.value == Update::Set(MapperConfig::solid())));
    assert!(update
        .color_ranges
        .iter()
        .all(|r| r.value == Update::Set([0.0, 1.0])));
}

#[test]
fn test_same_color_is_no_op() {
    let controller = controller();
    let mut session = controller.new_session();

    let update = controller.on_color_change(&mut session, "solid").unwrap();
    assert!(update.render_token.is_unchanged());
    assert!(update.mappers.iter().all(|m| m.value.is_unchanged()));
    assert!(update.color_ranges.iter().all(|r| r.value.is_unchanged()));
    assert_eq!(session.render_token(), RenderToken(0));

    controller.on_color_change(&mut session, "p").unwrap();
    let update = controller.on_color_change(&mut session, "p").unwrap();
    assert!(update.render_token.is_unchanged());
    assert_eq!(session.render_token(), RenderToken(1));
}

#[test]
fn test_unknown_color_rejected() {
    let controller = controller();
    let mut session = controller.new_session();
    let err = controller.on_color_change(&mut session, "nut").unwrap_err();
    assert!(matches!(err, FoamProbeError::UnknownField(_)));
    assert_eq!(session.color_by(), &ColorSelection::Solid);
}

#[test]
fn test_hover_absent() {
    let controller = controller();
    let update = controller.on_hover(None);
    assert_eq!(update.tooltip, Update::Set(String::new()));
    assert_eq!(update.glyph, Update::Set(GlyphState::empty(12)));
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        serde_json::json!({ "tooltip": "", "glyph": { "resolution": 12 } })
    );
}

#[test]
fn test_hover_without_representation() {
    let controller = controller();
    let info: HoverInfo = serde_json::from_str(r#"{ "worldPosition": [0, 0, 0] }"#).unwrap();
    let update = controller.on_hover(Some(&info));
    assert!(update.tooltip.is_unchanged());
    assert!(update.glyph.is_unchanged());
}

#[test]
fn test_hover_unknown_part() {
    let controller = controller();
    let info: HoverInfo =
        serde_json::from_str(r#"{ "representationId": "wheel", "worldPosition": [0, 0, 0] }"#)
            .unwrap();
    let update = controller.on_hover(Some(&info));
    assert_eq!(update.tooltip, Update::Set(String::new()));
    assert_eq!(update.glyph, Update::Set(GlyphState::empty(12)));
}

#[test]
fn test_hover_probes_nearest_point() {
    let controller = controller();
    let info: HoverInfo = serde_json::from_str(
        r#"{ "representationId": "front-wing_left", "worldPosition": [10.1, 0.05, 0.0] }"#,
    )
    .unwrap();
    let update = controller.on_hover(Some(&info));

    assert_eq!(
        update.tooltip,
        Update::Set("U: 3.00, 4.00, 0.00 norm(5.00)\np: 1000.00".to_string())
    );
    let glyph = update.glyph.value().unwrap();
    assert!((glyph.height.unwrap() - 0.05).abs() < 1e-12);
    assert!((glyph.radius.unwrap() - 0.1).abs() < 1e-12);
    let direction = glyph.direction.unwrap();
    assert!(direction.abs_diff_eq(DVec3::new(0.6, 0.8, 0.0), 1e-12));
    let center = glyph.center.unwrap();
    assert!(center.abs_diff_eq(DVec3::new(10.0 - 0.015, -0.02, 0.0), 1e-12));
}

#[test]
fn test_hover_zero_velocity() {
    let controller = controller();
    let hover = HoverEvent::new("body", DVec3::new(1.0, 0.0, 0.0));
    let (tooltip, glyph) = controller.probe(Some(&hover));
    assert_eq!(tooltip, "U: 0.00, 0.00, 0.00 norm(0.00)\np: -4464.00");
    assert!(glyph.height.is_none());
    assert!(glyph.direction.is_none());
    assert_eq!(glyph.center, Some(DVec3::new(1.0, 0.0, 0.0)));
    assert!((glyph.radius.unwrap() + 0.4464).abs() < 1e-12);
}

#[test]
fn test_geometry_visibility() {
    let controller = controller();
    let mut session = controller.new_session();

    let unchanged = controller.on_geometry_change(
        &mut session,
        &strings(&["body", "drive-train", "front-wing", "rear-wing"]),
    );
    assert!(unchanged.render_token.is_unchanged());
    assert!(unchanged.actors.iter().all(|a| a.value.is_unchanged()));

    let update = controller.on_geometry_change(&mut session, &strings(&["front-wing"]));
    assert_eq!(update.render_token, Update::Set(RenderToken(1)));
    let shown: Vec<(&str, Visibility)> = update
        .actors
        .iter()
        .map(|a| (a.part.as_str(), *a.value.value().unwrap()))
        .collect();
    assert_eq!(
        shown,
        [
            ("body", Visibility::HIDDEN),
            ("front-wing_left", Visibility::SHOWN),
            ("rear-wing", Visibility::HIDDEN),
        ]
    );
}

#[test]
fn test_isosurface_toggle() {
    let controller = controller();
    let mut session = controller.new_session();

    let update = controller.on_isosurface_change(&mut session, &strings(&["cp"]));
    assert_eq!(update.render_token, Update::Set(RenderToken(1)));
    assert_eq!(update.actors.len(), 1);
    assert_eq!(update.actors[0].value, Update::Set(Visibility::SHOWN));

    let update = controller.on_isosurface_change(&mut session, &[]);
    assert_eq!(update.actors[0].value, Update::Set(Visibility::HIDDEN));

    let update = controller.on_isosurface_change(&mut session, &[]);
    assert!(update.render_token.is_unchanged());
}

#[test]
fn test_initial_scene() {
    let controller = controller();
    let reps = controller.initial_scene();
    assert_eq!(reps.len(), 4);
    assert!(reps[..3].iter().all(|r| r.actor == Visibility::SHOWN));
    assert_eq!(reps[3].id, "cp");
    assert_eq!(reps[3].actor, Visibility::HIDDEN);
    assert_eq!(
        serde_json::to_value(reps[3].property).unwrap(),
        serde_json::json!({ "color": [1.0, 0.0, 0.0] })
    );
    assert_eq!(
        serde_json::to_value(&reps[0]).unwrap(),
        serde_json::json!({
            "id": "body",
            "colorMapPreset": "erdc_rainbow_bright",
            "colorDataRange": [0.0, 1.0],
            "mapper": { "scalarVisibility": false },
            "actor": { "visibility": 1 },
        })
    );
}

#[test]
fn test_color_options() {
    let controller = controller();
    let values: Vec<String> = controller
        .color_options()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(values, ["solid", "U", "p"]);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_reselecting_is_no_op(first in 0usize..3, second in 0usize..3) {
            let controller = controller();
            let mut session = controller.new_session();
            let options = controller.color_options();

            controller.on_color_change(&mut session, options[first].as_str()).unwrap();
            controller.on_color_change(&mut session, options[second].as_str()).unwrap();
            let token = session.render_token();

            let update = controller
                .on_color_change(&mut session, options[second].as_str())
                .unwrap();
            prop_assert!(update.render_token.is_unchanged());
            prop_assert!(update.mappers.iter().all(|m| m.value.is_unchanged()));
            prop_assert_eq!(session.render_token(), token);
        }

        #[test]
        fn prop_exact_point_hover(part in 0usize..3, point in 0usize..3) {
            let controller = controller();
            let mesh = controller.scene().vehicle().iter().nth(part).unwrap();
            let hover = HoverEvent::new(mesh.name(), mesh.points()[point]);
            let probe = resolve_probe(controller.scene().vehicle(), Some(&hover)).unwrap();
            prop_assert_eq!(probe.index, point);
        }
    }
}
