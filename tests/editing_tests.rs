//! Integrationstests für die Bearbeitungssitzung:
//! - Punkte anhängen, einfügen und löschen
//! - Neuaufbau nach jeder Änderung

use fence_layout::{
    EditMode, FencePath, FlatGround, LayoutError, PathEditor, RecordingFactory, StyleConfig,
    TemplateId,
};
use glam::Vec3;

fn fence_style() -> StyleConfig {
    let mut style = StyleConfig::with_template("fence_metal");
    style.end_post = Some(TemplateId::from("post_metal"));
    style
}

#[test]
fn test_build_fence_from_empty_path() {
    let ground = FlatGround::new(1.0);
    let mut editor = PathEditor::new(FencePath::new(), fence_style());
    let mut factory = RecordingFactory::new();

    // Leerer Pfad: nichts zu bauen
    assert_eq!(editor.rebuild(&ground, &mut factory).instance_count, 0);

    for expected in 0..4 {
        assert_eq!(editor.append_point(&ground), Ok(expected));
    }
    assert_eq!(
        editor.path.points(),
        &[
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(6.0, 1.0, 0.0),
            Vec3::new(9.0, 1.0, 0.0),
        ]
    );

    // 3 Segmente à 3 m: je 1.5 → 2 Instanzen, plus Pfosten
    let result = editor.rebuild(&ground, &mut factory);
    assert_eq!(result.segment_count, 3);
    assert_eq!(result.instance_count, 7);
    assert_eq!(factory.destroy_calls(), 2);
    assert_eq!(factory.instances().len(), 7);
}

#[test]
fn test_insert_then_delete_restores_layout() {
    let ground = FlatGround::default();
    let path = FencePath::from_points(
        vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 10.0)],
        false,
    );
    let mut editor = PathEditor::new(path, fence_style());
    let mut before = RecordingFactory::new();
    editor.rebuild(&ground, &mut before);

    editor.set_edit_mode(EditMode::Add);
    editor.set_cursor(Some(Vec3::new(5.0, 0.0, -2.0)));
    assert_eq!(editor.apply_edit(&ground), Ok(Some(1)));
    assert_eq!(editor.path.len(), 4);

    editor.set_edit_mode(EditMode::Delete);
    editor.set_cursor(Some(Vec3::new(5.0, 0.0, 6.0)));
    assert_eq!(editor.delete_target_index(), None);
    editor.set_cursor(Some(Vec3::new(5.5, 0.0, -1.0)));
    assert_eq!(editor.delete_target_index(), Some(1));
    assert_eq!(editor.apply_edit(&ground), Ok(Some(1)));

    let mut after = RecordingFactory::new();
    editor.rebuild(&ground, &mut after);
    assert_eq!(before.instances(), after.instances());
}

#[test]
fn test_out_of_range_move_is_rejected() {
    let mut editor = PathEditor::new(FencePath::new(), fence_style());
    assert_eq!(
        editor.move_point(0, Vec3::ONE, &FlatGround::default()),
        Err(LayoutError::IndexOutOfRange { index: 0, len: 0 })
    );
}

#[test]
fn test_seed_change_changes_objects_only() {
    let ground = FlatGround::default();
    let path = FencePath::from_points(vec![Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)], false);
    let mut style = fence_style();
    style.templates.push(Some(TemplateId::from("fence_metal_rusty")));
    let mut editor = PathEditor::new(path, style);

    let mut a = RecordingFactory::new();
    let mut b = RecordingFactory::new();
    editor.rebuild(&ground, &mut a);
    editor.seed = 42;
    editor.rebuild(&ground, &mut b);

    // Positionen bleiben, nur die Vorlagenwahl variiert
    let positions = |f: &RecordingFactory| -> Vec<Vec3> {
        f.instances().iter().map(|i| i.placement.position).collect()
    };
    assert_eq!(positions(&a), positions(&b));
    assert_ne!(a.instances(), b.instances());
}
