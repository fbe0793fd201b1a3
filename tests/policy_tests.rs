use apcatune::color::Color;
use apcatune::fills::{
    FillEntry, FillError, FillKind, FillMutation, apply, decide, topmost_visible_solid,
};

fn color(hex: &str) -> Color {
    Color::from_hex(hex).expect("valid hex")
}

#[test]
fn test_empty_stack_has_no_subject() {
    let err = decide(&[], &color("#336699"), false, false).expect_err("nothing to adjust");
    assert_eq!(err, FillError::NoSolidFill);
}

#[test]
fn test_single_fill_commit_updates_in_place() {
    // Single-entry stack always updates index 0, preserve flag or not
    let fills = vec![FillEntry::solid(color("#888888"))];

    for preserve in [false, true] {
        let mutation = decide(&fills, &color("#336699"), false, preserve).expect("decidable");
        assert_eq!(mutation, FillMutation::Update { index: 0 });
    }
}

#[test]
fn test_plain_commit_targets_topmost_visible_solid() {
    let fills = vec![
        FillEntry::solid(color("#111111")),
        FillEntry::image(),
        FillEntry::solid(color("#dddddd")),
    ];

    let mutation = decide(&fills, &color("#336699"), false, false).expect("decidable");
    assert_eq!(mutation, FillMutation::Update { index: 2 });
}

#[test]
fn test_preview_never_appends() {
    // Even with preserve requested, a preview only retargets the subject fill
    let fills = vec![
        FillEntry::solid(color("#111111")),
        FillEntry::solid(color("#dddddd")).with_opacity(0.8),
    ];

    let mutation = decide(&fills, &color("#336699"), true, true).expect("decidable");
    assert_eq!(mutation, FillMutation::Update { index: 1 });
}

#[test]
fn test_preserving_commit_appends_over_foreign_top() {
    // Top entry is a solid but not at full opacity, so it is not one of ours
    let fills = vec![
        FillEntry::solid(color("#111111")),
        FillEntry::image(),
        FillEntry::solid(color("#dddddd")).with_opacity(0.8),
    ];

    let new_color = color("#336699");
    let mutation = decide(&fills, &new_color, false, true).expect("decidable");

    match &mutation {
        FillMutation::Append { entry } => {
            assert_eq!(entry.kind, FillKind::Solid(new_color.clone()));
            assert!(entry.visible);
            assert_eq!(entry.opacity, 1.0);
        }
        other => panic!("expected append, got {other:?}"),
    }

    // Applying leaves the pre-existing entries untouched
    let mut stack = fills.clone();
    apply(&mut stack, &mutation, &new_color).expect("applies");
    assert_eq!(stack.len(), 4);
    assert_eq!(&stack[..3], &fills[..]);
}

#[test]
fn test_preserving_commit_updates_own_top() {
    // A full-opacity visible solid on top is treated as a previous append
    let fills = vec![
        FillEntry::gradient(),
        FillEntry::solid(color("#dddddd")),
    ];

    let mutation = decide(&fills, &color("#336699"), false, true).expect("decidable");
    assert_eq!(mutation, FillMutation::Update { index: 1 });
}

#[test]
fn test_repeated_preserving_commits_do_not_stack() {
    // First preserving commit appends; the second must recognize its own
    // entry and update it instead of appending again
    let mut stack = vec![
        FillEntry::image(),
        FillEntry::solid(color("#dddddd")).with_opacity(0.8),
    ];

    let first_color = color("#336699");
    let first = decide(&stack, &first_color, false, true).expect("decidable");
    assert!(matches!(first, FillMutation::Append { .. }));
    apply(&mut stack, &first, &first_color).expect("applies");
    assert_eq!(stack.len(), 3);

    let second_color = color("#993366");
    let second = decide(&stack, &second_color, false, true).expect("decidable");
    assert_eq!(second, FillMutation::Update { index: 2 });
    apply(&mut stack, &second, &second_color).expect("applies");

    assert_eq!(stack.len(), 3);
    assert_eq!(stack[2].kind, FillKind::Solid(second_color));
}

#[test]
fn test_hidden_entries_are_not_subjects() {
    let fills = vec![
        FillEntry::solid(color("#111111")),
        FillEntry::solid(color("#dddddd")).hidden(),
    ];

    // The hidden top solid is skipped when picking the subject
    let mutation = decide(&fills, &color("#336699"), false, false).expect("decidable");
    assert_eq!(mutation, FillMutation::Update { index: 0 });
}

#[test]
fn test_stack_without_visible_solid_fails() {
    let fills = vec![
        FillEntry::gradient(),
        FillEntry::image(),
        FillEntry::solid(color("#dddddd")).hidden(),
    ];

    let err = decide(&fills, &color("#336699"), false, false).expect_err("nothing to adjust");
    assert_eq!(err, FillError::NoSolidFill);
}

#[test]
fn test_topmost_visible_solid_selection() {
    let top_color = color("#dddddd");
    let fills = vec![
        FillEntry::solid(color("#111111")),
        FillEntry::solid(top_color.clone()),
        FillEntry::gradient(),
        FillEntry::solid(color("#222222")).hidden(),
    ];

    let (index, found) = topmost_visible_solid(&fills).expect("has a subject");
    assert_eq!(index, 1);
    assert_eq!(found, &top_color);

    assert!(topmost_visible_solid(&[]).is_none());
    assert!(topmost_visible_solid(&[FillEntry::gradient()]).is_none());
}

#[test]
fn test_update_replaces_only_the_color() {
    let mut stack = vec![
        FillEntry::solid(color("#111111")).with_opacity(0.6),
        FillEntry::gradient(),
    ];
    let new_color = color("#336699");

    apply(&mut stack, &FillMutation::Update { index: 0 }, &new_color).expect("applies");

    // Opacity and visibility survive a color update
    assert_eq!(stack[0].kind, FillKind::Solid(new_color));
    assert_eq!(stack[0].opacity, 0.6);
    assert!(stack[0].visible);
    assert_eq!(stack[1], FillEntry::gradient());
}

#[test]
fn test_apply_rejects_bad_targets_without_mutating() {
    let original = vec![FillEntry::solid(color("#111111")), FillEntry::image()];
    let new_color = color("#336699");

    let mut stack = original.clone();
    let err = apply(&mut stack, &FillMutation::Update { index: 5 }, &new_color)
        .expect_err("index out of bounds");
    assert_eq!(err, FillError::InvalidFillIndex { index: 5, len: 2 });
    assert_eq!(stack, original);

    let err = apply(&mut stack, &FillMutation::Update { index: 1 }, &new_color)
        .expect_err("image is not solid");
    assert_eq!(err, FillError::NotSolid { index: 1 });
    assert_eq!(stack, original);
}
