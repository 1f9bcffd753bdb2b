// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciliation and preview run directly, without the controller.

mod common;

use approx::assert_abs_diff_eq;
use common::*;
use viewrange_core::{
    with_transaction, ElementId, HostModel, PlaneRole, PlaneSetting, RangeConfiguration,
};
use viewrange_document::{Document, NewView};
use viewrange_geometry::{create_proxy, find_marked_proxies, CropBoundary};
use viewrange_processing::{
    preview, reconcile, Action, CommandError, Direction, Reconciliation, Settings,
    ViewRangeRequest, NO_MOVEMENT_SUMMARY,
};

/// Bottom at 45 and View Depth at 40, both on L1.
fn shallow_fixture() -> Fixture {
    fixture_with(|l1, l2| RangeConfiguration {
        top: Some(PlaneSetting::new(l2, 20.0)),
        cut: Some(PlaneSetting::new(l1, 90.0)),
        bottom: Some(PlaneSetting::new(l1, 45.0)),
        view_depth: Some(PlaneSetting::new(l1, 40.0)),
    })
}

fn show(doc: &mut Document) {
    let response = run_doc(doc, ViewRangeRequest::new(Action::Visualize).with_view_name("Level 1"));
    assert!(response.is_success(), "{response:?}");
}

fn reconcile_now(doc: &mut Document, view: ElementId) -> Result<Reconciliation, CommandError> {
    let proxies = find_marked_proxies(doc);
    with_transaction(doc, "Update View Range", |m| {
        reconcile(m, view, &proxies, &Settings::default())
    })
}

fn add_proxy(doc: &mut Document, role: PlaneRole, elevation: f64, view: ElementId) -> ElementId {
    let boundary = CropBoundary::from_corners(&CROP).unwrap();
    with_transaction(doc, "Add proxy", |m| {
        create_proxy(m, &boundary, elevation, role, "L1", view)
    })
    .unwrap()
}

#[test]
fn bottom_raised_above_stored_view_depth_is_accepted() {
    let mut f = shallow_fixture();
    show(&mut f.doc);
    delete_proxy(&mut f.doc, PlaneRole::ViewDepth);
    drag(&mut f.doc, PlaneRole::Bottom, 5.0);

    let result = reconcile_now(&mut f.doc, f.plan).unwrap();
    assert_eq!(result.movements.len(), 3);
    assert_eq!(result.summary, "Bottom moved up by 5.000");

    let range = f.doc.view_range(f.plan).unwrap();
    assert_abs_diff_eq!(range.bottom.unwrap().offset, 50.0, epsilon = 1e-9);
    assert_eq!(range.view_depth, Some(PlaneSetting::new(f.l1, 40.0)));
}

#[test]
fn bottom_lowered_past_stored_view_depth_is_rejected() {
    let mut f = shallow_fixture();
    let before = f.doc.view_range(f.plan).unwrap();
    show(&mut f.doc);
    delete_proxy(&mut f.doc, PlaneRole::ViewDepth);
    drag(&mut f.doc, PlaneRole::Bottom, -15.0);

    let err = reconcile_now(&mut f.doc, f.plan).unwrap_err();
    assert!(matches!(err, CommandError::Hierarchy(_)), "{err}");
    let message = err.to_string();
    assert!(message.contains("Bottom"), "{message}");
    assert!(message.contains("View Depth"), "{message}");
    assert_eq!(f.doc.view_range(f.plan).unwrap(), before);
}

#[test]
fn submitted_planes_are_validated_first() {
    let mut f = shallow_fixture();
    let before = f.doc.view_range(f.plan).unwrap();
    show(&mut f.doc);
    drag(&mut f.doc, PlaneRole::ViewDepth, 20.0);

    let err = reconcile_now(&mut f.doc, f.plan).unwrap_err();
    assert!(matches!(err, CommandError::Hierarchy(_)), "{err}");
    assert_eq!(f.doc.view_range(f.plan).unwrap(), before);
}

#[test]
fn unlimited_plane_with_a_proxy_uses_the_view_level() {
    let mut f = fixture_with(|l1, _| RangeConfiguration {
        top: None,
        cut: Some(PlaneSetting::new(l1, 90.0)),
        bottom: Some(PlaneSetting::new(l1, 0.0)),
        view_depth: None,
    });
    show(&mut f.doc);
    add_proxy(&mut f.doc, PlaneRole::Top, 110.0, f.plan);

    let result = reconcile_now(&mut f.doc, f.plan).unwrap();
    assert!(result.previous.top.is_none());
    assert_eq!(result.updated.top, Some(PlaneSetting::new(f.l1, 110.0)));
    assert_eq!(
        f.doc.view_range(f.plan).unwrap().top,
        Some(PlaneSetting::new(f.l1, 110.0))
    );
}

#[test]
fn plane_without_any_level_is_reported() {
    let mut doc = Document::new();
    let l1 = doc.add_level("L1", 0.0);
    let mut plan = NewView::floor_plan(
        "Level 1",
        l1,
        CROP.to_vec(),
        RangeConfiguration {
            cut: Some(PlaneSetting::new(l1, 4.0)),
            ..Default::default()
        },
    );
    plan.associated_level = None;
    let plan = doc.add_view(plan);
    add_proxy(&mut doc, PlaneRole::Top, 12.0, plan);

    let err = reconcile_now(&mut doc, plan).unwrap_err();
    assert!(matches!(err, CommandError::NoReferenceLevel(PlaneRole::Top)), "{err}");
}

#[test]
fn first_proxy_per_role_wins() {
    let mut f = fixture();
    show(&mut f.doc);
    let duplicate = add_proxy(&mut f.doc, PlaneRole::Cut, 85.0, f.plan);

    let result = reconcile_now(&mut f.doc, f.plan).unwrap();
    assert_eq!(result.skipped, [duplicate]);
    assert!(result
        .movements
        .iter()
        .all(|m| m.direction == Direction::None));
    assert_eq!(
        f.doc.view_range(f.plan).unwrap().cut,
        Some(PlaneSetting::new(f.l1, 90.0))
    );
}

#[test]
fn moved_copy_of_a_proxy_is_the_one_applied() {
    let mut f = fixture();
    show(&mut f.doc);
    let original = proxy(&f.doc, PlaneRole::Cut).id;
    let copy = add_proxy(&mut f.doc, PlaneRole::Cut, 90.0, f.plan);
    f.doc.translate_shape(copy, -12.0).unwrap();

    let result = reconcile_now(&mut f.doc, f.plan).unwrap();
    assert_eq!(result.skipped, [original]);
    assert_eq!(result.summary, "Cut moved down by 12.000");
    assert_abs_diff_eq!(
        f.doc.view_range(f.plan).unwrap().cut.unwrap().offset,
        78.0,
        epsilon = 1e-9
    );
}

#[test]
fn proxy_from_another_view_is_skipped() {
    let mut f = fixture();
    show(&mut f.doc);
    delete_proxy(&mut f.doc, PlaneRole::Top);
    // Would break the ordering if it were applied to this view.
    let foreign = add_proxy(&mut f.doc, PlaneRole::Top, 10.0, f.three_d);

    let result = reconcile_now(&mut f.doc, f.plan).unwrap();
    assert_eq!(result.skipped, [foreign]);
    assert_eq!(result.movements.len(), 3);
    assert_eq!(
        f.doc.view_range(f.plan).unwrap().top,
        Some(PlaneSetting::new(f.l2, 20.0))
    );
}

#[test]
fn host_rejection_surfaces_as_host_error() {
    let mut f = fixture();
    show(&mut f.doc);
    let proxies = find_marked_proxies(&f.doc);

    // Outside a transaction the document refuses every write.
    let err = reconcile(&mut f.doc, f.plan, &proxies, &Settings::default()).unwrap_err();
    assert!(matches!(err, CommandError::Host(_)), "{err}");
    assert_eq!(err.code(), "HOST");
}

#[test]
fn preview_matches_reconcile_without_writing() {
    let mut f = fixture();
    let before = f.doc.view_range(f.plan).unwrap();
    show(&mut f.doc);
    drag(&mut f.doc, PlaneRole::Cut, -10.0);
    drag(&mut f.doc, PlaneRole::Top, 2.5);

    let proxies = find_marked_proxies(&f.doc);
    let dry = preview(&f.doc, f.plan, &proxies, &Settings::default()).unwrap();
    assert_eq!(dry.summary, "Top moved up by 2.500\nCut moved down by 10.000");
    assert_eq!(f.doc.view_range(f.plan).unwrap(), before);

    let wet = reconcile_now(&mut f.doc, f.plan).unwrap();
    assert_eq!(dry.movements, wet.movements);
    assert_eq!(dry.summary, wet.summary);
}

#[test]
fn larger_epsilon_hides_small_moves() {
    let mut f = fixture();
    show(&mut f.doc);
    drag(&mut f.doc, PlaneRole::Cut, -0.05);

    let proxies = find_marked_proxies(&f.doc);
    let coarse = Settings::default().with_movement_epsilon(0.1);
    let dry = preview(&f.doc, f.plan, &proxies, &coarse).unwrap();
    assert!(dry.movements.iter().all(|m| !m.moved()));

    let fine = preview(&f.doc, f.plan, &proxies, &Settings::default()).unwrap();
    assert_eq!(fine.summary, "Cut moved down by 0.050");
}

#[test]
fn move_below_epsilon_is_still_written() {
    let mut f = fixture();
    show(&mut f.doc);
    drag(&mut f.doc, PlaneRole::Cut, -0.05);

    let proxies = find_marked_proxies(&f.doc);
    let coarse = Settings::default().with_movement_epsilon(0.1);
    let plan = f.plan;
    let result = with_transaction(&mut f.doc, "Update View Range", |m| {
        reconcile(m, plan, &proxies, &coarse)
    })
    .unwrap();
    assert_eq!(result.summary, NO_MOVEMENT_SUMMARY);
    assert!(result.movements.iter().all(|m| !m.moved()));

    let cut = f.doc.view_range(f.plan).unwrap().cut.unwrap();
    assert_eq!(cut.level, f.l1);
    assert_abs_diff_eq!(cut.offset, 89.95, epsilon = 1e-9);
}
