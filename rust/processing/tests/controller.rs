// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end runs of the two-phase command against an in-memory document.

mod common;

use approx::assert_abs_diff_eq;
use common::*;
use viewrange_core::{HostModel, PlaneRole, PlaneSetting, ProxyColor, RangeConfiguration};
use viewrange_document::NewView;
use viewrange_geometry::extract_metadata;
use viewrange_processing::{
    Action, CommandResponse, Direction, FailureReport, UpdateReport, ViewRangeRequest,
    VisualizeReport, NO_MOVEMENT_SUMMARY,
};

fn visualized(response: CommandResponse) -> VisualizeReport {
    match response {
        CommandResponse::Visualized(report) => report,
        other => panic!("expected a visualize report, got {other:?}"),
    }
}

fn updated(response: CommandResponse) -> UpdateReport {
    match response {
        CommandResponse::Reconciled(report) => report,
        other => panic!("expected an update report, got {other:?}"),
    }
}

fn failed(response: CommandResponse) -> FailureReport {
    match response {
        CommandResponse::Failed(report) => report,
        other => panic!("expected a failure, got {other:?}"),
    }
}

fn visualize() -> ViewRangeRequest {
    ViewRangeRequest::new(Action::Visualize).with_view_name("Level 1")
}

fn update() -> ViewRangeRequest {
    ViewRangeRequest::new(Action::Update)
}

#[test]
fn visualize_creates_one_proxy_per_finite_plane() {
    let mut f = fixture();
    let report = visualized(run_doc(&mut f.doc, visualize()));

    assert!(report.success);
    assert_eq!(report.action, Action::Visualize);
    assert_eq!(report.view_name, "Level 1");
    assert!(report.planes_skipped.is_empty());

    let names: Vec<&str> = report.planes_created.iter().map(|p| p.plane_name.as_str()).collect();
    assert_eq!(names, ["Top", "Cut", "Bottom", "View Depth"]);
    let colors: Vec<&str> = report.planes_created.iter().map(|p| p.color.as_str()).collect();
    assert_eq!(colors, ["Red", "Green", "Blue", "Orange"]);
    let elevations: Vec<f64> = report.planes_created.iter().map(|p| p.elevation).collect();
    assert_eq!(elevations, [120.0, 90.0, 0.0, -40.0]);

    assert_eq!(proxy_count(&f.doc), 4);
    let top = proxy(&f.doc, PlaneRole::Top);
    assert_eq!(top.color, ProxyColor::RED);
    let metadata = extract_metadata(&top).unwrap();
    assert_eq!(metadata.role, PlaneRole::Top);
    assert_eq!(metadata.source_view, f.plan);
    assert_eq!(metadata.source_level_name, "L2");
    assert_eq!(metadata.original_elevation, 120.0);
    assert!(top.vertices.iter().all(|v| v[2] == 120.0));

    assert!(!f.doc.in_transaction());
}

#[test]
fn unlimited_planes_are_skipped() {
    let mut f = fixture_with(|l1, _| RangeConfiguration {
        top: None,
        cut: Some(PlaneSetting::new(l1, 4.0)),
        bottom: Some(PlaneSetting::new(l1, 0.0)),
        view_depth: None,
    });
    let report = visualized(run_doc(&mut f.doc, visualize()));

    assert_eq!(report.planes_created.len(), 2);
    assert_eq!(report.planes_skipped, ["Top", "View Depth"]);
    assert!(report.message.contains("Top, View Depth"));
    assert_eq!(proxy_count(&f.doc), 2);
}

#[test]
fn round_trip_without_movement() {
    let mut f = fixture();
    let before = f.doc.view_range(f.plan).unwrap();

    visualized(run_doc(&mut f.doc, visualize()));
    let report = updated(run_doc(&mut f.doc, update()));

    assert_eq!(report.action, Action::Update);
    assert_eq!(report.movement_info.len(), 4);
    assert!(report
        .movement_info
        .iter()
        .all(|m| m.direction == Direction::None && m.distance == 0.0));
    assert_eq!(report.message, NO_MOVEMENT_SUMMARY);

    let after = f.doc.view_range(f.plan).unwrap();
    for role in PlaneRole::ALL {
        let (a, b) = (before.get(role).unwrap(), after.get(role).unwrap());
        assert_eq!(a.level, b.level);
        assert_abs_diff_eq!(a.offset, b.offset, epsilon = 1e-3);
    }
    assert_eq!(proxy_count(&f.doc), 0);
}

#[test]
fn cut_moved_down_by_ten() {
    let mut f = fixture();
    visualized(run_doc(&mut f.doc, visualize()));
    drag(&mut f.doc, PlaneRole::Cut, -10.0);

    let report = updated(run_doc(&mut f.doc, update()));
    let moved: Vec<_> = report
        .movement_info
        .iter()
        .filter(|m| m.direction != Direction::None)
        .collect();
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].plane_name, "Cut");
    assert_eq!(moved[0].direction, Direction::Down);
    assert_abs_diff_eq!(moved[0].distance, 10.0, epsilon = 1e-9);
    assert_eq!(report.message, "Cut moved down by 10.000");

    let range = f.doc.view_range(f.plan).unwrap();
    assert_eq!(range.cut.unwrap().level, f.l1);
    assert_abs_diff_eq!(range.cut.unwrap().offset, 80.0, epsilon = 1e-9);
    assert_eq!(range.top, Some(PlaneSetting::new(f.l2, 20.0)));
    assert_eq!(range.bottom, Some(PlaneSetting::new(f.l1, 0.0)));
    assert_eq!(proxy_count(&f.doc), 0);
}

#[test]
fn offsets_stay_on_their_original_level() {
    let mut f = fixture();
    visualized(run_doc(&mut f.doc, visualize()));
    drag(&mut f.doc, PlaneRole::Top, 5.0);

    let report = updated(run_doc(&mut f.doc, update()));
    assert_eq!(report.message, "Top moved up by 5.000");

    let top = f.doc.view_range(f.plan).unwrap().top.unwrap();
    assert_eq!(top.level, f.l2);
    assert_abs_diff_eq!(top.offset, 25.0, epsilon = 1e-9);
}

#[test]
fn ordering_violation_changes_nothing() {
    let mut f = fixture();
    let before = f.doc.view_range(f.plan).unwrap();
    visualized(run_doc(&mut f.doc, visualize()));
    drag(&mut f.doc, PlaneRole::Cut, 40.0);

    let failure = failed(run_doc(&mut f.doc, update()));
    assert!(!failure.success);
    assert!(failure.error.contains("Cut"), "{}", failure.error);
    assert!(failure.error.contains("Top"), "{}", failure.error);

    assert_eq!(f.doc.view_range(f.plan).unwrap(), before);
    assert_eq!(proxy_count(&f.doc), 4);
    assert!(!f.doc.in_transaction());
}

#[test]
fn visualize_while_pending_reconciles_instead() {
    let mut f = fixture();
    visualized(run_doc(&mut f.doc, visualize()));
    drag(&mut f.doc, PlaneRole::Bottom, 2.0);

    let report = updated(run_doc(&mut f.doc, visualize()));
    assert_eq!(report.action, Action::Update);
    assert_eq!(proxy_count(&f.doc), 0);
    assert_abs_diff_eq!(
        f.doc.view_range(f.plan).unwrap().bottom.unwrap().offset,
        2.0,
        epsilon = 1e-9
    );
}

#[test]
fn deleted_source_view_keeps_proxies() {
    let mut f = fixture();
    visualized(run_doc(&mut f.doc, visualize()));
    f.doc.remove_view(f.plan).unwrap();

    let failure = failed(run_doc(&mut f.doc, update()));
    assert!(failure.error.contains("no longer exists"), "{}", failure.error);
    assert_eq!(proxy_count(&f.doc), 4);
}

#[test]
fn visualize_requires_a_3d_view() {
    let mut f = fixture();
    f.doc.set_active_view(f.plan).unwrap();

    let failure = failed(run_doc(&mut f.doc, visualize()));
    assert!(failure.error.contains("3D"));
    assert_eq!(f.doc.shape_count(), 0);
}

#[test]
fn visualize_without_crop_boundary_fails() {
    let mut f = fixture();
    let mut uncropped = NewView::floor_plan("Uncropped", f.l1, Vec::new(), Default::default());
    uncropped.crop = None;
    f.doc.add_view(uncropped);

    let failure = failed(run_doc(
        &mut f.doc,
        ViewRangeRequest::new(Action::Visualize).with_view_name("Uncropped"),
    ));
    assert!(failure.error.contains("crop boundary"), "{}", failure.error);
    assert_eq!(f.doc.shape_count(), 0);
}

#[test]
fn proxy_creation_failure_rolls_back() {
    let f = fixture();
    let mut host = FlakyHost::new(f.doc);
    host.fail_on_create = Some(3);
    let active = host.inner.active_view();

    let failure = failed(run(&mut host, active, visualize()));
    assert!(failure.error.contains("quota"), "{}", failure.error);
    assert_eq!(host.inner.shape_count(), 0);
    assert!(!host.in_transaction());
}

#[test]
fn panic_during_write_is_contained() {
    let mut f = fixture();
    let before = f.doc.view_range(f.plan).unwrap();
    visualized(run_doc(&mut f.doc, visualize()));
    drag(&mut f.doc, PlaneRole::Cut, -10.0);

    let mut host = FlakyHost::new(f.doc);
    host.panic_on_write = true;
    let active = host.inner.active_view();

    let failure = failed(run(&mut host, active, update()));
    assert!(failure.error.contains("host crashed"), "{}", failure.error);
    assert!(!host.in_transaction());
    assert_eq!(host.inner.view_range(f.plan).unwrap(), before);
    assert_eq!(proxy_count(&host.inner), 4);
}

#[test]
fn preview_reports_without_writing() {
    let mut f = fixture();
    let before = f.doc.view_range(f.plan).unwrap();
    visualized(run_doc(&mut f.doc, visualize()));
    drag(&mut f.doc, PlaneRole::Cut, -10.0);

    let report = updated(run_doc(&mut f.doc, ViewRangeRequest::new(Action::Preview)));
    assert_eq!(report.action, Action::Preview);
    assert_eq!(report.message, "Cut moved down by 10.000");
    assert_eq!(f.doc.view_range(f.plan).unwrap(), before);
    assert_eq!(proxy_count(&f.doc), 4);
}

#[test]
fn cancel_removes_proxies_and_keeps_range() {
    let mut f = fixture();
    let before = f.doc.view_range(f.plan).unwrap();
    visualized(run_doc(&mut f.doc, visualize()));
    drag(&mut f.doc, PlaneRole::Cut, -10.0);

    match run_doc(&mut f.doc, ViewRangeRequest::new(Action::Cancel)) {
        CommandResponse::Cancelled(report) => {
            assert!(report.success);
            assert_eq!(report.removed_count, 4);
        }
        other => panic!("expected a cancel report, got {other:?}"),
    }
    assert_eq!(proxy_count(&f.doc), 0);
    assert_eq!(f.doc.view_range(f.plan).unwrap(), before);
}

#[test]
fn preview_and_cancel_need_pending_planes() {
    let mut f = fixture();
    for action in [Action::Preview, Action::Cancel] {
        let failure = failed(run_doc(&mut f.doc, ViewRangeRequest::new(action)));
        assert!(failure.error.contains("pending"), "{}", failure.error);
    }
}

#[test]
fn unreadable_proxies_alone_are_left_in_place() {
    let mut f = fixture();
    add_corrupt_proxy(&mut f.doc);

    let failure = failed(run_doc(&mut f.doc, update()));
    assert!(failure.error.contains("metadata"), "{}", failure.error);
    assert_eq!(proxy_count(&f.doc), 1);
}

#[test]
fn stray_proxy_does_not_block_reconciliation() {
    let mut f = fixture();
    visualized(run_doc(&mut f.doc, visualize()));
    add_corrupt_proxy(&mut f.doc);
    drag(&mut f.doc, PlaneRole::Cut, -10.0);

    let report = updated(run_doc(&mut f.doc, update()));
    assert_eq!(report.movement_info.len(), 4);
    assert_abs_diff_eq!(
        f.doc.view_range(f.plan).unwrap().cut.unwrap().offset,
        80.0,
        epsilon = 1e-9
    );
    assert_eq!(proxy_count(&f.doc), 0);
}

#[test]
fn target_view_by_id_and_by_default() {
    let mut f = fixture();
    let report = visualized(run_doc(
        &mut f.doc,
        ViewRangeRequest::new(Action::Visualize).with_view_id(f.plan),
    ));
    assert_eq!(report.view_name, "Level 1");
    run_doc(&mut f.doc, ViewRangeRequest::new(Action::Cancel));

    let report = visualized(run_doc(&mut f.doc, ViewRangeRequest::new(Action::Visualize)));
    assert_eq!(report.view_name, "Level 1");
}

#[test]
fn bad_view_references_fail_cleanly() {
    let mut f = fixture();

    let failure = failed(run_doc(
        &mut f.doc,
        ViewRangeRequest::new(Action::Visualize).with_view_id(f.three_d),
    ));
    assert!(failure.error.contains("not a plan view"), "{}", failure.error);

    let mut request = ViewRangeRequest::new(Action::Visualize);
    request.view_id = Some("abc".to_string());
    let failure = failed(run_doc(&mut f.doc, request));
    assert!(failure.error.contains("Invalid view id"), "{}", failure.error);

    let failure = failed(run_doc(
        &mut f.doc,
        ViewRangeRequest::new(Action::Visualize).with_view_name("Level 9"),
    ));
    assert!(failure.error.contains("Level 9"), "{}", failure.error);
    assert_eq!(f.doc.shape_count(), 0);
}
