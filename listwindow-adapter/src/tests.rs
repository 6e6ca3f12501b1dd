use crate::*;

use alloc::vec;
use listwindow::{Align, Behavior, HostCommand, IndexLocation, ListWindowOptions};

fn controller(count: usize, size: u32) -> Controller {
    let mut c = Controller::new(ListWindowOptions::new(count, size));
    c.on_scroll(0, 500, 0);
    c.drain_commands();
    c
}

#[test]
fn auto_request_settles_when_target_is_measured() {
    let mut c = controller(1_000, 50);
    let target = c.scroll_to_index(IndexLocation::new(999).with_align(Align::End));
    assert_eq!(target, Some(49_500));
    assert_eq!(
        c.drain_commands(),
        vec![HostCommand::ScrollTo {
            top: 49_500,
            behavior: Behavior::Auto
        }]
    );
    assert_eq!(
        c.scroll_to_state(),
        ScrollToState::Settling {
            index: 999,
            align: Align::End,
            target: 49_500
        }
    );

    c.on_measured_sizes([(998, 50.0), (999, 50.0)]);
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);
    assert!(c.drain_commands().is_empty());
}

#[test]
fn settle_reissues_one_correction_when_target_moved() {
    let mut c = controller(1_000, 50);
    assert_eq!(c.scroll_to_index(500usize), Some(25_000));
    c.drain_commands();

    // An item above the target turns out taller than estimated.
    c.on_measured_sizes([(499, 80.0), (500, 50.0)]);
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);
    assert_eq!(
        c.drain_commands(),
        vec![HostCommand::ScrollTo {
            top: 25_030,
            behavior: Behavior::Auto
        }]
    );
    assert_eq!(c.window().deviation(), 0);
    assert_eq!(c.window().visible_range().start_index, 500);

    // At most one correction per request.
    c.on_measured_sizes([(498, 90.0)]);
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);
}

#[test]
fn smooth_request_waits_for_arrival_then_measurement() {
    let mut c = controller(1_000, 50);
    let location = IndexLocation::new(100).with_behavior(Behavior::Smooth);
    assert_eq!(c.scroll_to_index(location), Some(5_000));
    assert!(matches!(c.scroll_to_state(), ScrollToState::Pending { .. }));
    assert_eq!(c.window().scroll_state().scroll_top, 0);

    c.on_scroll(2_000, 500, 16);
    assert!(matches!(c.scroll_to_state(), ScrollToState::Pending { .. }));

    c.on_scroll(5_000, 500, 32);
    assert!(matches!(c.scroll_to_state(), ScrollToState::Settling { .. }));

    c.on_measured_sizes([(100, 50.0)]);
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);
}

#[test]
fn newer_request_supersedes_older_one() {
    let mut c = controller(1_000, 50);
    c.scroll_to_index(IndexLocation::new(100).with_behavior(Behavior::Smooth));
    c.scroll_to_index(200usize);
    assert_eq!(
        c.scroll_to_state(),
        ScrollToState::Settling {
            index: 200,
            align: Align::Start,
            target: 10_000
        }
    );
    let commands = c.drain_commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands.last(),
        Some(&HostCommand::ScrollTo {
            top: 10_000,
            behavior: Behavior::Auto
        })
    );
}

#[test]
fn requests_clamp_index_and_discard_on_empty_list() {
    let mut c = controller(1_000, 50);
    c.scroll_to_index(5_000usize);
    assert!(matches!(
        c.scroll_to_state(),
        ScrollToState::Settling { index: 999, .. }
    ));

    let mut empty = controller(0, 50);
    assert_eq!(empty.scroll_to_index(3usize), None);
    assert_eq!(empty.scroll_to_state(), ScrollToState::Idle);
    assert!(empty.drain_commands().is_empty());
}

#[test]
fn prepend_shifts_in_flight_request() {
    let mut c = controller(1_000, 50);
    c.scroll_to_index(IndexLocation::new(100).with_behavior(Behavior::Smooth));
    c.prepend(5);
    assert!(matches!(
        c.scroll_to_state(),
        ScrollToState::Pending { index: 105, .. }
    ));
}

#[test]
fn follow_output_tracks_tail_when_at_bottom() {
    let mut c = controller(100, 50).with_follow_output(FollowOutput::Auto);
    c.on_scroll(4_500, 500, 16);
    assert!(c.window().flags().is_at_bottom);

    c.append(10);
    assert!(matches!(
        c.scroll_to_state(),
        ScrollToState::Settling { index: 109, .. }
    ));
    assert_eq!(
        c.drain_commands(),
        vec![HostCommand::ScrollTo {
            top: 5_000,
            behavior: Behavior::Auto
        }]
    );
}

#[test]
fn follow_output_ignores_appends_away_from_bottom() {
    let mut c = controller(100, 50).with_follow_output(FollowOutput::Auto);
    c.append(10);
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);
    assert!(c.drain_commands().is_empty());

    let mut disabled = controller(100, 50);
    disabled.on_scroll(4_500, 500, 16);
    disabled.append(10);
    assert_eq!(disabled.scroll_to_state(), ScrollToState::Idle);
}

#[test]
fn follow_output_defers_while_correction_is_pending() {
    let mut c = controller(100, 50).with_follow_output(FollowOutput::Smooth);
    c.on_scroll(4_500, 500, 16);
    c.on_measured_sizes([(10, 80.0)]);
    assert!(c.window().has_pending_correction());
    assert!(c.window().flags().is_at_bottom);

    c.set_total_count(110);
    assert!(c.has_deferred_follow());
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);

    c.tick(32);
    assert!(!c.has_deferred_follow());
    assert!(matches!(
        c.scroll_to_state(),
        ScrollToState::Pending { index: 109, .. }
    ));
}

#[test]
fn dynamic_follow_output_decides_behavior() {
    let follow = FollowOutput::dynamic(|at_bottom| Some(if at_bottom {
        Behavior::Smooth
    } else {
        Behavior::Auto
    }));
    assert_eq!(follow.behavior(true), Some(Behavior::Smooth));
    assert_eq!(FollowOutput::Disabled.behavior(true), None);
    assert_eq!(FollowOutput::Auto.behavior(false), None);

    let mut c = controller(100, 50).with_follow_output(follow);
    c.append(1);
    assert!(matches!(
        c.scroll_to_state(),
        ScrollToState::Settling { index: 100, .. }
    ));
}

#[test]
fn grouped_request_lands_below_sticky_header() {
    let mut c = Controller::new(
        ListWindowOptions::new(10, 10).with_group_counts(Some(vec![3, 5, 2])),
    );
    c.on_scroll(0, 40, 0);
    assert_eq!(c.scroll_to_index(4usize), Some(50));
}

#[test]
fn user_scroll_abandons_settling_request() {
    let mut c = controller(1_000, 50);
    assert_eq!(c.scroll_to_index(500usize), Some(25_000));
    c.drain_commands();

    // The host confirming the jump keeps the request alive.
    c.on_scroll(25_000, 500, 16);
    assert!(matches!(
        c.scroll_to_state(),
        ScrollToState::Settling { index: 500, .. }
    ));

    c.on_scroll(0, 500, 32);
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);

    c.on_measured_sizes((0..=500).map(|i| (i, 60.0)));
    assert!(
        !c.drain_commands()
            .iter()
            .any(|cmd| matches!(cmd, HostCommand::ScrollTo { .. }))
    );
    assert_eq!(c.window().scroll_state().scroll_top, 0);
}

#[test]
fn smooth_request_ends_when_host_moves_away_from_target() {
    let mut c = controller(1_000, 50);
    c.scroll_to_index(IndexLocation::new(100).with_behavior(Behavior::Smooth));
    c.on_scroll(2_000, 500, 16);
    c.on_scroll(3_000, 500, 32);
    assert!(matches!(c.scroll_to_state(), ScrollToState::Pending { .. }));

    c.on_scroll(1_000, 500, 48);
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);
}

#[test]
fn request_for_measured_target_finishes_immediately() {
    let mut c = Controller::new(ListWindowOptions::fixed(1_000, 50));
    c.on_scroll(0, 500, 0);
    assert_eq!(c.scroll_to_index(400usize), Some(20_000));
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);
    assert_eq!(
        c.drain_commands(),
        vec![HostCommand::ScrollTo {
            top: 20_000,
            behavior: Behavior::Auto
        }]
    );
}

#[test]
fn follow_output_skips_rejected_count_change_on_grouped_list() {
    let mut c = Controller::new(
        ListWindowOptions::new(10, 10).with_group_counts(Some(vec![3, 5, 2])),
    )
    .with_follow_output(FollowOutput::Auto);
    c.on_scroll(90, 40, 0);
    c.drain_commands();
    assert!(c.window().flags().is_at_bottom);

    c.set_total_count(20);
    assert_eq!(c.window().total_count(), 10);
    assert_eq!(c.scroll_to_state(), ScrollToState::Idle);
    assert!(c.drain_commands().is_empty());

    // Appending grows the last group, which does follow.
    c.append(2);
    assert_eq!(c.window().total_count(), 12);
    assert!(matches!(
        c.scroll_to_state(),
        ScrollToState::Settling { index: 11, .. }
    ));
}
