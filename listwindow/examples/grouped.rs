// Example: grouped list with sticky headers.
use listwindow::{Align, ListWindow, ListWindowOptions};

fn main() {
    let mut w = ListWindow::new(
        ListWindowOptions::new(0, 24).with_group_counts(Some(vec![30, 50, 20])),
    );
    w.report_scroll_position(0, 240, 0);
    for group in 0..3 {
        w.report_group_header_size(group, 32.0);
    }

    let Some(top) = w.scroll_to_index_offset(40, Align::Start) else {
        return;
    };
    w.report_scroll_position(top, 240, 16);

    for item in &w.list_state().items {
        let label = if item.is_group_header() { "header" } else { "item" };
        println!(
            "{label} index={} group={:?} offset={} size={}",
            item.index, item.group_index, item.offset, item.size
        );
    }
    for event in w.drain_events() {
        println!("event: {event:?}");
    }
}
