// Example: minimal usage, queued events and the scroll-to helper.
use listwindow::{Align, Behavior, ListWindow, ListWindowOptions};

fn main() {
    let mut w = ListWindow::new(ListWindowOptions::new(1_000_000, 20).with_overscan(2usize));
    w.report_scroll_position(123_456, 400, 0);

    let state = w.list_state();
    println!("total_height={}", state.total_height);
    println!("visible_range={:?}", state.visible_range);
    println!("rendered_range={:?}", state.rendered_range);
    println!("first_rendered={:?}", state.items.first());

    for event in w.drain_events() {
        println!("event: {event:?}");
    }

    if let Some(top) = w.scroll_to_index_offset(999_999, Align::End) {
        w.scroll_to_offset(top, Behavior::Auto);
    }
    println!("commands: {:?}", w.drain_commands());
    println!("after scroll_to_index: range={:?}", w.visible_range());
}
