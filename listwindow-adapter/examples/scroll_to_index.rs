// Example: scroll-to-index with a settle pass once the target is measured.
//
// A host would apply each drained command to its scroll container, lay out the rendered
// items, then report their measured sizes back.
use listwindow::{Align, HostCommand, IndexLocation, ListWindowOptions};
use listwindow_adapter::Controller;

fn measure(index: usize) -> f64 {
    // Stand-in for real layout: every 7th row wraps onto a second line.
    if index % 7 == 0 { 72.0 } else { 36.0 }
}

fn main() {
    let mut c = Controller::new(ListWindowOptions::new(10_000, 36).with_overscan(3usize));
    let mut host_top = 0u64;
    c.on_scroll(host_top, 600, 0);

    let target = c.scroll_to_index(IndexLocation::new(2_000).with_align(Align::Center));
    println!("issued target={target:?} state={:?}", c.scroll_to_state());

    for frame in 1..=4u64 {
        for command in c.drain_commands() {
            host_top = match command {
                HostCommand::ScrollTo { top, .. } => top,
                HostCommand::ScrollBy { delta } => host_top.saturating_add_signed(delta),
            };
        }
        c.on_scroll(host_top, 600, frame * 16);
        let rendered = c.window().rendered_range();
        c.on_measured_sizes((rendered.start_index..rendered.end_index).map(|i| (i, measure(i))));
        println!(
            "frame={frame} host_top={host_top} visible={:?} state={:?}",
            c.window().visible_range(),
            c.scroll_to_state()
        );
    }
}
