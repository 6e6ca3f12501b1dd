// Example: measured sizes replacing estimates without moving the visible rows.
use listwindow::{HostCommand, ListWindow, ListWindowOptions};

fn main() {
    let mut w = ListWindow::new(ListWindowOptions::new(1_000, 50));
    let mut host_top = 1_000u64;
    w.report_scroll_position(host_top, 500, 0);
    println!("before: range={:?} total={}", w.visible_range(), w.total_height());

    // Rows above the viewport turn out taller than estimated.
    w.report_measured_sizes([(3, 120.0), (7, 64.0), (25, 48.0)]);
    println!(
        "measured: deviation={} effective_top={} range={:?}",
        w.deviation(),
        w.effective_scroll_top(),
        w.visible_range()
    );

    // The host applies the queued correction, then reports its new position.
    for command in w.drain_commands() {
        if let HostCommand::ScrollBy { delta } = command {
            host_top = host_top.saturating_add_signed(delta);
        }
    }
    w.report_scroll_position(host_top, 500, 16);
    println!(
        "applied: host_top={host_top} deviation={} range={:?}",
        w.deviation(),
        w.visible_range()
    );

    // Prepending keeps the same rows on screen.
    w.prepend(10);
    println!(
        "prepend(10): deviation={} first_visible={}",
        w.deviation(),
        w.visible_range().start_index
    );
}
