// Example: a chat-style log that sticks to the newest message while at the bottom.
use listwindow::{HostCommand, ListWindowOptions};
use listwindow_adapter::{Controller, FollowOutput};

fn main() {
    let mut c = Controller::new(ListWindowOptions::new(50, 40)).with_follow_output(FollowOutput::Auto);
    let mut now_ms = 0u64;
    c.on_scroll(0, 400, now_ms);

    let mut host_top = c.window().max_scroll_top();
    c.on_scroll(host_top, 400, now_ms);

    for batch in 0..3 {
        c.append(5);
        now_ms += 16;
        c.tick(now_ms);
        for command in c.drain_commands() {
            if let HostCommand::ScrollTo { top, .. } = command {
                host_top = top;
            }
        }
        c.on_scroll(host_top, 400, now_ms);
        println!(
            "batch={batch} count={} host_top={host_top} at_bottom={}",
            c.window().total_count(),
            c.window().flags().is_at_bottom
        );
    }

    for event in c.drain_events() {
        println!("event: {event:?}");
    }
}
