// Logging shims.
//
// With `feature = "tracing"` these forward to `tracing` under the `listwindow` target.
// Without it they expand to nothing, so arguments are never evaluated.

#[cfg(feature = "tracing")]
macro_rules! lw_trace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "listwindow", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lw_trace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! lw_debug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "listwindow", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lw_debug {
    ($($tt:tt)*) => {};
}

// Every correctable condition goes through here before it is queued as an event.
#[cfg(feature = "tracing")]
macro_rules! lw_warn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "listwindow", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lw_warn {
    ($($tt:tt)*) => {};
}
