// Logging shims, same shape as the engine's, under the `listwindow_adapter` target.

#[cfg(feature = "tracing")]
macro_rules! lw_trace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "listwindow_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lw_trace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! lw_debug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "listwindow_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lw_debug {
    ($($tt:tt)*) => {};
}
