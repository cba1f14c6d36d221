// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Captured-stack fixtures in the format `std::backtrace::Backtrace` prints.

/// A stack as captured for a subscription created in `app::widgets`.
pub const WIDGET_STACK: &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/library/std/src/backtrace.rs:312:9
   1: subtrack_core::config::StackCapture::capture
             at ./subtrack-core/src/config.rs:24:26
   2: <subtrack_core::interceptor::Interceptor<S> as subtrack_core::hook::SubscribeHook<S>>::subscribe
             at ./subtrack-core/src/interceptor.rs:36:17
   3: app::widgets::Widget::mount
             at ./src/widgets.rs:10:5
   4: app::main
             at ./src/main.rs:4:5
   5: core::ops::function::FnOnce::call_once
             at /rustc/library/core/src/ops/function.rs:250:5";

/// Frame names in [`WIDGET_STACK`] that belong to the application.
pub const WIDGET_APP_FRAMES: [&str; 2] = ["app::widgets::Widget::mount", "app::main"];

/// A stack captured under a library patch point: the hook chain and the
/// library's own subscribe frames sit between the interceptor and the caller.
pub const LIBRARY_STACK: &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/library/std/src/backtrace.rs:312:9
   1: subtrack_core::config::StackCapture::capture
             at ./subtrack-core/src/config.rs:24:26
   2: <subtrack_core::interceptor::Interceptor<S> as subtrack_core::hook::SubscribeHook<S>>::subscribe
             at ./subtrack-core/src/interceptor.rs:36:17
   3: subtrack_core::hook::invoke_hooks
             at ./subtrack-core/src/hook.rs:35:29
   4: reactive::patch::Patch::subscribe
             at ./reactive/src/patch.rs:21:9
   5: reactive::Source<T>::subscribe
             at ./reactive/src/lib.rs:88:9
   6: app::widgets::Widget::mount
             at ./src/widgets.rs:10:5
   7: app::main
             at ./src/main.rs:4:5";

/// Frame names the library of [`LIBRARY_STACK`] reports as its subscribe plumbing.
pub const LIBRARY_FRAMES: [&str; 2] = ["reactive::patch::Patch", "reactive::Source<"];

/// Text without numbered frames, as a foreign stack format might look.
pub const UNSTRUCTURED_STACK: &str = "at mount (widgets.js:10:5)\nat main (main.js:4:5)";
