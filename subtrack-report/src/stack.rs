// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trimming of captured stacks for printing.
//!
//! A captured stack is split into frames: a numbered line such as
//! `   3: app::widgets::Widget::mount` together with the `at file:line` lines
//! that follow it. Text without numbered lines is treated as one frame per line.

use regex::Regex;
use subtrack_core::SUBSCRIBE_FRAMES;

/// Frames recorded by the act of capturing the stack itself.
const CAPTURE_FRAMES: [&str; 3] = [
    "std::backtrace::Backtrace",
    "std::backtrace_rs",
    "subtrack_core::config::StackCapture",
];

struct Frame<'a> {
    lines: Vec<&'a str>,
}

impl Frame<'_> {
    fn header(&self) -> &str {
        self.lines.first().copied().unwrap_or_default()
    }

    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn names_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.header().contains(name))
    }

    fn is_subscribe(&self, target_frames: &[&str]) -> bool {
        self.names_any(&SUBSCRIBE_FRAMES) || self.names_any(target_frames)
    }
}

fn is_frame_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && trimmed[digits..].starts_with(':')
}

fn frames(stack: &str) -> Vec<Frame<'_>> {
    let numbered = stack.lines().any(is_frame_header);
    let mut frames: Vec<Frame<'_>> = Vec::new();
    for line in stack.lines() {
        match frames.last_mut() {
            Some(frame) if numbered && !is_frame_header(line) => frame.lines.push(line),
            _ => frames.push(Frame { lines: vec![line] }),
        }
    }
    frames
}

/// Returns `stack` as it should be printed.
///
/// With `rewrite` the frames of the tracker and of stack capture are dropped.
/// With a `filter` only frames matching it are kept, and the tracker's
/// subscribe frames are always dropped. When nothing would be left the full
/// stack is returned instead.
///
/// ```
/// use subtrack_report::rewrite_stack;
///
/// let stack = "   0: <subtrack_core::interceptor::Interceptor<S>>::subscribe\n   1: app::main";
/// assert_eq!(rewrite_stack(stack, true, None), "   1: app::main");
/// assert_eq!(rewrite_stack(stack, false, None), stack);
/// ```
#[must_use]
pub fn rewrite_stack(stack: &str, rewrite: bool, filter: Option<&Regex>) -> String {
    rewrite_stack_with(stack, rewrite, filter, &[])
}

/// Like [`rewrite_stack`], also treating frames that name any of
/// `target_frames` as subscribe plumbing of the tracked library.
///
/// Pass [`SubscriptionRecord::target_frames`](subtrack_core::SubscriptionRecord::target_frames)
/// so that a trimmed stack starts at the code that called `subscribe`.
///
/// ```
/// use subtrack_report::rewrite_stack_with;
///
/// let stack = "   0: subtrack_core::hook::invoke_hooks\n   1: lib::Source::subscribe\n   2: app::main";
/// assert_eq!(rewrite_stack_with(stack, true, None, &["lib::Source"]), "   2: app::main");
/// ```
#[must_use]
pub fn rewrite_stack_with(
    stack: &str,
    rewrite: bool,
    filter: Option<&Regex>,
    target_frames: &[&str],
) -> String {
    if !rewrite && filter.is_none() {
        return stack.to_string();
    }

    let kept: Vec<String> = frames(stack)
        .into_iter()
        .filter(|frame| {
            !(rewrite && (frame.is_subscribe(target_frames) || frame.names_any(&CAPTURE_FRAMES)))
        })
        .filter(|frame| {
            filter.map_or(true, |filter| {
                !frame.is_subscribe(target_frames) && filter.is_match(&frame.text())
            })
        })
        .map(|frame| frame.text())
        .collect();

    if kept.is_empty() {
        return stack.to_string();
    }
    kept.join("\n")
}
