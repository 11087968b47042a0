#![deny(unsafe_code)]

/// Application shell and header export actions.
///
/// This crate provides a desktop agent-transcript surface built with GPUI
/// and gpui-component: a message list that follows new output, per-message
/// clipboard copy, and whole-transcript image/text export.
pub mod app;
/// Load-only application settings.
pub mod settings;
/// Transcript rendering components and domain contracts.
pub mod transcript;
