//! Audio utilities for playing soundboard clips.
//!
//! This crate wraps `kira` into the two pieces the backend needs:
//! - [`clip::Clip`]: a fully decoded clip whose duration is known up front,
//!   which is what drives the highlight timing on the board.
//! - [`engine::AudioEngine`]: a dedicated thread owning the output device that
//!   starts and stops clips on request.
//!
//! Decoding is CPU bound; callers on an async runtime should run
//! [`clip::Clip::decode`] on a blocking thread.

pub mod clip;
pub mod engine;
