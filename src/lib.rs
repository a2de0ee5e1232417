//! Arena shooter library.
//!
//! `game` composes the app; `plugins` holds the features; `common` holds the
//! pieces several plugins share. Integration tests in `tests/` import from here.

pub mod game;
pub mod common;
pub mod plugins;
