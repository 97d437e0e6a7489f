#![allow(dead_code)]

pub mod game_setup;
pub mod recording;

pub use game_setup::{Harness, HINTS, SECRET_WORD};
pub use recording::RecordingBroadcaster;
