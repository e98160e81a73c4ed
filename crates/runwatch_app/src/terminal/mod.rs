//! Plain-text front end: renders the run view model to stdout.
pub mod render;
pub mod watch;
