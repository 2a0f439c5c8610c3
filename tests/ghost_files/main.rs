//! End-to-end tests over ghost files on disk for `wraith-rs`

mod fixtures;
mod settings;
mod workflow;
