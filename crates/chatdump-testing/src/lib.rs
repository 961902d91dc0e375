//! Testing infrastructure for chatdump.
//!
//! - `fixtures`: sample conversations, both built in code and checked in
//! - `world`: `TestWorld`, a temp-dir sandbox for driving the CLI binary

pub mod fixtures;
pub mod world;

pub use world::TestWorld;
