//! Release-notes rendering

pub mod renderer;

pub use renderer::{ChangelogRenderer, Format};
