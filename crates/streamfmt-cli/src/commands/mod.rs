//! CLI command implementations.

mod check;
mod presets;
mod properties;
mod render;

pub use check::{run_check, CheckArgs};
pub use presets::{run_presets, PresetsArgs};
pub use properties::{run_properties, PropertiesArgs};
pub use render::{run_render, RenderArgs};
