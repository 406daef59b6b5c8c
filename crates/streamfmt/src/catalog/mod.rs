//! Static reference data: the property catalog and built-in presets.

mod presets;
mod properties;

pub use presets::{PRESETS, Preset, SNIPPETS, Snippet, preset, snippet};
pub use properties::{PropertyInfo, is_known_property, properties, property_names};
