mod context;
mod namespace;
mod template_id;
mod value;

pub use context::{Context, Properties};
pub use namespace::{Namespace, UnknownNamespace};
pub use template_id::TemplateId;
pub use value::{Value, ValueKind};

pub(crate) use value::parse_number;
