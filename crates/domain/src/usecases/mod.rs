//! Application use cases / business logic

pub mod closure;
pub mod order;
pub mod render;
pub mod search;

pub use closure::{ExportSetOptions, compute_closure, compute_export_set};
pub use order::{initialize_order, normalize_order};
pub use render::{
    DEFAULT_SEPARATOR, KeywordRenderer, RenderConfig, format_for_export, sort_by_user_order,
};
pub use search::search;
