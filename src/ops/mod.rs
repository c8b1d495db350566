pub mod batch;
pub mod bulk;
pub mod cache;
pub mod command;
pub mod selection;

pub use batch::BatchTemplate;
pub use cache::{EditCache, FlushReport};
pub use selection::{MarkTransition, Pane, Selection};
