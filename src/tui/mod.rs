pub mod app;
pub mod external;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
