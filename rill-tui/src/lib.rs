pub mod app;
pub mod components;
pub mod host;
pub mod keymap;
pub mod theme;

pub use app::run;
pub use host::TuiHost;
pub use theme::Theme;
