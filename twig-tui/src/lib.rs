pub mod app;
pub mod components;
pub mod filter;
pub mod keymap;
pub mod theme;

pub use app::{run, run_stash};
pub use theme::Theme;
