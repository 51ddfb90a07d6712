// UI Layer
pub mod components;
pub mod layout;
pub mod theme;

pub use layout::{Focus, LayoutManager, LayoutMode};
pub use theme::{Theme, ThemeManager};
