// System Layer
pub mod filesystem;
pub mod properties;

pub use filesystem::FileSystem;
pub use properties::FileProperties;
