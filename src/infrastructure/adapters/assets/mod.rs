//! Assets Adapter - 图片素材目录

mod asset_directory;

pub use asset_directory::AssetDirectory;
