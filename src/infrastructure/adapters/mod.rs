//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod assets;
pub mod generative;
pub mod render;
pub mod scripture;
pub mod translate;

pub use assets::*;
pub use generative::*;
pub use render::*;
pub use scripture::*;
pub use translate::*;
