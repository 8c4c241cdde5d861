pub mod motion;
pub mod render;
pub mod traversal;

pub use motion::*;
pub use render::*;
pub use traversal::*;
