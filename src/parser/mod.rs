pub mod decoder;
pub mod gaps;
pub mod helpers;
pub mod main;
pub mod stream;

pub use decoder::*;
pub use gaps::*;
pub use helpers::*;
pub use main::*;
pub use stream::*;
