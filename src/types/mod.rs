pub mod log;
pub mod reading;

pub use log::*;
pub use reading::*;
