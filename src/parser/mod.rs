pub mod main;
pub mod record;

pub use main::*;
pub use record::*;
