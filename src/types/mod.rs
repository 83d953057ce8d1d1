pub mod gps;
pub mod gps_log;
pub mod schema;

pub use gps::*;
pub use gps_log::*;
pub use schema::*;
