pub mod admin;
pub mod resolution;
pub mod dispute;
pub mod claims;

pub use admin::*;
pub use resolution::*;
pub use dispute::*;
pub use claims::*;
