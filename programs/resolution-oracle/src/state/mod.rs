pub mod config;
pub mod roles;
pub mod market;
pub mod legislator;
pub mod oracle_source;
pub mod stake;
pub mod tally;
pub mod reward;
pub mod resolution;
pub mod dispute;
pub mod lifecycle;

pub use config::*;
pub use roles::*;
pub use market::*;
pub use legislator::*;
pub use oracle_source::*;
pub use stake::*;
pub use tally::*;
pub use reward::*;
pub use resolution::*;
pub use dispute::*;
