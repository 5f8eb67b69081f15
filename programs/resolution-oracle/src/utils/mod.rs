pub mod accounts;
pub mod math;
pub mod transfer;
