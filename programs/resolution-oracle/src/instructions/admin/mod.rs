pub mod init_config;
pub mod update_params;
pub mod roles;
pub mod pause;
pub mod register_market;
pub mod set_legislator;
pub mod oracle_source;
pub mod withdraw_treasury;

pub use init_config::*;
pub use update_params::*;
pub use roles::*;
pub use pause::*;
pub use register_market::*;
pub use set_legislator::*;
pub use oracle_source::*;
pub use withdraw_treasury::*;
