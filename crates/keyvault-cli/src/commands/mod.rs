//! Command handlers, one module per subcommand.

mod cipher;
mod config;
mod derive;
mod master;

pub use cipher::{handle_decrypt, handle_encrypt};
pub use config::{handle_config_init, handle_config_show};
pub use derive::handle_derive;
pub use master::handle_master;
