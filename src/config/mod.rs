//! JSON configuration files read by the command-line tools.
pub mod gauge;
pub mod stage;
