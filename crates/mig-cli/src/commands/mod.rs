//! Command implementations

pub mod add;
pub mod common;
pub mod down;
pub mod list;
pub mod recreate;
pub mod run;
pub mod status;
pub mod up;
