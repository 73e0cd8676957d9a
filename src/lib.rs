//! Bitzec consensus chain parameters.
//!
//! Every network profile (main, test, regtest) is built once from literal
//! tables, validated, and then only read. Block validation and mining code
//! query the active profile through [`core::registry::params`].

pub mod core;
pub mod crypto;
pub mod error;
pub mod pow;

pub use crate::core::params::{NetworkKind, NetworkProfile};
pub use crate::core::registry::{params, select_params, SelectOptions};
pub use crate::error::ParamsError;
