//! API wrapper module

mod common;
pub use common::*;

pub mod cli;
pub mod helpers;
