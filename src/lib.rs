#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod cli;
pub mod engine;
pub mod entities;
pub mod error;
pub mod mcp;
pub mod render;
pub mod sources;

mod utils;
