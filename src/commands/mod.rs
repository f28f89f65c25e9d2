//! Subcommands of the `extract_from_blog` binary

pub mod config;
pub mod extract;
pub mod generate;
pub mod list;
pub mod verify;

#[cfg(test)]
mod tests;
