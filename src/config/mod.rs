//! Configuration management module

pub mod settings;
#[cfg(test)]
mod tests;

pub use settings::*;
