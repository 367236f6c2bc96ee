#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod client;
pub mod collector;
pub mod common;
pub mod config;
pub mod logging;
