//! # Domain Models
//!
//! Plain data shared by every GAP crate: configuration structs, the RGB
//! [`image::Image`] buffer, and the small string helpers for identifiers and
//! seed words. No I/O and no logging here.

pub mod config;
pub mod image;
pub mod naming;
pub mod seed;
