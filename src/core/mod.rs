//! Core abstractions for the navigation controller.
//!
//! - [`hardware::Hardware`]: Trait to implement for new robot hardware
//! - [`types`]: Grid positions, headings, actions, and battery modes

pub mod hardware;
pub mod types;
