#![allow(dead_code)]
pub mod ticket_helpers;

pub use ticket_helpers::*;
