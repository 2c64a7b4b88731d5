//! Protocol layer for device communication.
//!
//! This module handles building request paths and parsing responses from
//! SafeTech devices.

pub mod commands;
pub mod response;
