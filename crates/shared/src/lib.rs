//! Value types shared between the packer state container and its drivers.

pub mod domain;
pub mod error;
