//! Command implementations

pub mod application;
pub mod document;
pub mod index;
pub mod invoke;
pub mod profile;
pub mod subscription;
