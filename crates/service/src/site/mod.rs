//! Visit counter, app catalog and locker flag.

pub mod repository;
pub mod service;
pub mod input;
