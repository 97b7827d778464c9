//! Domain types for accounts

pub mod entities;
pub mod validation;
