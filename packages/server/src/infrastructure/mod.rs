//! Infrastructure layer: concrete implementations of the domain traits.

pub mod dto;
pub mod realtime;
pub mod repository;
