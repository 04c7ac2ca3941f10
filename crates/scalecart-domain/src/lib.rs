//! Domain layer for scalecart
//!
//! Pure cart, pricing and receipt logic plus the traits the application layer
//! uses to reach storage and hardware.

pub mod device;
pub mod model;
pub mod repository;
pub mod service;
