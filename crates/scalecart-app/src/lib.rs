//! Application service layer - configuration, calibration, session lifecycle

pub mod calibration;
pub mod config;
pub mod controller;
pub mod repository;
pub mod session;
pub mod weight_capture;
