//! facecheck library crate.
//!
//! Camera capture and a client for a face registration/recognition
//! backend, organised as views that a front end drives.

pub mod backend;
pub mod camera;
pub mod config;
pub mod ui;
pub mod views;
