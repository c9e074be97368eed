//! Pic2pdf Conversion Service
//!
//! A Rust service that converts a single uploaded raster image (JPEG, PNG,
//! GIF) into a single-page PDF with the image scaled to fit the page and
//! centered.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
