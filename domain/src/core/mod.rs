//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a question that passed the length gate
//! - [`image_format::ImageFormat`]: accepted upload formats
//! - [`error::DomainError`]: input validation errors

pub mod error;
pub mod image_format;
pub mod question;
pub mod string;
