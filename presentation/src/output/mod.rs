//! Output formatting for the console and the web pages

pub mod console;
pub mod html;
