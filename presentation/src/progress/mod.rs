//! Console progress indicators

pub mod reporter;
