//! Compile-time embedded configuration resources and their parsed statics.

pub mod embedded;
