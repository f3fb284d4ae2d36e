//! Full-screen layouts.

pub mod dashboard;
pub mod picker;
