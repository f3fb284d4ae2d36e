//! Reusable UI components shared by both screens.

pub mod status_bar;
