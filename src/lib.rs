pub mod anim;
pub mod config;
pub mod error;
pub mod event;
pub mod screen;
pub mod ui;
