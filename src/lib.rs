// riofer - terminal translator with debounced translate-on-input

pub mod config;
pub mod translate;
