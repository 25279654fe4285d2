mod commands;
mod logging;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::run;
