pub mod character;
pub mod config;
pub mod host;
pub mod outline;
pub mod plot_checker;
pub mod template;
