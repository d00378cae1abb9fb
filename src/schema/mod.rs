pub mod character;
pub mod outline;
pub mod plot;
