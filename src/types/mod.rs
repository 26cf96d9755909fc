pub mod date_window;
pub mod forecast;
pub mod location;
pub mod payload;
pub mod slot;
