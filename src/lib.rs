pub mod app;
pub mod core;
pub mod descriptor;
pub mod host;
pub mod notifications;
pub mod output;
