pub mod api;
pub mod app;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod logging;
pub mod poller;
pub mod render;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;
