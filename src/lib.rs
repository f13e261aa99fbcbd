pub mod config;
pub mod error;
pub mod event;
pub mod http;
pub mod notify;
pub mod store;
pub mod util;
