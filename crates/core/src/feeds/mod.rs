pub mod cache;
pub mod service;
pub mod traits;

// HTTP implementation
pub mod http;
