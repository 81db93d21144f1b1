pub mod action;
pub mod client;
