pub mod columns;
pub mod feed;

// Cleaned row types
pub mod announcement;
pub mod dividend;
pub mod holding;
pub mod names;
pub mod transaction;

// Session, configuration and render output
pub mod session;
pub mod settings;
pub mod snapshot;
