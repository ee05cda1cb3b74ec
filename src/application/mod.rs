// Application layer - use cases shared by the HTTP server and the CLI.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
