pub mod commands;
pub mod handlers;

/// Error type shared by every dispatcher endpoint.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
