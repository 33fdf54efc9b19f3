mod app_context;
mod config_warnings;

pub use app_context::HubContext;
pub use config_warnings::warn_unconfigured;
