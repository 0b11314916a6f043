pub mod config;
pub mod error;
pub mod render;
pub mod smtp;

pub use config::{SmtpConfig, TlsMode};
pub use error::{NotifyError, Result};
pub use render::DigestRenderer;
pub use smtp::SmtpNotifier;
