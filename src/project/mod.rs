//! Project-level facts: rebar configuration, OTP app aggregation, and the
//! cross-module index. Filesystem discovery stays in the host; everything
//! here works on already-parsed term files and modules.

mod index;
mod otp_app;
pub mod rebar;
pub mod term_config;

pub use index::ProjectIndex;
pub use otp_app::{OtpApp, ProjectError};
