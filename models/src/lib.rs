#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::if_not_else,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::too_many_lines
)]

pub mod audit_log;
pub mod channel;
pub mod gateway;
pub mod guild;
pub mod id;
pub mod message;
pub mod permissions;
pub mod user;
