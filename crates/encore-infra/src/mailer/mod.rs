//! Email delivery via an HTTP mail relay.

mod relay;

pub use relay::{HttpMailer, MailRelayConfig};
