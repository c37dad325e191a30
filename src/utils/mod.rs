//! Helpers shared by the services and handlers.
//!
//! - [`hostname`] - Hostname grammar, normalization, and root-domain extraction
//! - [`probe_url`] - Ownership file URL, TXT record value, and health probe URL
//! - [`verification_token`] - Random verification token generation

pub mod hostname;
pub mod probe_url;
pub mod verification_token;
