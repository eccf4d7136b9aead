#![deny(rust_2018_idioms, warnings)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::use_self,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]
//! Time and IP scoped access policies for signed URLs.
//!
//! A [`Policy`] names a resource, the time until which it may be accessed and,
//! optionally, a start time and a source IP restriction. Nothing is checked
//! when the policy is built. [`Policy::to_json`] validates it against the
//! current time and renders the canonical document a signer expects:
//!
//! ```json
//! {"Statement":[{"Resource":"https://example.com/*","Condition":{"DateLessThan":{"AWS:EpochTime":1600000010}}}]}
//! ```
mod clock;
mod errors;
mod policy;
mod validator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{Error, Result};
pub use policy::{Options, Policy, PolicyBuilder, MAX_EPOCH_TIME};
pub use validator::{DefaultValidator, Field, PolicyValidator, SourceIpValidator};
