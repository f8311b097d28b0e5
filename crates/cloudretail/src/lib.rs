//! Rust implementation of the CloudRetail storefront client
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod order;
pub mod session;
pub mod store_url;
pub mod types;
pub mod util;

pub use self::checkout::{CheckoutController, SubmissionState};
pub use self::error::Error;
pub use self::order::{HttpOrderClient, OrderConnector, OrderOutcome};
pub use self::session::{Credential, OidcSessionProvider, SessionProvider};
pub use self::store_url::StoreUrl;
pub use self::types::PurchaseRequest;
