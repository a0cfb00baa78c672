//! Battle.net game-data API client built around a small dispatch core: a rate-limited,
//! throttle-aware call executor, a cached OAuth credential, and lazily resolved resources.
//!
//! ```no_run
//! use battlenet_client::{client::Client, region::Region};
//!
//! # fn main() -> battlenet_client::error::Result<()> {
//! let client = Client::builder()
//! 	.client_id("my-client-id")
//! 	.client_secret("my-client-secret")
//! 	.region(Region::Europe)
//! 	.build()?;
//!
//! for item in client.wow().titles()? {
//! 	let title = item.full_item()?;
//!
//! 	println!("{} => {}", item.name, title.name);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod call;
pub mod client;
pub mod entity;
pub mod error;
pub mod ext;
pub mod http;
pub mod interceptor;
pub mod obs;
pub mod proxy;
pub mod region;
pub mod wow;

mod _prelude {
	pub use std::{
		collections::{HashMap, VecDeque},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		marker::PhantomData,
		str::FromStr,
		sync::Arc,
		time::{Duration, Instant},
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Error as ReqwestError, blocking::Client as ReqwestClient};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
