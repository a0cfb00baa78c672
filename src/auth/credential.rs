//! Bearer credential issued by the token endpoint.

// crates.io
use oauth2::AccessToken;
// self
use crate::{_prelude::*, entity::Entity};

/// Bearer token returned by the client-credentials grant.
///
/// A credential is replaced as a whole when a new one is issued; it is never updated in place.
#[derive(Clone, Debug, Deserialize)]
pub struct Credential {
	/// Access token; redacted in `Debug`.
	pub access_token: AccessToken,
	/// Token kind reported by the endpoint, usually `bearer`.
	pub token_type: String,
	/// Remaining lifetime in seconds at issuance, if reported.
	#[serde(default)]
	pub expires_in: Option<u64>,
	/// Instant the credential was decoded.
	#[serde(skip, default = "OffsetDateTime::now_utc")]
	pub issued_at: OffsetDateTime,
}
impl Credential {
	/// Creates a credential issued now.
	pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
		Self {
			access_token: AccessToken::new(access_token.into()),
			token_type: token_type.into(),
			expires_in: None,
			issued_at: OffsetDateTime::now_utc(),
		}
	}

	/// Sets the lifetime hint.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_in = Some(expires_in.as_secs());

		self
	}

	/// Returns the token value. Callers must avoid logging this string.
	pub fn secret(&self) -> &str {
		self.access_token.secret()
	}

	/// Expiry instant derived from the lifetime hint, if one was reported.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		let secs = i64::try_from(self.expires_in?).ok()?;

		self.issued_at.checked_add(time::Duration::seconds(secs))
	}

	/// Whether the lifetime hint says the credential has expired at `instant`.
	///
	/// The client never consults this on its own; callers decide when to invalidate.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at().is_some_and(|expires_at| instant >= expires_at)
	}
}
impl Entity for Credential {}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_token_response_and_redacts_secret() {
		let credential: Credential = serde_json::from_str(
			r#"{"access_token": "US-secret", "token_type": "bearer", "expires_in": 86399, "sub": "client"}"#,
		)
		.expect("Token response should decode.");

		assert_eq!(credential.secret(), "US-secret");
		assert_eq!(credential.token_type, "bearer");
		assert_eq!(credential.expires_in, Some(86_399));
		assert!(!format!("{credential:?}").contains("US-secret"));
	}

	#[test]
	fn expiry_follows_the_lifetime_hint() {
		let credential = Credential::new("token", "bearer").with_expires_in(Duration::from_secs(60));
		let issued_at = credential.issued_at;

		assert_eq!(credential.expires_at(), Some(issued_at + Duration::from_secs(60)));
		assert!(!credential.is_expired_at(issued_at + Duration::from_secs(59)));
		assert!(credential.is_expired_at(issued_at + Duration::from_secs(60)));
		assert!(
			!Credential::new("token", "bearer")
				.is_expired_at(issued_at + Duration::from_secs(10 * 365 * 24 * 3_600))
		);
	}
}
