//! Typed call descriptions and the context-aware payload decoder.

// self
use crate::{
	_prelude::*,
	client::Client,
	entity::Entity,
	http::{ApiRequest, HttpTransport},
};

/// One outbound operation bound to its transport and decoder, with the payload type `T`.
///
/// A call never changes after construction; retries execute a [`Clone`] of it.
pub struct Call<T> {
	request: ApiRequest,
	transport: Arc<dyn HttpTransport>,
	decoder: Decoder,
	_payload: PhantomData<fn() -> T>,
}
impl<T> Call<T>
where
	T: Entity,
{
	/// Creates a call from its parts.
	pub fn new(request: ApiRequest, transport: Arc<dyn HttpTransport>, decoder: Decoder) -> Self {
		Self { request, transport, decoder, _payload: PhantomData }
	}

	/// The undecorated request this call sends.
	pub fn request(&self) -> &ApiRequest {
		&self.request
	}

	/// The call target.
	pub fn url(&self) -> &Url {
		&self.request.url
	}

	/// Same request, transport, and decoder with a different payload type.
	pub(crate) fn with_payload<U>(&self) -> Call<U>
	where
		U: Entity,
	{
		Call::new(self.request.clone(), self.transport.clone(), self.decoder.clone())
	}

	/// Decoder applied to successful bodies.
	pub fn decoder(&self) -> &Decoder {
		&self.decoder
	}

	/// Sends the request once.
	///
	/// The body is decoded only for 2xx statuses; any other status yields a response without a
	/// body, mirroring how the API signals throttling and errors.
	pub fn execute(&self) -> Result<Response<T>> {
		let raw = self.transport.send(self.request.clone())?;
		let body = if raw.is_success() {
			self.decoder.decode::<T>(&self.request.url, &raw.body)?
		} else {
			None
		};

		Ok(Response { status: raw.status, body })
	}
}
impl<T> Clone for Call<T> {
	fn clone(&self) -> Self {
		Self {
			request: self.request.clone(),
			transport: self.transport.clone(),
			decoder: self.decoder.clone(),
			_payload: PhantomData,
		}
	}
}
impl<T> Debug for Call<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Call")
			.field("method", &self.request.method)
			.field("url", &self.request.url.as_str())
			.field("payload", &std::any::type_name::<T>())
			.finish()
	}
}

/// Outcome of a single call execution.
#[derive(Debug)]
pub struct Response<T> {
	/// HTTP status code.
	pub status: u16,
	/// Decoded body; absent for non-2xx statuses, empty bodies, and JSON `null`.
	pub body: Option<T>,
}
impl<T> Response<T> {
	/// Whether the API signaled throttling.
	pub fn is_throttled(&self) -> bool {
		self.status == crate::http::RawResponse::TOO_MANY_REQUESTS
	}
}

/// JSON decoder optionally bound to an owning [`Client`].
///
/// A bound decoder hands the client to every decoded [`Entity`], so lazy resources nested
/// inside the payload can later be resolved with the same region, locale, and credentials.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
	context: Option<Client>,
}
impl Decoder {
	/// Decoder bound to `client`.
	pub fn bound(client: Client) -> Self {
		Self { context: Some(client) }
	}

	/// Decoder without an owning client, used for the token endpoint.
	pub fn detached() -> Self {
		Self::default()
	}

	/// Owning client, if any.
	pub fn context(&self) -> Option<&Client> {
		self.context.as_ref()
	}

	/// Decodes `bytes`, returning `None` for an empty body or JSON `null`.
	pub fn decode<T>(&self, url: &Url, bytes: &[u8]) -> Result<Option<T>>
	where
		T: Entity,
	{
		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(None);
		}

		let mut de = serde_json::Deserializer::from_slice(bytes);
		let value: Option<T> = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::Decode { url: url.to_owned(), source })?;

		Ok(value.map(|value| self.attach(value)))
	}

	/// Decodes an already-parsed JSON value, used for cached payloads.
	pub fn decode_value<T>(&self, url: &Url, value: serde_json::Value) -> Result<Option<T>>
	where
		T: Entity,
	{
		let value: Option<T> = serde_path_to_error::deserialize(value)
			.map_err(|source| Error::Decode { url: url.to_owned(), source })?;

		Ok(value.map(|value| self.attach(value)))
	}

	fn attach<T>(&self, mut value: T) -> T
	where
		T: Entity,
	{
		if let Some(client) = &self.context {
			value.attach(client);
		}

		value
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, Deserialize, PartialEq)]
	struct Named {
		name: String,
	}
	impl Entity for Named {}

	fn url() -> Url {
		Url::parse("https://us.api.blizzard.com/data/named").expect("Test URL should parse.")
	}

	#[test]
	fn empty_and_null_bodies_decode_to_none() {
		let decoder = Decoder::detached();

		assert!(decoder.decode::<Named>(&url(), b"").expect("Empty body should decode.").is_none());
		assert!(decoder.decode::<Named>(&url(), b" null ").expect("Null should decode.").is_none());
	}

	#[test]
	fn decode_failures_report_the_json_path() {
		let err = Decoder::detached()
			.decode::<Named>(&url(), br#"{"name": 42}"#)
			.expect_err("Numeric name must fail to decode.");

		match err {
			Error::Decode { url: failed, source } => {
				assert_eq!(failed, url());
				assert_eq!(source.path().to_string(), "name");
			},
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[test]
	fn decodes_values() {
		let value = Decoder::detached()
			.decode::<Named>(&url(), br#"{"name": "Jenkins"}"#)
			.expect("Valid payload should decode.");

		assert_eq!(value, Some(Named { name: "Jenkins".into() }));
	}
}
