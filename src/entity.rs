//! Entity capability trait, lazily resolved resources, and index unwrapping.
//!
//! Every payload decoded by the client implements [`Entity`]. Types that carry permalinks
//! override [`Entity::attach`] to keep a handle on the owning [`Client`], which later powers
//! [`Key::full_item`]. Index payloads come in two distinct shapes, [`FullIndex`] (id, name,
//! permalink) and [`KeyIndex`] (permalink only), so one cannot be unwrapped as the other.

// self
use crate::{_prelude::*, client::Client};

/// A payload the client can decode.
pub trait Entity
where
	Self: DeserializeOwned,
{
	/// Receives the owning client after decoding.
	///
	/// The default is a no-op; only types holding lazy resources, directly or nested, need to
	/// override it and forward the client to their children.
	fn attach(&mut self, _client: &Client) {}
}
impl<T> Entity for Vec<T>
where
	T: Entity,
{
	fn attach(&mut self, client: &Client) {
		self.iter_mut().for_each(|item| item.attach(client));
	}
}
impl<T> Entity for Option<T>
where
	T: Entity,
{
	fn attach(&mut self, client: &Client) {
		if let Some(value) = self {
			value.attach(client);
		}
	}
}

impl Entity for serde_json::Value {}

/// Permalink to the full form of a resource of type `T`.
///
/// Decodes from `{"href": "..."}`. The permalink never changes after decoding; resolving it
/// produces a new `T` and leaves the key untouched.
#[derive(Deserialize)]
#[serde(bound = "")]
pub struct Key<T> {
	href: Url,
	#[serde(skip)]
	client: Option<Client>,
	#[serde(skip)]
	_full: PhantomData<fn() -> T>,
}
impl<T> Key<T> {
	/// Creates a detached key for `href`.
	pub fn new(href: Url) -> Self {
		Self { href, client: None, _full: PhantomData }
	}

	/// Fully-qualified URL of the full resource.
	pub fn href(&self) -> &Url {
		&self.href
	}

	/// Whether an owning client was attached at decode time.
	pub fn is_attached(&self) -> bool {
		self.client.is_some()
	}
}
impl<T> Key<T>
where
	T: Entity,
{
	/// Fetches the full resource through the owning client.
	///
	/// Every call performs a fresh round trip; results are not memoized.
	pub fn full_item(&self) -> Result<T> {
		let client = self.client.as_ref().ok_or(Error::Detached)?;

		client.resolve(&self.href)
	}
}
impl<T> Entity for Key<T> {
	fn attach(&mut self, client: &Client) {
		self.client = Some(client.clone());
	}
}
impl<T> Clone for Key<T> {
	fn clone(&self) -> Self {
		Self { href: self.href.clone(), client: self.client.clone(), _full: PhantomData }
	}
}
impl<T> Debug for Key<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Key")
			.field("href", &self.href.as_str())
			.field("attached", &self.client.is_some())
			.finish()
	}
}
impl<T> PartialEq for Key<T> {
	fn eq(&self, other: &Self) -> bool {
		self.href == other.href
	}
}

/// Minimal index entry: id, name, and a key to the full resource.
#[derive(Debug, Deserialize)]
#[serde(bound = "")]
pub struct IndexItem<T> {
	/// Permalink to the full resource.
	pub key: Key<T>,
	/// Display name in the client's locale.
	pub name: String,
	/// Numeric identifier.
	pub id: u64,
}
impl<T> IndexItem<T>
where
	T: Entity,
{
	/// Fetches the full resource; see [`Key::full_item`].
	pub fn full_item(&self) -> Result<T> {
		self.key.full_item()
	}
}
impl<T> Entity for IndexItem<T> {
	fn attach(&mut self, client: &Client) {
		self.key.attach(client);
	}
}
impl<T> Clone for IndexItem<T> {
	fn clone(&self) -> Self {
		Self { key: self.key.clone(), name: self.name.clone(), id: self.id }
	}
}

/// Index payload whose entries carry id, name, and permalink.
pub trait FullIndex
where
	Self: Entity,
{
	/// Full resource the entries point to.
	type Full: Entity;

	/// Consumes the payload, returning entries in server order.
	fn into_items(self) -> Vec<IndexItem<Self::Full>>;
}

/// Index payload whose entries are bare permalinks.
pub trait KeyIndex
where
	Self: Entity,
{
	/// Full resource the keys point to.
	type Full: Entity;

	/// Consumes the payload, returning keys in server order.
	fn into_keys(self) -> Vec<Key<Self::Full>>;
}

/// Unwraps a full index result into its entries, propagating failures unchanged.
pub fn unwrap_index<I>(result: Result<I>) -> Result<Vec<IndexItem<I::Full>>>
where
	I: FullIndex,
{
	result.map(FullIndex::into_items)
}

/// Unwraps a key index result into its keys, propagating failures unchanged.
pub fn unwrap_key_index<I>(result: Result<I>) -> Result<Vec<Key<I::Full>>>
where
	I: KeyIndex,
{
	result.map(KeyIndex::into_keys)
}
