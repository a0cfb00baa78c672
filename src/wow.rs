//! World of Warcraft game-data endpoints.
//!
//! Each endpoint is a relative path with an `addNamespace` placeholder; the decorator turns it
//! into the region-qualified `namespace` parameter.

pub mod mount;
pub mod realm;
pub mod title;

pub use mount::*;
pub use realm::*;
pub use title::*;

// self
use crate::{
	_prelude::*,
	client::Client,
	entity::{IndexItem, Key},
};

/// Endpoint group bound to a [`Client`].
#[derive(Clone, Debug)]
pub struct WowApi {
	client: Client,
}
impl WowApi {
	/// Creates the endpoint group for `client`.
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	/// Lists every title.
	pub fn titles(&self) -> Result<Vec<IndexItem<Title>>> {
		self.client.execute_index(&self.client.call::<TitleIndex>(TITLE_INDEX_PATH)?)
	}

	/// Fetches one title.
	pub fn title(&self, id: u64) -> Result<Title> {
		self.client.get(&format!("data/wow/title/{id}?addNamespace=static"))
	}

	/// Lists every mount.
	pub fn mounts(&self) -> Result<Vec<IndexItem<Mount>>> {
		self.client.execute_index(&self.client.call::<MountIndex>(MOUNT_INDEX_PATH)?)
	}

	/// Fetches one mount.
	pub fn mount(&self, id: u64) -> Result<Mount> {
		self.client.get(&format!("data/wow/mount/{id}?addNamespace=static"))
	}

	/// Lists every realm.
	pub fn realms(&self) -> Result<Vec<IndexItem<Realm>>> {
		self.client.execute_index(&self.client.call::<RealmIndex>(REALM_INDEX_PATH)?)
	}

	/// Fetches one realm by slug.
	pub fn realm(&self, slug: &str) -> Result<Realm> {
		self.client.get(&format!("data/wow/realm/{slug}?addNamespace=dynamic"))
	}

	/// Lists permalinks to every connected realm.
	pub fn connected_realms(&self) -> Result<Vec<Key<ConnectedRealm>>> {
		let call = self.client.call::<ConnectedRealmIndex>(CONNECTED_REALM_INDEX_PATH)?;

		self.client.execute_key_index(&call)
	}

	/// Fetches one connected realm.
	pub fn connected_realm(&self, id: u64) -> Result<ConnectedRealm> {
		self.client.get(&format!("data/wow/connected-realm/{id}?addNamespace=dynamic"))
	}
}

const TITLE_INDEX_PATH: &str = "data/wow/title/index?addNamespace=static";
const MOUNT_INDEX_PATH: &str = "data/wow/mount/index?addNamespace=static";
const REALM_INDEX_PATH: &str = "data/wow/realm/index?addNamespace=dynamic";
const CONNECTED_REALM_INDEX_PATH: &str = "data/wow/connected-realm/index?addNamespace=dynamic";
