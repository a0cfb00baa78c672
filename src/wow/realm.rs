//! Realm and connected-realm payloads.
//!
//! The realm index is a full index (id, name, permalink) while the connected-realm index only
//! lists permalinks, so the two unwrap through different adapters.

// self
use crate::{
	_prelude::*,
	client::Client,
	entity::{Entity, FullIndex, IndexItem, Key, KeyIndex},
};

/// Payload of `data/wow/realm/index`.
#[derive(Clone, Debug, Deserialize)]
pub struct RealmIndex {
	/// Every realm, in server order.
	pub realms: Vec<IndexItem<Realm>>,
}
impl Entity for RealmIndex {
	fn attach(&mut self, client: &Client) {
		self.realms.attach(client);
	}
}
impl FullIndex for RealmIndex {
	type Full = Realm;

	fn into_items(self) -> Vec<IndexItem<Realm>> {
		self.realms
	}
}

/// Payload of `data/wow/realm/{slug}`, also embedded in [`ConnectedRealm::realms`].
#[derive(Clone, Debug, Deserialize)]
pub struct Realm {
	/// Realm identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// URL-safe name.
	pub slug: String,
	/// Realm category, e.g. `United States`.
	#[serde(default)]
	pub category: Option<String>,
	/// Realm locale as reported by the API, e.g. `enUS`.
	#[serde(default)]
	pub locale: Option<String>,
	/// Realm time zone.
	#[serde(default)]
	pub timezone: Option<String>,
	/// Ruleset of the realm.
	#[serde(default, rename = "type")]
	pub kind: Option<TypeName>,
	/// Whether the realm is a tournament realm.
	#[serde(default)]
	pub is_tournament: bool,
	/// Permalink to the connected realm group this realm belongs to.
	#[serde(default)]
	pub connected_realm: Option<Key<ConnectedRealm>>,
}
impl Entity for Realm {
	fn attach(&mut self, client: &Client) {
		self.connected_realm.attach(client);
	}
}

/// Payload of `data/wow/connected-realm/index`.
#[derive(Clone, Debug, Deserialize)]
pub struct ConnectedRealmIndex {
	/// Permalinks to every connected realm, in server order.
	pub connected_realms: Vec<Key<ConnectedRealm>>,
}
impl Entity for ConnectedRealmIndex {
	fn attach(&mut self, client: &Client) {
		self.connected_realms.attach(client);
	}
}
impl KeyIndex for ConnectedRealmIndex {
	type Full = ConnectedRealm;

	fn into_keys(self) -> Vec<Key<ConnectedRealm>> {
		self.connected_realms
	}
}

/// Payload of `data/wow/connected-realm/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct ConnectedRealm {
	/// Connected realm identifier.
	pub id: u64,
	/// Whether logging in requires queueing.
	#[serde(default)]
	pub has_queue: bool,
	/// Current status, e.g. `UP`.
	#[serde(default)]
	pub status: Option<TypeName>,
	/// Current population band.
	#[serde(default)]
	pub population: Option<TypeName>,
	/// Realms sharing this group.
	#[serde(default)]
	pub realms: Vec<Realm>,
}
impl Entity for ConnectedRealm {
	fn attach(&mut self, client: &Client) {
		self.realms.attach(client);
	}
}

/// Enumerated value paired with its localized name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TypeName {
	/// Stable value, e.g. `NORMAL`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Localized display name.
	pub name: String,
}
