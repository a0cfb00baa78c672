//! Mount index and mount detail payloads.

// self
use crate::{
	_prelude::*,
	client::Client,
	entity::{Entity, FullIndex, IndexItem},
	wow::TypeName,
};

/// Payload of `data/wow/mount/index`.
#[derive(Clone, Debug, Deserialize)]
pub struct MountIndex {
	/// Every mount, in server order.
	pub mounts: Vec<IndexItem<Mount>>,
}
impl Entity for MountIndex {
	fn attach(&mut self, client: &Client) {
		self.mounts.attach(client);
	}
}
impl FullIndex for MountIndex {
	type Full = Mount;

	fn into_items(self) -> Vec<IndexItem<Mount>> {
		self.mounts
	}
}

/// Payload of `data/wow/mount/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Mount {
	/// Mount identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// Flavor text.
	#[serde(default)]
	pub description: Option<String>,
	/// How the mount is obtained, e.g. `VENDOR`.
	#[serde(default)]
	pub source: Option<TypeName>,
	/// Faction restriction; absent for mounts both factions can use.
	#[serde(default)]
	pub faction: Option<TypeName>,
	/// Whether collection UIs hide the mount until it is owned.
	#[serde(default)]
	pub should_exclude_if_uncollected: bool,
}
impl Entity for Mount {}
