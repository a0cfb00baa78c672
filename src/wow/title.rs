//! Title index and title detail payloads.

// self
use crate::{
	_prelude::*,
	client::Client,
	entity::{Entity, FullIndex, IndexItem},
};

/// Payload of `data/wow/title/index`.
#[derive(Clone, Debug, Deserialize)]
pub struct TitleIndex {
	/// Every title, in server order.
	pub titles: Vec<IndexItem<Title>>,
}
impl Entity for TitleIndex {
	fn attach(&mut self, client: &Client) {
		self.titles.attach(client);
	}
}
impl FullIndex for TitleIndex {
	type Full = Title;

	fn into_items(self) -> Vec<IndexItem<Title>> {
		self.titles
	}
}

/// Payload of `data/wow/title/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Title {
	/// Title identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// Gendered display forms, when the title has them.
	#[serde(default)]
	pub gender_name: Option<GenderName>,
}
impl Entity for Title {}

/// Male and female display forms of a name.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GenderName {
	pub male: String,
	pub female: String,
}
