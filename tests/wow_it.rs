// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use battlenet_client::{
	client::Client,
	error::Error,
	ext::Unlimited,
	proxy::ProxyConfig,
	region::Region,
	url::Url,
	wow::{ConnectedRealm, Mount, Title},
};

const TOKEN: &str = "wow-token";

fn client(server: &MockServer) -> Result<Client> {
	server.mock(|when, then| {
		when.method(POST).path("/oauth/token");
		then.status(200).json_body(json!({
			"access_token": TOKEN,
			"token_type": "bearer",
			"expires_in": 86399
		}));
	});

	let client = Client::builder()
		.client_id("client-id")
		.client_secret("client-secret")
		.region(Region::NorthAmerica)
		.base_url(server.base_url())
		.oauth_url(server.url("/oauth/token"))
		.rate_limiter(std::sync::Arc::new(Unlimited))
		.proxy_config(ProxyConfig::default().with_retry_interval(Duration::from_millis(5)))
		.build()?;

	Ok(client)
}

#[test]
fn title_index_unwraps_in_order_and_resolves_lazily() -> Result<()> {
	let server = MockServer::start();
	let client = client(&server)?;
	let index = server.mock(|when, then| {
		when.method(GET)
			.path("/data/wow/title/index")
			.query_param("namespace", "static-us")
			.query_param("locale", "en_US")
			.query_param("access_token", TOKEN);
		then.status(200).json_body(json!({
			"titles": [
				{"key": {"href": server.url("/data/wow/title/90?namespace=static-us")}, "name": "Jenkins", "id": 90},
				{"key": {"href": server.url("/data/wow/title/7?namespace=static-us")}, "name": "Private", "id": 7},
				{"key": {"href": server.url("/data/wow/title/90?namespace=static-us")}, "name": "Jenkins", "id": 90}
			]
		}));
	});
	let detail = server.mock(|when, then| {
		when.method(GET)
			.path("/data/wow/title/90")
			.query_param("namespace", "static-us")
			.query_param("locale", "en_US")
			.query_param("access_token", TOKEN);
		then.status(200).json_body(json!({"id": 90, "name": "Jenkins"}));
	});
	let items = client.wow().titles()?;

	assert_eq!(items.iter().map(|item| item.id).collect::<Vec<_>>(), [90, 7, 90]);
	assert!(items.iter().all(|item| item.key.is_attached()));

	let first = items[0].full_item()?;
	let second = items[0].full_item()?;

	assert_eq!(first, second);
	assert_eq!(first.name, "Jenkins");
	assert_eq!(items[0].key.href().path(), "/data/wow/title/90");

	index.assert_calls(1);
	detail.assert_calls(2);

	Ok(())
}

#[test]
fn mount_index_resolves_entries_with_static_namespace() -> Result<()> {
	let server = MockServer::start();
	let client = client(&server)?;
	let index = server.mock(|when, then| {
		when.method(GET)
			.path("/data/wow/mount/index")
			.query_param("namespace", "static-us")
			.query_param("locale", "en_US")
			.query_param("access_token", TOKEN);
		then.status(200).json_body(json!({
			"mounts": [
				{"key": {"href": server.url("/data/wow/mount/6?namespace=static-us")}, "name": "Brown Horse", "id": 6},
				{"key": {"href": server.url("/data/wow/mount/7?namespace=static-us")}, "name": "Gray Wolf", "id": 7}
			]
		}));
	});
	let detail = server.mock(|when, then| {
		when.method(GET)
			.path("/data/wow/mount/7")
			.query_param("namespace", "static-us")
			.query_param("locale", "en_US");
		then.status(200).json_body(json!({
			"id": 7,
			"name": "Gray Wolf",
			"faction": {"type": "HORDE", "name": "Horde"}
		}));
	});
	let items = client.wow().mounts()?;

	assert_eq!(items.iter().map(|item| item.name.as_str()).collect::<Vec<_>>(), ["Brown Horse", "Gray Wolf"]);

	let resolved: Mount = items[1].full_item()?;
	let direct = client.wow().mount(7)?;

	assert_eq!(resolved, direct);
	assert_eq!(resolved.faction.map(|faction| faction.kind).as_deref(), Some("HORDE"));

	index.assert_calls(1);
	detail.assert_calls(2);

	Ok(())
}

#[test]
fn resolving_an_undecodable_permalink_is_a_decode_failure() -> Result<()> {
	let server = MockServer::start();
	let client = client(&server)?;
	let broken = server.mock(|when, then| {
		when.method(GET).path("/data/wow/title/13");
		then.status(200).json_body(json!({"id": "thirteen", "name": "Broken"}));
	});
	let permalink = Url::parse(&server.url("/data/wow/title/13?namespace=static-us"))?;
	let err = client.resolve::<Title>(&permalink).expect_err("String id must not decode.");

	match err {
		Error::Decode { url, source } => {
			assert_eq!(url, permalink);
			assert_eq!(source.path().to_string(), "id");
		},
		other => panic!("Unexpected error: {other:?}."),
	}

	broken.assert_calls(1);

	Ok(())
}

#[test]
fn connected_realm_keys_resolve_with_nested_context() -> Result<()> {
	let server = MockServer::start();
	let client = client(&server)?;
	let index = server.mock(|when, then| {
		when.method(GET)
			.path("/data/wow/connected-realm/index")
			.query_param("namespace", "dynamic-us");
		then.status(200).json_body(json!({
			"connected_realms": [
				{"href": server.url("/data/wow/connected-realm/11?namespace=dynamic-us")}
			]
		}));
	});
	let connected = server.mock(|when, then| {
		when.method(GET)
			.path("/data/wow/connected-realm/11")
			.query_param("namespace", "dynamic-us")
			.query_param("locale", "en_US");
		then.status(200).json_body(json!({
			"id": 11,
			"has_queue": false,
			"status": {"type": "UP", "name": "Up"},
			"realms": [{
				"id": 11,
				"name": "Tichondrius",
				"slug": "tichondrius",
				"connected_realm": {"href": server.url("/data/wow/connected-realm/11?namespace=dynamic-us")}
			}]
		}));
	});
	let keys = client.wow().connected_realms()?;

	assert_eq!(keys.len(), 1);

	let group: ConnectedRealm = keys[0].full_item()?;
	let realm = &group.realms[0];

	assert_eq!(group.id, 11);
	assert_eq!(realm.slug, "tichondrius");

	let back = realm.connected_realm.as_ref().expect("Realm should link its group.").full_item()?;

	assert_eq!(back.id, 11);

	index.assert_calls(1);
	connected.assert_calls(2);

	Ok(())
}

#[test]
fn index_failures_propagate_instead_of_returning_empty_lists() -> Result<()> {
	let server = MockServer::start();
	let client = client(&server)?;
	let index = server.mock(|when, then| {
		when.method(GET).path("/data/wow/realm/index");
		then.status(503);
	});
	let err = client.wow().realms().expect_err("Server error must propagate.");

	assert!(matches!(err, Error::NoResponse { status: 503, .. }));

	index.assert_calls(1);

	Ok(())
}
