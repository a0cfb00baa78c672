//! Region, locale, and namespace tables used to address the API.

// self
use crate::{_prelude::*, error::ConfigError};

/// API regions; each owns a host prefix and a fixed set of locales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
	/// `us` region.
	NorthAmerica,
	/// `eu` region.
	Europe,
	/// `kr` region.
	Korea,
	/// `tw` region.
	Taiwan,
}
impl Region {
	/// Every supported region.
	pub const ALL: [Region; 4] = [Region::NorthAmerica, Region::Europe, Region::Korea, Region::Taiwan];

	/// Returns the region code used in host names and namespaces.
	pub const fn as_str(self) -> &'static str {
		match self {
			Region::NorthAmerica => "us",
			Region::Europe => "eu",
			Region::Korea => "kr",
			Region::Taiwan => "tw",
		}
	}

	/// Locales served by this region; the first entry is the region default.
	pub const fn supported_locales(self) -> &'static [Locale] {
		match self {
			Region::NorthAmerica => &[Locale::EnUs, Locale::EsMx, Locale::PtBr],
			Region::Europe => &[
				Locale::EnGb,
				Locale::EsEs,
				Locale::FrFr,
				Locale::RuRu,
				Locale::DeDe,
				Locale::PtPt,
				Locale::ItIt,
			],
			Region::Korea => &[Locale::KoKr],
			Region::Taiwan => &[Locale::ZhTw],
		}
	}

	/// Locale selected when only a region is configured.
	pub const fn default_locale(self) -> Locale {
		self.supported_locales()[0]
	}

	/// Whether `locale` belongs to this region.
	pub fn has_locale(self, locale: Locale) -> bool {
		self.supported_locales().contains(&locale)
	}

	/// Game-data API base URL for this region.
	pub fn api_base_url(self) -> String {
		format!("https://{}.api.blizzard.com/", self.as_str())
	}

	/// OAuth token endpoint for this region.
	pub fn oauth_token_url(self) -> String {
		format!("https://{}.battle.net/oauth/token", self.as_str())
	}
}
impl Display for Region {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Region {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Region::ALL
			.into_iter()
			.find(|region| region.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| ConfigError::UnknownLabel { kind: "region", value: s.to_owned() })
	}
}

/// Locales understood by the API.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Locale {
	EnUs,
	EsMx,
	PtBr,
	EnGb,
	EsEs,
	FrFr,
	RuRu,
	DeDe,
	PtPt,
	ItIt,
	KoKr,
	ZhTw,
}
impl Locale {
	/// Every supported locale.
	pub const ALL: [Locale; 12] = [
		Locale::EnUs,
		Locale::EsMx,
		Locale::PtBr,
		Locale::EnGb,
		Locale::EsEs,
		Locale::FrFr,
		Locale::RuRu,
		Locale::DeDe,
		Locale::PtPt,
		Locale::ItIt,
		Locale::KoKr,
		Locale::ZhTw,
	];

	/// Returns the value sent in the `locale` query parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			Locale::EnUs => "en_US",
			Locale::EsMx => "es_MX",
			Locale::PtBr => "pt_BR",
			Locale::EnGb => "en_GB",
			Locale::EsEs => "es_ES",
			Locale::FrFr => "fr_FR",
			Locale::RuRu => "ru_RU",
			Locale::DeDe => "de_DE",
			Locale::PtPt => "pt_PT",
			Locale::ItIt => "it_IT",
			Locale::KoKr => "ko_KR",
			Locale::ZhTw => "zh_TW",
		}
	}

	/// Region that serves this locale.
	pub const fn region(self) -> Region {
		match self {
			Locale::EnUs | Locale::EsMx | Locale::PtBr => Region::NorthAmerica,
			Locale::EnGb
			| Locale::EsEs
			| Locale::FrFr
			| Locale::RuRu
			| Locale::DeDe
			| Locale::PtPt
			| Locale::ItIt => Region::Europe,
			Locale::KoKr => Region::Korea,
			Locale::ZhTw => Region::Taiwan,
		}
	}
}
impl Display for Locale {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Locale {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.replace('-', "_");

		Locale::ALL
			.into_iter()
			.find(|locale| locale.as_str().eq_ignore_ascii_case(&normalized))
			.ok_or_else(|| ConfigError::UnknownLabel { kind: "locale", value: s.to_owned() })
	}
}

/// Resolves the effective region/locale pair for a client.
///
/// - neither given: North America with its default locale
/// - region only: the region's first supported locale
/// - locale only: the locale's owning region
/// - both: accepted only when the region serves the locale
pub fn resolve_region_locale(
	region: Option<Region>,
	locale: Option<Locale>,
) -> Result<(Region, Locale), ConfigError> {
	match (region, locale) {
		(None, None) => Ok((Region::NorthAmerica, Region::NorthAmerica.default_locale())),
		(Some(region), None) => Ok((region, region.default_locale())),
		(None, Some(locale)) => Ok((locale.region(), locale)),
		(Some(region), Some(locale)) if region.has_locale(locale) => Ok((region, locale)),
		(Some(region), Some(locale)) => Err(ConfigError::LocaleNotInRegion { locale, region }),
	}
}

/// Game-data namespaces accepted by the `addNamespace` placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
	/// Static game data (items, titles, classes).
	Static,
	/// Dynamic game data (realms, auctions, leaderboards).
	Dynamic,
	/// Player profile data.
	Profile,
}
impl Namespace {
	/// Every recognized namespace.
	pub const ALL: [Namespace; 3] = [Namespace::Static, Namespace::Dynamic, Namespace::Profile];

	/// Placeholder value, e.g. `static`.
	pub const fn as_str(self) -> &'static str {
		match self {
			Namespace::Static => "static",
			Namespace::Dynamic => "dynamic",
			Namespace::Profile => "profile",
		}
	}

	/// Region-qualified value sent as `namespace`, e.g. `static-eu`.
	pub fn qualified(self, region: Region) -> String {
		format!("{}-{}", self.as_str(), region.as_str())
	}
}
impl Display for Namespace {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Namespace {
	type Err = ConfigError;

	/// Matching is exact; unrecognized placeholders are left alone by the decorator.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Namespace::ALL
			.into_iter()
			.find(|namespace| namespace.as_str() == s)
			.ok_or_else(|| ConfigError::UnknownLabel { kind: "namespace", value: s.to_owned() })
	}
}
