use smartstring::alias::{String as SmartString};

use crate::translations::Translations;


/// A raw (province, country) pair as it appears in a source row, before any
/// normalization. The province may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPlace {
	pub province: String,
	pub country: String,
}

impl RawPlace {
	pub fn new(province: &str, country: &str) -> Self {
		Self{
			province: province.to_string(),
			country: country.to_string(),
		}
	}
}


const CRUISE_SHIP_MARKER: &str = "Cruise Ship";
const TAIWAN_MARKER: &str = "Taiwan*";
const FRENCH_TERRITORIES: &[&str] = &["French Guiana", "Martinique", "Reunion"];
const COUNTRY_ALIASES: &[(&str, &str)] = &[
	("US", "United States of America"),
	("Korea, South", "South Korea"),
];


fn cruise_ship(mut place: RawPlace) -> RawPlace {
	if place.country == CRUISE_SHIP_MARKER {
		place.country = "International Conveyance".to_string();
		place.province = "Diamond Princess".to_string();
	}
	place
}

fn mainland_china(mut place: RawPlace) -> RawPlace {
	if place.country == "China" && place.province != "Hong Kong" && place.province != "Macau" {
		place.country = "Mainland China".to_string();
	}
	place
}

fn taiwan(mut place: RawPlace) -> RawPlace {
	if place.country == TAIWAN_MARKER {
		place.province = "Taiwan".to_string();
		place.country = "China".to_string();
	}
	place
}

fn france(mut place: RawPlace) -> RawPlace {
	if place.country == "France" && place.province == "France" {
		place.province = "Metropolitan France".to_string();
	} else if FRENCH_TERRITORIES.contains(&place.country.as_str()) {
		place.province = std::mem::take(&mut place.country);
		place.country = "France".to_string();
	}
	place
}

fn country_alias(mut place: RawPlace) -> RawPlace {
	for (alias, canonical) in COUNTRY_ALIASES {
		if place.country == *alias {
			place.country = canonical.to_string();
			break;
		}
	}
	place
}

/// The normalization rules in precedence order. Each rule is pure and may
/// rewrite the record it receives; later rules see the output of earlier
/// ones, so this order is load-bearing (e.g. the Taiwan marker must keep its
/// rows out of the Mainland China rewrite).
static NORMALIZATION_RULES: &[fn(RawPlace) -> RawPlace] = &[
	cruise_ship,
	mainland_china,
	taiwan,
	france,
	country_alias,
];

/// English-level normalization of a raw place, before any translation.
pub fn normalize(place: RawPlace) -> RawPlace {
	NORMALIZATION_RULES.iter().fold(place, |place, rule| rule(place))
}


/// A fully resolved location: canonical (display-language) keys plus the
/// normalized English names they were derived from. The English names are
/// also the strings the correction tables are keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalLocation {
	pub country_key: SmartString,
	pub province_key: Option<SmartString>,
	pub english_country: String,
	pub english_province: Option<String>,
}

pub fn resolve(raw: &RawPlace, tables: &Translations) -> CanonicalLocation {
	let place = normalize(raw.clone());
	let country_key = tables.key_for(&place.country);
	let mut province_key = if place.province.is_empty() {
		None
	} else {
		Some(tables.key_for(&place.province))
	};

	if country_key == tables.united_states_key() && !place.province.is_empty() {
		if let Some(abbr) = us_state_abbr(&place.province, tables) {
			if let Some(key) = tables.state_key(&abbr) {
				province_key = Some(key);
			}
		}
	}

	CanonicalLocation{
		country_key,
		province_key,
		english_country: place.country,
		english_province: if place.province.is_empty() {
			None
		} else {
			Some(place.province)
		},
	}
}

/// A trailing comma-separated suffix ("Los Angeles, CA") wins over the
/// reverse lookup of the full state name.
fn us_state_abbr(province: &str, tables: &Translations) -> Option<SmartString> {
	let parts: Vec<&str> = province.split(',').collect();
	if parts.len() == 2 {
		return Some(parts[1].trim().into())
	}
	tables.state_abbr_for_name(province)
}
