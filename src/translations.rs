use std::collections::HashMap;
use std::path::Path;

use smartstring::alias::{String as SmartString};

use crate::ioutil::magic_open;
use crate::Error;


/// Static lookup tables joining English place names to their display-language
/// counterparts, plus the US state abbreviation tables and the ISO-3166
/// alpha-3 label table used by the map enricher.
#[derive(Debug, Clone, Default)]
pub struct Translations {
	/// English name -> display-language name (`en2zh.json`).
	names: HashMap<String, SmartString>,
	/// State abbreviation -> full English state name (`us_states_abbr_en.json`).
	state_names: HashMap<SmartString, String>,
	/// State abbreviation -> display-language state name (`us_states_abbr_zh.json`).
	state_keys: HashMap<SmartString, SmartString>,
	/// ISO-3166 alpha-3 code -> display-language country label (`iso3166_codes.json`).
	iso3166: HashMap<SmartString, SmartString>,
}

impl Translations {
	pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, Error> {
		let dir = dir.as_ref();
		Ok(Self{
			names: serde_json::from_reader(magic_open(dir.join("en2zh.json"))?)?,
			state_names: serde_json::from_reader(magic_open(dir.join("us_states_abbr_en.json"))?)?,
			state_keys: serde_json::from_reader(magic_open(dir.join("us_states_abbr_zh.json"))?)?,
			iso3166: serde_json::from_reader(magic_open(dir.join("iso3166_codes.json"))?)?,
		})
	}

	pub fn from_parts(
			names: &[(&str, &str)],
			state_names: &[(&str, &str)],
			state_keys: &[(&str, &str)],
			iso3166: &[(&str, &str)],
	) -> Self {
		Self{
			names: names.iter().map(|(k, v)| ((*k).into(), (*v).into())).collect(),
			state_names: state_names.iter().map(|(k, v)| ((*k).into(), (*v).into())).collect(),
			state_keys: state_keys.iter().map(|(k, v)| ((*k).into(), (*v).into())).collect(),
			iso3166: iso3166.iter().map(|(k, v)| ((*k).into(), (*v).into())).collect(),
		}
	}

	/// Canonical key for an English name; untranslated names fall back to the
	/// English string verbatim, so the result is always non-empty for
	/// non-empty input.
	pub fn key_for(&self, english: &str) -> SmartString {
		match self.names.get(english) {
			Some(key) => key.clone(),
			None => {
				log::debug!("no translation for {:?}", english);
				english.into()
			},
		}
	}

	pub fn global_key(&self) -> SmartString {
		self.key_for("Global")
	}

	pub fn china_key(&self) -> SmartString {
		self.key_for("China")
	}

	pub fn united_states_key(&self) -> SmartString {
		self.key_for("United States of America")
	}

	/// Reverse lookup of a full English state name to its abbreviation.
	pub fn state_abbr_for_name(&self, name: &str) -> Option<SmartString> {
		self.state_names.iter()
			.find(|(_, full)| full.as_str() == name)
			.map(|(abbr, _)| abbr.clone())
	}

	/// Canonical key for a state abbreviation, if the abbreviation is known.
	pub fn state_key(&self, abbr: &str) -> Option<SmartString> {
		self.state_keys.get(&SmartString::from(abbr)).cloned()
	}

	pub fn iso3166_label(&self, code: &str) -> Option<SmartString> {
		self.iso3166.get(&SmartString::from(code)).cloned()
	}
}
