use std::collections::BTreeMap;

use enum_map::{enum_map, EnumMap};

use serde::ser::{Serialize, SerializeMap, Serializer};

use smartstring::alias::{String as SmartString};

use crate::fixes::Corrections;
use crate::jhu::SeriesFile;
use crate::resolve::{resolve, RawPlace};
use crate::timeseries::{Metric, MetricSeries};
use crate::translations::Translations;


/// Canonical (display-language) name keying a country or province entry.
pub type LocationKey = SmartString;


#[derive(Debug, Clone)]
pub struct ProvinceEntry {
	pub english: String,
	pub series: MetricSeries,
}

#[derive(Debug, Clone)]
pub struct CountryEntry {
	pub english: String,
	pub series: MetricSeries,
	pub provinces: BTreeMap<LocationKey, ProvinceEntry>,
}

/// The accumulation tree of a single metric pass: one global series, one
/// entry per country, one sub-entry per province. Owned exclusively by the
/// building pass and handed to the merger by value.
#[derive(Debug, Clone)]
pub struct SeriesTable {
	pub metric: Metric,
	pub global: MetricSeries,
	pub countries: BTreeMap<LocationKey, CountryEntry>,
}

/// Accumulates one parsed time-series file into a per-metric tree.
///
/// Every (possibly corrected) count is added to the global series and to the
/// country series; rows carrying a province additionally feed the province
/// series. Accumulation is additive throughout, a country may receive
/// contributions from many rows.
pub fn build_series_table(
		file: &SeriesFile,
		metric: Metric,
		tables: &Translations,
		fixes: &Corrections,
) -> SeriesTable {
	let mut global = MetricSeries::new();
	let mut countries: BTreeMap<LocationKey, CountryEntry> = BTreeMap::new();
	for row in &file.rows {
		let loc = resolve(&RawPlace::new(&row.province, &row.country), tables);
		let country = countries.entry(loc.country_key.clone()).or_insert_with(|| CountryEntry{
			english: loc.english_country.clone(),
			series: MetricSeries::new(),
			provinces: BTreeMap::new(),
		});
		for (i, date) in file.dates.iter().enumerate() {
			let count = fixes.apply(
				metric,
				&loc.english_country,
				loc.english_province.as_deref().unwrap_or(""),
				date,
				row.count(i),
			);
			global.add(date, count);
			country.series.add(date, count);
			if let Some(key) = &loc.province_key {
				let province = country.provinces.entry(key.clone()).or_insert_with(|| ProvinceEntry{
					english: loc.english_province.clone().unwrap_or_default(),
					series: MetricSeries::new(),
				});
				province.series.add(date, count);
			}
		}
	}
	SeriesTable{ metric, global, countries }
}


/// One node of the merged world tree. A country node's children are its
/// provinces; province nodes have no children. A metric left `None` never
/// appeared in any source tree for this location and is omitted from the
/// output, which is distinct from an empty series.
#[derive(Debug, Clone)]
pub struct LocationNode {
	pub english: String,
	pub counts: EnumMap<Metric, Option<MetricSeries>>,
	pub children: BTreeMap<LocationKey, LocationNode>,
}

impl LocationNode {
	pub fn new<S: Into<String>>(english: S) -> Self {
		Self{
			english: english.into(),
			counts: enum_map! { _ => None },
			children: BTreeMap::new(),
		}
	}

	pub fn series(&self, metric: Metric) -> Option<&MetricSeries> {
		self.counts[metric].as_ref()
	}

	fn set_series(&mut self, metric: Metric, series: MetricSeries) {
		match &mut self.counts[metric] {
			// same metric defined twice should not occur (each table carries
			// a disjoint metric); if it does, the later table wins per date
			Some(existing) => existing.overlay(series),
			slot => *slot = Some(series),
		}
	}
}


/// The merged tree: a synthetic global root whose children are countries.
#[derive(Debug, Clone)]
pub struct WorldTree {
	pub global_key: LocationKey,
	pub root: LocationNode,
}

impl WorldTree {
	/// Whether `key` addresses an entity of the world document (the global
	/// entry or a top-level country).
	pub fn contains(&self, key: &LocationKey) -> bool {
		*key == self.global_key || self.root.children.contains_key(key)
	}

	pub fn country(&self, key: &str) -> Option<&LocationNode> {
		self.root.children.get(&LocationKey::from(key))
	}
}

/// Deep-merges per-metric trees into one world tree, matched by location
/// path. Node names are taken from whichever table defines a location first;
/// metric series are unioned.
pub fn merge_tables(tables: Vec<SeriesTable>, translations: &Translations) -> WorldTree {
	let mut root = LocationNode::new("Global");
	for table in tables {
		root.set_series(table.metric, table.global);
		for (key, country) in table.countries {
			let node = root.children.entry(key)
				.or_insert_with(|| LocationNode::new(country.english.clone()));
			node.set_series(table.metric, country.series);
			for (province_key, province) in country.provinces {
				let child = node.children.entry(province_key)
					.or_insert_with(|| LocationNode::new(province.english.clone()));
				child.set_series(table.metric, province.series);
			}
		}
	}
	WorldTree{
		global_key: translations.global_key(),
		root,
	}
}


/// The sub-regions folded into the consolidated China entity.
pub const CHINESE_SUBREGIONS: [&str; 4] = ["Mainland China", "Hong Kong", "Macau", "Taiwan"];

/// Folds the four Chinese sub-regions into one "China" country node whose
/// per-date totals are the sum over the sub-regions (absent entries counting
/// as 0). Mainland China is re-attached as a child of that node; Hong Kong,
/// Macau and Taiwan keep no addressable entry of their own afterwards.
pub fn consolidate_china(mut tree: WorldTree, tables: &Translations) -> WorldTree {
	let china_key = tables.china_key();
	let mainland_key = tables.key_for("Mainland China");

	let mut china = tree.root.children.remove(&china_key)
		.unwrap_or_else(|| LocationNode::new("China"));
	china.english = "China".to_string();

	// sub-regions live either at the top level (Mainland China) or as
	// provinces of the China node (Hong Kong, Macau, Taiwan)
	let mut regions = Vec::new();
	for name in &CHINESE_SUBREGIONS {
		let key = tables.key_for(name);
		let node = tree.root.children.remove(&key)
			.or_else(|| china.children.remove(&key));
		if let Some(node) = node {
			regions.push((key, node));
		}
	}

	for metric in Metric::ALL.iter() {
		let mut sum = MetricSeries::new();
		for (_, node) in &regions {
			if let Some(series) = node.series(*metric) {
				sum.add_series(series);
			}
		}
		china.counts[*metric] = Some(sum);
	}

	for (key, node) in regions {
		if key == mainland_key {
			china.children.insert(key, node);
		}
	}

	tree.root.children.insert(china_key, china);
	tree
}


struct NodeView<'x> {
	node: &'x LocationNode,
	with_children: bool,
}

impl<'x> Serialize for NodeView<'x> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(None)?;
		map.serialize_entry("ENGLISH", &self.node.english)?;
		for metric in Metric::ALL.iter() {
			if let Some(series) = self.node.series(*metric) {
				map.serialize_entry(metric.field_name(), series)?;
			}
		}
		if self.with_children {
			for (key, child) in &self.node.children {
				map.serialize_entry(key, &NodeView{ node: child, with_children: true })?;
			}
		}
		map.end()
	}
}

impl Serialize for WorldTree {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.root.children.len() + 1))?;
		map.serialize_entry(&self.global_key, &NodeView{ node: &self.root, with_children: false })?;
		for (key, node) in &self.root.children {
			map.serialize_entry(key, &NodeView{ node, with_children: true })?;
		}
		map.end()
	}
}
