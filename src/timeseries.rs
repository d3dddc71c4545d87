use std::collections::BTreeMap;
use std::fmt;

use enum_map::Enum;

use serde::Serialize;

use smartstring::alias::{String as SmartString};


/// Date key of a series entry, always `YYYY-MM-DD`.
pub type DateKey = SmartString;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum Metric {
	Confirmed,
	Cured,
	Dead,
}

impl Metric {
	pub const ALL: [Metric; 3] = [Metric::Confirmed, Metric::Cured, Metric::Dead];

	/// Attribute name under which the series appears in the world document.
	pub fn field_name(&self) -> &'static str {
		match self {
			Self::Confirmed => "confirmedCount",
			Self::Cured => "curedCount",
			Self::Dead => "deadCount",
		}
	}
}

impl fmt::Display for Metric {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.field_name())
	}
}


/// Cumulative counts of one metric at one location, keyed by ISO date.
///
/// ISO keys sort chronologically, so the ordered map doubles as the
/// chronological view without carrying a separate date index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetricSeries(BTreeMap<DateKey, u64>);

impl MetricSeries {
	pub fn new() -> Self {
		Self(BTreeMap::new())
	}

	pub fn add(&mut self, date: &DateKey, count: u64) {
		*self.0.entry(date.clone()).or_insert(0) += count;
	}

	pub fn get(&self, date: &str) -> Option<u64> {
		self.0.get(&DateKey::from(date)).copied()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> std::collections::btree_map::Iter<'_, DateKey, u64> {
		self.0.iter()
	}

	/// Per-date sum of `self` and `other`; dates absent on one side count as 0.
	pub fn add_series(&mut self, other: &MetricSeries) {
		for (date, count) in other.iter() {
			self.add(date, *count);
		}
	}

	/// Union by date, entries of `other` replacing existing ones.
	pub fn overlay(&mut self, other: MetricSeries) {
		for (date, count) in other.0 {
			self.0.insert(date, count);
		}
	}
}
