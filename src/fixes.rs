use std::collections::HashMap;

use enum_map::{enum_map, EnumMap};

use crate::timeseries::Metric;


// Manual overrides for known defects in the upstream database, see
// https://github.com/CSSEGISandData/COVID-19/issues/833
// Keys are "<country>|<province>|<date>" with the normalized English names.
static CONFIRMED_FIXES: &[(&str, u64)] = &[
	("Italy||2020-03-12", 15113),
	("Spain||2020-03-12", 3146),
	("France|Metropolitan France|2020-03-12", 2876),
	("United Kingdom|United Kingdom|2020-03-12", 590),
	("Germany||2020-03-12", 2745),
	("Argentina||2020-03-12", 19),
	("Australia||2020-03-12", 122), // should fix states
	("Belgium||2020-03-12", 314),
	("Chile||2020-03-12", 23),
	("Colombia||2020-03-12", 9),
	("Greece||2020-03-12", 98),
	("Indonesia||2020-03-12", 34),
	("Ireland||2020-03-12", 43),
	("Japan||2020-03-12", 620),
	("Netherlands||2020-03-12", 503),
	("Qatar||2020-03-12", 262),
	("Singapore||2020-03-12", 178),
	("United Kingdom|United Kingdom|2020-03-15", 1391),
	("France|Metropolitan France|2020-03-15", 5423),
];

static RECOVERED_FIXES: &[(&str, u64)] = &[
	("Italy||2020-03-12", 1258),
	("Spain||2020-03-12", 189),
	("France|Metropolitan France|2020-03-12", 12),
	("Germany||2020-03-12", 25),
];

static DEATH_FIXES: &[(&str, u64)] = &[
	("Italy||2020-03-12", 1016),
	("Spain||2020-03-12", 86),
	("France|Metropolitan France|2020-03-12", 61),
	("Germany||2020-03-12", 6),
	("Argentina||2020-03-12", 1),
	("Australia||2020-03-12", 3), // should fix states
	("Greece||2020-03-12", 1),
	("Indonesia||2020-03-12", 1),
	("Ireland||2020-03-12", 1),
	("Japan||2020-03-12", 15),
	("Netherlands||2020-03-12", 5),
	("Switzerland||2020-03-12", 4),
	("United Kingdom|United Kingdom|2020-03-15", 35),
	("France|Metropolitan France|2020-03-15", 127),
];


/// Per-metric absolute overrides for single (location, date) cells. The
/// corrected value replaces the parsed one outright, so re-running the
/// pipeline over already-corrected output yields the same result.
#[derive(Debug, Clone)]
pub struct Corrections {
	tables: EnumMap<Metric, HashMap<&'static str, u64>>,
}

impl Corrections {
	pub fn builtin() -> Self {
		Self{
			tables: enum_map! {
				Metric::Confirmed => CONFIRMED_FIXES.iter().copied().collect(),
				Metric::Cured => RECOVERED_FIXES.iter().copied().collect(),
				Metric::Dead => DEATH_FIXES.iter().copied().collect(),
			},
		}
	}

	pub fn empty() -> Self {
		Self{
			tables: enum_map! { _ => HashMap::new() },
		}
	}

	pub fn lookup(&self, metric: Metric, country: &str, province: &str, date: &str) -> Option<u64> {
		let key = format!("{}|{}|{}", country, province, date);
		self.tables[metric].get(key.as_str()).copied()
	}

	/// The parsed value unless this exact cell carries an override.
	pub fn apply(&self, metric: Metric, country: &str, province: &str, date: &str, parsed: u64) -> u64 {
		self.lookup(metric, country, province, date).unwrap_or(parsed)
	}
}
