use chrono::NaiveDate;

use smartstring::alias::{String as SmartString};

use crate::timeseries::DateKey;
use crate::Error;


/// Fixed metadata columns preceding the date columns in the JHU layout:
/// Province/State, Country/Region, Lat, Long.
pub const FIXED_COLUMNS: usize = 4;


/// Splits one raw CSV line into trimmed fields, with commas inside
/// double-quoted spans treated as literal text and the surrounding quotes
/// removed. Returns `None` for a line without any fields (an empty line),
/// which the caller must skip. A leading separator yields a leading empty
/// field so positional alignment with other rows is preserved.
pub fn split_fields(line: &str) -> Option<Vec<String>> {
	if line.is_empty() {
		return None
	}
	let mut fields = Vec::new();
	let mut current = String::new();
	let mut in_quotes = false;
	for ch in line.chars() {
		match ch {
			'"' => {
				in_quotes = !in_quotes;
				current.push(ch);
			},
			',' if !in_quotes => {
				fields.push(std::mem::take(&mut current));
			},
			_ => current.push(ch),
		}
	}
	fields.push(current);
	Some(fields.into_iter().map(|f| clean_field(&f)).collect())
}

fn clean_field(field: &str) -> String {
	let field = field.trim();
	let field = if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
		&field[1..field.len()-1]
	} else {
		field
	};
	field.trim().to_string()
}


/// Decodes the header row into the ordered list of ISO date keys. Each token
/// after the fixed metadata columns is an `M/D/YY` date (no leading zeros)
/// with the two-digit year in the 2000s; the token's position is the
/// positional key into every data row's count columns.
pub fn decode_dates(header: &str) -> Result<Vec<DateKey>, Error> {
	let mut dates = Vec::new();
	for token in header.split(',').skip(FIXED_COLUMNS) {
		let token = token.trim();
		let date = decode_header_date(token)
			.ok_or_else(|| Error::BadDateHeader(token.to_string()))?;
		dates.push(SmartString::from(date.format("%Y-%m-%d").to_string()));
	}
	Ok(dates)
}

// chrono's %y puts 69..=99 into the 1900s; header years always mean 20YY
fn decode_header_date(token: &str) -> Option<NaiveDate> {
	let mut parts = token.splitn(3, '/');
	let month: u32 = parts.next()?.trim().parse().ok()?;
	let day: u32 = parts.next()?.trim().parse().ok()?;
	let year: i32 = parts.next()?.trim().parse().ok()?;
	if year < 0 || year > 99 {
		return None
	}
	NaiveDate::from_ymd_opt(2000 + year, month, day)
}


/// Parses a raw count cell; blank or non-numeric content counts as 0.
pub fn parse_count(raw: &str) -> u64 {
	raw.trim().parse::<u64>().unwrap_or(0)
}


/// One data row of a time-series file: the raw (pre-normalization) province
/// and country strings plus the raw count cells aligned to the decoded dates.
#[derive(Debug, Clone)]
pub struct RawRow {
	pub province: String,
	pub country: String,
	pub counts: Vec<String>,
}

impl RawRow {
	pub fn count(&self, date_index: usize) -> u64 {
		self.counts.get(date_index).map(|s| parse_count(s)).unwrap_or(0)
	}
}


/// A fully parsed time-series file: the decoded date header and the data rows
/// in file order.
#[derive(Debug, Clone)]
pub struct SeriesFile {
	pub dates: Vec<DateKey>,
	pub rows: Vec<RawRow>,
}

pub fn parse_series_file(text: &str) -> Result<SeriesFile, Error> {
	let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
	// split always yields at least one (possibly empty) line
	let header = lines.next().unwrap_or("");
	let dates = decode_dates(header)?;
	if dates.is_empty() {
		return Err(Error::BadDateHeader(header.to_string()))
	}

	let mut rows = Vec::new();
	let mut expected_len = 0usize;
	for line in lines {
		let mut fields = match split_fields(line) {
			Some(f) => f,
			None => continue,
		};
		// row length is validated against the first parsed row, not the header
		if expected_len == 0 {
			expected_len = fields.len();
		} else if fields.len() != expected_len {
			return Err(Error::RowLength{ line: line.to_string() })
		}
		let counts = fields.split_off(FIXED_COLUMNS.min(fields.len()));
		let mut fields = fields.into_iter();
		let province = fields.next().unwrap_or_default();
		let country = fields.next().unwrap_or_default();
		rows.push(RawRow{ province, country, counts });
	}
	Ok(SeriesFile{ dates, rows })
}
