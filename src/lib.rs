use std::fmt;
use std::io;

mod ioutil;
mod jhu;
mod translations;
mod resolve;
mod fixes;
mod timeseries;
mod worldtree;
mod worldmap;

pub use ioutil::{magic_open, read_to_string};
pub use jhu::*;
pub use translations::*;
pub use resolve::*;
pub use fixes::*;
pub use timeseries::*;
pub use worldtree::*;
pub use worldmap::*;


#[derive(Debug)]
pub enum Error {
	Io(io::Error),
	Json(serde_json::Error),
	/// A header token after the fixed metadata columns was not an M/D/YY
	/// date, or the header carries no date columns at all.
	BadDateHeader(String),
	/// A data row's field count differs from the first parsed row of the
	/// same file; carries the offending raw line.
	RowLength{ line: String },
	/// The topology document has no geometry object under the given name.
	MissingMapObject(String),
}

impl fmt::Display for Error {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Io(e) => fmt::Display::fmt(e, f),
			Self::Json(e) => fmt::Display::fmt(e, f),
			Self::BadDateHeader(token) => write!(f, "invalid date column in header: {:?}", token),
			Self::RowLength{ line } => write!(f, "row length mismatch at line: {:?}", line),
			Self::MissingMapObject(name) => write!(f, "no geometry object {:?} in topology document", name),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(e) => Some(e),
			Self::Json(e) => Some(e),
			_ => None,
		}
	}
}

impl From<io::Error> for Error {
	fn from(other: io::Error) -> Self {
		Self::Io(other)
	}
}

impl From<serde_json::Error> for Error {
	fn from(other: serde_json::Error) -> Self {
		Self::Json(other)
	}
}
