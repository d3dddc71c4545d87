use std::io;
use std::io::Read;
use std::fs;
use std::path::Path;

use flate2;


pub fn magic_open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn Read>> {
	let path = path.as_ref();
	match path.extension() {
		Some(x) if x == "gz" => {
			Ok(Box::new(flate2::read::GzDecoder::new(fs::File::open(path)?)))
		},
		_ => Ok(Box::new(fs::File::open(path)?)),
	}
}


pub fn read_to_string<P: AsRef<Path>>(path: P) -> io::Result<String> {
	let mut buf = String::new();
	magic_open(path)?.read_to_string(&mut buf)?;
	Ok(buf)
}
