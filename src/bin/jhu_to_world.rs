use std::fs;
use std::path::Path;

use serde_json::Value;

use covid_world::{
	build_series_table, consolidate_china, enrich_map, magic_open, merge_tables,
	parse_series_file, read_to_string, Corrections, Metric, Translations,
	DEFAULT_OBJECT_NAME,
};


// JHU CSSE time-series snapshot layout inside the data directory.
static METRIC_FILES: [(Metric, &str); 3] = [
	(Metric::Confirmed, "time_series_19-covid-Confirmed.csv"),
	(Metric::Cured, "time_series_19-covid-Recovered.csv"),
	(Metric::Dead, "time_series_19-covid-Deaths.csv"),
];


fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	let argv: Vec<String> = std::env::args().collect();
	if argv.len() != 6 {
		eprintln!("usage: {} <data-dir> <translations-dir> <map-file> <world-out> <map-out>", argv[0]);
		std::process::exit(1);
	}
	let data_dir = Path::new(&argv[1]);
	let translations_dir = &argv[2];
	let map_file = &argv[3];
	let world_out = &argv[4];
	let map_out = &argv[5];

	println!("loading translation tables ...");
	let tables = Translations::load(translations_dir)?;
	let fixes = Corrections::builtin();

	let mut series_tables = Vec::with_capacity(METRIC_FILES.len());
	for (metric, filename) in METRIC_FILES.iter() {
		println!("loading {} ...", filename);
		let text = read_to_string(data_dir.join(filename))?;
		let file = parse_series_file(&text)?;
		series_tables.push(build_series_table(&file, *metric, &tables, &fixes));
	}

	println!("crunching ...");
	let world = consolidate_china(merge_tables(series_tables, &tables), &tables);

	println!("annotating map ...");
	let mut map: Value = serde_json::from_reader(magic_open(map_file)?)?;
	enrich_map(&mut map, DEFAULT_OBJECT_NAME, &world, &tables)?;

	// both outputs are written only after the whole pass succeeded
	println!("writing {} ...", world_out);
	serde_json::to_writer(fs::File::create(world_out)?, &world)?;
	println!("writing {} ...", map_out);
	serde_json::to_writer(fs::File::create(map_out)?, &map)?;

	Ok(())
}
