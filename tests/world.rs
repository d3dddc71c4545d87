use covid_world::{
	build_series_table, consolidate_china, enrich_map, merge_tables,
	parse_series_file, Corrections, LocationKey, Metric, Translations,
	DEFAULT_OBJECT_NAME,
};

use serde_json::Value;


fn tables() -> Translations {
	Translations::from_parts(
		&[
			("Global", "全球"),
			("China", "中国"),
			("Mainland China", "中国大陆"),
			("Hong Kong", "香港"),
			("Taiwan", "台湾"),
			("Hubei", "湖北"),
			("United States of America", "美国"),
			("Italy", "意大利"),
			("International Conveyance", "国际运输"),
			("Diamond Princess", "钻石公主号"),
		],
		&[("CA", "California"), ("WA", "Washington")],
		&[("CA", "加利福尼亚州"), ("WA", "华盛顿州")],
		&[("DEU", "德国")],
	)
}

static HEADER: &str = "Province/State,Country/Region,Lat,Long,3/11/20,3/12/20";

fn series(rows: &str) -> String {
	format!("{}\n{}", HEADER, rows)
}

#[test]
fn full_pipeline() {
	let confirmed = series(
		"Hubei,China,30.9,112.2,100,110\n\
		Hong Kong,China,22.3,114.2,10,11\n\
		,Taiwan*,23.7,121.0,5,6\n\
		\"California, CA\",US,36.1,-119.7,3,4\n\
		Washington,US,47.4,-121.5,2,2\n\
		,Italy,43.0,12.0,9999,9999\n\
		Diamond Princess,Cruise Ship,35.4,139.6,7,7\n",
	);
	let cured = series(",Italy,43.0,12.0,1,2\n");
	let dead = series("Hubei,China,30.9,112.2,4,5\n");

	let t = tables();
	let fixes = Corrections::builtin();
	let mut built = Vec::new();
	for (metric, text) in [
		(Metric::Confirmed, &confirmed),
		(Metric::Cured, &cured),
		(Metric::Dead, &dead),
	].iter() {
		let file = parse_series_file(text).unwrap();
		built.push(build_series_table(&file, *metric, &t, &fixes));
	}
	let world = consolidate_china(merge_tables(built, &t), &t);

	// Italy's 2020-03-12 value is the curated override, not the parsed 9999
	let italy = world.country("意大利").unwrap();
	assert_eq!(italy.series(Metric::Confirmed).unwrap().get("2020-03-12"), Some(15113));
	assert_eq!(italy.series(Metric::Confirmed).unwrap().get("2020-03-11"), Some(9999));
	// the recovered table has its own independent override for the same cell
	assert_eq!(italy.series(Metric::Cured).unwrap().get("2020-03-12"), Some(1258));
	assert_eq!(italy.series(Metric::Cured).unwrap().get("2020-03-11"), Some(1));

	// China consolidates Mainland China, Hong Kong and Taiwan
	let china = world.country("中国").unwrap();
	assert_eq!(china.series(Metric::Confirmed).unwrap().get("2020-03-11"), Some(115));
	assert_eq!(china.series(Metric::Dead).unwrap().get("2020-03-11"), Some(4));
	let mainland = &china.children[&LocationKey::from("中国大陆")];
	assert_eq!(mainland.series(Metric::Confirmed).unwrap().get("2020-03-11"), Some(100));
	assert!(world.country("中国大陆").is_none());
	assert!(world.country("香港").is_none());
	assert!(world.country("台湾").is_none());

	// US rows land on canonical state keys under the translated country
	let us = world.country("美国").unwrap();
	assert_eq!(us.series(Metric::Confirmed).unwrap().get("2020-03-11"), Some(5));
	assert_eq!(us.children[&LocationKey::from("加利福尼亚州")].series(Metric::Confirmed).unwrap().get("2020-03-11"), Some(3));
	assert_eq!(us.children[&LocationKey::from("华盛顿州")].series(Metric::Confirmed).unwrap().get("2020-03-11"), Some(2));

	// cruise ship rows become International Conveyance / Diamond Princess
	let conveyance = world.country("国际运输").unwrap();
	assert_eq!(conveyance.english, "International Conveyance");
	assert_eq!(conveyance.children[&LocationKey::from("钻石公主号")].english, "Diamond Princess");

	// the global root sums every row of every metric
	assert_eq!(world.root.series(Metric::Confirmed).unwrap().get("2020-03-11"), Some(100 + 10 + 5 + 3 + 2 + 9999 + 7));
	assert_eq!(world.root.series(Metric::Cured).unwrap().get("2020-03-11"), Some(1));

	// world document: global entry plus one entry per country
	let doc = serde_json::to_value(&world).unwrap();
	let doc = doc.as_object().unwrap();
	assert!(doc.contains_key("全球"));
	assert!(doc.contains_key("中国"));
	assert!(!doc.contains_key("中国大陆"));
	assert_eq!(doc["美国"]["加利福尼亚州"]["ENGLISH"], "California, CA");

	// map enrichment joins geometry to the consolidated tree
	let mut map = serde_json::json!({
		"type": "Topology",
		"objects": {
			"ne_50m_admin_0_countries": {
				"type": "GeometryCollection",
				"geometries": [
					{"type": "MultiPolygon", "properties": {"NAME": "Taiwan", "ISO_A3": "TWN"}},
					{"type": "MultiPolygon", "properties": {"NAME": "Italy", "ISO_A3": "ITA"}},
					{"type": "MultiPolygon", "properties": {"NAME": "Germany", "ISO_A3": "DEU"}},
				],
			},
		},
	});
	enrich_map(&mut map, DEFAULT_OBJECT_NAME, &world, &t).unwrap();
	let geometries = map["objects"][DEFAULT_OBJECT_NAME]["geometries"].as_array().unwrap();
	assert_eq!(geometries[0]["properties"]["NAME"], "China");
	assert_eq!(geometries[0]["properties"]["REGION"], "中国");
	assert_eq!(geometries[1]["properties"]["REGION"], "意大利");
	// Germany has no case data in this fixture; it gets the ISO label only
	assert_eq!(geometries[2]["properties"]["CHINESE_NAME"], "德国");
	assert!(geometries[2]["properties"].get("REGION").is_none());
}

#[test]
fn rerunning_the_pipeline_is_idempotent_for_corrections() {
	let text = series(",Italy,43.0,12.0,9999,15113\n");
	let t = tables();
	let file = parse_series_file(&text).unwrap();
	let first = build_series_table(&file, Metric::Confirmed, &t, &Corrections::builtin());
	let second = build_series_table(&file, Metric::Confirmed, &t, &Corrections::builtin());
	let a = first.countries[&LocationKey::from("意大利")].series.clone();
	let b = second.countries[&LocationKey::from("意大利")].series.clone();
	assert_eq!(a, b);
	assert_eq!(a.get("2020-03-12"), Some(15113));
}

#[test]
fn mismatched_rows_abort_the_run() {
	let text = series(
		",Italy,43.0,12.0,1,2\n\
		,France,46.2,2.2,1\n",
	);
	match parse_series_file(&text) {
		Err(covid_world::Error::RowLength{ line }) => assert!(line.contains("France")),
		other => panic!("unexpected result: {:?}", other),
	}
}

#[test]
fn quoted_fields_survive_end_to_end() {
	let text = series("\"King County, WA\",US,47.5,-121.8,8,9\n");
	let t = tables();
	let file = parse_series_file(&text).unwrap();
	assert_eq!(file.rows[0].province, "King County, WA");
	let table = build_series_table(&file, Metric::Confirmed, &t, &Corrections::empty());
	let us = &table.countries[&LocationKey::from("美国")];
	assert_eq!(us.provinces[&LocationKey::from("华盛顿州")].series.get("2020-03-11"), Some(8));
}

#[test]
fn enrich_fails_cleanly_on_unexpected_topology() {
	let t = tables();
	let world = consolidate_china(merge_tables(Vec::new(), &t), &t);
	let mut map = serde_json::json!({"type": "Topology", "objects": {}});
	assert!(enrich_map(&mut map, DEFAULT_OBJECT_NAME, &world, &t).is_err());
	// a Value that is not even an object
	let mut map = Value::Null;
	assert!(enrich_map(&mut map, DEFAULT_OBJECT_NAME, &world, &t).is_err());
}
