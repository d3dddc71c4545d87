use serde_json::Value;

use smartstring::alias::{String as SmartString};

use crate::translations::Translations;
use crate::worldtree::WorldTree;
use crate::Error;


/// Object holding the country geometries in the upstream topology file.
pub const DEFAULT_OBJECT_NAME: &str = "ne_50m_admin_0_countries";

// Display-name variants in the topology that have to be rewritten before the
// translation lookup lines up with the case data.
static NAME_VARIANTS: &[(&str, &str)] = &[
	("Macedonia", "North Macedonia"),
	("Dominican Rep.", "Dominican Republic"),
	("Dem. Rep. Congo", "Congo (Kinshasa)"),
];


/// Annotates every geometry of the named topology object with its canonical
/// key. Geometries whose key addresses an entity of the world tree get a
/// `REGION` property pointing at it; the rest keep only a display-language
/// `CHINESE_NAME`, taken from the ISO-3166 label table where possible.
///
/// Hong Kong, Macau and Taiwan are rendered and keyed as part of China,
/// independent of how the case-data tree nests them.
pub fn enrich_map(
		map: &mut Value,
		object_name: &str,
		world: &WorldTree,
		tables: &Translations,
) -> Result<(), Error> {
	let geometries = map.get_mut("objects")
		.and_then(|objects| objects.get_mut(object_name))
		.and_then(|object| object.get_mut("geometries"))
		.and_then(Value::as_array_mut)
		.ok_or_else(|| Error::MissingMapObject(object_name.to_string()))?;

	let china_key = tables.china_key();
	let subregion_keys: Vec<SmartString> = ["Hong Kong", "Macau", "Taiwan"].iter()
		.map(|name| tables.key_for(name))
		.collect();

	for geo in geometries.iter_mut() {
		let props = match geo.get_mut("properties").and_then(Value::as_object_mut) {
			Some(props) => props,
			None => {
				log::warn!("geometry without properties in {:?}", object_name);
				continue
			},
		};
		let raw_name = match props.get("NAME").and_then(Value::as_str) {
			Some(name) => name.to_string(),
			None => {
				log::warn!("geometry without NAME in {:?}", object_name);
				continue
			},
		};

		let mut name = NAME_VARIANTS.iter()
			.find(|(variant, _)| *variant == raw_name)
			.map(|(_, canonical)| canonical.to_string())
			.unwrap_or(raw_name);
		let mut key = tables.key_for(&name);
		if subregion_keys.contains(&key) {
			key = china_key.clone();
			name = "China".to_string();
		}

		props.insert("NAME".to_string(), Value::String(name));
		props.insert("CHINESE_NAME".to_string(), Value::String(key.to_string()));

		if world.contains(&key) {
			props.insert("REGION".to_string(), Value::String(key.to_string()));
		} else {
			// no case-data coverage; label the geometry from the ISO table
			let code = props.get("ISO_A3").and_then(Value::as_str).unwrap_or("");
			if let Some(label) = tables.iso3166_label(code) {
				props.insert("CHINESE_NAME".to_string(), Value::String(label.to_string()));
			}
		}
	}
	Ok(())
}
