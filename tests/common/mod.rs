//! Shared helpers for the integration tests.

#![allow(dead_code)]

use causal_atlas::graph::{GraphDataset, GraphStore};
use serde_json::{Value, json};

/// The store built from the dataset bundled with the app.
pub fn bundled_store() -> GraphStore {
	let dataset = causal_atlas::bundled_dataset().expect("bundled dataset decodes");
	GraphStore::new(dataset).expect("bundled dataset has unique ids")
}

pub fn macro_json(id: &str) -> Value {
	json!({
		"id": id,
		"name": id,
		"nameEn": id,
		"type": "macro",
		"category": "indicator",
		"region": "Global",
		"unit": "%"
	})
}

pub fn sector_json(id: &str) -> Value {
	json!({ "id": id, "name": id, "type": "sector" })
}

pub fn company_json(id: &str, sector_id: &str) -> Value {
	json!({
		"id": id,
		"name": id,
		"type": "company",
		"ticker": id.to_uppercase(),
		"market": "KOSPI",
		"sectorId": sector_id,
		"financials": {
			"marketCap": 1.0e13, "per": 10.0, "pbr": 1.0, "roe": 10.0,
			"operatingMargin": 10.0, "debtRatio": 50.0,
			"dividendYield": 2.0, "return52w": 12.0
		}
	})
}

pub fn theme_json(id: &str, tiers: &[(u32, Vec<String>)]) -> Value {
	let tiers: Vec<Value> = tiers
		.iter()
		.map(|(tier, nodes)| json!({ "tier": tier, "name": format!("t{tier}"), "nodes": nodes }))
		.collect();
	json!({ "id": id, "name": id, "type": "theme", "tiers": tiers })
}

pub fn causal_json(id: &str, source: &str, target: &str, direction: &str, strength: &str) -> Value {
	json!({
		"id": id,
		"source": source,
		"target": target,
		"type": "causal",
		"direction": direction,
		"strength": strength,
		"mechanism": format!("{source} drives {target}")
	})
}

pub fn store_from(document: Value) -> GraphStore {
	let dataset = GraphDataset::from_json(&document.to_string()).expect("test dataset decodes");
	GraphStore::new(dataset).expect("test dataset has unique ids")
}
