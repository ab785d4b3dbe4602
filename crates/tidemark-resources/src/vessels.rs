//! Vessel configuration binding.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use tidemark_document::Item;

use crate::model::{ResourceModel, attributes, str_attr, u32_attr};

/// A vessel shuttling between two routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Outbound route id.
    #[serde(default, rename = "routeAID")]
    pub route_a_id: String,
    /// Return route id.
    #[serde(default, rename = "routeBID")]
    pub route_b_id: String,
    /// Seconds the vessel waits before starting the return leg.
    #[serde(default)]
    pub turnaround_delay: u32,
}

impl ResourceModel for VesselConfig {
    const RESOURCE: &'static str = "vessels";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_item(item: &Item) -> Self {
        let attrs = attributes(item);
        VesselConfig {
            id: item.id.clone(),
            name: str_attr(attrs, "name"),
            route_a_id: str_attr(attrs, "routeAID"),
            route_b_id: str_attr(attrs, "routeBID"),
            turnaround_delay: u32_attr(attrs, "turnaroundDelay"),
        }
    }

    fn into_item(self) -> Item {
        let mut item = Item::new(self.id);
        item.fields
            .insert("type".to_string(), Value::String(Self::RESOURCE.to_string()));
        item.fields.insert(
            "attributes".to_string(),
            json!({
                "name": self.name,
                "routeAID": self.route_a_id,
                "routeBID": self.route_b_id,
                "turnaroundDelay": self.turnaround_delay,
            }),
        );
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> VesselConfig {
        VesselConfig {
            id: "glutton".to_string(),
            name: "The Glutton".to_string(),
            route_a_id: "ellinia-orbis".to_string(),
            route_b_id: "orbis-ellinia".to_string(),
            turnaround_delay: 120,
        }
    }

    #[test]
    fn item_round_trip() {
        let config = sample();
        let item = config.clone().into_item();

        assert_eq!(item.id, "glutton");
        assert_eq!(VesselConfig::from_item(&item), config);
    }

    #[test]
    fn missing_attributes_coerce_to_defaults() {
        let item = Item::from_value(json!({"id": "v1"})).unwrap();
        let config = VesselConfig::from_item(&item);

        assert_eq!(config.route_a_id, "");
        assert_eq!(config.turnaround_delay, 0);
    }

    #[test]
    fn route_id_wire_names_keep_legacy_casing() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("routeAID").is_some());
        assert!(value.get("routeBID").is_some());
        assert!(value.get("turnaroundDelay").is_some());
    }
}
