//! Route configuration binding.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use tidemark_document::Item;

use crate::model::{ResourceModel, attributes, str_attr, u32_attr, u32_list_attr};

/// A scheduled transport route between maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_map_id: u32,
    #[serde(default)]
    pub staging_map_id: u32,
    /// Maps traversed between departure and arrival, in travel order.
    #[serde(default)]
    pub en_route_map_ids: Vec<u32>,
    #[serde(default)]
    pub destination_map_id: u32,
    #[serde(default)]
    pub observation_map_id: u32,
    /// Seconds the boarding window stays open each cycle.
    #[serde(default)]
    pub boarding_window_duration: u32,
    #[serde(default)]
    pub pre_departure_duration: u32,
    #[serde(default)]
    pub travel_duration: u32,
    /// Seconds between departures.
    #[serde(default)]
    pub cycle_interval: u32,
}

impl ResourceModel for RouteConfig {
    const RESOURCE: &'static str = "routes";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_item(item: &Item) -> Self {
        let attrs = attributes(item);
        RouteConfig {
            id: item.id.clone(),
            name: str_attr(attrs, "name"),
            start_map_id: u32_attr(attrs, "startMapId"),
            staging_map_id: u32_attr(attrs, "stagingMapId"),
            en_route_map_ids: u32_list_attr(attrs, "enRouteMapIds"),
            destination_map_id: u32_attr(attrs, "destinationMapId"),
            observation_map_id: u32_attr(attrs, "observationMapId"),
            boarding_window_duration: u32_attr(attrs, "boardingWindowDuration"),
            pre_departure_duration: u32_attr(attrs, "preDepartureDuration"),
            travel_duration: u32_attr(attrs, "travelDuration"),
            cycle_interval: u32_attr(attrs, "cycleInterval"),
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
                "startMapId": self.start_map_id,
                "stagingMapId": self.staging_map_id,
                "enRouteMapIds": self.en_route_map_ids,
                "destinationMapId": self.destination_map_id,
                "observationMapId": self.observation_map_id,
                "boardingWindowDuration": self.boarding_window_duration,
                "preDepartureDuration": self.pre_departure_duration,
                "travelDuration": self.travel_duration,
                "cycleInterval": self.cycle_interval,
            }),
        );
        item
    }
}
