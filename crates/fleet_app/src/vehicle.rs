use fleet_engine::RawRecord;
use fleet_logging::fleet_debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display row for one vehicle in the fleet table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleRow {
    pub id: String,
    pub plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub seats: Option<u32>,
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawVehicle {
    id: Value,
    #[serde(default)]
    info: RawInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInfo {
    brand: Option<String>,
    model: Option<String>,
    plate_number: Option<String>,
    seats: Option<Value>,
    availability_status: Option<String>,
}

/// Maps a backend vehicle record. Records without a usable id are rejected.
pub fn map_vehicle(raw: &RawRecord) -> Option<VehicleRow> {
    let vehicle = match RawVehicle::deserialize(raw) {
        Ok(vehicle) => vehicle,
        Err(err) => {
            fleet_debug!("Unmappable vehicle record: {}", err);
            return None;
        }
    };

    let id = match vehicle.id {
        Value::String(id) if !id.trim().is_empty() => id,
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    let info = vehicle.info;

    Some(VehicleRow {
        id,
        plate: info.plate_number,
        brand: info.brand,
        model: info.model,
        seats: info.seats.as_ref().and_then(seat_count),
        available: info.availability_status.as_deref().and_then(availability),
    })
}

fn seat_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn availability(status: &str) -> Option<bool> {
    match status.to_ascii_lowercase().as_str() {
        "available" => Some(true),
        "unavailable" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{map_vehicle, VehicleRow};

    #[test]
    fn maps_nested_info_fields() {
        let raw = json!({
            "id": 17,
            "info": {
                "brand": "Toyota",
                "model": "Yaris",
                "plateNumber": "AB-123-CD",
                "seats": "5",
                "availabilityStatus": "available"
            }
        });

        assert_eq!(
            map_vehicle(&raw),
            Some(VehicleRow {
                id: "17".to_string(),
                plate: Some("AB-123-CD".to_string()),
                brand: Some("Toyota".to_string()),
                model: Some("Yaris".to_string()),
                seats: Some(5),
                available: Some(true),
            })
        );
    }

    #[test]
    fn missing_info_is_tolerated() {
        let row = map_vehicle(&json!({"id": "v-1"})).unwrap();
        assert_eq!(row.id, "v-1");
        assert!(row.brand.is_none());
        assert!(row.available.is_none());
    }

    #[test]
    fn records_without_id_are_rejected() {
        assert!(map_vehicle(&json!({"info": {"brand": "Kia"}})).is_none());
        assert!(map_vehicle(&json!({"id": "  "})).is_none());
        assert!(map_vehicle(&json!({"id": null})).is_none());
        assert!(map_vehicle(&json!(["not", "an", "object"])).is_none());
    }
}
