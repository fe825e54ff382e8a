use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub mod chat;

pub use chat::{ChatMessage, ChatSession, Sender};

/// Where a listing in the active collection came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Mock,
    Database,
}

/// Geographic position of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Energy efficiency class of the building
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EnergyLabel {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl fmt::Display for EnergyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnergyLabel::APlus => "A+",
            EnergyLabel::A => "A",
            EnergyLabel::B => "B",
            EnergyLabel::C => "C",
            EnergyLabel::D => "D",
            EnergyLabel::E => "E",
            EnergyLabel::F => "F",
            EnergyLabel::G => "G",
            EnergyLabel::H => "H",
        };
        f.write_str(s)
    }
}

/// A single rental unit shown to users.
///
/// Monetary values are whole euros per month (deposit is a one-off amount).
/// `price` is the cold rent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: u64,
    pub title: String,
    pub price: u32,
    pub additional_costs: u32,
    pub deposit: u32,
    pub heating_costs_included: bool,
    pub size: f32,
    pub rooms: f32,
    pub floor: i32,
    pub bedroom_count: Option<u32>,
    pub bathroom_count: Option<u32>,
    pub district: String,
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub coordinates: Coordinates,
    pub listed_on: NaiveDate,
    pub image: String,
    pub gallery: Vec<String>,
    pub description: String,
    pub amenities: BTreeSet<String>,
    pub build_year: Option<u16>,
    pub energy_label: Option<EnergyLabel>,
    pub heating_type: Option<String>,
    pub is_new: bool,
    pub is_verified: bool,
    pub contact_name: String,
    pub origin: Origin,
}

impl Listing {
    /// Monthly rent including running costs
    pub fn warm_rent(&self) -> u32 {
        self.price.saturating_add(self.additional_costs)
    }
}

/// One row of the `wohnungen` table as served by the backend.
///
/// Field names on the wire follow the table's column names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ListingRow {
    pub id: i64,
    #[serde(rename = "adresse")]
    #[sqlx(rename = "adresse")]
    pub address: String,
    #[serde(rename = "stadtteil")]
    #[sqlx(rename = "stadtteil")]
    pub district: Option<String>,
    #[serde(rename = "qm")]
    #[sqlx(rename = "qm")]
    pub area: f64,
    #[serde(rename = "kaltmiete")]
    #[sqlx(rename = "kaltmiete")]
    pub cold_rent: f64,
    #[serde(rename = "warmmiete")]
    #[sqlx(rename = "warmmiete")]
    pub warm_rent: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_label_uses_plain_names_on_the_wire() {
        let json = serde_json::to_string(&EnergyLabel::APlus).unwrap();
        assert_eq!(json, "\"A+\"");
        let parsed: EnergyLabel = serde_json::from_str("\"C\"").unwrap();
        assert_eq!(parsed, EnergyLabel::C);
        assert_eq!(EnergyLabel::APlus.to_string(), "A+");
    }

    #[test]
    fn listing_row_reads_table_column_names() {
        let json = r#"{
            "id": 3,
            "adresse": "Leopoldstraße 5",
            "stadtteil": null,
            "qm": 54.5,
            "kaltmiete": 1240.0,
            "warmmiete": 1490.0,
            "created_at": "2025-10-01T08:30:00Z"
        }"#;
        let row: ListingRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.id, 3);
        assert_eq!(row.address, "Leopoldstraße 5");
        assert!(row.district.is_none());
        assert_eq!(row.warm_rent, Some(1490.0));

        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["kaltmiete"], 1240.0);
        assert!(back.get("cold_rent").is_none());
    }
}
