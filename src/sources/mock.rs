use crate::models::{Coordinates, EnergyLabel, Listing, Origin};
use crate::sources::districts::{center_of, districts};
use crate::sources::traits::ListingSource;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// First id handed out to generated offers
const GENERATED_ID_START: u64 = 100;

/// Districts where generated offers start from the higher base rent
const EXPENSIVE_DISTRICTS: &[&str] = &["Bogenhausen", "Altstadt-Lehel", "Schwabing"];

/// Interior and exterior shots used for generated offers
const IMAGE_POOL: &[&str] = &[
    "https://images.unsplash.com/photo-1600596542815-3ad19e6f67e9?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1600566753190-17f0baa2a6c3?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1600210492486-724fe5c67fb0?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1600566752355-35792bedcfe1?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1600585154526-990dced4db0d?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1583608205776-bfd35f0d9f83?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1560185127-6ed189bf02f4?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1560185007-cde436f6a4d0?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1560184897-ae75f418493e?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1554995207-c18c203602cb?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1502005229762-cf1b2da7c5d6?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1484154218962-a1c002085d2f?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1513584681774-9e412fdd5201?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1493809842364-78817add7ffb?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1505691938895-1758d7feb511?auto=format&fit=crop&w=800&q=80",
];

/// Amenities a landlord can tick when creating a listing
pub const AMENITIES: &[&str] = &[
    "Einbauküche",
    "Balkon / Terrasse",
    "Garten / -mitbenutzung",
    "Keller",
    "Aufzug",
    "Stufenloser Zugang",
    "Gäste-WC",
    "Fußbodenheizung",
    "Garage / Stellplatz",
    "Möbliert / Teilmöbliert",
];

/// In-memory listing collection: hand-written offers plus one generated
/// offer for every district that has none.
pub struct MockCatalog {
    listings: Vec<Listing>,
}

impl MockCatalog {
    /// Build the catalog with a thread-local random generator
    pub fn new() -> Self {
        Self::with_rng(&mut rand::thread_rng())
    }

    /// Build the catalog from the given generator; seed it for reproducible data
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let listings = generate_offers(rng);
        info!("📋 Mock catalog holds {} offers", listings.len());
        Self { listings }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn into_listings(self) -> Vec<Listing> {
        self.listings
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingSource for MockCatalog {
    async fn fetch(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.clone())
    }

    fn source_name(&self) -> &'static str {
        "Mock"
    }
}

/// The offer whose details fill the gaps when mapping database rows
pub fn template_offer() -> Listing {
    let mut offers = manual_offers();
    offers.swap_remove(0)
}

fn generate_offers<R: Rng + ?Sized>(rng: &mut R) -> Vec<Listing> {
    let mut offers = manual_offers();
    let mut next_id = GENERATED_ID_START;

    for district in districts() {
        if offers.iter().any(|o| o.district == district) {
            continue;
        }
        let Some(center) = center_of(district) else {
            continue;
        };

        debug!("Generating offer for {}", district);

        let expensive = EXPENSIVE_DISTRICTS.iter().any(|d| district.contains(d));
        let base_price: u32 = if expensive { 1800 } else { 1100 };
        let rooms: u32 = rng.gen_range(2..=4);
        let size = rooms * 25 + rng.gen_range(0..20);

        let mut images: Vec<String> = IMAGE_POOL
            .choose_multiple(rng, 5)
            .map(|url| url.to_string())
            .collect();
        let image = images.remove(0);

        offers.push(Listing {
            id: next_id,
            title: format!("{}-Zimmer Wohnung in {}", rooms, district),
            price: base_price + rng.gen_range(0..500),
            additional_costs: 200,
            deposit: (base_price + 500) * 3,
            heating_costs_included: rng.gen_bool(0.5),
            size: size as f32,
            rooms: rooms as f32,
            floor: rng.gen_range(0..5),
            bedroom_count: None,
            bathroom_count: None,
            district: district.to_string(),
            street: Some("Musterstraße".to_string()),
            zip_code: Some("80000".to_string()),
            coordinates: jitter(center, rng),
            listed_on: date(2025, 10, 12),
            image,
            gallery: images,
            description: format!(
                "Schöne, helle Wohnung in ruhiger Lage von {}. Gute Anbindung an den ÖPNV. Ideal für Singles oder Paare.",
                district
            ),
            amenities: amenities(&["Keller", "Einbauküche"]),
            build_year: Some(rng.gen_range(1990..2020)),
            energy_label: Some(if rng.gen_bool(0.5) { EnergyLabel::C } else { EnergyLabel::B }),
            heating_type: None,
            is_new: false,
            is_verified: false,
            contact_name: "MietRadar Agentur".to_string(),
            origin: Origin::Mock,
        });
        next_id += 1;
    }

    offers
}

/// Move a point up to half a hundredth of a degree in each direction
pub(crate) fn jitter<R: Rng + ?Sized>(center: Coordinates, rng: &mut R) -> Coordinates {
    Coordinates {
        lat: center.lat + (rng.gen::<f64>() - 0.5) * 0.01,
        lng: center.lng + (rng.gen::<f64>() - 0.5) * 0.01,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn amenities(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn manual_offers() -> Vec<Listing> {
    vec![
        Listing {
            id: 1,
            title: "Lichtdurchfluteter Altbau nahe Hohenzollernplatz".to_string(),
            price: 1350,
            additional_costs: 200,
            deposit: 4050,
            heating_costs_included: false,
            size: 48.0,
            rooms: 2.0,
            floor: 3,
            bedroom_count: Some(1),
            bathroom_count: Some(1),
            district: "Schwabing-West".to_string(),
            street: Some("Tengstraße 12".to_string()),
            zip_code: Some("80798".to_string()),
            coordinates: Coordinates::new(48.161, 11.570),
            listed_on: date(2025, 10, 8),
            image: "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?auto=format&fit=crop&w=800&q=80".to_string(),
            gallery: urls(&[
                "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?auto=format&fit=crop&w=800&q=80",
                "https://images.unsplash.com/photo-1484154218962-a1c002085d2f?auto=format&fit=crop&w=800&q=80",
                "https://images.unsplash.com/photo-1554995207-c18c203602cb?auto=format&fit=crop&w=800&q=80",
            ]),
            description: "Diese wunderschöne Altbauwohnung besticht durch hohe Decken, originalen Fischgrätparkett und große Fenster. Die Lage in Schwabing-West ist exzellent.".to_string(),
            amenities: amenities(&["Balkon / Terrasse", "Einbauküche", "Keller", "Aufzug"]),
            build_year: Some(1910),
            energy_label: Some(EnergyLabel::C),
            heating_type: Some("Fernwärme".to_string()),
            is_new: false,
            is_verified: true,
            contact_name: "Anna Müller".to_string(),
            origin: Origin::Mock,
        },
        Listing {
            id: 2,
            title: "Modernes 3-Zi Loft, Balkon, U2 Josephsburg".to_string(),
            price: 1750,
            additional_costs: 250,
            deposit: 5250,
            heating_costs_included: true,
            size: 72.0,
            rooms: 3.0,
            floor: 1,
            bedroom_count: Some(2),
            bathroom_count: Some(1),
            district: "Au-Haidhausen".to_string(),
            street: None,
            zip_code: None,
            coordinates: Coordinates::new(48.128, 11.600),
            listed_on: date(2025, 10, 9),
            image: "https://images.unsplash.com/photo-1505693314120-0d443867891c?auto=format&fit=crop&w=800&q=80".to_string(),
            gallery: urls(&[
                "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?auto=format&fit=crop&w=800&q=80",
                "https://images.unsplash.com/photo-1560185007-cde436f6a4d0?auto=format&fit=crop&w=800&q=80",
            ]),
            description: "Erstbezug nach Sanierung! Dieses Loft bietet urbanes Wohnen pur.".to_string(),
            amenities: amenities(&["Balkon / Terrasse", "Fußbodenheizung", "Stufenloser Zugang", "Garage / Stellplatz"]),
            build_year: Some(2018),
            energy_label: Some(EnergyLabel::A),
            heating_type: Some("Wärmepumpe".to_string()),
            is_new: true,
            is_verified: false,
            contact_name: "Immobilien Schmidt".to_string(),
            origin: Origin::Mock,
        },
        Listing {
            id: 3,
            title: "Exklusives Studio in der Maxvorstadt".to_string(),
            price: 990,
            additional_costs: 150,
            deposit: 2970,
            heating_costs_included: true,
            size: 30.0,
            rooms: 1.5,
            floor: 4,
            bedroom_count: None,
            bathroom_count: None,
            district: "Maxvorstadt".to_string(),
            street: None,
            zip_code: None,
            coordinates: Coordinates::new(48.149, 11.560),
            listed_on: date(2025, 10, 7),
            image: "https://images.unsplash.com/photo-1536376072261-38c75010e6c9?auto=format&fit=crop&w=800&q=80".to_string(),
            gallery: urls(&[
                "https://images.unsplash.com/photo-1505691938895-1758d7feb511?auto=format&fit=crop&w=800&q=80",
                "https://images.unsplash.com/photo-1494526585095-c41746248156?auto=format&fit=crop&w=800&q=80",
            ]),
            description: "Perfekt für Studenten oder Young Professionals. Mitten im Universitätsviertel gelegen.".to_string(),
            amenities: amenities(&["Möbliert / Teilmöbliert", "Einbauküche"]),
            build_year: Some(1970),
            energy_label: Some(EnergyLabel::D),
            heating_type: Some("Zentralheizung".to_string()),
            is_new: false,
            is_verified: false,
            contact_name: "Markus Weber".to_string(),
            origin: Origin::Mock,
        },
        Listing {
            id: 4,
            title: "Penthouse mit Alpenblick in Sendling".to_string(),
            price: 2200,
            additional_costs: 350,
            deposit: 6600,
            heating_costs_included: false,
            size: 96.0,
            rooms: 4.0,
            floor: 6,
            bedroom_count: None,
            bathroom_count: Some(2),
            district: "Sendling".to_string(),
            street: None,
            zip_code: None,
            coordinates: Coordinates::new(48.115, 11.545),
            listed_on: date(2025, 10, 8),
            image: "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?auto=format&fit=crop&w=800&q=80".to_string(),
            gallery: urls(&[
                "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?auto=format&fit=crop&w=800&q=80",
                "https://images.unsplash.com/photo-1595526114035-0d45ed16cfbf?auto=format&fit=crop&w=800&q=80",
            ]),
            description: "Einmalige Gelegenheit: Penthouse über den Dächern von Sendling.".to_string(),
            amenities: amenities(&["Balkon / Terrasse", "Aufzug", "Gäste-WC", "Garage / Stellplatz"]),
            build_year: Some(2021),
            energy_label: Some(EnergyLabel::APlus),
            heating_type: Some("Wärmepumpe".to_string()),
            is_new: true,
            is_verified: true,
            contact_name: "Dr. Peters".to_string(),
            origin: Origin::Mock,
        },
        Listing {
            id: 7,
            title: "Luxus pur: Altbau im Lehel".to_string(),
            price: 2800,
            additional_costs: 300,
            deposit: 8400,
            heating_costs_included: false,
            size: 110.0,
            rooms: 3.0,
            floor: 2,
            bedroom_count: None,
            bathroom_count: None,
            district: "Altstadt-Lehel".to_string(),
            street: None,
            zip_code: None,
            coordinates: Coordinates::new(48.140, 11.585),
            listed_on: date(2025, 10, 11),
            image: "https://images.unsplash.com/photo-1600210492486-724fe5c67fb0?auto=format&fit=crop&w=800&q=80".to_string(),
            gallery: urls(&[
                "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?auto=format&fit=crop&w=800&q=80",
                "https://images.unsplash.com/photo-1600566753190-17f0baa2a6c3?auto=format&fit=crop&w=800&q=80",
            ]),
            description: "Repräsentative Altbauwohnung in bester Lage. Stuckverzierungen, Flügeltüren und modernes Bad.".to_string(),
            amenities: amenities(&["Balkon / Terrasse", "Gäste-WC", "Keller"]),
            build_year: Some(1905),
            energy_label: Some(EnergyLabel::D),
            heating_type: None,
            is_new: false,
            is_verified: true,
            contact_name: "Premium Estate Munich".to_string(),
            origin: Origin::Mock,
        },
    ]
}
