use crate::models::{Listing, ListingRow, Origin};
use crate::sources::districts::{center_of, CITY_CENTER, CITY_NAME};
use crate::sources::mock::jitter;
use rand::Rng;

/// Added to row ids so they never collide with mock offers
pub const DB_ID_OFFSET: u64 = 100_000;

/// Turn a table row into a listing, borrowing whatever the row lacks from `template`.
pub fn listing_from_row<R: Rng + ?Sized>(row: &ListingRow, template: &Listing, rng: &mut R) -> Listing {
    let district = row
        .district
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(CITY_NAME)
        .to_string();
    let center = center_of(&district).unwrap_or(CITY_CENTER);

    let cold_rent = euros(row.cold_rent);
    let additional_costs = match row.warm_rent {
        Some(warm) => euros(warm).saturating_sub(cold_rent),
        None => template.additional_costs,
    };

    Listing {
        id: DB_ID_OFFSET + row.id.max(0) as u64,
        title: format!("Wohnung in {} ({} m²)", district, row.area),
        price: cold_rent,
        additional_costs,
        size: row.area.max(0.0) as f32,
        street: Some(row.address.clone()),
        zip_code: Some("80331".to_string()),
        coordinates: jitter(center, rng),
        listed_on: row.created_at.date_naive(),
        contact_name: "Vermieter (DB)".to_string(),
        is_new: true,
        is_verified: true,
        origin: Origin::Database,
        district,
        ..template.clone()
    }
}

fn euros(amount: f64) -> u32 {
    amount.max(0.0).round() as u32
}
