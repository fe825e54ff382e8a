use crate::models::Listing;
use crate::search::criteria::FilterCriteria;

/// Check one listing against every predicate of `criteria`.
pub fn matches(listing: &Listing, criteria: &FilterCriteria) -> bool {
    matches_query(listing, &criteria.query.to_lowercase())
        && listing.price <= criteria.max_price
        && listing.rooms >= criteria.min_rooms
        && matches_district(listing, criteria.district.as_deref())
}

/// Keep the listings that satisfy `criteria`, in their original order.
pub fn filter_listings<'a>(listings: &'a [Listing], criteria: &FilterCriteria) -> Vec<&'a Listing> {
    let query = criteria.query.to_lowercase();
    let district = criteria.district.as_deref();

    listings
        .iter()
        .filter(|l| matches_query(l, &query))
        .filter(|l| l.price <= criteria.max_price)
        .filter(|l| l.rooms >= criteria.min_rooms)
        .filter(|l| matches_district(l, district))
        .collect()
}

// `query` must already be lowercase
fn matches_query(listing: &Listing, query: &str) -> bool {
    query.is_empty()
        || listing.title.to_lowercase().contains(query)
        || listing.district.to_lowercase().contains(query)
}

fn matches_district(listing: &Listing, district: Option<&str>) -> bool {
    match district {
        Some(d) if !d.is_empty() => listing.district == d,
        _ => true,
    }
}
