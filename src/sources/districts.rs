//! The 25 Munich city districts and their approximate centres.

use crate::models::Coordinates;

/// Fallback position when a district is unknown (Marienplatz)
pub const CITY_CENTER: Coordinates = Coordinates::new(48.137154, 11.576124);

/// Name used for rows without a district
pub const CITY_NAME: &str = "München";

const DISTRICT_CENTERS: &[(&str, Coordinates)] = &[
    ("Allach-Untermenzing", Coordinates::new(48.185, 11.465)),
    ("Altstadt-Lehel", Coordinates::new(48.140, 11.585)),
    ("Aubing-Lochhausen-Langwied", Coordinates::new(48.150, 11.420)),
    ("Au-Haidhausen", Coordinates::new(48.128, 11.600)),
    ("Berg am Laim", Coordinates::new(48.130, 11.635)),
    ("Bogenhausen", Coordinates::new(48.155, 11.620)),
    ("Feldmoching-Hasenbergl", Coordinates::new(48.210, 11.550)),
    ("Hadern", Coordinates::new(48.115, 11.485)),
    ("Laim", Coordinates::new(48.140, 11.505)),
    ("Ludwigsvorstadt-Isarvorstadt", Coordinates::new(48.130, 11.560)),
    ("Maxvorstadt", Coordinates::new(48.149, 11.560)),
    ("Milbertshofen-Am Hart", Coordinates::new(48.190, 11.570)),
    ("Moosach", Coordinates::new(48.180, 11.510)),
    ("Neuhausen-Nymphenburg", Coordinates::new(48.158, 11.525)),
    ("Obergiesing", Coordinates::new(48.115, 11.595)),
    ("Pasing-Obermenzing", Coordinates::new(48.150, 11.460)),
    ("Ramersdorf-Perlach", Coordinates::new(48.110, 11.620)),
    ("Schwabing-Freimann", Coordinates::new(48.175, 11.600)),
    ("Schwabing-West", Coordinates::new(48.165, 11.570)),
    ("Schwanthalerhöhe", Coordinates::new(48.136, 11.540)),
    ("Sendling", Coordinates::new(48.115, 11.545)),
    ("Sendling-Westpark", Coordinates::new(48.120, 11.520)),
    ("Thalkirchen-Obersendling", Coordinates::new(48.100, 11.540)),
    ("Trudering-Riem", Coordinates::new(48.125, 11.670)),
    ("Untergiesing-Harlaching", Coordinates::new(48.100, 11.570)),
];

/// District names in sorted order
pub fn districts() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DISTRICT_CENTERS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

/// Centre of a district, if it is one of the known ones
pub fn center_of(district: &str) -> Option<Coordinates> {
    DISTRICT_CENTERS
        .iter()
        .find(|(name, _)| *name == district)
        .map(|(_, center)| *center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn districts_are_sorted_and_complete() {
        let names = districts();
        assert_eq!(names.len(), 25);
        assert!(names.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(names[0], "Allach-Untermenzing");
        // '-' sorts before lowercase letters
        let au = names.iter().position(|n| *n == "Au-Haidhausen").unwrap();
        let aubing = names.iter().position(|n| *n == "Aubing-Lochhausen-Langwied").unwrap();
        assert!(au < aubing);
    }

    #[test]
    fn unknown_district_has_no_center() {
        assert!(center_of("Maxvorstadt").is_some());
        assert!(center_of("Kreuzberg").is_none());
    }
}
