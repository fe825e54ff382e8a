//! Three-step flow for landlords creating a listing.
//!
//! `Basics` collects the required data and is validated before moving on,
//! `DetailsMedia` takes the description and pictures, `Preview` shows the
//! result. Submitting from the preview hands the finished draft back to the
//! caller; nothing is stored.

use crate::sources::districts::center_of;
use crate::sources::mock::AMENITIES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Basics,
    DetailsMedia,
    Preview,
}

impl Step {
    /// 1-based position shown in the progress bar
    pub fn number(&self) -> u8 {
        match self {
            Step::Basics => 1,
            Step::DetailsMedia => 2,
            Step::Preview => 3,
        }
    }
}

/// Inputs checked on the first step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Price,
    Size,
    Rooms,
    District,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DistrictChoice {
    #[default]
    Unset,
    Named(String),
    /// Use the free-text `custom_district`
    Custom,
}

/// Form contents as typed by the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub property_type: String,
    pub price: String,
    pub costs: String,
    pub size: String,
    pub rooms: String,
    pub floor: String,
    pub street: String,
    pub zip: String,
    pub district: DistrictChoice,
    pub custom_district: String,
    pub amenities: BTreeSet<String>,
    pub images: Vec<String>,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            property_type: "Wohnung".to_string(),
            price: String::new(),
            costs: String::new(),
            size: String::new(),
            rooms: String::new(),
            floor: String::new(),
            street: String::new(),
            zip: String::new(),
            district: DistrictChoice::Unset,
            custom_district: String::new(),
            amenities: BTreeSet::new(),
            images: Vec::new(),
        }
    }
}

impl ListingDraft {
    /// The district that will be published, if one was given
    pub fn resolved_district(&self) -> Option<&str> {
        let name = match &self.district {
            DistrictChoice::Unset => return None,
            DistrictChoice::Named(name) => name.as_str(),
            DistrictChoice::Custom => self.custom_district.as_str(),
        };
        let name = name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// What the simulated publish produces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingSubmission {
    pub title: String,
    pub description: String,
    pub property_type: String,
    pub price: Option<u32>,
    pub additional_costs: Option<u32>,
    pub size: Option<f32>,
    pub rooms: Option<f32>,
    pub floor: Option<i32>,
    pub street: String,
    pub zip: String,
    pub district: Option<String>,
    /// False for custom names outside the district table
    pub known_district: bool,
    pub amenities: BTreeSet<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    /// The wizard is now on this step
    Moved(Step),
    /// Step 1 is incomplete; these fields need attention
    Blocked(BTreeSet<Field>),
    Submitted(ListingSubmission),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ListingWizard {
    step: Step,
    draft: ListingDraft,
    privileged: bool,
    errors: BTreeSet<Field>,
}

impl ListingWizard {
    /// `privileged` wizards (admins) skip step 1 validation
    pub fn new(privileged: bool) -> Self {
        Self {
            step: Step::Basics,
            draft: ListingDraft::default(),
            privileged,
            errors: BTreeSet::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ListingDraft {
        &mut self.draft
    }

    /// Fields marked invalid by the last attempt to leave step 1
    pub fn errors(&self) -> &BTreeSet<Field> {
        &self.errors
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    /// Required-field check for step 1, ignoring privileges
    pub fn validate_basics(&self) -> BTreeSet<Field> {
        let draft = &self.draft;
        let mut errors = BTreeSet::new();
        if draft.title.trim().is_empty() {
            errors.insert(Field::Title);
        }
        if parse_amount(&draft.price).is_none() {
            errors.insert(Field::Price);
        }
        if parse_amount(&draft.size).is_none() {
            errors.insert(Field::Size);
        }
        if parse_amount(&draft.rooms).is_none() {
            errors.insert(Field::Rooms);
        }
        if draft.resolved_district().is_none() {
            errors.insert(Field::District);
        }
        errors
    }

    pub fn next(&mut self) -> WizardOutcome {
        match self.step {
            Step::Basics => {
                let errors = if self.privileged {
                    BTreeSet::new()
                } else {
                    self.validate_basics()
                };
                self.errors.clone_from(&errors);
                if errors.is_empty() {
                    self.move_to(Step::DetailsMedia)
                } else {
                    debug!("step 1 blocked: {:?}", errors);
                    WizardOutcome::Blocked(errors)
                }
            }
            Step::DetailsMedia => self.move_to(Step::Preview),
            Step::Preview => WizardOutcome::Submitted(self.submission()),
        }
    }

    /// One step back; leaving step 1 cancels the wizard
    pub fn back(&mut self) -> WizardOutcome {
        match self.step {
            Step::Basics => WizardOutcome::Cancelled,
            Step::DetailsMedia => self.move_to(Step::Basics),
            Step::Preview => self.move_to(Step::DetailsMedia),
        }
    }

    pub fn add_images(&mut self, images: impl IntoIterator<Item = String>) {
        self.draft.images.extend(images);
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.draft.images.len()).then(|| self.draft.images.remove(index))
    }

    /// Tick or untick an amenity from the fixed list; unknown names are ignored.
    /// Returns whether the amenity is selected afterwards.
    pub fn toggle_amenity(&mut self, name: &str) -> bool {
        if !AMENITIES.contains(&name) {
            return false;
        }
        if !self.draft.amenities.remove(name) {
            self.draft.amenities.insert(name.to_string());
        }
        self.draft.amenities.contains(name)
    }

    fn move_to(&mut self, step: Step) -> WizardOutcome {
        self.step = step;
        WizardOutcome::Moved(step)
    }

    fn submission(&self) -> ListingSubmission {
        let draft = &self.draft;
        let district = draft.resolved_district().map(str::to_string);
        ListingSubmission {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            property_type: draft.property_type.clone(),
            price: parse_amount(&draft.price).map(|v| v.round() as u32),
            additional_costs: parse_amount(&draft.costs).map(|v| v.round() as u32),
            size: parse_amount(&draft.size).map(|v| v as f32),
            rooms: parse_amount(&draft.rooms).map(|v| v as f32),
            floor: draft.floor.trim().parse().ok(),
            street: draft.street.trim().to_string(),
            zip: draft.zip.trim().to_string(),
            known_district: district.as_deref().and_then(center_of).is_some(),
            district,
            amenities: draft.amenities.clone(),
            images: draft.images.clone(),
        }
    }
}

/// A non-negative number; accepts a decimal comma
fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ListingWizard {
        let mut wizard = ListingWizard::new(false);
        let draft = wizard.draft_mut();
        draft.title = "Helle 2-Zimmer-Wohnung".to_string();
        draft.price = "1250".to_string();
        draft.size = "55,5".to_string();
        draft.rooms = "2".to_string();
        draft.district = DistrictChoice::Named("Laim".to_string());
        wizard
    }

    #[test]
    fn empty_form_blocks_on_every_required_field() {
        let mut wizard = ListingWizard::new(false);
        let outcome = wizard.next();

        let expected: BTreeSet<Field> =
            [Field::Title, Field::Price, Field::Size, Field::Rooms, Field::District].into();
        assert_eq!(outcome, WizardOutcome::Blocked(expected.clone()));
        assert_eq!(wizard.step(), Step::Basics);
        assert_eq!(wizard.errors(), &expected);
    }

    #[test]
    fn each_missing_field_blocks_alone() {
        let clearers: [(Field, fn(&mut ListingDraft)); 5] = [
            (Field::Title, |d: &mut ListingDraft| d.title = "  ".to_string()),
            (Field::Price, |d: &mut ListingDraft| d.price.clear()),
            (Field::Size, |d: &mut ListingDraft| d.size.clear()),
            (Field::Rooms, |d: &mut ListingDraft| d.rooms.clear()),
            (Field::District, |d: &mut ListingDraft| d.district = DistrictChoice::Unset),
        ];
        for (field, clear) in clearers {
            let mut wizard = filled();
            clear(wizard.draft_mut());
            assert_eq!(wizard.next(), WizardOutcome::Blocked([field].into()));
            assert_eq!(wizard.step(), Step::Basics);
        }
    }

    #[test]
    fn negative_or_garbage_numbers_are_rejected() {
        let mut wizard = filled();
        wizard.draft_mut().price = "-5".to_string();
        wizard.draft_mut().rooms = "zwei".to_string();
        assert_eq!(wizard.next(), WizardOutcome::Blocked([Field::Price, Field::Rooms].into()));
    }

    #[test]
    fn custom_district_needs_a_name() {
        let mut wizard = filled();
        wizard.draft_mut().district = DistrictChoice::Custom;
        assert_eq!(wizard.next(), WizardOutcome::Blocked([Field::District].into()));

        wizard.draft_mut().custom_district = "Garching".to_string();
        assert_eq!(wizard.next(), WizardOutcome::Moved(Step::DetailsMedia));
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn privileged_wizard_skips_validation() {
        let mut wizard = ListingWizard::new(true);
        assert!(wizard.is_privileged());
        assert_eq!(wizard.next(), WizardOutcome::Moved(Step::DetailsMedia));
        assert_eq!(wizard.next(), WizardOutcome::Moved(Step::Preview));

        let WizardOutcome::Submitted(submission) = wizard.next() else {
            panic!("expected a submission");
        };
        assert_eq!(submission.price, None);
        assert_eq!(submission.district, None);
    }

    #[test]
    fn full_walk_and_submission() {
        let mut wizard = filled();
        assert_eq!(wizard.next(), WizardOutcome::Moved(Step::DetailsMedia));

        wizard.draft_mut().description = "Ruhige Lage.".to_string();
        wizard.add_images(vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()]);
        assert_eq!(wizard.remove_image(1).as_deref(), Some("b.jpg"));
        assert_eq!(wizard.remove_image(9), None);
        assert!(wizard.toggle_amenity("Keller"));
        assert!(!wizard.toggle_amenity("Sauna"));

        assert_eq!(wizard.next(), WizardOutcome::Moved(Step::Preview));
        assert_eq!(wizard.step().number(), 3);

        let WizardOutcome::Submitted(submission) = wizard.next() else {
            panic!("expected a submission");
        };
        assert_eq!(submission.title, "Helle 2-Zimmer-Wohnung");
        assert_eq!(submission.price, Some(1250));
        assert_eq!(submission.size, Some(55.5));
        assert_eq!(submission.district.as_deref(), Some("Laim"));
        assert!(submission.known_district);
        assert_eq!(submission.images, vec!["a.jpg".to_string(), "c.jpg".to_string()]);
        assert!(submission.amenities.contains("Keller"));
        // submitting does not leave the preview
        assert_eq!(wizard.step(), Step::Preview);
    }

    #[test]
    fn back_walks_to_cancel() {
        let mut wizard = filled();
        wizard.next();
        wizard.next();
        assert_eq!(wizard.back(), WizardOutcome::Moved(Step::DetailsMedia));
        assert_eq!(wizard.back(), WizardOutcome::Moved(Step::Basics));
        assert_eq!(wizard.back(), WizardOutcome::Cancelled);
    }

    #[test]
    fn toggle_amenity_twice_unselects() {
        let mut wizard = ListingWizard::new(false);
        assert!(wizard.toggle_amenity("Aufzug"));
        assert!(!wizard.toggle_amenity("Aufzug"));
        assert!(wizard.draft().amenities.is_empty());
    }
}
