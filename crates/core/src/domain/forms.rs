use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Free-text inputs are stripped of characters that break the downstream
/// document template and spreadsheet row encoding.
const STRIPPED_CHARS: &[char] = &['"', '\'', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')'];

/// Pay-rate answers that dodge the question are rejected outright; the
/// business needs a concrete starting number.
const PAY_RATE_PLACEHOLDERS: &[&str] = &["negotiable", "willing to discuss", "open to discussion"];

pub const MAX_EMPLOYERS: usize = 3;
pub const MAX_REFERENCES: usize = 3;

pub fn sanitize_text(input: &str) -> String {
    input.chars().filter(|ch| !STRIPPED_CHARS.contains(ch)).collect::<String>().trim().to_owned()
}

pub fn pay_rate_is_placeholder(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    PAY_RATE_PLACEHOLDERS.iter().any(|term| lowered.contains(term))
}

/// A chosen interview appointment: one of the published job-fair days plus
/// a time slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSlot {
    pub location: String,
    pub address: String,
    pub date: String,
    pub time_slot: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewDay {
    pub display: String,
    pub date: String,
    pub location: String,
    pub address: String,
}

/// The published interview days and time slots, with a blocklist of slots
/// that have filled up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCatalog {
    days: Vec<InterviewDay>,
    time_slots: Vec<String>,
    unavailable: Vec<(String, String)>,
}

impl SlotCatalog {
    pub fn new(days: Vec<InterviewDay>, time_slots: Vec<String>) -> Self {
        Self { days, time_slots, unavailable: Vec::new() }
    }

    pub fn days(&self) -> &[InterviewDay] {
        &self.days
    }

    pub fn time_slots(&self) -> &[String] {
        &self.time_slots
    }

    pub fn mark_unavailable(&mut self, date: impl Into<String>, time_slot: impl Into<String>) {
        let entry = (date.into(), time_slot.into());
        if !self.unavailable.contains(&entry) {
            self.unavailable.push(entry);
        }
    }

    pub fn is_available(&self, date: &str, time_slot: &str) -> bool {
        !self
            .unavailable
            .iter()
            .any(|(blocked_date, blocked_slot)| blocked_date == date && blocked_slot == time_slot)
    }

    /// Resolves a (date, time slot) pair into a full appointment, or `None`
    /// when the day is unknown, the slot is not offered, or it has filled.
    pub fn select(&self, date: &str, time_slot: &str) -> Option<InterviewSlot> {
        if !self.is_available(date, time_slot) {
            return None;
        }
        if !self.time_slots.iter().any(|slot| slot == time_slot) {
            return None;
        }
        self.days.iter().find(|day| day.date == date).map(|day| InterviewSlot {
            location: day.location.clone(),
            address: day.address.clone(),
            date: day.date.clone(),
            time_slot: time_slot.to_owned(),
        })
    }
}

/// First screen: applicant identity plus the interview appointment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub slot: InterviewSlot,
}

impl BasicInfo {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut missing = Vec::new();
        push_if_blank(&mut missing, "first_name", &self.first_name);
        push_if_blank(&mut missing, "last_name", &self.last_name);
        push_if_blank(&mut missing, "email", &self.email);
        push_if_blank(&mut missing, "interview_date", &self.slot.date);
        push_if_blank(&mut missing, "interview_time_slot", &self.slot.time_slot);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::MissingRequiredFields { fields: missing })
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursPreference {
    pub fifteen_to_twenty_five: bool,
    pub thirty_to_forty: bool,
    pub forty_plus: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAnswers {
    pub legally_entitled: bool,
    pub can_perform_duties: bool,
    pub drug_test: bool,
    pub background_check: bool,
    pub drivers_license: bool,
    pub reliable_transport: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerHistory {
    pub employer: String,
    pub location: String,
    pub hire_date: String,
    pub end_date: String,
    pub position: String,
    pub pay_rate: String,
    pub reason_for_leaving: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub area_of_study: String,
    pub graduated: bool,
    pub completion_date: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub contact: String,
    pub relationship: String,
}

/// Second screen: the full employment application. Optional sections are
/// empty collections or empty strings; required fields are enforced by
/// `validate` at the phase boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDetails {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub positions: Vec<String>,
    pub hours: HoursPreference,
    pub expected_pay_rate: String,
    pub availability_restrictions: String,
    pub start_date: String,
    pub why_applying: String,
    pub special_training: String,
    pub legal: LegalAnswers,
    pub signature_png: Option<Vec<u8>>,
    pub employers: Vec<EmployerHistory>,
    pub college: Education,
    pub high_school: Education,
    pub references: Vec<Reference>,
}

impl ApplicationDetails {
    /// Strips template-breaking characters from every free-text field.
    pub fn sanitized(mut self) -> Self {
        self.street_address = sanitize_text(&self.street_address);
        self.city = sanitize_text(&self.city);
        self.state = sanitize_text(&self.state);
        self.availability_restrictions = sanitize_text(&self.availability_restrictions);
        self.why_applying = sanitize_text(&self.why_applying);
        self.special_training = sanitize_text(&self.special_training);
        for employer in &mut self.employers {
            employer.employer = sanitize_text(&employer.employer);
            employer.location = sanitize_text(&employer.location);
            employer.position = sanitize_text(&employer.position);
            employer.reason_for_leaving = sanitize_text(&employer.reason_for_leaving);
        }
        for reference in &mut self.references {
            reference.name = sanitize_text(&reference.name);
            reference.relationship = sanitize_text(&reference.relationship);
        }
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut missing = Vec::new();
        push_if_blank(&mut missing, "street_address", &self.street_address);
        push_if_blank(&mut missing, "city", &self.city);
        push_if_blank(&mut missing, "state", &self.state);
        push_if_blank(&mut missing, "zip", &self.zip);
        push_if_blank(&mut missing, "phone", &self.phone);
        push_if_blank(&mut missing, "expected_pay_rate", &self.expected_pay_rate);
        push_if_blank(&mut missing, "start_date", &self.start_date);
        push_if_blank(&mut missing, "why_applying", &self.why_applying);
        if !missing.is_empty() {
            return Err(DomainError::MissingRequiredFields { fields: missing });
        }

        if pay_rate_is_placeholder(&self.expected_pay_rate) {
            return Err(DomainError::PlaceholderPayRate {
                value: self.expected_pay_rate.clone(),
            });
        }

        if self.signature_png.as_ref().map_or(true, |bytes| bytes.is_empty()) {
            return Err(DomainError::SignatureRequired);
        }

        if self.employers.len() > MAX_EMPLOYERS {
            return Err(DomainError::TooManyEntries {
                section: "employment history",
                max: MAX_EMPLOYERS,
            });
        }
        if self.references.len() > MAX_REFERENCES {
            return Err(DomainError::TooManyEntries {
                section: "references",
                max: MAX_REFERENCES,
            });
        }

        Ok(())
    }
}

fn push_if_blank(missing: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        missing.push(field.to_owned());
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::{
        ApplicationDetails, BasicInfo, Education, HoursPreference, InterviewSlot, LegalAnswers,
    };

    pub fn basic_info_fixture() -> BasicInfo {
        BasicInfo {
            first_name: "Ana".to_owned(),
            last_name: "Rivera".to_owned(),
            email: "ana@example.test".to_owned(),
            slot: InterviewSlot {
                location: "Frankfort".to_owned(),
                address: "100 Nursery Way, Frankfort KY 40601".to_owned(),
                date: "2026-02-20".to_owned(),
                time_slot: "10am-12pm".to_owned(),
            },
        }
    }

    pub fn details_fixture() -> ApplicationDetails {
        ApplicationDetails {
            street_address: "12 Elm St".to_owned(),
            city: "Frankfort".to_owned(),
            state: "KY".to_owned(),
            zip: "40601".to_owned(),
            phone: "555-0100".to_owned(),
            positions: vec!["nursery".to_owned()],
            hours: HoursPreference { thirty_to_forty: true, ..Default::default() },
            expected_pay_rate: "$16/hour".to_owned(),
            availability_restrictions: String::new(),
            start_date: "Immediately".to_owned(),
            why_applying: "I enjoy working with plants".to_owned(),
            special_training: String::new(),
            legal: LegalAnswers {
                legally_entitled: true,
                can_perform_duties: true,
                drug_test: true,
                background_check: true,
                drivers_license: true,
                reliable_transport: true,
            },
            signature_png: Some(vec![0x89, 0x50, 0x4e, 0x47]),
            employers: Vec::new(),
            college: Education::default(),
            high_school: Education::default(),
            references: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::{basic_info_fixture, details_fixture};
    use super::{pay_rate_is_placeholder, sanitize_text, InterviewDay, SlotCatalog};
    use crate::errors::DomainError;

    fn catalog() -> SlotCatalog {
        SlotCatalog::new(
            vec![
                InterviewDay {
                    display: "Friday, February 20 in Frankfort".to_owned(),
                    date: "2026-02-20".to_owned(),
                    location: "Frankfort".to_owned(),
                    address: "100 Nursery Way, Frankfort KY 40601".to_owned(),
                },
                InterviewDay {
                    display: "Saturday, February 21 in Lexington".to_owned(),
                    date: "2026-02-21".to_owned(),
                    location: "Lexington".to_owned(),
                    address: "2700 Greenhouse Rd, Lexington KY 40509".to_owned(),
                },
            ],
            vec!["10am-12pm".to_owned(), "12pm-2pm".to_owned(), "2pm-4pm".to_owned()],
        )
    }

    #[test]
    fn sanitize_strips_template_breaking_characters() {
        assert_eq!(sanitize_text("  O'Brien & Sons (East)! "), "OBrien  Sons East");
        assert_eq!(sanitize_text(""), "");
    }

    #[test]
    fn placeholder_pay_rates_are_detected_case_insensitively() {
        assert!(pay_rate_is_placeholder("Negotiable"));
        assert!(pay_rate_is_placeholder("open to discussion, really"));
        assert!(!pay_rate_is_placeholder("$15/hour"));
    }

    #[test]
    fn catalog_resolves_available_slots_only() {
        let mut catalog = catalog();
        let slot = catalog.select("2026-02-20", "10am-12pm").expect("published slot");
        assert_eq!(slot.location, "Frankfort");

        catalog.mark_unavailable("2026-02-20", "10am-12pm");
        assert!(catalog.select("2026-02-20", "10am-12pm").is_none());
        assert!(catalog.select("2026-02-20", "12pm-2pm").is_some());

        assert!(catalog.select("2026-03-01", "10am-12pm").is_none());
        assert!(catalog.select("2026-02-21", "4pm-6pm").is_none());
    }

    #[test]
    fn basic_info_reports_every_missing_field() {
        let mut info = basic_info_fixture();
        info.first_name = String::new();
        info.email = "   ".to_owned();

        let error = info.validate().expect_err("blank fields");
        match error {
            DomainError::MissingRequiredFields { fields } => {
                assert_eq!(fields, vec!["first_name".to_owned(), "email".to_owned()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn details_require_a_specific_pay_rate() {
        let mut details = details_fixture();
        details.expected_pay_rate = "willing to discuss".to_owned();

        let error = details.validate().expect_err("placeholder pay rate");
        assert!(matches!(error, DomainError::PlaceholderPayRate { .. }));
    }

    #[test]
    fn details_require_a_signature() {
        let mut details = details_fixture();
        details.signature_png = None;
        assert!(matches!(details.validate(), Err(DomainError::SignatureRequired)));

        details.signature_png = Some(Vec::new());
        assert!(matches!(details.validate(), Err(DomainError::SignatureRequired)));
    }

    #[test]
    fn details_cap_repeated_sections() {
        let mut details = details_fixture();
        details.employers = vec![Default::default(); 4];
        assert!(matches!(
            details.validate(),
            Err(DomainError::TooManyEntries { section: "employment history", max: 3 })
        ));
    }

    #[test]
    fn sanitized_cleans_nested_sections() {
        let mut details = details_fixture();
        details.why_applying = "I love plants! (really)".to_owned();
        details.employers = vec![super::EmployerHistory {
            employer: "Green & Co (Main)".to_owned(),
            ..Default::default()
        }];

        let cleaned = details.sanitized();
        assert_eq!(cleaned.why_applying, "I love plants really");
        assert_eq!(cleaned.employers[0].employer, "Green  Co Main");
    }
}
