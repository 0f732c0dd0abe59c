//! Popup content for a facility marker.

use super::{props, FacilityRecord};

/// Structured popup text for one facility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityPopup {
    pub name: String,
    pub facility_type: Option<String>,
    /// Street, city, state and zip joined with ", ", skipping absent parts
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub feedstock: Option<String>,
}

impl FacilityPopup {
    pub const UNKNOWN_NAME: &'static str = "Unknown Facility";

    pub fn from_record(record: &FacilityRecord) -> Self {
        let address: Vec<String> = [props::STREET, props::CITY, props::STATE, props::ZIP_CODE]
            .iter()
            .filter_map(|key| record.property(key))
            .collect();

        Self {
            name: record
                .property(props::NAME)
                .unwrap_or_else(|| Self::UNKNOWN_NAME.to_string()),
            facility_type: record.property(props::INFRA_TYPE),
            address: (!address.is_empty()).then(|| address.join(", ")),
            phone: record.property(props::TELEPHONE),
            email: record.property(props::EMAIL),
            website: record.property(props::WEBSITE),
            feedstock: record.property(props::FEEDSTOCK),
        }
    }

    /// `mailto:` link for the contact email.
    pub fn email_link(&self) -> Option<String> {
        self.email.as_ref().map(|e| format!("mailto:{}", e))
    }

    /// External link for the website; bare hostnames get an https scheme.
    pub fn website_link(&self) -> Option<String> {
        self.website.as_ref().map(|w| {
            if w.starts_with("http://") || w.starts_with("https://") {
                w.clone()
            } else {
                format!("https://{}", w)
            }
        })
    }
}
