use std::sync::Arc;

use serde::Serialize;

use crate::navigation::{Navigator, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: &'static str,
    pub name: &'static str,
}

/// Companies shown in the "Companies We Have Experiences With" row.
pub const FEATURED_COMPANIES: &[Company] = &[
    Company { id: "1", name: "TCS" },
    Company { id: "2", name: "Accenture" },
    Company { id: "3", name: "PWC" },
    Company { id: "4", name: "Deloitte" },
    Company { id: "5", name: "Cognizant" },
    Company { id: "6", name: "Epam" },
    Company { id: "7", name: "HevoData" },
    Company { id: "8", name: "Afford" },
    Company { id: "9", name: "Capgemini" },
    Company { id: "10", name: "Infosys" },
];

pub const APP_NAME: &str = "ExpEase";
pub const TAGLINE: &str = "A platform to explore and share real interview experiences from top tech companies, helping you prepare and succeed.";

/// Landing and information screens.
pub struct HomeScreen {
    navigator: Arc<dyn Navigator>,
}

impl HomeScreen {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    pub fn companies(&self) -> &'static [Company] {
        FEATURED_COMPANIES
    }

    pub fn get_started(&self) {
        self.navigator.push(Route::Information);
    }

    pub fn share_experience(&self) {
        self.navigator.push(Route::SubmitForm);
    }

    /// Open the company screen by name. Names outside the featured list are
    /// allowed; the backend decides what matches.
    pub fn select_company(&self, company_name: &str) {
        self.navigator.push(Route::CompanyExperiences {
            company_name: company_name.to_string(),
        });
    }

    pub fn find_company(id: &str) -> Option<&'static Company> {
        FEATURED_COMPANIES.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::testing::RecordingNavigator;

    #[test]
    fn catalog_ids_are_unique_and_sequential() {
        let ids: Vec<_> = FEATURED_COMPANIES.iter().map(|c| c.id).collect();
        let expected: Vec<String> = (1..=10).map(|n| n.to_string()).collect();
        assert_eq!(ids, expected);
        assert_eq!(HomeScreen::find_company("10").map(|c| c.name), Some("Infosys"));
        assert!(HomeScreen::find_company("11").is_none());
    }

    #[test]
    fn selecting_company_routes_by_name() {
        let nav = Arc::new(RecordingNavigator::default());
        let home = HomeScreen::new(nav.clone());
        home.get_started();
        home.select_company("Capgemini");
        assert_eq!(
            *nav.routes.lock(),
            vec![
                Route::Information,
                Route::CompanyExperiences { company_name: "Capgemini".into() },
            ]
        );
    }
}
