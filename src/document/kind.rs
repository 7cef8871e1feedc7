//! Supported document types

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Nda,
    EmployeeNda,
    LandSaleDeed,
    PowerOfAttorney,
    LeaveAndLicense,
    AgreementOfSale,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        Self::Nda,
        Self::EmployeeNda,
        Self::LandSaleDeed,
        Self::PowerOfAttorney,
        Self::LeaveAndLicense,
        Self::AgreementOfSale,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Nda => "Non-Disclosure Agreement",
            Self::EmployeeNda => "Employee NDA",
            Self::LandSaleDeed => "Land Sale Deed",
            Self::PowerOfAttorney => "Power of Attorney",
            Self::LeaveAndLicense => "Leave and License Agreement",
            Self::AgreementOfSale => "Agreement of Sale",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Nda => "Mutual confidentiality between two businesses",
            Self::EmployeeNda => "Non-disclosure and non-compete for an employee",
            Self::LandSaleDeed => "Transfer of land with boundaries and consideration",
            Self::PowerOfAttorney => "Authorize an attorney to act for a principal",
            Self::LeaveAndLicense => "Residential leave and license (rental) agreement",
            Self::AgreementOfSale => "Agreement to sell property with advance payment",
        }
    }

    /// Stable identifier used on the command line and in file names
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Nda => "nda",
            Self::EmployeeNda => "employee-nda",
            Self::LandSaleDeed => "land-sale-deed",
            Self::PowerOfAttorney => "power-of-attorney",
            Self::LeaveAndLicense => "leave-and-license",
            Self::AgreementOfSale => "agreement-of-sale",
        }
    }

    /// Path of the PDF generation endpoint, relative to the API base URL
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::Nda => "/generate-general-nda-pdf",
            Self::EmployeeNda => "/generate_employee_nda_pdf",
            Self::LandSaleDeed => "/generate_land_sale_deed_pdf",
            Self::PowerOfAttorney => "/generate-pow-pdf",
            Self::LeaveAndLicense => "/generate-lnl-pdf",
            Self::AgreementOfSale => "/generate_agreement_of_sale_pdf",
        }
    }

    pub fn endpoint_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.endpoint_path())
    }

    /// Case-insensitive match against title and description
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.title().to_lowercase().contains(&query)
            || self.description().to_lowercase().contains(&query)
            || self.slug().contains(&query)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.slug()).collect();
                format!("unknown document '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
