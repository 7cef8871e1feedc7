//! Field layouts of every supported document

use super::kind::DocumentKind;
use super::schema::{DocumentSchema, SchemaError};

/// Build the schema for a document type
pub fn schema(kind: DocumentKind) -> Result<DocumentSchema, SchemaError> {
    let builder = DocumentSchema::builder(kind);
    let builder = match kind {
        DocumentKind::Nda => builder
            .step("Effective Date", |s| s.field("effective_date", "Effective Date"))
            .step("Party Details", |s| {
                s.field("party1_name", "Party 1 Name")
                    .field("party1_business", "Party 1 Business")
                    .field("party2_name", "Party 2 Name")
                    .field("party2_business", "Party 2 Business")
            })
            .step("Purpose", |s| s.multiline("purpose", "Purpose"))
            .step("Confidentiality", |s| {
                s.field("confidentiality_period", "Confidentiality Period")
                    .field("jurisdiction", "Jurisdiction")
            }),

        DocumentKind::EmployeeNda => builder
            .step("Company Details", |s| {
                s.field("company_name", "Company Name")
                    .multiline("company_address", "Company Address")
            })
            .step("Employee Details", |s| {
                s.field("employee_name", "Employee Name")
                    .multiline("employee_address", "Employee Address")
            })
            .step("Agreement Details", |s| {
                s.field("high_court_city", "High Court City")
            }),

        DocumentKind::LandSaleDeed => builder
            .step("Seller Details", |s| {
                s.field("seller_name", "Name")
                    .field("seller_father_name", "Father's Name")
                    .field("seller_age", "Age")
                    .field("seller_pan", "PAN")
                    .multiline("seller_address", "Address")
            })
            .step("Purchaser Details", |s| {
                s.field("purchaser_name", "Name")
                    .field("purchaser_father_name", "Father's Name")
                    .field("purchaser_age", "Age")
                    .field("purchaser_pan", "PAN")
                    .multiline("purchaser_address", "Address")
            })
            .step("Land Details", |s| {
                s.field("land_details.size", "Size")
                    .field("land_details.location", "Location")
                    .field("land_details.boundaries.north", "North Boundary")
                    .field("land_details.boundaries.south", "South Boundary")
                    .field("land_details.boundaries.east", "East Boundary")
                    .field("land_details.boundaries.west", "West Boundary")
            })
            .step("Sale Details", |s| {
                s.field("total_consideration", "Total Consideration")
                    .field("cheque_details", "Cheque Details")
                    .field("witness_1", "Witness 1")
                    .field("witness_2", "Witness 2")
            }),

        DocumentKind::PowerOfAttorney => builder
            .step("Principal Details", |s| {
                s.field("principal_name", "Name")
                    .field("principal_age", "Age")
                    .multiline("principal_address", "Address")
            })
            .step("Attorney Details", |s| {
                s.field("attorney_name", "Name")
                    .field("attorney_age", "Age")
                    .multiline("attorney_address", "Address")
            })
            .step("Power Details", |s| {
                s.multiline("powers_granted", "Powers Granted")
                    .field("duration", "Duration")
            })
            .step("Witness Details", |s| {
                s.field("witness_1_name", "Witness 1 Name")
                    .field("witness_2_name", "Witness 2 Name")
            }),

        DocumentKind::LeaveAndLicense => builder
            .step("General Details", |s| {
                s.field("date", "Agreement Date")
                    .field("city", "City")
                    .field("stamp_duty", "Stamp Duty")
                    .field("stamp_duty_grn", "Stamp Duty GRN")
                    .field("stamp_duty_date", "Stamp Duty Date")
                    .field("registration_fee", "Registration Fee")
                    .field("registration_grn", "Registration GRN")
                    .field("registration_date", "Registration Date")
            })
            .step("Licensor Details", |s| {
                s.field("licensor_name", "Name")
                    .field("licensor_age", "Age")
                    .field("licensor_occupation", "Occupation")
                    .field("licensor_pan", "PAN")
                    .field("licensor_uid", "UID")
                    .multiline("licensor_address", "Address")
            })
            .step("Licensee Details", |s| {
                s.field("licensee_name", "Name")
                    .field("licensee_age", "Age")
                    .field("licensee_occupation", "Occupation")
                    .field("licensee_pan", "PAN")
                    .field("licensee_uid", "UID")
                    .multiline("licensee_address", "Address")
            })
            .step("Lease Details", |s| {
                s.field("period", "Period")
                    .field("start_date", "Start Date")
                    .field("end_date", "End Date")
                    .field("monthly_rent", "Monthly Rent")
                    .field("deposit", "Deposit")
                    .field("deposit_payment_method", "Deposit Payment Method")
                    .field("maintenance_charges_paid_by", "Maintenance Paid By")
                    .field("purpose", "Purpose")
            })
            .step("Property Details", |s| {
                s.field("flat_number", "Flat Number")
                    .field("built_up_area", "Built-up Area")
                    .field("floor", "Floor")
                    .field("building_name", "Building Name")
                    .field("plot_details", "Plot Details")
                    .field("village", "Village")
                    .field("tehsil", "Tehsil")
                    .field("district", "District")
                    .field("municipal_corporation", "Municipal Corporation")
            }),

        DocumentKind::AgreementOfSale => builder
            .step("Seller Details", |s| {
                s.field("seller_name", "Name")
                    .field("seller_father_name", "Father's Name")
                    .field("seller_age", "Age")
                    .multiline("seller_address", "Address")
                    .field("seller_wife", "Wife's Name")
                    .field("seller_sons_daughters", "Sons and Daughters")
            })
            .step("Purchaser Details", |s| {
                s.field("purchaser_name", "Name")
                    .field("purchaser_father_name", "Father's Name")
                    .field("purchaser_age", "Age")
                    .multiline("purchaser_address", "Address")
            })
            .step("Property Details", |s| {
                s.multiline("schedule_property", "Schedule Property")
            })
            .step("Sale Details", |s| {
                s.field("sale_amount", "Sale Amount")
                    .field("advance_amount", "Advance Amount")
                    .field("cheque_no", "Cheque Number")
                    .field("bank_name", "Bank Name")
                    .field("cheque_date", "Cheque Date")
                    .field("balance_amount", "Balance Amount")
                    .field("transaction_end_date", "Transaction End Date")
                    .field("purpose_of_sale", "Purpose of Sale")
            })
            .step("Previous Ownership Details", |s| {
                s.field("previous_owner", "Previous Owner")
                    .field("previous_sale_deed_date", "Previous Sale Deed Date")
                    .field("previous_sale_doct_no", "Document Number")
                    .field("previous_sale_book1_volumne_no", "Book 1 Volume Number")
                    .field("previous_sale_page_no_start", "Start Page")
                    .field("prev_sale_page_no_end", "End Page")
                    .field("witness_1", "Witness 1")
                    .field("witness_2", "Witness 2")
            }),
    };
    builder.build()
}

/// Every supported document, in display order
pub fn all() -> &'static [DocumentKind] {
    &DocumentKind::ALL
}

/// Documents matching a search query, in catalog order
pub fn search(query: &str) -> Vec<DocumentKind> {
    all()
        .iter()
        .copied()
        .filter(|k| k.matches_query(query))
        .collect()
}
