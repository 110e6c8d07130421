//! Fixed master data the generator draws dimensions from.

use crate::dimension::{AccountType, CostCenter, GlAccount};

/// Largest number of cost centers the catalog can supply.
pub const MAX_COST_CENTERS: usize = 12;

/// Largest number of GL accounts the catalog can supply.
pub const MAX_GL_ACCOUNTS: usize = 18;

const DEPARTMENTS: [&str; MAX_COST_CENTERS] = [
    "FP&A",
    "Accounting",
    "Procurement",
    "Treasury",
    "Operations",
    "Sales Ops",
    "IT Finance",
    "Corporate",
    "R&D",
    "Manufacturing",
    "Logistics",
    "Facilities",
];

const MANAGERS: [&str; MAX_COST_CENTERS] = [
    "A. Patel",
    "J. Kim",
    "M. Chen",
    "S. Rivera",
    "D. Johnson",
    "L. Singh",
    "N. Garcia",
    "K. Brown",
    "R. Ahmed",
    "T. Nguyen",
    "P. Wilson",
    "E. Martinez",
];

/// (code, name, OPEX?, group)
const GL_DEFINITIONS: [(&str, &str, bool, &str); MAX_GL_ACCOUNTS] = [
    ("600000", "Salaries & Wages", true, "Payroll"),
    ("601000", "Benefits", true, "Payroll"),
    ("602000", "Contractors", true, "Payroll"),
    ("610000", "Software & Subscriptions", true, "IT"),
    ("611000", "Cloud Infrastructure", true, "IT"),
    ("620000", "Travel & Entertainment", true, "G&A"),
    ("630000", "Marketing Spend", true, "Sales"),
    ("640000", "Office Supplies", true, "G&A"),
    ("650000", "Rent & Utilities", true, "Facilities"),
    ("660000", "Professional Services", true, "G&A"),
    ("670000", "Training & Education", true, "G&A"),
    ("680000", "Insurance", true, "G&A"),
    ("700000", "Capital Equipment", false, "Capex"),
    ("701000", "IT Hardware", false, "Capex"),
    ("702000", "Facility Improvements", false, "Capex"),
    ("710000", "Depreciation", true, "G&A"),
    ("720000", "Freight & Shipping", true, "Ops"),
    ("730000", "Maintenance", true, "Facilities"),
];

/// Accounts that are budgeted only in some months.
pub const SPARSE_GL_ACCOUNTS: [&str; 6] = ["620000", "640000", "670000", "700000", "701000", "702000"];

/// SAP document types assigned to generated postings.
pub const DOCUMENT_TYPES: [&str; 5] = ["SA", "KR", "RE", "AB", "KA"];

/// Returns the first `count` cost centers, `CC0001` onward.
#[must_use]
pub fn cost_centers(count: usize) -> Vec<CostCenter> {
    DEPARTMENTS
        .iter()
        .zip(MANAGERS)
        .take(count)
        .enumerate()
        .map(|(i, (department, manager))| CostCenter {
            cost_center_id: format!("CC{:04}", i + 1).into(),
            cost_center_name: format!("{department} Cost Center"),
            department: (*department).to_string(),
            manager: manager.to_string(),
            parent_cost_center_id: None,
        })
        .collect()
}

/// Returns the first `count` GL accounts in chart order.
#[must_use]
pub fn gl_accounts(count: usize) -> Vec<GlAccount> {
    GL_DEFINITIONS
        .iter()
        .take(count)
        .map(|(code, name, opex, group)| GlAccount {
            gl_account: (*code).into(),
            gl_name: (*name).to_string(),
            account_type: if *opex {
                AccountType::Opex
            } else {
                AccountType::Capex
            },
            gl_group: (*group).to_string(),
        })
        .collect()
}

/// Returns true if the account is budgeted only in some months.
#[must_use]
pub fn is_sparse(gl_account: &str) -> bool {
    SPARSE_GL_ACCOUNTS.contains(&gl_account)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_centers() {
        let centers = cost_centers(3);
        assert_eq!(centers.len(), 3);
        assert_eq!(centers[0].cost_center_id.as_str(), "CC0001");
        assert_eq!(centers[0].cost_center_name, "FP&A Cost Center");
        assert_eq!(centers[2].manager, "M. Chen");
        assert!(centers.iter().all(|c| c.parent_cost_center_id.is_none()));
    }

    #[test]
    fn test_count_is_capped_by_catalog() {
        assert_eq!(cost_centers(50).len(), MAX_COST_CENTERS);
        assert_eq!(gl_accounts(50).len(), MAX_GL_ACCOUNTS);
    }

    #[test]
    fn test_gl_accounts() {
        let accounts = gl_accounts(MAX_GL_ACCOUNTS);
        assert_eq!(accounts[0].gl_account.as_str(), "600000");
        assert_eq!(accounts[0].account_type, AccountType::Opex);
        assert_eq!(accounts[12].gl_name, "Capital Equipment");
        assert_eq!(accounts[12].account_type, AccountType::Capex);
        assert_eq!(
            accounts
                .iter()
                .filter(|a| a.account_type == AccountType::Capex)
                .count(),
            3
        );
    }

    #[test]
    fn test_sparse_accounts() {
        assert!(is_sparse("620000"));
        assert!(is_sparse("702000"));
        assert!(!is_sparse("600000"));
    }
}
