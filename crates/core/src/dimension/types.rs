//! Dimension data types.

use finmart_shared::types::{CostCenterId, GlAccountId};
use serde::{Deserialize, Serialize};

/// Organizational unit spend is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    /// Cost center ID (unique).
    pub cost_center_id: CostCenterId,
    /// Display name.
    pub cost_center_name: String,
    /// Owning department.
    pub department: String,
    /// Responsible manager.
    pub manager: String,
    /// Optional parent in the cost center hierarchy.
    pub parent_cost_center_id: Option<CostCenterId>,
}

/// Account category code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountType {
    /// Operating expense.
    Opex,
    /// Capital expenditure.
    Capex,
    /// Any other category code, kept verbatim.
    Other(String),
}

impl AccountType {
    /// Returns the category code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Opex => "OPEX",
            Self::Capex => "CAPEX",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for AccountType {
    fn from(value: String) -> Self {
        match value.to_uppercase().as_str() {
            "OPEX" => Self::Opex,
            "CAPEX" => Self::Capex,
            _ => Self::Other(value),
        }
    }
}

impl From<AccountType> for String {
    fn from(value: AccountType) -> Self {
        value.code().to_string()
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// General-ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlAccount {
    /// GL account code (unique).
    pub gl_account: GlAccountId,
    /// Display name.
    pub gl_name: String,
    /// Account category.
    pub account_type: AccountType,
    /// Reporting group label.
    pub gl_group: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_parse() {
        assert_eq!(AccountType::from("OPEX".to_string()), AccountType::Opex);
        assert_eq!(AccountType::from("capex".to_string()), AccountType::Capex);
        assert_eq!(
            AccountType::from("REV".to_string()),
            AccountType::Other("REV".to_string())
        );
    }

    #[test]
    fn test_account_type_serde() {
        let json = serde_json::to_string(&AccountType::Capex).unwrap();
        assert_eq!(json, "\"CAPEX\"");
        let back: AccountType = serde_json::from_str("\"OPEX\"").unwrap();
        assert_eq!(back, AccountType::Opex);
    }
}
