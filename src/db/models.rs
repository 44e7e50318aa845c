//! Row models for the FMS tables.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Users
// =============================================================================

/// Access role attached to every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Accountant,
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Accountant => "accountant",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "accountant" => Ok(Self::Accountant),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User row, including the password hash. Never serialized to clients.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl User {
    /// Parsed role; rows with an unrecognized role get the least privilege.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Viewer)
    }
}

/// User as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let role = user.role();
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role,
        }
    }
}

// =============================================================================
// Finance records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub invoice_id: i64,
    pub customer_id: i64,
    pub date: String,
    pub total: f64,
    pub balance_due: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InvoiceItem {
    pub item_id: i64,
    pub invoice_id: i64,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub quote_id: i64,
    pub customer_id: i64,
    pub date: String,
    pub total: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub transaction_id: i64,
    pub customer_id: i64,
    pub date: String,
    pub description: String,
    pub amount: f64,
}

/// Sum of a customer's transactions for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    pub total: f64,
}

/// Invoice with an outstanding balance, used by the ageing report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OpenInvoice {
    pub invoice_id: i64,
    pub date: String,
    pub balance_due: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub account_id: i64,
    pub account_name: String,
    pub account_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Payslip {
    pub payslip_id: i64,
    pub employee_id: i64,
    pub period_start: String,
    pub period_end: String,
    pub gross_salary: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" accountant ".parse::<Role>(), Ok(Role::Accountant));
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn unknown_stored_role_falls_back_to_viewer() {
        let user = User {
            user_id: 1,
            name: "x".into(),
            email: "x@example.com".into(),
            password_hash: String::new(),
            role: "superuser".into(),
        };
        assert_eq!(user.role(), Role::Viewer);
    }
}
