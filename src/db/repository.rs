//! Query functions over the FMS tables.

use sqlx::SqlitePool;

use super::models::{
    Account, Invoice, InvoiceItem, MonthlyTotal, OpenInvoice, Payslip, Quote, Role, Transaction,
    User,
};

// =============================================================================
// User Repository
// =============================================================================

#[derive(Debug)]
pub struct UserRepository;

impl UserRepository {
    /// Insert a user. Returns `None` when the email is already taken, so
    /// concurrent registrations for one address never surface as a
    /// constraint error.
    pub async fn create(
        pool: &SqlitePool,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (name, email, password_hash, role)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(email) DO NOTHING
            RETURNING user_id, name, email, password_hash, role
            ",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_optional(pool)
        .await
    }

    pub async fn get_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, name, email, password_hash, role FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }
}

// =============================================================================
// Finance Repository
// =============================================================================

#[derive(Debug)]
pub struct FinanceRepository;

impl FinanceRepository {
    pub async fn list_invoices(pool: &SqlitePool) -> Result<Vec<Invoice>, sqlx::Error> {
        sqlx::query_as::<_, Invoice>(
            "SELECT invoice_id, customer_id, date, total, balance_due FROM invoices ORDER BY invoice_id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn get_invoice(pool: &SqlitePool, id: i64) -> Result<Option<Invoice>, sqlx::Error> {
        sqlx::query_as::<_, Invoice>(
            "SELECT invoice_id, customer_id, date, total, balance_due FROM invoices WHERE invoice_id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn invoice_items(
        pool: &SqlitePool,
        invoice_id: i64,
    ) -> Result<Vec<InvoiceItem>, sqlx::Error> {
        sqlx::query_as::<_, InvoiceItem>(
            r"
            SELECT item_id, invoice_id, description, quantity, unit_price, total
            FROM invoice_items
            WHERE invoice_id = ?
            ORDER BY item_id
            ",
        )
        .bind(invoice_id)
        .fetch_all(pool)
        .await
    }

    pub async fn get_quote(pool: &SqlitePool, id: i64) -> Result<Option<Quote>, sqlx::Error> {
        sqlx::query_as::<_, Quote>(
            "SELECT quote_id, customer_id, date, total, status FROM quotes WHERE quote_id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn statement(
        pool: &SqlitePool,
        customer_id: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r"
            SELECT transaction_id, customer_id, date, description, amount
            FROM transactions
            WHERE customer_id = ?
            ORDER BY date, transaction_id
            ",
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await
    }

    pub async fn monthly_totals(
        pool: &SqlitePool,
        customer_id: i64,
    ) -> Result<Vec<MonthlyTotal>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyTotal>(
            r"
            SELECT substr(date, 1, 7) AS month, CAST(SUM(amount) AS REAL) AS total
            FROM transactions
            WHERE customer_id = ?
            GROUP BY month
            ORDER BY month
            ",
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await
    }

    pub async fn open_invoices(
        pool: &SqlitePool,
        customer_id: i64,
    ) -> Result<Vec<OpenInvoice>, sqlx::Error> {
        sqlx::query_as::<_, OpenInvoice>(
            r"
            SELECT invoice_id, date, balance_due
            FROM invoices
            WHERE customer_id = ? AND balance_due > 0
            ORDER BY date, invoice_id
            ",
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await
    }

    pub async fn accounts(pool: &SqlitePool) -> Result<Vec<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            "SELECT account_id, account_name, account_type FROM accounts ORDER BY account_id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn get_payslip(pool: &SqlitePool, id: i64) -> Result<Option<Payslip>, sqlx::Error> {
        sqlx::query_as::<_, Payslip>(
            r"
            SELECT payslip_id, employee_id, period_start, period_end,
                   gross_salary, total_deductions, net_salary
            FROM payslips
            WHERE payslip_id = ?
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
