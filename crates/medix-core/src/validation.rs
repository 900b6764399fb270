//! # Validation Module
//!
//! Form validation for every request the pharmacy pages send.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  └── Immediate feedback (empty, length)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API route (Rust)                                             │
//! │  ├── Type validation (serde deserialization)                           │
//! │  └── THIS MODULE: field rules, first failure wins                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE username / email                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use medix_core::validation::{validate_email, validate_username};
//!
//! assert!(validate_username("pharma.admin").is_ok());
//! assert!(validate_email("not-an-email").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{
    NewBill, NewBillItem, NewStaffMember, NewStockItem, PharmacyProfileInput, StaffUpdate,
    StockAdjustment, StockUpdate,
};
use crate::{
    MAX_BILL_ITEMS, MAX_EXPIRY_WINDOW_DAYS, MAX_ITEM_QUANTITY, MAX_STOCK_QUANTITY,
    MAX_UNIT_PRICE_CENTS,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const NAME_MAX: usize = 100;
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const EMAIL_MAX: usize = 254;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;
const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;
const MEDICINE_NAME_MAX: usize = 200;
const BATCH_MAX: usize = 50;
const LICENSE_MAX: usize = 50;
const POSTAL_CODE_MAX: usize = 12;
const ADDRESS_MAX: usize = 300;
const QUERY_MAX: usize = 100;
const BPS_MAX: u32 = 10_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field (trimmed, non-empty, bounded).
pub fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    validate_optional_text(field, value, max)
}

/// Validates an optional free-text field (bounded only).
pub fn validate_optional_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }

    Ok(())
}

/// Validates a staff username.
///
/// ## Rules
/// - 3 to 32 characters
/// - Letters, digits, `_` and `.` only
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::required("username"));
    }

    if username.len() < USERNAME_MIN {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: USERNAME_MIN,
        });
    }

    if username.len() > USERNAME_MAX {
        return Err(ValidationError::too_long("username", USERNAME_MAX));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(ValidationError::invalid(
            "username",
            "must contain only letters, numbers, underscores, and dots",
        ));
    }

    Ok(())
}

/// Validates an email address.
///
/// Shape check only: `local@domain.tld`, no whitespace, at most 254 chars.
///
/// ## Example
/// ```rust
/// use medix_core::validation::validate_email;
///
/// assert!(validate_email("store@medix.in").is_ok());
/// assert!(validate_email("store@localhost").is_err());
/// assert!(validate_email("a@@b.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    if email.len() > EMAIL_MAX {
        return Err(ValidationError::too_long("email", EMAIL_MAX));
    }

    let invalid = || ValidationError::invalid("email", "must be a valid email address");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a password length. The value itself is never stored.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    let len = password.chars().count();
    if len < PASSWORD_MIN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: PASSWORD_MIN,
        });
    }

    if len > PASSWORD_MAX {
        return Err(ValidationError::too_long("password", PASSWORD_MAX));
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - 7 to 15 digits
/// - Separators `+`, `-`, space and parentheses are allowed
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::required("phone"));
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err(ValidationError::invalid(
            "phone",
            "must contain only digits and + - ( ) separators",
        ));
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
        return Err(ValidationError::OutOfRange {
            field: "phone digits".to_string(),
            min: PHONE_MIN_DIGITS as i64,
            max: PHONE_MAX_DIGITS as i64,
        });
    }

    Ok(())
}

/// Validates a drug license number (letters, digits, `-` and `/`).
pub fn validate_license_number(license: &str) -> ValidationResult<()> {
    validate_code("licenseNumber", license, LICENSE_MAX, &['-', '/'])
}

/// Validates a batch number (letters, digits, `-`, `_` and `/`).
pub fn validate_batch(batch: &str) -> ValidationResult<()> {
    validate_code("batch", batch, BATCH_MAX, &['-', '_', '/'])
}

fn validate_code(field: &str, value: &str, max: usize, extra: &[char]) -> ValidationResult<()> {
    validate_required_text(field, value, max)?;

    if !value
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || extra.contains(&c))
    {
        let allowed: String = extra.iter().map(|c| format!(" {c}")).collect();
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must contain only letters, numbers, and{allowed}"),
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > QUERY_MAX {
        return Err(ValidationError::too_long("search", QUERY_MAX));
    }

    Ok(query.to_string())
}

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use medix_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::invalid("id", "must be a valid UUID"))?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a bill line quantity (1..=999).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a value in `0..=max` (shelf counts, prices).
pub fn validate_bounded(field: &str, value: i64, max: i64) -> ValidationResult<()> {
    if !(0..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max,
        });
    }

    Ok(())
}

pub fn validate_unit_price(price: i64) -> ValidationResult<()> {
    validate_bounded("unitPriceCents", price, MAX_UNIT_PRICE_CENTS)
}

pub fn validate_stock_quantity(field: &str, quantity: i64) -> ValidationResult<()> {
    validate_bounded(field, quantity, MAX_STOCK_QUANTITY)
}

/// Validates an "expiring within N days" window.
pub fn validate_expiry_window(days: i64) -> ValidationResult<()> {
    validate_bounded("expiringWithinDays", days, MAX_EXPIRY_WINDOW_DAYS)
}

/// Validates a percentage in basis points (0..=10000).
pub fn validate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > BPS_MAX {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: BPS_MAX as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Request Validation
// =============================================================================

impl NewStaffMember {
    /// Checks every field of the "Add staff" form.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required_text("name", &self.name, NAME_MAX)?;
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

impl StaffUpdate {
    /// Checks the fields present on the "Edit staff" form.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.is_empty() && self.password.is_none() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(name) = &self.name {
            validate_required_text("name", name, NAME_MAX)?;
        }
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

impl PharmacyProfileInput {
    /// Checks the settings form.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required_text("pharmacyName", &self.pharmacy_name, NAME_MAX)?;
        validate_optional_text("address", &self.address, ADDRESS_MAX)?;
        validate_optional_text("city", &self.city, NAME_MAX)?;
        validate_optional_text("state", &self.state, NAME_MAX)?;
        validate_optional_text("postalCode", &self.postal_code, POSTAL_CODE_MAX)?;
        validate_phone(&self.phone)?;
        if let Some(email) = non_blank(&self.email) {
            validate_email(email)?;
        }
        validate_license_number(&self.license_number)?;
        if let Some(tax_id) = non_blank(&self.tax_id) {
            validate_optional_text("taxId", tax_id, LICENSE_MAX)?;
        }
        Ok(())
    }
}

impl NewStockItem {
    /// Checks the stock entry form.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required_text("name", &self.name, MEDICINE_NAME_MAX)?;
        validate_batch(&self.batch)?;
        validate_stock_quantity("quantity", self.quantity)?;
        validate_stock_quantity("threshold", self.threshold)?;
        validate_unit_price(self.unit_price_cents)
    }
}

impl StockUpdate {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(name) = &self.name {
            validate_required_text("name", name, MEDICINE_NAME_MAX)?;
        }
        if let Some(batch) = &self.batch {
            validate_batch(batch)?;
        }
        if let Some(quantity) = self.quantity {
            validate_stock_quantity("quantity", quantity)?;
        }
        if let Some(threshold) = self.threshold {
            validate_stock_quantity("threshold", threshold)?;
        }
        if let Some(price) = self.unit_price_cents {
            validate_unit_price(price)?;
        }
        Ok(())
    }
}

impl StockAdjustment {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.delta == 0 {
            return Err(ValidationError::invalid("delta", "must not be zero"));
        }
        if !(-MAX_STOCK_QUANTITY..=MAX_STOCK_QUANTITY).contains(&self.delta) {
            return Err(ValidationError::OutOfRange {
                field: "delta".to_string(),
                min: -MAX_STOCK_QUANTITY,
                max: MAX_STOCK_QUANTITY,
            });
        }
        if let Some(reason) = &self.reason {
            validate_optional_text("reason", reason, ADDRESS_MAX)?;
        }
        Ok(())
    }
}

impl NewBill {
    /// Checks the bill form, header first, then each line in order.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required_text("patientName", &self.patient_name, NAME_MAX)?;
        if let Some(doctor) = &self.doctor_name {
            validate_optional_text("doctorName", doctor, NAME_MAX)?;
        }

        if self.items.is_empty() {
            return Err(ValidationError::required("items"));
        }
        if self.items.len() > MAX_BILL_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "items".to_string(),
                min: 1,
                max: MAX_BILL_ITEMS as i64,
            });
        }

        validate_bps("discountBps", self.discount_bps)?;
        if let Some(tax) = self.tax_rate_bps {
            validate_bps("taxRateBps", tax)?;
        }

        self.items.iter().try_for_each(NewBillItem::validate)
    }
}

impl NewBillItem {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_quantity(self.quantity)?;

        match &self.stock_item_id {
            Some(id) => validate_uuid(id)?,
            None => {
                let name = self.name.as_deref().unwrap_or_default();
                validate_required_text("item name", name, MEDICINE_NAME_MAX)?;
                let price = self
                    .unit_price_cents
                    .ok_or_else(|| ValidationError::required("unitPriceCents"))?;
                validate_unit_price(price)?;
            }
        }

        if let Some(batch) = non_blank(&self.batch) {
            validate_batch(batch)?;
        }
        Ok(())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
