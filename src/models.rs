use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============ Database Model ============

/// One insured person as persisted in the `insureds` table.
///
/// The identification number is the primary key and is supplied by the
/// caller at creation time; it never changes afterwards. `created_at` is
/// assigned once by the server, `updated_at` stays null until the first
/// update.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insured {
    /// Identification number (primary key, caller-supplied, positive).
    pub identification_number: i64,
    /// First name (2-50 characters, letters only).
    pub first_name: String,
    /// Middle name (optional, up to 50 characters).
    pub middle_name: Option<String>,
    /// First last name (2-50 characters, letters only).
    pub first_last_name: String,
    /// Second last name (2-50 characters, letters only).
    pub second_last_name: String,
    /// Contact phone (7-20 characters, phone-shaped).
    pub contact_phone: String,
    /// Email address (unique across all records).
    pub email: String,
    /// Birth date; the insured must be at least 18 years old.
    pub birth_date: NaiveDate,
    /// Estimated value of the insurance request (NUMERIC(18,2)).
    pub estimated_request_value: BigDecimal,
    /// Free-form observations (optional, up to 500 characters).
    pub observations: Option<String>,
    /// Timestamp of creation, server-assigned.
    pub created_at: DateTime<Utc>,
    /// Timestamp of last update; null until first update.
    pub updated_at: Option<DateTime<Utc>>,
}

// ============ Request DTOs ============

/// Payload for creating a new insured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInsuredRequest {
    pub identification_number: i64,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub first_last_name: String,
    pub second_last_name: String,
    pub contact_phone: String,
    pub email: String,
    /// Birth date; clients send midnight-normalized date-time text
    /// (e.g. "1990-05-15T00:00:00"), only the date part is kept.
    pub birth_date: NaiveDateTime,
    pub estimated_request_value: BigDecimal,
    #[serde(default)]
    pub observations: Option<String>,
}

/// Payload for updating an existing insured.
///
/// Every mutable field is replaced from this request. The identification
/// number is optional; when present it must match the path id (the record
/// key is immutable).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInsuredRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification_number: Option<i64>,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub first_last_name: String,
    pub second_last_name: String,
    pub contact_phone: String,
    pub email: String,
    pub birth_date: NaiveDateTime,
    pub estimated_request_value: BigDecimal,
    #[serde(default)]
    pub observations: Option<String>,
}

// ============ Response DTOs ============

/// One insured as returned by the API; mirrors every persisted field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuredResponse {
    pub identification_number: i64,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub first_last_name: String,
    pub second_last_name: String,
    pub contact_phone: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub estimated_request_value: BigDecimal,
    #[serde(default)]
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Insured> for InsuredResponse {
    fn from(insured: Insured) -> Self {
        Self {
            identification_number: insured.identification_number,
            first_name: insured.first_name,
            middle_name: insured.middle_name,
            first_last_name: insured.first_last_name,
            second_last_name: insured.second_last_name,
            contact_phone: insured.contact_phone,
            email: insured.email,
            birth_date: insured.birth_date,
            estimated_request_value: insured.estimated_request_value,
            observations: insured.observations,
            created_at: insured.created_at,
            updated_at: insured.updated_at,
        }
    }
}

/// Envelope for one page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub total_records: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub data: Vec<T>,
}

/// Envelope for partial identification-number searches.
///
/// Zero matches is a successful response with an informational message,
/// not a not-found error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
    pub total_count: i64,
    pub search_term: String,
    pub message: String,
}

/// Plain message body, used by the delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============ Query parameters ============

/// Paging query parameters; out-of-range values are clamped by the service.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}
