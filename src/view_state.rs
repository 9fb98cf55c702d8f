//! View-side state for the list and form screens, expressed as plain
//! structs mutated only through the transition functions below. This keeps
//! the presentation logic independent of any reactivity primitive while
//! mirroring the server's validation rules exactly (the form reuses
//! `validation`, so client and server cannot drift).

use crate::api_client::{ClientError, InsuredsClient};
use crate::models::{CreateInsuredRequest, InsuredResponse, UpdateInsuredRequest};
use crate::validation::{self, validate_birth_date};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// State behind the paginated/searchable list screen.
#[derive(Debug, Default)]
pub struct ListViewState {
    pub items: Vec<InsuredResponse>,
    pub total_records: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub search_term: String,
    pub loading: bool,
    /// Transient notification surfaced to the user (search summaries,
    /// delete confirmations).
    pub notice: Option<String>,
    /// Id awaiting explicit delete confirmation.
    pub pending_delete: Option<i64>,
}

impl ListViewState {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            page_size: 10,
            ..Default::default()
        }
    }

    /// Loads the current page from the server, replacing the held list and
    /// total count.
    pub async fn load_page(&mut self, client: &InsuredsClient) -> Result<(), ClientError> {
        self.loading = true;
        let result = client.list(self.current_page, self.page_size).await;
        self.loading = false;

        let page = result?;
        self.items = page.data;
        self.total_records = page.total_records;
        self.current_page = page.current_page;
        self.page_size = page.page_size;
        Ok(())
    }

    /// Moves to another page (and/or size) and reloads.
    pub async fn change_page(
        &mut self,
        client: &InsuredsClient,
        page_number: i64,
        page_size: i64,
    ) -> Result<(), ClientError> {
        self.current_page = page_number;
        self.page_size = page_size;
        self.load_page(client).await
    }

    /// Runs the current search term. A blank term is equivalent to
    /// reloading the current page; otherwise the list is replaced with the
    /// search results and the server's summary message becomes the notice.
    pub async fn search(&mut self, client: &InsuredsClient) -> Result<(), ClientError> {
        let term = self.search_term.trim().to_string();
        if term.is_empty() {
            return self.load_page(client).await;
        }

        self.loading = true;
        let result = client.search(&term).await;
        self.loading = false;

        let response = result?;
        self.items = response.results;
        self.total_records = response.total_count;
        self.notice = Some(response.message);
        Ok(())
    }

    /// Clears the search term and reloads the current page.
    pub async fn clear_search(&mut self, client: &InsuredsClient) -> Result<(), ClientError> {
        self.search_term.clear();
        self.load_page(client).await
    }

    /// First step of deletion: nothing is sent until the user confirms.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issues the pending delete and reloads the current page from the
    /// server, so the displayed totals stay consistent instead of being
    /// spliced locally.
    pub async fn confirm_delete(&mut self, client: &InsuredsClient) -> Result<(), ClientError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(());
        };

        let response = client.delete(id).await?;
        self.notice = Some(response.message);
        self.load_page(client).await
    }

    /// Consumes the transient notice, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// State behind the create/edit form.
///
/// Fields hold raw user input; `validate` applies the same rules as the
/// server so invalid submissions never reach the network. In edit mode the
/// identification number is shown but frozen.
#[derive(Debug, Clone)]
pub struct InsuredForm {
    mode: FormMode,
    identification_number: Option<i64>,
    pub first_name: String,
    pub middle_name: String,
    pub first_last_name: String,
    pub second_last_name: String,
    pub contact_phone: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    /// Raw text input; parsed to a decimal during validation.
    pub estimated_request_value: String,
    pub observations: String,
}

impl InsuredForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            identification_number: None,
            first_name: String::new(),
            middle_name: String::new(),
            first_last_name: String::new(),
            second_last_name: String::new(),
            contact_phone: String::new(),
            email: String::new(),
            birth_date: None,
            estimated_request_value: String::new(),
            observations: String::new(),
        }
    }

    /// Pre-populates the form from an existing record for editing.
    pub fn for_edit(insured: &InsuredResponse) -> Self {
        Self {
            mode: FormMode::Edit,
            identification_number: Some(insured.identification_number),
            first_name: insured.first_name.clone(),
            middle_name: insured.middle_name.clone().unwrap_or_default(),
            first_last_name: insured.first_last_name.clone(),
            second_last_name: insured.second_last_name.clone(),
            contact_phone: insured.contact_phone.clone(),
            email: insured.email.clone(),
            birth_date: Some(insured.birth_date),
            estimated_request_value: insured.estimated_request_value.to_string(),
            observations: insured.observations.clone().unwrap_or_default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn identification_number(&self) -> Option<i64> {
        self.identification_number
    }

    /// The identification number is editable only while creating; edits to
    /// an existing record ignore the attempt and report false.
    pub fn set_identification_number(&mut self, id: i64) -> bool {
        if self.mode == FormMode::Edit {
            return false;
        }
        self.identification_number = Some(id);
        true
    }

    /// Applies every field and business rule the server enforces,
    /// returning "field: problem" entries. `today` is passed in so the
    /// month/day-aware age check is deterministic.
    pub fn validate(&self, today: NaiveDate) -> Vec<String> {
        match self.build_create_request() {
            Ok(request) => {
                let mut errors = validation::validate_create(&request);
                if let Err(e) = validate_birth_date(request.birth_date.date(), today) {
                    errors.push(format!("birthDate: {}", rule_message(e)));
                }
                errors
            }
            Err(errors) => errors,
        }
    }

    /// Builds the create payload, normalizing the birth date to midnight.
    pub fn to_create_request(&self, today: NaiveDate) -> Result<CreateInsuredRequest, Vec<String>> {
        let errors = self.validate(today);
        if !errors.is_empty() {
            return Err(errors);
        }
        self.build_create_request()
    }

    /// Builds the update payload; the body carries the (frozen)
    /// identification number so the server can verify it matches the path.
    pub fn to_update_request(&self, today: NaiveDate) -> Result<UpdateInsuredRequest, Vec<String>> {
        let request = self.to_create_request(today)?;
        Ok(UpdateInsuredRequest {
            identification_number: Some(request.identification_number),
            first_name: request.first_name,
            middle_name: request.middle_name,
            first_last_name: request.first_last_name,
            second_last_name: request.second_last_name,
            contact_phone: request.contact_phone,
            email: request.email,
            birth_date: request.birth_date,
            estimated_request_value: request.estimated_request_value,
            observations: request.observations,
        })
    }

    /// Validates and submits the form: POST in create mode, PUT in edit
    /// mode.
    pub async fn submit(
        &self,
        client: &InsuredsClient,
        today: NaiveDate,
    ) -> Result<InsuredResponse, SubmitError> {
        match self.mode {
            FormMode::Create => {
                let request = self.to_create_request(today).map_err(SubmitError::Invalid)?;
                client.create(&request).await.map_err(SubmitError::Api)
            }
            FormMode::Edit => {
                let request = self.to_update_request(today).map_err(SubmitError::Invalid)?;
                let Some(id) = request.identification_number else {
                    return Err(SubmitError::Invalid(vec![
                        "identificationNumber: is required".to_string(),
                    ]));
                };
                client.update(id, &request).await.map_err(SubmitError::Api)
            }
        }
    }

    fn build_create_request(&self) -> Result<CreateInsuredRequest, Vec<String>> {
        let mut errors = Vec::new();

        let identification_number = match self.identification_number {
            Some(id) => id,
            None => {
                errors.push("identificationNumber: is required".to_string());
                0
            }
        };

        let birth_date = match self.birth_date {
            Some(date) => midnight(date),
            None => {
                errors.push("birthDate: is required".to_string());
                NaiveDateTime::default()
            }
        };

        let estimated_request_value: BigDecimal =
            match self.estimated_request_value.trim().parse() {
                Ok(value) => value,
                Err(_) => {
                    errors.push("estimatedRequestValue: must be a decimal number".to_string());
                    BigDecimal::from(0)
                }
            };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateInsuredRequest {
            identification_number,
            first_name: self.first_name.trim().to_string(),
            middle_name: none_if_blank(&self.middle_name),
            first_last_name: self.first_last_name.trim().to_string(),
            second_last_name: self.second_last_name.trim().to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
            email: self.email.trim().to_string(),
            birth_date,
            estimated_request_value,
            observations: none_if_blank(&self.observations),
        })
    }
}

impl Default for InsuredForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a failed form submission.
#[derive(Debug)]
pub enum SubmitError {
    /// Client-side validation rejected the form; nothing was sent.
    Invalid(Vec<String>),
    /// The request was sent and the server (or transport) failed.
    Api(ClientError),
}

/// Birth dates travel as midnight-normalized date-times.
fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn rule_message(err: crate::errors::AppError) -> String {
    match err {
        crate::errors::AppError::BusinessRule(msg) => msg,
        other => other.to_string(),
    }
}
