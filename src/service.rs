use crate::errors::AppError;
use crate::models::{
    CreateInsuredRequest, Insured, InsuredResponse, PagedResponse, SearchResponse,
    UpdateInsuredRequest,
};
use crate::repository::InsuredRepository;
use crate::validation::{clamp_page_params, validate_birth_date};
use chrono::Utc;
use sqlx::PgPool;

/// Business orchestration for insured records.
///
/// Owns the check ordering that makes error reporting deterministic:
/// on create, identification number before email before birth date; on
/// update, existence before id mismatch before email before birth date.
pub struct InsuredService {
    repository: InsuredRepository,
}

impl InsuredService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InsuredRepository::new(pool),
        }
    }

    /// One page of insureds with paging metadata. Out-of-range paging
    /// parameters are clamped, never rejected.
    pub async fn get_all(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> Result<PagedResponse<InsuredResponse>, AppError> {
        let (page_number, page_size) = clamp_page_params(page_number, page_size);

        let (items, total_records) = self.repository.list_page(page_number, page_size).await?;
        let total_pages = (total_records + page_size - 1) / page_size;

        Ok(PagedResponse {
            total_records,
            total_pages,
            current_page: page_number,
            page_size,
            data: items.into_iter().map(InsuredResponse::from).collect(),
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<InsuredResponse, AppError> {
        let insured = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(insured.into())
    }

    /// Partial search on the identification number's decimal string.
    ///
    /// A blank fragment is a business error; zero matches is a successful
    /// response carrying an informational message.
    pub async fn search_by_identification(
        &self,
        fragment: &str,
    ) -> Result<SearchResponse<InsuredResponse>, AppError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(AppError::BusinessRule(
                "You must provide an identification number to search".to_string(),
            ));
        }

        let results: Vec<InsuredResponse> = self
            .repository
            .search_by_id_fragment(fragment)
            .await?
            .into_iter()
            .map(InsuredResponse::from)
            .collect();

        let message = if results.is_empty() {
            "No insureds found with the provided identification number".to_string()
        } else {
            format!("Found {} insured(s)", results.len())
        };

        Ok(SearchResponse {
            total_count: results.len() as i64,
            search_term: fragment.to_string(),
            message,
            results,
        })
    }

    pub async fn create(
        &self,
        request: CreateInsuredRequest,
    ) -> Result<InsuredResponse, AppError> {
        if self
            .repository
            .exists_by_id(request.identification_number)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "An insured with identification number {} already exists",
                request.identification_number
            )));
        }

        if self.repository.exists_by_email(&request.email, None).await? {
            return Err(AppError::Conflict(format!(
                "An insured with email {} already exists",
                request.email
            )));
        }

        let now = Utc::now();
        validate_birth_date(request.birth_date.date(), now.date_naive())?;

        let insured = Insured {
            identification_number: request.identification_number,
            first_name: request.first_name,
            middle_name: request.middle_name,
            first_last_name: request.first_last_name,
            second_last_name: request.second_last_name,
            contact_phone: request.contact_phone,
            email: request.email,
            birth_date: request.birth_date.date(),
            estimated_request_value: request.estimated_request_value,
            observations: request.observations,
            created_at: now,
            updated_at: None,
        };

        let created = self.repository.create(&insured).await?;
        tracing::info!("Insured created: {}", created.identification_number);

        Ok(created.into())
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateInsuredRequest,
    ) -> Result<InsuredResponse, AppError> {
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        // The key is immutable; a body id, when present, must match the path.
        if let Some(body_id) = request.identification_number {
            if body_id != id {
                return Err(AppError::BusinessRule(format!(
                    "Identification number in the body ({}) does not match the path ({})",
                    body_id, id
                )));
            }
        }

        if self
            .repository
            .exists_by_email(&request.email, Some(id))
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Another insured with email {} already exists",
                request.email
            )));
        }

        let now = Utc::now();
        validate_birth_date(request.birth_date.date(), now.date_naive())?;

        let updated = Insured {
            identification_number: id,
            first_name: request.first_name,
            middle_name: request.middle_name,
            first_last_name: request.first_last_name,
            second_last_name: request.second_last_name,
            contact_phone: request.contact_phone,
            email: request.email,
            birth_date: request.birth_date.date(),
            estimated_request_value: request.estimated_request_value,
            observations: request.observations,
            created_at: existing.created_at,
            updated_at: Some(now),
        };

        // The row can vanish between the fetch above and this write; report
        // that as not-found rather than a generic failure.
        let rows = self.repository.update(&updated).await?;
        if rows == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Insured updated: {}", id);
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        let rows = self.repository.delete(id).await?;
        if rows == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Insured deleted: {}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!(
        "Insured with identification number {} not found",
        id
    ))
}
