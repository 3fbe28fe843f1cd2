//! Borrower management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult, EntityKind},
    models::{Borrower, NewBorrower},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
}

impl BorrowersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new borrower with nothing checked out
    pub async fn register(&self, borrower: NewBorrower) -> AppResult<Borrower> {
        borrower.validate()?;

        let created = self.repository.borrowers.create(&borrower).await?;
        tracing::info!(borrower_id = created.id, "Borrower registered");
        Ok(created)
    }

    /// Get borrower by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Borrower> {
        self.repository
            .borrowers
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::borrower_not_found(id))
    }

    /// Remove a borrower; their borrowed set goes with them
    pub async fn remove(&self, id: i64) -> AppResult<i64> {
        if !self.repository.borrowers.exists(id).await? {
            tracing::warn!(borrower_id = id, "Remove requested for unknown borrower");
            return Err(AppError::borrower_not_found(id));
        }

        self.repository
            .borrowers
            .delete(id)
            .await
            .map_err(|e| AppError::OperationFailure {
                kind: EntityKind::Borrower,
                id,
                source: Box::new(e),
            })?;

        tracing::info!(borrower_id = id, "Borrower removed");
        Ok(id)
    }
}
