//! Short code creation, resolution and owner-scoped management.

use chrono::Utc;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::entities::Redirect;
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;

/// Default deadline applied to every storage call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Saves attempted before a code that keeps changing underneath is reported
/// as a conflict.
const SAVE_ATTEMPTS: u32 = 2;

/// Shortening service backed by trait objects, selected at runtime.
pub type DynShortenerService = ShortenerService<dyn CodeGenerator, dyn RedirectRepository>;

/// Orchestrates code generation and redirect persistence.
///
/// Management operations (`list`, `get_redirect_by_short`,
/// `delete_short_url`) are scoped to the calling owner. Resolution through
/// [`Self::expand_short_url`] is global so anonymous visitors can follow
/// public links.
///
/// # Re-shortening
///
/// Codes are derived from `(owner, url)`, so shortening the same URL twice
/// yields the same code. The repository drops a save whose code is already
/// taken; the service then loads the stored record and either returns it
/// (same owner and URL) or reports [`AppError::Conflict`] (a hash collision
/// with someone else's redirect). A record deleted between the dropped save
/// and the lookup frees the code, so the save is retried once. Stored records
/// are never overwritten.
pub struct ShortenerService<G, R>
where
    G: CodeGenerator + ?Sized,
    R: RedirectRepository + ?Sized,
{
    generator: Arc<G>,
    repository: Arc<R>,
    store_timeout: Duration,
}

impl<G, R> ShortenerService<G, R>
where
    G: CodeGenerator + ?Sized,
    R: RedirectRepository + ?Sized,
{
    /// Creates a new shortening service.
    pub fn new(generator: Arc<G>, repository: Arc<R>) -> Self {
        Self {
            generator,
            repository,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Overrides the deadline applied to each storage call.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Shortens `url` on behalf of `owner_id`.
    ///
    /// Returns the freshly built redirect when it was stored, or the already
    /// stored record when the owner had shortened this URL before.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` or `owner_id` is empty.
    /// Returns [`AppError::Conflict`] if the derived code belongs to a
    /// different owner or URL.
    /// Returns [`AppError::Unavailable`] on storage failures or timeouts.
    pub async fn shorten_url(&self, url: &str, owner_id: &str) -> Result<Redirect, AppError> {
        if url.trim().is_empty() {
            return Err(AppError::bad_request(
                "URL must not be empty",
                json!({ "field": "url" }),
            ));
        }
        if owner_id.is_empty() {
            return Err(AppError::bad_request(
                "Owner must not be empty",
                json!({ "field": "owner_id" }),
            ));
        }

        let short = self.generator.generate(owner_id, url);
        let redirect = Redirect::new(short, url, owner_id, Utc::now());

        for attempt in 1..=SAVE_ATTEMPTS {
            if self
                .within_deadline("save", self.repository.save(&redirect))
                .await?
            {
                info!(short = %redirect.short, owner_id, "redirect created");
                return Ok(redirect);
            }

            let existing = self
                .within_deadline("find_by_short", self.repository.find_by_short(&redirect.short))
                .await?;

            match existing {
                Some(stored) if stored.same_target(&redirect) => {
                    debug!(short = %stored.short, owner_id, "url already shortened");
                    return Ok(stored);
                }
                Some(_) => {
                    warn!(short = %redirect.short, owner_id, "short code collision");
                    return Err(AppError::conflict(
                        "Short code already in use",
                        json!({ "short": redirect.short }),
                    ));
                }
                // Deleted between the dropped save and the lookup; the code is free again.
                None => {
                    debug!(short = %redirect.short, attempt, "short code vanished, retrying save");
                }
            }
        }

        Err(AppError::conflict(
            "Short code was modified concurrently",
            json!({ "short": redirect.short }),
        ))
    }

    /// Resolves a short code to its destination URL for any caller.
    ///
    /// Malformed codes are rejected without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is malformed or unknown.
    pub async fn expand_short_url(&self, short: &str) -> Result<String, AppError> {
        self.ensure_valid(short)?;

        self.within_deadline("expand", self.repository.expand(short))
            .await
    }

    /// Lists the redirects owned by `owner_id`.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<Redirect>, AppError> {
        self.within_deadline("list", self.repository.list(owner_id))
            .await
    }

    /// Fetches one of `owner_id`'s redirects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is malformed, unknown, or
    /// owned by someone else.
    pub async fn get_redirect_by_short(
        &self,
        short: &str,
        owner_id: &str,
    ) -> Result<Redirect, AppError> {
        self.ensure_valid(short)?;

        self.within_deadline(
            "get_redirect_by_short",
            self.repository.get_redirect_by_short(short, owner_id),
        )
        .await
    }

    /// Deletes one of `owner_id`'s redirects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is malformed, unknown, or
    /// owned by someone else.
    pub async fn delete_short_url(&self, short: &str, owner_id: &str) -> Result<(), AppError> {
        self.ensure_valid(short)?;

        self.within_deadline("delete", self.repository.delete(short, owner_id))
            .await?;

        info!(short, owner_id, "redirect deleted");
        Ok(())
    }

    /// Returns true if `short` is a well-formed code.
    pub fn is_valid_short(&self, short: &str) -> bool {
        self.generator.validate(short)
    }

    fn ensure_valid(&self, short: &str) -> Result<(), AppError> {
        if self.generator.validate(short) {
            return Ok(());
        }

        debug!(short, "rejected malformed short code");
        Err(AppError::not_found(
            "Redirect not found",
            json!({ "short": short }),
        ))
    }

    /// Runs a storage call under the configured deadline.
    ///
    /// An elapsed deadline drops the storage future, aborting the call.
    async fn within_deadline<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.store_timeout.as_millis() as u64,
                    "storage call timed out"
                );
                Err(AppError::unavailable(
                    "Storage backend timed out",
                    json!({ "operation": operation }),
                ))
            }
        }
    }
}
