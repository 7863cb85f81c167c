//! Link management service
//!
//! Creation and resolution flows on top of the [`LinkStore`], shared between
//! the HTTP handlers and the CLI.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{QrConfig, StaticConfig};
use crate::errors::{QryftError, Result};
use crate::qr;
use crate::storage::{LinkPatch, LinkRecord, LinkStore};
use crate::utils::{generate_slug, normalize_destination};

// ============ Request/Response DTOs ============

/// Request to create a new dynamic QR link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Display name; falls back to the destination when blank
    pub name: Option<String>,
    /// Destination URL, scheme optional
    pub destination_url: String,
}

/// Outcome of resolving a scanned slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Redirect(String),
    NotFound,
    Disabled,
}

type SlugGenerator = Arc<dyn Fn() -> String + Send + Sync>;

// ============ LinkService Implementation ============

#[derive(Clone)]
pub struct LinkService {
    store: Arc<LinkStore>,
    qr: QrConfig,
    slug_max_attempts: u32,
    slug_generator: SlugGenerator,
}

impl LinkService {
    pub fn new(store: Arc<LinkStore>, config: &StaticConfig) -> Self {
        Self {
            store,
            qr: config.qr.clone(),
            slug_max_attempts: config.features.slug_max_attempts.max(1),
            slug_generator: Arc::new(generate_slug),
        }
    }

    /// Replace the slug source (used to exercise collision handling).
    pub fn with_slug_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.slug_generator = Arc::new(generator);
        self
    }

    pub fn store(&self) -> &Arc<LinkStore> {
        &self.store
    }

    pub fn qr_config(&self) -> &QrConfig {
        &self.qr
    }

    fn normalize(url: &str) -> Result<String> {
        normalize_destination(url).map_err(|e| QryftError::validation(e.to_string()))
    }

    // ============ CRUD Operations ============

    /// Create a new link
    ///
    /// The destination is normalized (missing scheme becomes `https://`), the
    /// name defaults to the destination, and the slug is regenerated when it
    /// collides with an existing one, up to `slug_max_attempts` times.
    pub fn create_link(&self, req: CreateLinkRequest) -> Result<LinkRecord> {
        let destination = Self::normalize(&req.destination_url)?;
        let name = req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| destination.clone());
        let id = uuid::Uuid::new_v4().to_string();

        for attempt in 1..=self.slug_max_attempts {
            let slug = (self.slug_generator)();
            match self.store.create(&id, &slug, &name, &destination) {
                Ok(record) => {
                    info!(
                        "LinkService: created '{}' /q/{} -> '{}'",
                        record.name, record.slug, record.destination_url
                    );
                    return Ok(record);
                }
                Err(QryftError::DuplicateSlug(_)) => {
                    warn!(
                        "Slug collision on '{}' (attempt {}/{})",
                        slug, attempt, self.slug_max_attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(QryftError::duplicate_slug(format!(
            "Could not allocate a unique slug after {} attempts",
            self.slug_max_attempts
        )))
    }

    pub fn list_links(&self) -> Vec<LinkRecord> {
        self.store.list()
    }

    pub fn get_link(&self, id: &str) -> Result<LinkRecord> {
        self.store
            .get_by_id(id)
            .ok_or_else(|| QryftError::not_found(format!("Link '{}' not found", id)))
    }

    /// Update name, destination and/or status
    pub fn update_link(&self, id: &str, mut patch: LinkPatch) -> Result<LinkRecord> {
        if let Some(url) = patch.destination_url.as_deref() {
            patch.destination_url = Some(Self::normalize(url)?);
        }
        if let Some(name) = patch.name.as_mut() {
            *name = name.trim().to_string();
        }

        let updated = self
            .store
            .update(id, patch)?
            .ok_or_else(|| QryftError::not_found(format!("Link '{}' not found", id)))?;

        info!(
            "LinkService: updated '{}' -> '{}' (active: {})",
            updated.slug, updated.destination_url, updated.is_active
        );
        Ok(updated)
    }

    /// Enable or disable resolution without deleting the record
    pub fn set_active(&self, id: &str, is_active: bool) -> Result<LinkRecord> {
        self.update_link(id, LinkPatch::active(is_active))
    }

    pub fn delete_link(&self, id: &str, expected_version: Option<u64>) -> Result<()> {
        let removed = match expected_version {
            Some(version) => self.store.delete_if_version(id, version)?,
            None => self.store.delete(id)?,
        };

        if !removed {
            return Err(QryftError::not_found(format!("Link '{}' not found", id)));
        }
        Ok(())
    }

    // ============ Resolution ============

    /// Classify a scanned slug. A disabled record never redirects.
    pub fn resolve(&self, slug: &str) -> Resolution {
        let resolution = match self.store.get_by_slug(slug) {
            None => Resolution::NotFound,
            Some(link) if !link.is_active => Resolution::Disabled,
            Some(link) => Resolution::Redirect(link.destination_url),
        };
        debug!("Resolved /q/{} -> {:?}", slug, resolution);
        resolution
    }

    // ============ QR ============

    /// The value encoded into the QR image for `slug`.
    pub fn qr_target(&self, slug: &str) -> String {
        qr::target_url_for(&self.qr, slug)
    }

    pub fn qr_svg(&self, slug: &str) -> Result<String> {
        qr::render_svg(&self.qr_target(slug), self.qr.svg_min_size)
    }
}
