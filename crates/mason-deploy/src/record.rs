//! Deployment records and the frozen configuration snapshot.
//!
//! A [`Deployment`] is an immutable audit record of one build attempt. Its
//! [`TemplateSnapshot`] is captured when the record is created and never
//! recomputed, so the configuration that produced a deployed artifact stays
//! reconstructible even after the site changes.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mason_model::{CmsKind, Site, Template, TemplateFootprint, TemplateKind};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a deployment attempt.
///
/// `Success` and `Failed` are terminal: a record never leaves them. A retry
/// creates a fresh record instead of resurrecting a failed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Pending,
    Building,
    Success,
    Failed,
}

impl DeploymentStatus {
    /// Whether this status ends the record's lifecycle.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    /// Whether moving to `next` is a legal transition.
    #[must_use]
    pub fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Building)
                | (Self::Building, Self::Success)
                | (Self::Building, Self::Failed)
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Building => "building",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Template identity frozen into a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTemplate {
    pub id: i64,
    pub name: String,
    pub kind: TemplateKind,
    pub version: String,
}

/// Footprint identity frozen into a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFootprint {
    pub id: i64,
    pub name: String,
    pub cms_kind: CmsKind,
}

/// Per-site settings frozen into a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSettings {
    pub enable_page_speed: bool,
    pub unique_class_prefix: Option<String>,
}

/// Frozen copy of the configuration a deployment was built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSnapshot {
    pub template: SnapshotTemplate,
    pub footprint: Option<SnapshotFootprint>,
    /// Site-provided variable values at capture time.
    pub variables: HashMap<String, String>,
    /// Site color overrides at capture time.
    pub colors: HashMap<String, String>,
    pub settings: SnapshotSettings,
    pub captured_at: DateTime<Utc>,
}

impl TemplateSnapshot {
    /// Freeze the configuration a build is about to use.
    #[must_use]
    pub fn capture(
        site: &Site,
        template: &Template,
        footprint: Option<&TemplateFootprint>,
    ) -> Self {
        Self {
            template: SnapshotTemplate {
                id: template.id,
                name: template.name.clone(),
                kind: template.kind,
                version: template.version.clone(),
            },
            footprint: footprint.map(|f| SnapshotFootprint {
                id: f.id,
                name: f.name.clone(),
                cms_kind: f.cms_kind,
            }),
            variables: site.template_variables.clone(),
            colors: site.custom_colors.clone(),
            settings: SnapshotSettings {
                enable_page_speed: site.enable_page_speed,
                unique_class_prefix: site.unique_class_prefix.clone(),
            },
            captured_at: Utc::now(),
        }
    }
}

/// Audit record of one deployment attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: i64,
    pub site_id: i64,
    pub status: DeploymentStatus,
    /// Configuration frozen at record creation; never recomputed.
    pub template_snapshot: TemplateSnapshot,
    /// Public URL the site serves from, set on success.
    pub deployed_url: Option<String>,
    /// Output paths produced by the build.
    pub generated_files: Vec<String>,
    pub file_count: Option<usize>,
    pub total_size_bytes: Option<u64>,
    pub build_duration: Option<Duration>,
    pub build_log: String,
    pub created_at: DateTime<Utc>,
    /// Set together with the terminal status.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Deployment {
    /// Whether the attempt has reached a terminal status.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }
}
