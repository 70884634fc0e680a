//! The studio session behind the constructor canvas toolbar.
//!
//! One [`StudioSession`] owns the design for its lifetime. The toolbar
//! actions are requests against that single owner: saving, exporting,
//! importing, and sending for calculation. Actions that touch the network
//! or storage are best-effort and single-attempt; failures become error
//! notifications and the user remains free to retry.

use std::time::{SystemTime, UNIX_EPOCH};

use memorial_client::{ApiError, ApiResult, PriceEstimate, StorefrontClient};
use memorial_core::{
    Design, DesignDocument, DesignError, DesignStore, EditorSession, SavedDesign, StoreError,
    TemplateLibrary,
};
use memorial_renderer::{DesignExporter, RenderError};

use crate::notify::{Notifications, Severity};

/// PNG file signature.
const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Why an imported file was rejected. The live design is untouched in
/// every case.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The file is a PNG. Exported rasters are flattened with no
    /// recoverable design metadata, so they are treated as opaque images
    /// and rejected for reimport.
    #[error("PNG files are flattened images and cannot be reimported")]
    OpaqueRaster,

    /// The file is not valid UTF-8 text.
    #[error("file is not readable as text")]
    Encoding,

    /// The file parsed but failed document validation.
    #[error(transparent)]
    Invalid(#[from] DesignError),
}

/// Errors surfaced by toolbar actions.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// The action needs at least one placed element.
    #[error("the design is empty")]
    EmptyDesign,

    /// Local storage failed. Reported, not retried.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// Raster export failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A backend request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An import was rejected.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// A design document operation failed.
    #[error(transparent)]
    Design(#[from] DesignError),
}

/// A downloadable structured-text export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignExport {
    /// Suggested download file name.
    pub file_name: String,
    /// UTF-8 JSON bytes.
    pub bytes: Vec<u8>,
}

/// A downloadable flattened raster export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngExport {
    /// Suggested download file name.
    pub file_name: String,
    /// PNG bytes.
    pub bytes: Vec<u8>,
}

/// Snapshot handed to the calculation request.
///
/// Carries the generation the snapshot was taken at so the response can
/// be discarded if an import has replaced the design in the meantime.
#[derive(Debug, Clone)]
pub struct PendingCalculation {
    /// The serialized design, a pure read of the live state.
    pub document: DesignDocument,
    /// Design generation at snapshot time.
    pub generation: u64,
}

/// What became of a calculation response.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateOutcome {
    /// The estimate applies to the current design.
    Priced(PriceEstimate),
    /// The design was replaced while the request was in flight; the
    /// response was discarded.
    Stale,
    /// The service reported a failure. The local design is unaffected.
    Failed,
}

/// The editing session plus everything the toolbar needs around it.
#[derive(Debug)]
pub struct StudioSession {
    editor: EditorSession,
    library: TemplateLibrary,
    store: DesignStore,
    client: StorefrontClient,
    exporter: DesignExporter,
    notifications: Notifications,
}

impl StudioSession {
    /// Create a session with the built-in template library and default
    /// export configuration.
    #[must_use]
    pub fn new(store: DesignStore, client: StorefrontClient) -> Self {
        Self {
            editor: EditorSession::default(),
            library: TemplateLibrary::builtin(),
            store,
            client,
            exporter: DesignExporter::with_defaults(),
            notifications: Notifications::new(),
        }
    }

    /// The editing session.
    #[must_use]
    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    /// Mutable editing session for canvas gestures and direct edits.
    pub fn editor_mut(&mut self) -> &mut EditorSession {
        &mut self.editor
    }

    /// The template library.
    #[must_use]
    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    /// Mutable template library, e.g. for catalog-loaded parts.
    pub fn library_mut(&mut self) -> &mut TemplateLibrary {
        &mut self.library
    }

    /// Pending notifications.
    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Flip rotate mode; returns the new state.
    pub fn toggle_rotate_mode(&mut self) -> bool {
        self.editor.toggle_rotate_mode()
    }

    /// Persist the current design to local device storage.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::EmptyDesign`] for an empty design and
    /// [`StudioError::Storage`] when the write fails; both are also
    /// pushed as error notifications.
    pub fn save_design(&mut self) -> Result<SavedDesign, StudioError> {
        if self.editor.design().is_empty() {
            self.notifications.push(
                Severity::Error,
                "Empty design",
                "Add elements to the monument first",
            );
            return Err(StudioError::EmptyDesign);
        }
        let document = DesignDocument::from_design(self.editor.design());
        match self.store.save_design(document) {
            Ok(saved) => {
                self.notifications.push(
                    Severity::Success,
                    "Design saved",
                    "The project is stored on this device",
                );
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!(error = %e, "design save failed");
                self.notifications.push(
                    Severity::Error,
                    "Save failed",
                    "The design could not be written to device storage",
                );
                Err(e.into())
            }
        }
    }

    /// Serialize the design to a downloadable JSON artifact.
    ///
    /// A pure read; the live design is never mutated and the artifact
    /// round-trips every placed element field.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::EmptyDesign`] for an empty design.
    pub fn export_design(&mut self) -> Result<DesignExport, StudioError> {
        if self.editor.design().is_empty() {
            self.notifications.push(
                Severity::Error,
                "Empty design",
                "Add elements to the monument first",
            );
            return Err(StudioError::EmptyDesign);
        }
        let document = DesignDocument::from_design(self.editor.design());
        let json = document.to_json()?;
        let export = DesignExport {
            file_name: format!("monument_design_{}.json", current_timestamp_ms()),
            bytes: json.into_bytes(),
        };
        self.notifications.push(
            Severity::Success,
            "Template exported",
            "JSON file ready for download",
        );
        Ok(export)
    }

    /// Render the design to a downloadable flattened PNG.
    ///
    /// Lossy with respect to the editable model: intended for sharing and
    /// printing, not reimport.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::EmptyDesign`] for an empty design or
    /// [`StudioError::Render`] if rasterization fails.
    pub fn export_design_as_png(&mut self) -> Result<PngExport, StudioError> {
        if self.editor.design().is_empty() {
            self.notifications.push(
                Severity::Error,
                "Empty design",
                "Add elements to the monument first",
            );
            return Err(StudioError::EmptyDesign);
        }
        match self
            .exporter
            .render_png(self.editor.design(), &self.library)
        {
            Ok(bytes) => {
                let config = self.exporter.config();
                self.notifications.push(
                    Severity::Success,
                    "Image exported",
                    format!("PNG file ({}x{}px) ready for download", config.width, config.height),
                );
                Ok(PngExport {
                    file_name: format!("monument_design_{}.png", current_timestamp_ms()),
                    bytes,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "png export failed");
                self.notifications
                    .push(Severity::Error, "Image export failed", "Please try again");
                Err(e.into())
            }
        }
    }

    /// Import a design file, replacing the live design wholesale.
    ///
    /// Atomic: the file is parsed and fully validated before anything is
    /// touched, so a malformed file leaves the live design byte-for-byte
    /// unchanged. PNG files are rejected as opaque rasters.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Import`] describing the rejection.
    pub fn import_design(&mut self, bytes: &[u8]) -> Result<(), StudioError> {
        let result = Self::parse_import(bytes);
        match result {
            Ok(design) => {
                self.editor.replace_design(design);
                self.notifications.push(
                    Severity::Success,
                    "Template loaded",
                    "The design was restored from the file",
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "design import rejected");
                self.notifications.push(
                    Severity::Error,
                    "Import failed",
                    "The template could not be loaded. Check the file",
                );
                Err(StudioError::Import(e))
            }
        }
    }

    fn parse_import(bytes: &[u8]) -> Result<Design, ImportError> {
        if bytes.starts_with(&PNG_MAGIC) {
            return Err(ImportError::OpaqueRaster);
        }
        let text = std::str::from_utf8(bytes).map_err(|_| ImportError::Encoding)?;
        let document = DesignDocument::from_json(text)?;
        Ok(document.into_design()?)
    }

    /// Snapshot the design for a calculation request.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::EmptyDesign`] for an empty design.
    pub fn begin_calculation(&mut self) -> Result<PendingCalculation, StudioError> {
        if self.editor.design().is_empty() {
            self.notifications.push(
                Severity::Error,
                "Empty design",
                "Add elements to the monument before sending",
            );
            return Err(StudioError::EmptyDesign);
        }
        Ok(PendingCalculation {
            document: DesignDocument::from_design(self.editor.design()),
            generation: self.editor.generation(),
        })
    }

    /// Apply the result of a calculation request.
    ///
    /// If an import replaced the design while the request was in flight,
    /// the response is discarded without any notification: it describes a
    /// design that no longer exists.
    pub fn accept_estimate(
        &mut self,
        pending: &PendingCalculation,
        result: ApiResult<PriceEstimate>,
    ) -> EstimateOutcome {
        if pending.generation != self.editor.generation() {
            tracing::debug!(
                pending = pending.generation,
                current = self.editor.generation(),
                "discarding stale calculation result"
            );
            return EstimateOutcome::Stale;
        }
        match result {
            Ok(estimate) => {
                self.notifications.push(
                    Severity::Success,
                    "Estimate received",
                    format!("{:.0} {}", estimate.total, estimate.currency),
                );
                EstimateOutcome::Priced(estimate)
            }
            Err(e) => {
                tracing::warn!(error = %e, "calculation request failed");
                self.notifications.push(
                    Severity::Error,
                    "Calculation failed",
                    "The service could not be reached. Please try again",
                );
                EstimateOutcome::Failed
            }
        }
    }

    /// Convenience wrapper: snapshot, request, and apply in one call.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::EmptyDesign`] if there is nothing to send.
    pub async fn send_for_calculation(&mut self) -> Result<EstimateOutcome, StudioError> {
        let pending = self.begin_calculation()?;
        let result = self.client.request_estimate(&pending.document).await;
        Ok(self.accept_estimate(&pending, result))
    }

    /// The backend client, for catalog and lead operations.
    #[must_use]
    pub fn client(&self) -> &StorefrontClient {
        &self.client
    }

    /// The local store, for gallery state.
    #[must_use]
    pub fn store(&self) -> &DesignStore {
        &self.store
    }
}

/// Current Unix timestamp in milliseconds, for download file names.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
