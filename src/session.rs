//! Viewer session: the host-facing surface of a mounted viewer.
//!
//! A session validates incoming files, runs loads in the background, fits
//! the camera when the current load completes, and exposes what a host UI
//! needs to draw: the load status, a dismissible error banner and the row
//! of preset buttons.
//!
//! ```no_run
//! # use vantage::session::ViewerSession;
//! # use vantage::options::Options;
//! # use vantage::camera::ViewPreset;
//! let mut session = ViewerSession::new(Options::default())?;
//! let _ticket = session.open_file("bracket.stl".as_ref())?;
//! session.wait();
//! session.select_preset(ViewPreset::Top);
//! while session.advance_frame(1.0 / 60.0) {}
//! # Ok::<(), vantage::error::VantageError>(())
//! ```

use std::path::Path;

use crate::camera::{CameraFit, ViewController, ViewPreset};
use crate::error::VantageError;
use crate::input::InputEvent;
use crate::model::{
    LoadCompletion, LoadTicket, LoadTracker, LoadWorker, LoadedModel,
    ModelFormat, ModelSource,
};
use crate::options::Options;

/// What the viewer is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    /// Upload prompt; no model.
    Empty,
    /// A load is in flight; show the progress indicator.
    Loading {
        /// File being loaded.
        file_name: String,
        /// Its format.
        format: ModelFormat,
    },
    /// A model is displayed.
    Ready(LoadedModel),
}

/// Category of a user-facing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// The file was rejected before loading.
    UnsupportedFormat,
    /// The file had a supported extension but could not be read or parsed.
    LoadFailed,
}

/// Dismissible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Error category.
    pub kind: BannerKind,
    /// Text to show.
    pub message: String,
}

impl Banner {
    fn from_error(error: &VantageError) -> Self {
        let kind = match error {
            VantageError::UnsupportedFormat { .. } => BannerKind::UnsupportedFormat,
            _ => BannerKind::LoadFailed,
        };
        Self {
            kind,
            message: error.to_string(),
        }
    }
}

/// One entry in the preset button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetButton {
    /// Preset this button selects.
    pub preset: ViewPreset,
    /// Button text.
    pub label: &'static str,
    /// Whether the view is locked on this preset.
    pub highlighted: bool,
}

/// A mounted viewer.
pub struct ViewerSession {
    options: Options,
    view: ViewController,
    tracker: LoadTracker,
    worker: LoadWorker,
    status: LoadStatus,
    banner: Option<Banner>,
    last_fit: Option<CameraFit>,
}

impl ViewerSession {
    /// Mount a viewer.
    ///
    /// # Errors
    ///
    /// [`VantageError::ThreadSpawn`] if the loader thread cannot start.
    pub fn new(options: Options) -> Result<Self, VantageError> {
        let view = ViewController::new(
            options.camera.clone(),
            options.viewer.initial_preset,
            options.viewer.aspect(),
        );
        Ok(Self {
            view,
            tracker: LoadTracker::new(),
            worker: LoadWorker::new()?,
            status: LoadStatus::Empty,
            banner: None,
            last_fit: None,
            options,
        })
    }

    /// Options the session was mounted with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The view controller.
    #[must_use]
    pub fn view(&self) -> &ViewController {
        &self.view
    }

    /// Current load status.
    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Whether the progress indicator should be shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading { .. })
    }

    /// Fit computed for the displayed model, if any.
    #[must_use]
    pub fn fit(&self) -> Option<CameraFit> {
        self.last_fit
    }

    /// The error banner, if one is showing.
    #[must_use]
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Hide the error banner.
    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Open a file from disk.
    ///
    /// Replaces whatever was shown. The extension is checked first; a
    /// rejected or unreadable file leaves the session at the upload prompt
    /// with a banner.
    ///
    /// # Errors
    ///
    /// [`VantageError::UnsupportedFormat`], or [`VantageError::ModelLoad`] if
    /// the file cannot be read. The same error is shown as the banner.
    pub fn open_file(&mut self, path: &Path) -> Result<LoadTicket, VantageError> {
        self.reset();
        let format = self.validate(ModelFormat::from_path(path))?;
        let source = match ModelSource::read(path) {
            Ok(source) => source,
            Err(e) => {
                let e = VantageError::model_load(path.display().to_string(), e);
                return Err(self.fail(e));
            }
        };
        self.begin_load(format, source)
    }

    /// Open an in-memory file (drag-and-drop).
    ///
    /// # Errors
    ///
    /// [`VantageError::UnsupportedFormat`] if `name` has an extension off the
    /// allow-list, [`VantageError::ModelLoad`] if the loader thread is gone.
    pub fn open_bytes(
        &mut self,
        name: &str,
        bytes: Vec<u8>,
    ) -> Result<LoadTicket, VantageError> {
        self.reset();
        let format = self.validate(ModelFormat::from_path(name))?;
        self.begin_load(format, ModelSource::from_bytes(name, bytes))
    }

    fn validate(
        &mut self,
        format: Result<ModelFormat, VantageError>,
    ) -> Result<ModelFormat, VantageError> {
        format.map_err(|e| {
            log::info!("rejected file: {e}");
            self.fail(e)
        })
    }

    fn fail(&mut self, error: VantageError) -> VantageError {
        self.banner = Some(Banner::from_error(&error));
        self.status = LoadStatus::Empty;
        error
    }

    fn begin_load(
        &mut self,
        format: ModelFormat,
        source: ModelSource,
    ) -> Result<LoadTicket, VantageError> {
        let ticket = self.tracker.begin(format, source.name.clone());
        let file_name = source.name.clone();
        if let Err(e) = self.worker.submit(ticket.clone(), source) {
            log::error!("{e}");
            self.tracker.invalidate();
            return Err(self.fail(e));
        }
        self.status = LoadStatus::Loading { file_name, format };
        Ok(ticket)
    }

    /// Apply any finished loads without blocking. Returns `true` if the
    /// displayed model changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(completion) = self.worker.try_recv() {
            changed |= self.apply_completion(completion);
        }
        changed
    }

    /// Block until the current load, if any, has finished.
    pub fn wait(&mut self) {
        while self.is_loading() {
            match self.worker.recv() {
                Some(completion) => {
                    let _ = self.apply_completion(completion);
                }
                None => {
                    let file = match &self.status {
                        LoadStatus::Loading { file_name, .. } => file_name.clone(),
                        _ => String::new(),
                    };
                    self.tracker.invalidate();
                    let e = VantageError::model_load(file, "the model loader has stopped");
                    log::error!("{e}");
                    let _ = self.fail(e);
                }
            }
        }
    }

    /// Apply one completion. Completions from superseded loads are dropped.
    /// Returns `true` if it was current.
    pub fn apply_completion(&mut self, completion: LoadCompletion) -> bool {
        let LoadCompletion { ticket, result } = completion;
        if !self.tracker.is_current(&ticket) {
            log::debug!(
                "ignoring stale load of {} (generation {})",
                ticket.file_name,
                ticket.generation()
            );
            return false;
        }

        match result {
            Ok(model) => {
                self.last_fit = Some(self.view.on_model_loaded(&model.bounds));
                self.status = LoadStatus::Ready(model);
                self.banner = None;
            }
            Err(e) => {
                log::warn!("{e}");
                let _ = self.fail(e);
            }
        }
        true
    }

    /// Lock the view onto a preset.
    pub fn select_preset(&mut self, preset: ViewPreset) {
        self.view.select_preset(preset);
    }

    /// Forward an input event. Returns `true` when the user began
    /// interacting, so the host can clear the preset highlight.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.view.handle_input(event)
    }

    /// Per-frame tick: apply finished loads, then advance the camera.
    /// Returns `true` while the camera is still animating.
    pub fn advance_frame(&mut self, dt: f32) -> bool {
        let _ = self.poll();
        self.view.on_frame_advance(dt)
    }

    /// Viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.view.resize(width, height);
    }

    /// The preset button row.
    #[must_use]
    pub fn preset_buttons(&self) -> Vec<PresetButton> {
        let state = self.view.state();
        ViewPreset::ALL
            .into_iter()
            .map(|preset| PresetButton {
                preset,
                label: preset.label(),
                highlighted: state.is_locked() && state.preset == preset,
            })
            .collect()
    }

    /// Drop the current model and return to the upload prompt. Any load
    /// still in flight becomes stale.
    pub fn reset(&mut self) {
        self.tracker.invalidate();
        self.status = LoadStatus::Empty;
        self.banner = None;
        self.last_fit = None;
        self.view.reset(self.options.viewer.initial_preset);
    }
}
