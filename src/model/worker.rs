//! Background model loader.
//!
//! Parsing runs on a dedicated thread so the frame loop never blocks on file
//! I/O. Completions come back tagged with the request's [`LoadTicket`]; the
//! receiver decides whether they are still current.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;

use crate::error::VantageError;
use crate::model::loader::ModelSource;
use crate::model::request::LoadTicket;
use crate::model::LoadedModel;

/// Work sent to the loader thread.
enum LoadRequest {
    Load {
        ticket: LoadTicket,
        source: ModelSource,
    },
    Shutdown,
}

/// A finished load, successful or not.
#[derive(Debug)]
pub struct LoadCompletion {
    /// Ticket the request was issued with.
    pub ticket: LoadTicket,
    /// Parsed model summary, or why parsing failed.
    pub result: Result<LoadedModel, VantageError>,
}

/// Background thread that parses model files.
pub struct LoadWorker {
    request_tx: mpsc::Sender<LoadRequest>,
    completion_rx: mpsc::Receiver<LoadCompletion>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl LoadWorker {
    /// Spawn the loader thread.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::ThreadSpawn`] if the thread fails to spawn.
    pub fn new() -> Result<Self, VantageError> {
        let (request_tx, request_rx) = mpsc::channel::<LoadRequest>();
        let (completion_tx, completion_rx) = mpsc::channel::<LoadCompletion>();

        let thread = std::thread::Builder::new()
            .name("model-loader".into())
            .spawn(move || {
                Self::thread_loop(&request_rx, &completion_tx);
            })
            .map_err(VantageError::ThreadSpawn)?;

        Ok(Self {
            request_tx,
            completion_rx,
            thread: Some(thread),
        })
    }

    /// Queue a load (non-blocking send).
    ///
    /// # Errors
    ///
    /// [`VantageError::ModelLoad`] if the loader thread is gone.
    pub fn submit(&self, ticket: LoadTicket, source: ModelSource) -> Result<(), VantageError> {
        self.request_tx
            .send(LoadRequest::Load { ticket, source })
            .map_err(|mpsc::SendError(request)| {
                let file = match request {
                    LoadRequest::Load { ticket, .. } => ticket.file_name,
                    LoadRequest::Shutdown => String::new(),
                };
                VantageError::model_load(file, "the model loader has stopped")
            })
    }

    /// Non-blocking check for a finished load.
    #[must_use]
    pub fn try_recv(&self) -> Option<LoadCompletion> {
        self.completion_rx.try_recv().ok()
    }

    /// Block until the next load finishes or the worker is gone.
    #[must_use]
    pub fn recv(&self) -> Option<LoadCompletion> {
        self.completion_rx.recv().ok()
    }

    /// Shut down the background thread and wait for it to finish.
    pub fn shutdown(&mut self) {
        let _ = self.request_tx.send(LoadRequest::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }

    fn thread_loop(
        request_rx: &mpsc::Receiver<LoadRequest>,
        completion_tx: &mpsc::Sender<LoadCompletion>,
    ) {
        while let Ok(request) = request_rx.recv() {
            match drain_latest(request, request_rx) {
                LoadRequest::Shutdown => break,
                LoadRequest::Load { ticket, source } => {
                    log::debug!(
                        "loading {} as {} (generation {})",
                        ticket.file_name,
                        ticket.format,
                        ticket.generation()
                    );
                    let result = guarded(&ticket, || LoadedModel::load(&source, ticket.format));
                    if completion_tx.send(LoadCompletion { ticket, result }).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for LoadWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Run a parse, turning a parser panic into a load error so the thread
/// survives it.
fn guarded(
    ticket: &LoadTicket,
    load: impl FnOnce() -> Result<LoadedModel, VantageError>,
) -> Result<LoadedModel, VantageError> {
    panic::catch_unwind(AssertUnwindSafe(load)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "parser panicked".to_owned());
        log::error!("loader panicked on {}: {reason}", ticket.file_name);
        Err(VantageError::model_load(ticket.file_name.clone(), reason))
    })
}

/// Skip queued loads that a newer request already supersedes. A queued
/// shutdown always wins.
fn drain_latest(
    initial: LoadRequest,
    rx: &mpsc::Receiver<LoadRequest>,
) -> LoadRequest {
    let mut latest = initial;
    while let Ok(newer) = rx.try_recv() {
        if let LoadRequest::Load { ticket, .. } = &latest {
            log::debug!("skipping superseded load of {}", ticket.file_name);
        }
        latest = newer;
        if matches!(latest, LoadRequest::Shutdown) {
            break;
        }
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::request::LoadTracker;
    use crate::model::ModelFormat;

    const OBJ: &[u8] = b"v 0 0 0\nv 2 0 0\nv 0 2 2\nf 1 2 3\n";

    #[test]
    fn completes_submitted_load() {
        let worker = LoadWorker::new().unwrap();
        let mut tracker = LoadTracker::new();
        let ticket = tracker.begin(ModelFormat::Obj, "tri.obj");
        worker
            .submit(ticket.clone(), ModelSource::from_bytes("tri.obj", OBJ.to_vec()))
            .unwrap();

        let completion = worker.recv().unwrap();
        assert_eq!(completion.ticket, ticket);
        let model = completion.result.unwrap();
        assert_eq!(model.triangle_count, 1);
        assert_eq!(model.bounds.size(), glam::Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn parse_failures_come_back_as_errors() {
        let worker = LoadWorker::new().unwrap();
        let mut tracker = LoadTracker::new();
        let ticket = tracker.begin(ModelFormat::Glb, "broken.glb");
        worker
            .submit(ticket, ModelSource::from_bytes("broken.glb", b"nope".to_vec()))
            .unwrap();

        let completion = worker.recv().unwrap();
        assert!(matches!(
            completion.result,
            Err(VantageError::ModelLoad { .. })
        ));
    }

    #[test]
    fn submit_after_shutdown_is_an_error() {
        let mut worker = LoadWorker::new().unwrap();
        worker.shutdown();
        let mut tracker = LoadTracker::new();
        let ticket = tracker.begin(ModelFormat::Obj, "late.obj");
        let err = worker
            .submit(ticket, ModelSource::from_bytes("late.obj", OBJ.to_vec()))
            .unwrap_err();
        assert!(matches!(err, VantageError::ModelLoad { ref file, .. } if file == "late.obj"));
    }

    #[test]
    fn parser_panic_becomes_load_error() {
        let mut tracker = LoadTracker::new();
        let ticket = tracker.begin(ModelFormat::Stl, "cursed.stl");
        let result = guarded(&ticket, || panic::resume_unwind(Box::new("index out of range")));
        assert!(matches!(
            result,
            Err(VantageError::ModelLoad { ref message, .. }) if message.contains("index out of range")
        ));
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut worker = LoadWorker::new().unwrap();
        worker.shutdown();
        worker.shutdown();
        assert!(worker.try_recv().is_none());
    }
}
