use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::attendance::domain::attendance_service::AttendanceService;
use crate::attendance::domain::image_upload::{ImageUpload, UploadError};
use crate::attendance::domain::in_flight::InFlight;
use crate::attendance::domain::notifier::Notifier;
use crate::attendance::domain::service_error::ServiceError;
use crate::dashboard::recognition_session::RecognitionSession;
use crate::shared::detection::Detection;

#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("a recognition request is already in progress")]
    Busy,
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Uploads a classroom photo and records the recognized faces.
pub struct RecognizeFacesUseCase {
    service: Arc<dyn AttendanceService>,
    notifier: Arc<dyn Notifier>,
    in_flight: InFlight,
}

impl RecognizeFacesUseCase {
    pub fn new(service: Arc<dyn AttendanceService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            in_flight: InFlight::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Reads `path` as an upload, then runs [`Self::execute`].
    pub fn execute_file(
        &self,
        path: &Path,
        session: &mut RecognitionSession,
    ) -> Result<Vec<Detection>, RecognizeError> {
        let upload = ImageUpload::from_path(path).map_err(|e| {
            log::error!("Rejected upload: {e}");
            match e {
                UploadError::NotAnImage(_) => self.notifier.error("Please select a valid image file"),
                _ => self.notifier.error(&e.to_string()),
            }
            e
        })?;
        self.execute(&upload, session)
    }

    /// Sends `upload` for recognition and replaces the session's faces.
    ///
    /// On failure the session keeps its previous faces. A call made while
    /// another is running returns [`RecognizeError::Busy`] without
    /// contacting the service.
    pub fn execute(
        &self,
        upload: &ImageUpload,
        session: &mut RecognitionSession,
    ) -> Result<Vec<Detection>, RecognizeError> {
        let Some(_token) = self.in_flight.try_begin() else {
            log::warn!("Recognition already in progress, ignoring {}", upload.file_name());
            return Err(RecognizeError::Busy);
        };

        match self.service.recognize(upload) {
            Ok(detections) => {
                self.notifier
                    .success(&format!("Recognized {} face(s)", detections.len()));
                session.replace(detections.clone());
                Ok(detections)
            }
            Err(e) => {
                log::error!("Recognition error: {e}");
                self.notifier
                    .error("Failed to recognize faces. Please try again.");
                Err(e.into())
            }
        }
    }
}
