use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::attendance::domain::attendance_service::AttendanceService;
use crate::attendance::domain::image_upload::ImageUpload;
use crate::attendance::domain::service_error::{Endpoint, ServiceError};
use crate::shared::detection::Detection;
use crate::shared::student::{SessionSummary, StudentAttendanceSummary};

#[derive(Deserialize)]
struct RecognizeResponse {
    results: Vec<Detection>,
}

#[derive(Serialize)]
struct MarkAttendanceRequest<'a> {
    date: NaiveDate,
    recognized_names: &'a [String],
}

/// Live client for the recognition/attendance backend.
///
/// Every request carries the configured timeout. Any non-2xx status is an
/// error. Student percentages are recomputed from `present/total` on the
/// way in rather than trusted.
pub struct HttpAttendanceService {
    client: Client,
    base_url: Url,
}

impl HttpAttendanceService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let invalid = |reason: String| ServiceError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("expected an http or https URL".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ServiceError::Client)?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send(&self, endpoint: Endpoint, request: RequestBuilder) -> Result<Response, ServiceError> {
        log::debug!("{endpoint}: sending request");
        let response = request
            .send()
            .map_err(|e| ServiceError::Transport { endpoint, source: e })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        response: Response,
    ) -> Result<T, ServiceError> {
        response
            .json::<T>()
            .map_err(|e| ServiceError::Decode { endpoint, source: e })
    }
}

impl AttendanceService for HttpAttendanceService {
    fn recognize(&self, upload: &ImageUpload) -> Result<Vec<Detection>, ServiceError> {
        let endpoint = Endpoint::Recognize;
        let part = multipart::Part::bytes(upload.bytes().to_vec())
            .file_name(upload.file_name().to_string())
            .mime_str(upload.mime_type())
            .map_err(ServiceError::Client)?;
        let form = multipart::Form::new().part("file", part);

        let request = self
            .client
            .post(self.endpoint_url(&["recognize"]))
            .multipart(form);
        let response = self.send(endpoint, request)?;
        let body: RecognizeResponse = self.decode(endpoint, response)?;
        log::debug!("{endpoint}: {} detection(s)", body.results.len());
        Ok(body.results)
    }

    fn mark_attendance(&self, date: NaiveDate, names: &[String]) -> Result<(), ServiceError> {
        let body = MarkAttendanceRequest {
            date,
            recognized_names: names,
        };
        let request = self
            .client
            .post(self.endpoint_url(&["mark_attendance"]))
            .json(&body);
        self.send(Endpoint::MarkAttendance, request)?;
        Ok(())
    }

    fn all_students(&self) -> Result<Vec<StudentAttendanceSummary>, ServiceError> {
        let endpoint = Endpoint::AllAttendance;
        let request = self.client.get(self.endpoint_url(&["attendance", "all"]));
        let response = self.send(endpoint, request)?;
        let students: Vec<StudentAttendanceSummary> = self.decode(endpoint, response)?;
        Ok(students
            .into_iter()
            .map(StudentAttendanceSummary::with_recomputed_percentage)
            .collect())
    }

    fn student(&self, id: &str) -> Result<StudentAttendanceSummary, ServiceError> {
        let endpoint = Endpoint::StudentAttendance;
        let request = self.client.get(self.endpoint_url(&["attendance", id]));
        let response = self.send(endpoint, request)?;
        let student: StudentAttendanceSummary = self.decode(endpoint, response)?;
        Ok(student.with_recomputed_percentage())
    }

    fn sessions(&self) -> Result<Vec<SessionSummary>, ServiceError> {
        let endpoint = Endpoint::Sessions;
        let request = self.client.get(self.endpoint_url(&["sessions"]));
        let response = self.send(endpoint, request)?;
        self.decode(endpoint, response)
    }
}
