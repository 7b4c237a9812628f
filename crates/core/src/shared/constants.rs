pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Env var that overrides the configured backend URL.
pub const API_BASE_URL_ENV: &str = "ROLLCALL_API_BASE_URL";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Upload size cap advertised by the dashboard ("PNG, JPG up to 10MB").
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Label geometry in display pixels.
pub const LABEL_FONT_SIZE: f64 = 14.0;
pub const LABEL_PADDING: f64 = 8.0;

/// Attendance percentage thresholds for status tiers.
pub const EXCELLENT_THRESHOLD: f64 = 75.0;
pub const AVERAGE_THRESHOLD: f64 = 50.0;

/// Fixture roster served by the mock backend: `(name, roll_no)`.
pub const MOCK_STUDENTS: &[(&str, &str)] = &[
    ("Lohit Kumar", "CS001"),
    ("Vineet Sharma", "CS002"),
    ("Priya Singh", "CS003"),
    ("Rahul Verma", "CS004"),
    ("Sneha Patel", "CS005"),
];

pub const MOCK_RECOGNIZE_LATENCY_MS: u64 = 1500;
pub const MOCK_MARK_LATENCY_MS: u64 = 500;
pub const MOCK_FETCH_LATENCY_MS: u64 = 300;
