use std::time::Duration;

pub const LOCAL_API_BASE_URL: &str = "http://localhost:3000";
/// Where the recorder lives when the page is not served from `localhost`.
pub const DEPLOYED_API_BASE_URL: &str = "https://your-backend-url.onrender.com";

/// Sent with every affirmative submission.
pub const YES_MESSAGE: &str = records::DEFAULT_MESSAGE;

/// Session storage key of the negative attempt counter.
pub const NO_ATTEMPTS_KEY: &str = "noAttempts";

pub const MIN_ESCAPE_DISTANCE: f64 = 100.0;
pub const VIEWPORT_PADDING: f64 = 20.0;
pub const MAX_RELOCATION_ATTEMPTS: u32 = 50;
pub const MAX_TILT_DEGREES: f64 = 10.0;
pub const HOVER_MAX_MOVE: f64 = 150.0;

pub const FIRST_REFUSAL_WARNING: &str = "Think again 😏";
pub const REPEATED_REFUSAL_WARNING: &str = "This is not an option.";

pub const INITIAL_HEARTS: usize = 15;
pub const HEART_PERIOD: Duration = Duration::from_millis(800);

pub const CONFETTI_PIECES: usize = 100;
pub const CONFETTI_STAGGER: Duration = Duration::from_millis(20);
pub const CONFETTI_LIFETIME: Duration = Duration::from_millis(5000);

/// Picks the recorder endpoint by comparing the page hostname against a
/// literal `localhost`.
pub fn api_base_url(hostname: &str) -> &'static str {
    if hostname == "localhost" {
        LOCAL_API_BASE_URL
    } else {
        DEPLOYED_API_BASE_URL
    }
}
