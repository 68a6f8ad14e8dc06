use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_CLINIC_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_QUEUE_ENDPOINT: &str = "/appointments/api/queue-number/";
pub const DEFAULT_CALL_NEXT_ENDPOINT: &str = "/appointments/api/call-next/{doctor_id}/";
pub const DEFAULT_CURRENT_PATIENT_ENDPOINT: &str = "/appointments/api/current-patient/";

/// Placeholder substituted with the doctor identifier in the call-next endpoint.
pub const DOCTOR_ID_PLACEHOLDER: &str = "{doctor_id}";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub clinic_base_url: String,
    pub queue_endpoint: String,
    pub call_next_endpoint: String,
    pub current_patient_endpoint: String,
    pub csrf_token: String,
    pub session_id: Option<String>,
    pub queue_refresh_interval_seconds: u64,
    pub now_serving_refresh_interval_seconds: u64,
    pub clock_tick_millis: u64,
    pub notice_display_seconds: u64,
    pub listen_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clinic_base_url: DEFAULT_CLINIC_BASE_URL.to_string(),
            queue_endpoint: DEFAULT_QUEUE_ENDPOINT.to_string(),
            call_next_endpoint: DEFAULT_CALL_NEXT_ENDPOINT.to_string(),
            current_patient_endpoint: DEFAULT_CURRENT_PATIENT_ENDPOINT.to_string(),
            csrf_token: String::new(),
            session_id: None,
            queue_refresh_interval_seconds: 15,
            now_serving_refresh_interval_seconds: 10,
            clock_tick_millis: 1000,
            notice_display_seconds: 5,
            listen_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            clinic_base_url: env::var("CLINIC_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_BASE_URL not set, using default");
                    defaults.clinic_base_url.clone()
                }),
            queue_endpoint: env::var("QUEUE_ENDPOINT")
                .unwrap_or(defaults.queue_endpoint),
            call_next_endpoint: env::var("CALL_NEXT_ENDPOINT")
                .unwrap_or(defaults.call_next_endpoint),
            current_patient_endpoint: env::var("CURRENT_PATIENT_ENDPOINT")
                .unwrap_or(defaults.current_patient_endpoint),
            csrf_token: env::var("CSRF_TOKEN")
                .unwrap_or_else(|_| {
                    warn!("CSRF_TOKEN not set, call-next requests will be rejected by the clinic API");
                    String::new()
                }),
            session_id: env::var("CLINIC_SESSION_ID").ok().filter(|s| !s.is_empty()),
            queue_refresh_interval_seconds: parse_env(
                "QUEUE_REFRESH_INTERVAL_SECONDS",
                defaults.queue_refresh_interval_seconds,
            ),
            now_serving_refresh_interval_seconds: parse_env(
                "NOW_SERVING_REFRESH_INTERVAL_SECONDS",
                defaults.now_serving_refresh_interval_seconds,
            ),
            clock_tick_millis: parse_env("CLOCK_TICK_MILLIS", defaults.clock_tick_millis),
            notice_display_seconds: parse_env(
                "NOTICE_DISPLAY_SECONDS",
                defaults.notice_display_seconds,
            ),
            listen_addr: env::var("QUEUE_DISPLAY_ADDR").unwrap_or(defaults.listen_addr),
        };

        if !config.is_configured() {
            warn!("Queue display not fully configured - missing environment variables");
        }

        if !config.call_next_endpoint.contains(DOCTOR_ID_PLACEHOLDER) {
            warn!(
                "CALL_NEXT_ENDPOINT has no {} placeholder, the doctor id will be appended",
                DOCTOR_ID_PLACEHOLDER
            );
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.clinic_base_url.is_empty() && !self.csrf_token.is_empty()
    }

    /// Call-next path for one doctor. The id is substituted verbatim; callers validate it.
    pub fn call_next_path(&self, doctor_id: &str) -> String {
        if self.call_next_endpoint.contains(DOCTOR_ID_PLACEHOLDER) {
            self.call_next_endpoint.replace(DOCTOR_ID_PLACEHOLDER, doctor_id)
        } else {
            format!("{}/{}/", self.call_next_endpoint.trim_end_matches('/'), doctor_id)
        }
    }

    pub fn queue_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.queue_refresh_interval_seconds.max(1))
    }

    pub fn now_serving_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.now_serving_refresh_interval_seconds.max(1))
    }

    pub fn clock_tick(&self) -> Duration {
        Duration::from_millis(self.clock_tick_millis.max(1))
    }

    pub fn notice_display_duration(&self) -> Duration {
        Duration::from_secs(self.notice_display_seconds)
    }
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
