use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use edutrack_core::model::{
    ActivityEvent, Course, CourseId, DashboardSnapshot, LessonSummary, MentorInsight, NewActivity,
    User, UserId,
};

use super::Backend;
use crate::error::{GatewayConfigError, GatewayError};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl GatewayConfig {
    /// # Errors
    ///
    /// Returns `GatewayConfigError::InvalidBaseUrl` unless `base_url` is an
    /// absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, GatewayConfigError> {
        let trimmed = base_url.trim();
        let url = Url::parse(trimmed)
            .map_err(|err| GatewayConfigError::InvalidBaseUrl(format!("{trimmed}: {err}")))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayConfigError::InvalidBaseUrl(trimmed.to_owned()));
        }
        Ok(Self {
            base_url: url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `EDUTRACK_API_URL` and `EDUTRACK_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `GatewayConfigError` if either variable holds an invalid value.
    pub fn from_env() -> Result<Self, GatewayConfigError> {
        let base_url = env::var("EDUTRACK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let mut config = Self::new(&base_url)?;
        if let Ok(raw) = env::var("EDUTRACK_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| GatewayConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(GatewayConfigError::InvalidTimeout(raw));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

/// JSON-over-HTTP gateway to the EduTrack backend.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns `GatewayConfigError::Client` if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.config.base_url.clone();
        // Validated in `GatewayConfig::new`, so the base always has path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }
}

#[async_trait]
impl Backend for HttpGateway {
    async fn login(&self, email: &str, password: &str) -> Result<Option<User>, GatewayError> {
        let url = self.endpoint(&["auth", "login"]);
        log::debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if status.is_server_error() {
            let message = rejection_message(response).await;
            return Err(GatewayError::Network(message));
        }
        if !status.is_success() {
            let message = rejection_message(response).await;
            log::info!("login rejected for {email}: {message}");
            return Ok(None);
        }

        let user: User = response
            .json()
            .await
            .map_err(|err| GatewayError::Network(format!("malformed login response: {err}")))?;
        Ok(Some(user))
    }

    async fn fetch_dashboard(&self, user_id: &UserId) -> Result<DashboardSnapshot, GatewayError> {
        let url = self.endpoint(&["dashboard", user_id.as_str()]);
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await.map_err(network)?;

        if !response.status().is_success() {
            return Err(GatewayError::Fetch(rejection_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|err| GatewayError::Fetch(format!("malformed dashboard response: {err}")))
    }

    async fn log_activity(&self, activity: &NewActivity) -> Result<ActivityEvent, GatewayError> {
        let url = self.endpoint(&["activities"]);
        log::debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .json(activity)
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(GatewayError::Submit(rejection_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|err| GatewayError::Submit(format!("malformed activity response: {err}")))
    }

    async fn fetch_mentor_insights(
        &self,
        students: &[User],
        courses: &[Course],
        activities: &[ActivityEvent],
    ) -> Result<Vec<MentorInsight>, GatewayError> {
        let url = self.endpoint(&["mentor", "insights"]);
        log::debug!("POST {url}");
        let payload = InsightsRequest {
            students,
            courses,
            activities,
        };
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(GatewayError::Insights(rejection_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|err| GatewayError::Insights(format!("malformed insights response: {err}")))
    }

    async fn fetch_lessons(&self, course_id: &CourseId) -> Result<Vec<LessonSummary>, GatewayError> {
        let url = self.endpoint(&["courses", course_id.as_str(), "lessons"]);
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await.map_err(network)?;

        if !response.status().is_success() {
            return Err(GatewayError::Fetch(rejection_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|err| GatewayError::Fetch(format!("malformed lessons response: {err}")))
    }
}

fn network(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Network(format!("request timed out: {err}"))
    } else {
        GatewayError::Network(err.to_string())
    }
}

/// Status line plus the backend's `{error}` text when it sent one.
async fn rejection_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) if !body.error.trim().is_empty() => format!("{status}: {}", body.error.trim()),
        _ => status.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct InsightsRequest<'a> {
    students: &'a [User],
    courses: &'a [Course],
    activities: &'a [ActivityEvent],
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_non_http_urls() {
        assert!(GatewayConfig::new("not a url").is_err());
        assert!(GatewayConfig::new("mailto:ops@edutrack.dev").is_err());
        assert!(GatewayConfig::new("ftp://files.edutrack.dev").is_err());
    }

    #[test]
    fn endpoint_joins_segments_and_escapes_ids() {
        let config = GatewayConfig::new("http://localhost:3000/api/").unwrap();
        let gateway = HttpGateway::new(config).unwrap();
        assert_eq!(
            gateway.endpoint(&["dashboard", "u1"]).as_str(),
            "http://localhost:3000/api/dashboard/u1"
        );
        assert_eq!(
            gateway.endpoint(&["courses", "a/b", "lessons"]).as_str(),
            "http://localhost:3000/api/courses/a%2Fb/lessons"
        );
    }

    #[test]
    fn default_timeout_applies() {
        let config = GatewayConfig::new(DEFAULT_API_URL).unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        let config = config.with_timeout(Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}
