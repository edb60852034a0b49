use crate::LEETCODE_BASE_URL;
use crate::config::{CredentialSupplier, Credentials};
use crate::error::judge::{AUTH_FAILED_MESSAGE, JudgeError, NOT_LOGGED_IN_MESSAGE};
use crate::judge::report::{CheckResponse, text};
use crate::judge::sleeper::{Sleeper, TokioSleeper};
use crate::judge::{JobKind, JudgeJob, MAX_POLL_ATTEMPTS, POLL_INTERVAL};

use common::HttpStatusCode;
use models::JudgeReport;

use std::sync::Arc;
use std::time::Duration;

use backoff::backoff::{Backoff, Constant};
use log::{debug, info, trace, warn};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const CSRF_HEADER: &str = "X-CSRFToken";
const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
const SUBMIT_JUDGE_TYPE: &str = "large";
const INTERPRET_ID_FIELD: &str = "interpret_id";
const SUBMISSION_ID_FIELD: &str = "submission_id";

/// Opaque id of an accepted job, valid for one polling cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(pub String);

enum JobState {
    Unauthenticated,
    Submitting(Credentials),
    Polling {
        credentials: Credentials,
        job: JobHandle,
        attempt: u32,
    },
    Completed(JudgeReport),
    TimedOut { attempts: u32 },
}

/// Drives one test or submit job against the remote judge.
///
/// Holds no state between jobs; every call re-reads the credentials.
pub struct JudgeClient<Z: Sleeper = TokioSleeper> {
    base_url: Url,
    client: Client,
    credentials: Arc<dyn CredentialSupplier>,
    sleeper: Z,
    max_poll_attempts: u32,
}

impl JudgeClient<TokioSleeper> {
    pub fn new(credentials: Arc<dyn CredentialSupplier>) -> Result<Self, JudgeError> {
        Self::with_parts(LEETCODE_BASE_URL, credentials, TokioSleeper)
    }
}

impl<Z: Sleeper> JudgeClient<Z> {
    pub fn with_parts(
        base_url_str: &str,
        credentials: Arc<dyn CredentialSupplier>,
        sleeper: Z,
    ) -> Result<Self, JudgeError> {
        let mut base_url = Url::parse(base_url_str)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()?;

        Ok(Self {
            base_url,
            client,
            credentials,
            sleeper,
            max_poll_attempts: MAX_POLL_ATTEMPTS,
        })
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts.max(1);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Start a job and poll it to a verdict.
    ///
    /// # Errors
    ///
    /// - [`JudgeError::Auth`] when no session is stored or the judge answers 401/403
    /// - [`JudgeError::Submit`] when the judge refuses the job or returns no job id
    /// - [`JudgeError::PollTimeout`] after `MAX_POLL_ATTEMPTS` polls without a verdict
    pub async fn run_job(&self, job: &JudgeJob) -> Result<JudgeReport, JudgeError> {
        validate_slug(&job.slug)?;

        let mut interval = Constant::new(POLL_INTERVAL);
        let mut state = JobState::Unauthenticated;

        loop {
            state = match state {
                JobState::Unauthenticated => {
                    let credentials = self
                        .credentials
                        .credentials()?
                        .ok_or_else(|| JudgeError::auth(NOT_LOGGED_IN_MESSAGE))?;
                    JobState::Submitting(credentials)
                }

                JobState::Submitting(credentials) => {
                    let job_handle = self.start_job(&credentials, job).await?;
                    info!(
                        "Started {} job {} for {}",
                        job.kind.label(),
                        job_handle.0,
                        job.slug
                    );
                    JobState::Polling {
                        credentials,
                        job: job_handle,
                        attempt: 0,
                    }
                }

                JobState::Polling {
                    credentials,
                    job: job_handle,
                    attempt,
                } => {
                    let attempt = attempt + 1;
                    match self.check(&credentials, &job.slug, &job_handle).await {
                        Ok(check) if check.is_terminal() => {
                            debug!("Job {} finished after {attempt} polls", job_handle.0);
                            JobState::Completed(check.into_report()?)
                        }
                        Ok(check) => {
                            trace!(
                                "Job {} pending (state {:?}), poll {attempt}",
                                job_handle.0,
                                check.state()
                            );
                            self.next_poll(interval.next_backoff(), credentials, job_handle, attempt)
                                .await
                        }
                        Err(e) if e.is_retryable() => {
                            warn!(
                                "Poll {attempt} for job {} failed ({}), treating as pending",
                                job_handle.0,
                                e.error_category()
                            );
                            self.next_poll(interval.next_backoff(), credentials, job_handle, attempt)
                                .await
                        }
                        Err(e) => return Err(e),
                    }
                }

                JobState::Completed(report) => {
                    info!("Job for {} finished: {}", job.slug, report.outcome());
                    return Ok(report);
                }

                JobState::TimedOut { attempts } => {
                    warn!("No verdict for {} after {attempts} polls", job.slug);
                    return Err(JudgeError::poll_timeout(attempts));
                }
            };
        }
    }

    async fn next_poll(
        &self,
        wait: Option<Duration>,
        credentials: Credentials,
        job: JobHandle,
        attempt: u32,
    ) -> JobState {
        if attempt >= self.max_poll_attempts {
            return JobState::TimedOut { attempts: attempt };
        }
        self.sleeper.sleep(wait.unwrap_or(POLL_INTERVAL)).await;
        JobState::Polling {
            credentials,
            job,
            attempt,
        }
    }

    async fn start_job(
        &self,
        credentials: &Credentials,
        job: &JudgeJob,
    ) -> Result<JobHandle, JudgeError> {
        let (endpoint, body, id_field) = match &job.kind {
            JobKind::Test { test_cases } => (
                format!("problems/{}/interpret_solution/", job.slug),
                json!({
                    "data_input": test_cases,
                    "lang": job.language,
                    "question_id": job.question_id,
                    "typed_code": job.code,
                }),
                INTERPRET_ID_FIELD,
            ),
            JobKind::Submit => (
                format!("problems/{}/submit/", job.slug),
                json!({
                    "judge_type": SUBMIT_JUDGE_TYPE,
                    "lang": job.language,
                    "question_id": job.question_id,
                    "typed_code": job.code,
                }),
                SUBMISSION_ID_FIELD,
            ),
        };

        let url = self.base_url.join(&endpoint)?;
        let request = self
            .client
            .post(url)
            .headers(self.headers(credentials, &job.slug)?)
            .json(&body);

        let response = self.send(request).await.map_err(|e| match e {
            JudgeError::Http { status_code, .. } => {
                JudgeError::submit(format!("Request failed: {status_code}"))
            }
            other => other,
        })?;

        if let Some(error) = text(response.get("error")) {
            return Err(JudgeError::submit(error));
        }

        text(response.get(id_field))
            .map(JobHandle)
            .ok_or_else(|| JudgeError::submit(format!("No {id_field} in response")))
    }

    async fn check(
        &self,
        credentials: &Credentials,
        slug: &str,
        job: &JobHandle,
    ) -> Result<CheckResponse, JudgeError> {
        let url = self
            .base_url
            .join(&format!("submissions/detail/{}/check/", job.0))?;
        let request = self.client.get(url).headers(self.headers(credentials, slug)?);

        let body = self.send(request).await?;
        if let Some(error) = text(body.get("error")) {
            return Err(JudgeError::submit(error));
        }

        Ok(serde_json::from_value(body)?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, JudgeError> {
        let response = request.send().await?;
        let status = response.status().as_u16();

        if HttpStatusCode(status).is_auth_failure() {
            return Err(JudgeError::auth(AUTH_FAILED_MESSAGE));
        }

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::from_http_response(status, body));
        }

        Ok(response.json().await?)
    }

    fn headers(&self, credentials: &Credentials, slug: &str) -> Result<HeaderMap, JudgeError> {
        let cookie = format!(
            "LEETCODE_SESSION={}; csrftoken={}",
            credentials.session.as_str(),
            credentials.csrf.as_str()
        );
        let referer = self.base_url.join(&format!("problems/{slug}/"))?;

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, header_value(&cookie)?);
        headers.insert(CSRF_HEADER, header_value(credentials.csrf.as_str())?);
        headers.insert(
            REQUESTED_WITH_HEADER,
            HeaderValue::from_static(REQUESTED_WITH_VALUE),
        );
        headers.insert(REFERER, header_value(referer.as_str())?);
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, JudgeError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| JudgeError::auth("Stored session contains characters not allowed in headers"))?;
    header.set_sensitive(true);
    Ok(header)
}

/// Slugs are interpolated into URL paths, so only `[a-z0-9-]` is allowed.
fn validate_slug(slug: &str) -> Result<(), JudgeError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(JudgeError::submit(format!("Invalid problem slug: {slug:?}")))
    }
}
