use crate::config::PipelineConfig;
use crate::domain::form::{FormData, fields};
use crate::domain::outcome::{Outcome, Rejection};
use crate::domain::passphrase::Passphrase;
use crate::domain::ports::MessageTransportBox;
use crate::domain::submission::Submission;
use tracing::{debug, error, info};

/// The only verb accepted for submissions.
pub const SUBMIT_METHOD: &str = "POST";

type StageResult<T> = std::result::Result<T, Rejection>;

/// Turns raw form submissions into dispatched messages.
///
/// The pipeline owns its configuration and transport, both read-only after
/// construction, so one instance can serve any number of concurrent requests.
pub struct SubmissionPipeline {
    config: PipelineConfig,
    transport: MessageTransportBox,
}

impl SubmissionPipeline {
    /// Creates a new `SubmissionPipeline`.
    ///
    /// # Arguments
    ///
    /// * `config` - The shared secret and photo count bound.
    /// * `transport` - The pre-authenticated transport composed bodies are sent through.
    pub fn new(config: PipelineConfig, transport: MessageTransportBox) -> Self {
        Self { config, transport }
    }

    /// Runs every stage against one request and reports how it ended.
    ///
    /// Stages run in order and the first rejection ends the run. The transport
    /// is only called once all validation has passed.
    pub async fn handle(&self, method: &str, form: &FormData) -> Outcome {
        match self.run(method, form).await {
            Ok(body) => Outcome::Sent { body },
            Err(rejection) => {
                debug!(
                    code = ?rejection.code,
                    message = %rejection.message,
                    "submission rejected"
                );
                Outcome::Rejected(rejection)
            }
        }
    }

    async fn run(&self, method: &str, form: &FormData) -> StageResult<String> {
        verify_method(method)?;
        let mut submission = extract_fields(form, self.config.max_photos)?;
        check_title(&submission)?;
        check_passphrase(&submission, &self.config.passphrase)?;
        let body = compose(&mut submission, form);
        self.dispatch(&body).await?;

        info!(
            title = %submission.title,
            photos = submission.photo_count,
            "submission dispatched"
        );
        Ok(body)
    }

    async fn dispatch(&self, body: &str) -> StageResult<()> {
        self.transport.send(body).await.map_err(|e| {
            error!(error = %e, "message transport failed");
            Rejection::internal()
        })
    }
}

fn verify_method(method: &str) -> StageResult<()> {
    if method == SUBMIT_METHOD {
        Ok(())
    } else {
        Err(Rejection::method_not_allowed(method, SUBMIT_METHOD))
    }
}

/// Reads the scalar fields. Captions are left for the composition stage.
fn extract_fields(form: &FormData, max_photos: usize) -> StageResult<Submission> {
    let raw_count = form
        .get(fields::PHOTO_COUNT)
        .or_else(|| form.get(fields::LEGACY_PHOTO_COUNT))
        .unwrap_or_default();
    let photo_count = parse_photo_count(raw_count, max_photos)?;

    Ok(Submission {
        title: form.value(fields::TITLE).to_string(),
        passphrase: form.value(fields::PASSPHRASE).to_string(),
        date: form.value(fields::DATE).to_string(),
        photo_count,
        captions: Vec::new(),
    })
}

fn parse_photo_count(raw: &str, max_photos: usize) -> StageResult<usize> {
    match raw.parse::<usize>() {
        Ok(count) if count <= max_photos => Ok(count),
        _ => Err(Rejection::bad_photo_count()),
    }
}

fn check_title(submission: &Submission) -> StageResult<()> {
    if submission.title.is_empty() {
        Err(Rejection::missing_title())
    } else {
        Ok(())
    }
}

fn check_passphrase(submission: &Submission, expected: &Passphrase) -> StageResult<()> {
    if expected.matches(&submission.passphrase) {
        Ok(())
    } else {
        Err(Rejection::wrong_passphrase())
    }
}

/// Fills in one caption per declared photo and renders the body.
/// A caption field that was not submitted reads as empty.
fn compose(submission: &mut Submission, form: &FormData) -> String {
    submission.captions = (0..submission.photo_count)
        .map(|index| form.value(&fields::caption(index)).to_string())
        .collect();
    submission.body()
}
