//! Insight generation service
//!
//! Runs an assembled request through web search and the language model and
//! tracks one request lifecycle per client session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::join_all;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::{InsightSelection, InsightSession, RequestState, RequestTicket, SessionError};
use crate::insights::parse::{non_blank, parse_model_output, resolve_insight, ModelInsight};
use crate::insights::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::insights::{InsightError, InsightReport, InsightRequest, KeywordInsight};
use crate::providers::{ChatRequest, LanguageModel, WebSearch};

/// Session used when the caller does not send one
pub const DEFAULT_SESSION: &str = "default";

pub const MISSING_REASON: &str = "이 키워드에 대한 분석 문장을 확보하지 못했습니다.";
pub const MISSING_STRATEGY: &str = "Wonder와 연결된 전략 제안이 수신되지 않았습니다.";
pub const MISSING_COMPARISON: &str = "선택한 키워드들의 상대적인 포지션을 강조하는 비교 문장이 필요합니다.";

type SessionMap = HashMap<String, InsightSession>;

pub struct InsightService {
    model: Arc<dyn LanguageModel>,
    search: Arc<dyn WebSearch>,
    sessions: Mutex<SessionMap>,
}

/// Combine the model's answer with the request, in selection order
///
/// Keywords the model skipped get placeholder text, and the category is
/// always the locally computed one.
pub fn assemble_report(request: &InsightRequest, answer: &ModelInsight) -> InsightReport {
    let keyword_insights = request
        .keywords
        .iter()
        .map(|entry| {
            let params = &entry.params;
            let found = resolve_insight(&params.keyword, &answer.keyword_insights);
            if found.is_none() {
                warn!("Model response has no entry for keyword '{}'", params.keyword);
            }

            KeywordInsight {
                keyword: params.keyword.clone(),
                category: params.category,
                category_label: params.category.display_name().to_string(),
                reason: non_blank(found.and_then(|f| f.reason.as_deref()))
                    .unwrap_or(MISSING_REASON)
                    .to_string(),
                strategy: non_blank(found.and_then(|f| f.strategy.as_deref()))
                    .unwrap_or(MISSING_STRATEGY)
                    .to_string(),
                metrics: entry.metrics.clone(),
            }
        })
        .collect();

    InsightReport {
        comparison: non_blank(answer.comparison.as_deref())
            .unwrap_or(MISSING_COMPARISON)
            .to_string(),
        keyword_insights,
    }
}

fn lock(sessions: &Mutex<SessionMap>) -> MutexGuard<'_, SessionMap> {
    sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks the session finished when dropped, including when the request
/// future is cancelled mid-flight
struct InFlight<'a> {
    sessions: &'a Mutex<SessionMap>,
    session_id: String,
    ticket: RequestTicket,
    succeeded: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(session) = lock(self.sessions).get_mut(&self.session_id) {
            let state = session.finish(self.ticket, self.succeeded);
            debug!("Session '{}' finished as {:?}", self.session_id, state);
        }
    }
}

impl InsightService {
    pub fn new(model: Arc<dyn LanguageModel>, search: Arc<dyn WebSearch>) -> Self {
        Self {
            model,
            search,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Generate an insight report for an assembled request
    ///
    /// A missing model credential fails before any network call. Web search
    /// for every keyword runs concurrently and only ever adds context.
    pub async fn generate(&self, request: &InsightRequest) -> Result<InsightReport, InsightError> {
        self.model.ensure_configured()?;

        let start = std::time::Instant::now();
        let web_context: Vec<String> = join_all(
            request
                .params()
                .map(|params| self.search.search(&params.keyword, request.period)),
        )
        .await;
        debug!(
            "Web search finished - keywords={}, with_results={}, duration={:.2}s",
            web_context.len(),
            web_context.iter().filter(|c| !c.is_empty()).count(),
            start.elapsed().as_secs_f32()
        );

        let chat = ChatRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: user_prompt(request, &web_context),
            json_output: true,
        };
        let raw = self.model.complete(&chat).await?;

        let answer = parse_model_output(&raw).map_err(|reason| {
            warn!("Could not parse model response: {}", reason);
            InsightError::LanguageModel(reason)
        })?;

        Ok(assemble_report(request, &answer))
    }

    /// Generate a report while tracking the lifecycle of `session_id`
    ///
    /// A finished session is reset first; a session already requesting is
    /// refused with [`InsightError::Busy`].
    pub async fn generate_for_session(
        &self,
        session_id: &str,
        request: &InsightRequest,
    ) -> Result<InsightReport, InsightError> {
        let selection = InsightSelection::new(
            request.period,
            request.params().map(|p| p.keyword.clone()).collect(),
        );

        let ticket = {
            let mut sessions = lock(&self.sessions);
            let session = sessions.entry(session_id.to_string()).or_default();
            if session.state() == RequestState::Requesting {
                return Err(InsightError::Busy);
            }
            session.select(selection);
            if session.state().is_finished() {
                session.reset().map_err(|_| InsightError::Busy)?;
            }
            session.begin().map_err(|e| match e {
                SessionError::AlreadyRequesting => InsightError::Busy,
                other => InsightError::Validation(other.to_string()),
            })?
        };

        let mut in_flight = InFlight {
            sessions: &self.sessions,
            session_id: session_id.to_string(),
            ticket,
            succeeded: false,
        };

        let request_id = Uuid::new_v4();
        let span = info_span!("insight", %request_id, session = %session_id);
        let result = async {
            info!(
                "Generating insight - period={}, keywords={}",
                request.period,
                request.keywords.len()
            );
            let result = self.generate(request).await;
            if let Err(e) = &result {
                warn!("Insight generation failed: {}", e);
            }
            result
        }
        .instrument(span)
        .await;

        in_flight.succeeded = result.is_ok();
        result
    }

    /// Current lifecycle state of a session (`Idle` if never seen)
    pub fn session_state(&self, session_id: &str) -> RequestState {
        lock(&self.sessions)
            .get(session_id)
            .map(InsightSession::state)
            .unwrap_or(RequestState::Idle)
    }
}
