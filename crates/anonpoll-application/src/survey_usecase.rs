//! Survey use case implementation.
//!
//! `SurveyUseCase` drives one tab through the survey: render the avatar
//! board, pick and reserve an avatar, record answers, preview the payload
//! and optionally send it by mail.

use std::sync::Arc;
use std::time::Duration;

use anonpoll_core::avatar::ClaimSet;
use anonpoll_core::board::{AvatarBoard, render_board};
use anonpoll_core::error::{PollError, Result};
use anonpoll_core::notify::{NotificationError, Notifier};
use anonpoll_core::reservation::ReservationService;
use anonpoll_core::session::{ConfirmOutcome, SessionSelection};
use anonpoll_core::survey::{AnswerBundle, QuestionId, RESULTS_SUBJECT, ResultsPayload};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::session::{SessionManager, SurveySession};

/// Everything needed to render one tab.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub sid: String,
    pub board: AvatarBoard,
    pub answers: AnswerBundle,
    pub opted_in: bool,
}

/// One question's submitted form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerUpdate {
    pub question: QuestionId,
    pub selected: Vec<usize>,
    pub other: String,
}

/// Result of a send request that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// Single attempt failed; nothing was retried or stored.
    Failed(NotificationError),
}

pub struct SurveyUseCase {
    sessions: SessionManager,
    reservations: ReservationService,
    notifier: Arc<dyn Notifier>,
}

impl SurveyUseCase {
    pub fn new(
        reservations: ReservationService,
        notifier: Arc<dyn Notifier>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            sessions: SessionManager::new(idle_timeout),
            reservations,
            notifier,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Opens a new tab session.
    pub async fn start_session(&self) -> Result<SessionSnapshot> {
        self.resume(None).await
    }

    /// Re-renders `sid`, starting over when it is absent or expired.
    pub async fn resume(&self, sid: Option<&str>) -> Result<SessionSnapshot> {
        let (sid, handle) = self.sessions.get_or_create(sid).await;
        let mut session = handle.lock().await;
        session.touch();
        self.snapshot(sid, &mut session).await
    }

    /// Tentatively picks `token`. The claim file is not written.
    pub async fn pick(&self, sid: &str, token: &str) -> Result<SessionSnapshot> {
        let handle = self.sessions.get(sid).await?;
        let mut session = handle.lock().await;
        session.touch();
        session.selection.pick_tentative(token)?;
        self.snapshot(sid.to_string(), &mut session).await
    }

    /// Claims `token` for the session.
    ///
    /// The session stays locked for the duration of the claim so a
    /// double-submitted form cannot reserve twice.
    pub async fn reserve(
        &self,
        sid: &str,
        token: &str,
    ) -> Result<(ConfirmOutcome, SessionSnapshot)> {
        let handle = self.sessions.get(sid).await?;
        let mut session = handle.lock().await;
        session.touch();

        let mut selection = session.selection.clone();
        let seen = session.seen_claims.clone();
        let reservations = self.reservations.clone();
        let token = token.to_string();
        let (selection, outcome) = tokio::task::spawn_blocking(move || {
            let outcome = selection.confirm_reservation(&token, &seen, &reservations);
            (selection, outcome)
        })
        .await
        .map_err(|e| PollError::internal(e.to_string()))?;

        session.selection = selection;
        let outcome = outcome?;
        Ok((outcome, self.snapshot(sid.to_string(), &mut session).await?))
    }

    /// Replaces the answers of the submitted questions.
    ///
    /// Either every update is applied or none is.
    pub async fn update_answers(
        &self,
        sid: &str,
        updates: &[AnswerUpdate],
    ) -> Result<SessionSnapshot> {
        let handle = self.sessions.get(sid).await?;
        let mut session = handle.lock().await;
        session.touch();

        let mut answers = session.answers.clone();
        for update in updates {
            answers.set_answer(update.question, &update.selected, &update.other)?;
        }
        session.answers = answers;

        self.snapshot(sid.to_string(), &mut session).await
    }

    /// The results payload as it would be sent now. Nothing is stored.
    ///
    /// Before a reservation the picked avatar stands in.
    pub async fn preview(&self, sid: &str) -> Result<String> {
        let handle = self.sessions.get(sid).await?;
        let session = handle.lock().await;
        let selection = &session.selection;
        payload_json(selection.reserved().or(selection.chosen()), &session)
    }

    /// Records the opt-in choice and, if the gate passes, sends the results.
    ///
    /// # Errors
    ///
    /// `PollError::SendNotAllowed` without opt-in or without a reserved
    /// avatar; the notifier is not called in that case. Notifier failures
    /// are returned as [`SendOutcome::Failed`].
    pub async fn send_results(&self, sid: &str, opt_in: bool) -> Result<SendOutcome> {
        let handle = self.sessions.get(sid).await?;
        let mut session = handle.lock().await;
        session.touch();
        session.opted_in = opt_in;

        if !session.opted_in || session.selection.reserved().is_none() {
            return Err(PollError::SendNotAllowed);
        }

        let body = payload_json(session.selection.reserved(), &session)?;
        match self.notifier.send(RESULTS_SUBJECT, &body).await {
            Ok(()) => {
                info!("survey results sent");
                Ok(SendOutcome::Sent)
            }
            Err(e) => {
                warn!(error = %e, "survey results not sent");
                Ok(SendOutcome::Failed(e))
            }
        }
    }

    /// Renders the board and remembers the claim set it was drawn from.
    async fn snapshot(&self, sid: String, session: &mut SurveySession) -> Result<SessionSnapshot> {
        let (claims, board) = self.board(session.selection.clone()).await?;
        session.seen_claims = claims;
        Ok(SessionSnapshot {
            sid,
            board,
            answers: session.answers.clone(),
            opted_in: session.opted_in,
        })
    }

    /// Fresh read of the claim file rendered against `selection`.
    async fn board(&self, selection: SessionSelection) -> Result<(ClaimSet, AvatarBoard)> {
        let reservations = self.reservations.clone();
        tokio::task::spawn_blocking(move || {
            let claims = reservations.current_claims();
            let board = render_board(&claims, &selection);
            (claims, board)
        })
        .await
        .map_err(|e| PollError::internal(e.to_string()))
    }
}

fn payload_json(avatar: Option<&str>, session: &SurveySession) -> Result<String> {
    ResultsPayload::new(avatar, &session.answers, Utc::now()).to_json()
}
