//! Quiz session state machine.
//!
//! A session walks through a fixed, pre-shuffled list of questions. Each
//! question is first graded with [`QuizSession::submit_answer`] and then left
//! with [`QuizSession::advance`]; calling them out of order is a logic error
//! reported as `QuizError::InvalidState`.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::builder::build_questions;
use crate::error::QuizError;
use crate::filter::{filter_events, FilterOutcome};
use crate::model::{Event, EventPool, QuizConfig};
use crate::scoring::{score, MAX_POINTS};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// On the first question, nothing submitted yet.
    NotStarted,
    /// Waiting for a guess on the current question.
    AwaitingAnswer,
    /// The current question has been graded; waiting for `advance`.
    AnswerGraded,
    /// Every question has been answered.
    Complete,
}

impl SessionState {
    fn as_str(self) -> &'static str {
        match self {
            SessionState::NotStarted => "not started",
            SessionState::AwaitingAnswer => "awaiting an answer",
            SessionState::AnswerGraded => "showing a graded answer",
            SessionState::Complete => "complete",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How close a graded guess was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Exact,
    Close,
    Miss,
}

impl Verdict {
    fn from_points(points: u8) -> Self {
        match points {
            MAX_POINTS => Verdict::Exact,
            0 => Verdict::Miss,
            _ => Verdict::Close,
        }
    }
}

/// Result of grading one guess, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub points: u8,
    pub verdict: Verdict,
    pub guess: i32,
    pub correct_year: i32,
    pub month: Option<u8>,
    pub day: Option<u8>,
    /// Pre-rendered date, e.g. `"44 BC (15 March)"`.
    pub correct_date: String,
}

/// One graded question, kept for the end-of-session table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub label: String,
    pub guess: i32,
    pub correct_year: i32,
    pub points: u8,
}

/// Score totals for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_score: u32,
    /// Always `10 × question_count`, however many were answered.
    pub max_score: u32,
    pub answered: usize,
    pub question_count: usize,
    /// `total_score / max_score` as a percentage.
    pub percentage: f64,
}

impl Summary {
    /// Percentage against only the questions answered so far.
    pub fn answered_percentage(&self) -> f64 {
        let possible = u32::from(MAX_POINTS) * self.answered as u32;
        percent(self.total_score, possible)
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) * 100.0 / f64::from(whole)
    }
}

/// A live quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    id: Uuid,
    questions: Vec<Event>,
    current_index: usize,
    total_score: u32,
    answered: bool,
    history: Vec<AnswerRecord>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over an already-sampled question list.
    pub fn new(questions: Vec<Event>) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            questions,
            current_index: 0,
            total_score: 0,
            answered: false,
            history: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        };
        tracing::debug!(
            session = %session.id,
            "started session with {} questions",
            session.questions.len()
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn questions(&self) -> &[Event] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Zero-based index of the current question; equals `len()` once complete.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else if self.answered {
            SessionState::AnswerGraded
        } else if self.current_index == 0 {
            SessionState::NotStarted
        } else {
            SessionState::AwaitingAnswer
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    /// The question being asked, or `None` once the session is complete.
    pub fn current_question(&self) -> Option<&Event> {
        self.questions.get(self.current_index)
    }

    /// Fraction of questions already left behind, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            1.0
        } else {
            self.current_index as f64 / self.questions.len() as f64
        }
    }

    /// Grade `guess` against the current question.
    ///
    /// Errors with `InvalidState` if the current question was already graded
    /// or the session is complete; the score is left untouched in that case.
    pub fn submit_answer(&mut self, guess: i32) -> Result<AnswerOutcome, QuizError> {
        let state = self.state();
        let event = match (state, self.questions.get(self.current_index)) {
            (SessionState::NotStarted | SessionState::AwaitingAnswer, Some(event)) => event,
            _ => {
                return Err(QuizError::InvalidState {
                    operation: "submit an answer",
                    state: state.as_str(),
                })
            }
        };

        let points = score(guess, event.year);
        self.total_score += u32::from(points);
        self.answered = true;
        self.history.push(AnswerRecord {
            label: event.label.clone(),
            guess,
            correct_year: event.year,
            points,
        });

        tracing::debug!(
            session = %self.id,
            question = self.current_index,
            guess,
            correct = event.year,
            points,
            "graded answer"
        );

        Ok(AnswerOutcome {
            points,
            verdict: Verdict::from_points(points),
            guess,
            correct_year: event.year,
            month: event.month,
            day: event.day,
            correct_date: event.display_date(),
        })
    }

    /// Move past a graded question.
    ///
    /// Errors with `InvalidState` unless the current question has been graded.
    pub fn advance(&mut self) -> Result<SessionState, QuizError> {
        if !self.answered {
            return Err(QuizError::InvalidState {
                operation: "advance",
                state: self.state().as_str(),
            });
        }

        self.current_index += 1;
        self.answered = false;

        if self.is_complete() && self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
            tracing::info!(
                session = %self.id,
                "session complete: {}/{}",
                self.total_score,
                self.max_score()
            );
        }

        Ok(self.state())
    }

    pub fn max_score(&self) -> u32 {
        u32::from(MAX_POINTS) * self.questions.len() as u32
    }

    /// Totals so far. Valid at any point, final once complete.
    pub fn summary(&self) -> Summary {
        let max_score = self.max_score();
        Summary {
            total_score: self.total_score,
            max_score,
            answered: self.history.len(),
            question_count: self.questions.len(),
            percentage: percent(self.total_score, max_score),
        }
    }
}

/// Validate `config`, filter `pool`, sample questions and start a session.
///
/// - `InvalidConfig` for a zero length or inverted year range
/// - `InsufficientData` when the pool itself is empty
/// - `EmptyResult` when the filters exclude every event
pub fn prepare_session<R>(
    pool: &EventPool,
    config: &QuizConfig,
    rng: &mut R,
) -> Result<QuizSession, QuizError>
where
    R: Rng + ?Sized,
{
    config.validate()?;
    if pool.is_empty() {
        return Err(QuizError::InsufficientData);
    }

    let candidates = match filter_events(pool.events(), config) {
        FilterOutcome::Matched(events) => events,
        FilterOutcome::EmptyResult => return Err(QuizError::EmptyResult),
    };

    let questions = build_questions(candidates, config.length, rng)?;
    Ok(QuizSession::new(questions))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn three_questions() -> Vec<Event> {
        vec![
            Event::new("Ides of March", -44).with_date(3, Some(15)),
            Event::new("Moon landing", 1969).with_date(7, Some(20)),
            Event::new("Euro coins introduced", 2002),
        ]
    }

    #[test]
    fn fresh_session_state() {
        let session = QuizSession::new(three_questions());
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_question().unwrap().label, "Ides of March");
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.max_score(), 30);
    }

    #[test]
    fn all_exact_answers_score_full_marks() {
        let mut session = QuizSession::new(three_questions());
        while let Some(event) = session.current_question() {
            let year = event.year;
            let outcome = session.submit_answer(year).unwrap();
            assert_eq!(outcome.points, 10);
            assert_eq!(outcome.verdict, Verdict::Exact);
            session.advance().unwrap();
        }
        assert_eq!(session.state(), SessionState::Complete);
        assert!(session.current_question().is_none());
        assert!(session.finished_at().is_some());

        let summary = session.summary();
        assert_eq!(summary.total_score, 30);
        assert_eq!(summary.max_score, 30);
        assert_eq!(summary.percentage, 100.0);
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn outcome_carries_display_date() {
        let mut session = QuizSession::new(three_questions());
        let outcome = session.submit_answer(-50).unwrap();
        assert_eq!(outcome.points, 4);
        assert_eq!(outcome.verdict, Verdict::Close);
        assert_eq!(outcome.correct_year, -44);
        assert_eq!(outcome.month, Some(3));
        assert_eq!(outcome.day, Some(15));
        assert_eq!(outcome.correct_date, "44 BC (15 March)");
    }

    #[test]
    fn advance_before_submit_is_invalid() {
        let mut session = QuizSession::new(three_questions());
        assert!(matches!(
            session.advance(),
            Err(QuizError::InvalidState { .. })
        ));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn double_submit_is_invalid_and_not_rescored() {
        let mut session = QuizSession::new(three_questions());
        session.submit_answer(-44).unwrap();
        assert_eq!(session.state(), SessionState::AnswerGraded);

        let err = session.submit_answer(-44).unwrap_err();
        assert!(matches!(err, QuizError::InvalidState { .. }));
        assert_eq!(session.total_score(), 10);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn submit_after_complete_is_invalid() {
        let mut session = QuizSession::new(vec![Event::new("Only", 1500)]);
        session.submit_answer(1400).unwrap();
        assert_eq!(session.advance().unwrap(), SessionState::Complete);
        assert!(matches!(
            session.submit_answer(1500),
            Err(QuizError::InvalidState { .. })
        ));
        assert!(matches!(
            session.advance(),
            Err(QuizError::InvalidState { .. })
        ));
    }

    #[test]
    fn state_transitions() {
        let mut session = QuizSession::new(three_questions());
        session.submit_answer(1).unwrap();
        assert_eq!(session.advance().unwrap(), SessionState::AwaitingAnswer);
        assert_eq!(session.state(), SessionState::AwaitingAnswer);
        assert!((session.progress() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn partial_summary_mid_session() {
        let mut session = QuizSession::new(three_questions());
        session.submit_answer(-44).unwrap();
        session.advance().unwrap();
        session.submit_answer(1968).unwrap();

        let summary = session.summary();
        assert_eq!(summary.total_score, 15);
        assert_eq!(summary.max_score, 30);
        assert_eq!(summary.answered, 2);
        assert_eq!(summary.percentage, 50.0);
        assert_eq!(summary.answered_percentage(), 75.0);
    }

    #[test]
    fn prepare_session_maps_outcomes() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = EventPool::new(three_questions());

        let session = prepare_session(&pool, &QuizConfig::new(2), &mut rng).unwrap();
        assert_eq!(session.len(), 2);

        let session = prepare_session(&pool, &QuizConfig::new(10), &mut rng).unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session.max_score(), 30);

        let none = QuizConfig::new(3).with_tag_filter("dinosaurs");
        assert!(matches!(
            prepare_session(&pool, &none, &mut rng),
            Err(QuizError::EmptyResult)
        ));

        let inverted = QuizConfig::new(3).with_year_range(Some(2000), Some(0));
        assert!(matches!(
            prepare_session(&pool, &inverted, &mut rng),
            Err(QuizError::InvalidConfig(_))
        ));

        assert!(matches!(
            prepare_session(&EventPool::default(), &QuizConfig::new(3), &mut rng),
            Err(QuizError::InsufficientData)
        ));
    }
}
