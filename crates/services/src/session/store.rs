use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

use quiz_core::model::{
    Answer, AttemptAnswer, AttemptId, AttemptRequest, ChoiceId, Question, QuestionId, QuizId,
};
use quiz_core::time::elapsed_seconds;
use storage::repository::ProgressRecord;

use crate::error::SessionError;
use super::progress::SessionProgress;

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// In-memory state of one quiz attempt.
///
/// Owns the ordered question list and a map from question index to recorded
/// answer. Keying by index is sound because question order is fixed at
/// construction and never changes for the lifetime of the session. All
/// derived values (score, progress, navigation eligibility) are recomputed
/// from this state on read.
///
/// The session is an explicit value constructed per attempt and threaded
/// through `QuizSessionService`; nothing here is global.
pub struct QuizSession {
    quiz_id: QuizId,
    player_name: String,
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<usize, Answer>,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    completed: bool,
    attempt_id: Option<AttemptId>,
}

impl QuizSession {
    /// Start a fresh session over the given questions.
    ///
    /// Questions are re-sorted by position defensively; the backend already
    /// orders them but the index-keyed answer map depends on it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(
        quiz_id: QuizId,
        player_name: impl Into<String>,
        mut questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        questions.sort_by_key(|q| q.position);

        Ok(Self {
            quiz_id,
            player_name: player_name.into(),
            questions,
            current: 0,
            answers: BTreeMap::new(),
            started_at,
            ended_at: None,
            completed: false,
            attempt_id: None,
        })
    }

    /// Rebuild a session from a persisted progress record.
    ///
    /// Answers are re-keyed by looking up each one's question id, so they
    /// land on the right slot even when the map has gaps from jumping
    /// around, and answers for questions removed since the record was
    /// written are dropped. The cursor is clamped in case the quiz shrank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn resume(
        quiz_id: QuizId,
        player_name: impl Into<String>,
        questions: Vec<Question>,
        record: &ProgressRecord,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(quiz_id, player_name, questions, record.started_at)?;
        session.current = record.current_index.min(session.questions.len() - 1);
        for answer in &record.answers {
            let slot = session
                .questions
                .iter()
                .position(|q| q.id == answer.question_id);
            if let Some(index) = slot {
                session.answers.insert(index, answer.clone());
            }
        }
        Ok(session)
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn attempt_id(&self) -> Option<AttemptId> {
        self.attempt_id
    }

    /// The recorded answer for a question index, if any.
    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<&Answer> {
        self.answers.get(&index)
    }

    // ── Derived values ─────────────────────────────────────────────────────

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Count of answers currently believed correct.
    #[must_use]
    pub fn score(&self) -> usize {
        self.answers.values().filter(|a| a.is_correct()).count()
    }

    #[must_use]
    pub fn correct_answers(&self) -> usize {
        self.score()
    }

    #[must_use]
    pub fn wrong_answers(&self) -> usize {
        self.answers.len() - self.score()
    }

    /// Whole seconds since the session started, frozen once submitted.
    #[must_use]
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u32 {
        let end = self.ended_at.unwrap_or(now);
        elapsed_seconds(self.started_at, end)
    }

    /// Cursor completion percentage, 0..=100, rounded.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        let scaled = self.current as f64 / self.questions.len() as f64 * 100.0;
        scaled.round() as u32
    }

    /// Advancing requires the current question to be answered.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.answers.contains_key(&self.current)
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.current > 0
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let correct = self.score();
        SessionProgress {
            total: self.total_questions(),
            answered: self.answers.len(),
            correct,
            wrong: self.answers.len() - correct,
            percent: self.progress_percent(),
            is_complete: self.completed,
        }
    }

    // ── Mutations ──────────────────────────────────────────────────────────

    /// Record a choice for the current question.
    ///
    /// Correctness is resolved provisionally against the locally known
    /// correct choice; the server's verdict arrives at submit time. Returns
    /// false (and leaves the answer map untouched) when there is no current
    /// question or the choice does not belong to it.
    pub fn answer(&mut self, choice_id: ChoiceId, at: DateTime<Utc>) -> bool {
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        let Some(choice) = question.choice(choice_id) else {
            return false;
        };

        let answer = Answer::new(question.id, choice_id, choice.is_marked_correct(), at);
        self.answers.insert(self.current, answer);
        true
    }

    /// Move to the next question; blocked on the last one.
    pub fn advance(&mut self) -> bool {
        if self.is_last_question() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move to the previous question; blocked at index 0.
    pub fn retreat(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to an arbitrary question index; bounds-checked.
    pub fn seek(&mut self, index: usize) -> bool {
        if index >= self.questions.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Clear cursor, answers, timers, completion and attempt id, restarting
    /// the timer at `at`.
    pub fn reset(&mut self, at: DateTime<Utc>) {
        self.current = 0;
        self.answers.clear();
        self.started_at = at;
        self.ended_at = None;
        self.completed = false;
        self.attempt_id = None;
    }

    /// Build the submission payload for the answers recorded so far.
    #[must_use]
    pub fn to_attempt_request(&self, time_spent: u32) -> AttemptRequest {
        AttemptRequest {
            quiz_id: self.quiz_id,
            player_name: self.player_name.clone(),
            answers: self
                .answers
                .values()
                .map(|a| AttemptAnswer {
                    question_id: a.question_id,
                    choice_id: a.choice_id,
                })
                .collect(),
            time_spent,
        }
    }

    /// Apply the server's verdict: answers whose question id appears in
    /// `correct` are confirmed correct, all others confirmed wrong.
    pub fn reconcile(&mut self, correct: &[QuestionId]) {
        for answer in self.answers.values_mut() {
            answer.confirm(correct.contains(&answer.question_id));
        }
    }

    pub(crate) fn mark_submitted(&mut self, at: DateTime<Utc>, attempt_id: AttemptId) {
        self.ended_at = Some(at);
        self.completed = true;
        self.attempt_id = Some(attempt_id);
    }

    /// Snapshot for the persisted progress slot.
    #[must_use]
    pub fn progress_record(&self) -> ProgressRecord {
        ProgressRecord {
            quiz_id: self.quiz_id,
            current_index: self.current,
            answers: self.answers.values().cloned().collect(),
            started_at: self.started_at,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", &self.quiz_id)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("completed", &self.completed)
            .field("attempt_id", &self.attempt_id)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{Choice, Difficulty};
    use quiz_core::time::fixed_now;

    fn build_question(id: u64, position: u32, correct_choice: u64) -> Question {
        let choices = (1..=4)
            .map(|n| {
                let choice_id = (id - 1) * 4 + n;
                Choice {
                    id: ChoiceId::new(choice_id),
                    text: format!("Choice {choice_id}"),
                    is_correct: Some(choice_id == correct_choice),
                }
            })
            .collect();
        Question {
            id: QuestionId::new(id),
            quiz_id: QuizId::new(1),
            position,
            title: format!("Q{id}"),
            text: format!("Question {id}?"),
            image: None,
            difficulty: Difficulty::Easy,
            tags: Vec::new(),
            explanation: None,
            choices,
        }
    }

    // Two questions; correct choice ids are 1 and 6.
    fn build_session() -> QuizSession {
        let questions = vec![build_question(1, 1, 1), build_question(2, 2, 6)];
        QuizSession::new(QuizId::new(1), "Tester", questions, fixed_now()).unwrap()
    }

    #[test]
    fn fresh_session_starts_at_zero() {
        let session = build_session();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.all_answered());
        assert!(!session.can_advance());
    }

    #[test]
    fn empty_question_list_is_an_error() {
        let err = QuizSession::new(QuizId::new(1), "Tester", Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn questions_are_sorted_by_position() {
        let questions = vec![build_question(2, 2, 6), build_question(1, 1, 1)];
        let session = QuizSession::new(QuizId::new(1), "Tester", questions, fixed_now()).unwrap();
        assert_eq!(session.questions()[0].id, QuestionId::new(1));
    }

    #[test]
    fn answer_resolves_provisional_correctness() {
        let mut session = build_session();
        assert!(session.answer(ChoiceId::new(1), fixed_now()));

        let answer = session.answer_at(0).unwrap();
        assert_eq!(answer.choice_id, ChoiceId::new(1));
        assert!(answer.provisional_correct);
        assert_eq!(answer.confirmed_correct, None);
        assert!(session.can_advance());
    }

    #[test]
    fn invalid_choice_never_mutates_the_answer_map() {
        let mut session = build_session();
        // Choice 6 belongs to question 2, not the current question.
        assert!(!session.answer(ChoiceId::new(6), fixed_now()));
        assert!(!session.answer(ChoiceId::new(999), fixed_now()));
        assert!(session.answer_at(0).is_none());
    }

    #[test]
    fn re_answering_overwrites_the_slot() {
        let mut session = build_session();
        session.answer(ChoiceId::new(1), fixed_now());
        session.answer(ChoiceId::new(2), fixed_now());

        assert_eq!(session.answer_at(0).unwrap().choice_id, ChoiceId::new(2));
        assert_eq!(session.progress().answered, 1);
    }

    #[test]
    fn score_counts_correct_answers() {
        let mut session = build_session();
        session.answer(ChoiceId::new(1), fixed_now()); // correct
        session.advance();
        session.answer(ChoiceId::new(5), fixed_now()); // wrong

        assert_eq!(session.score(), 1);
        assert_eq!(session.correct_answers(), 1);
        assert_eq!(session.wrong_answers(), 1);
    }

    #[test]
    fn navigation_respects_bounds() {
        let mut session = build_session();
        assert!(!session.retreat());
        assert!(session.advance());
        assert!(session.is_last_question());
        assert!(!session.advance());
        assert!(session.retreat());
        assert_eq!(session.current_index(), 0);

        assert!(session.seek(1));
        assert!(!session.seek(2));
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn progress_percent_tracks_cursor() {
        let mut session = build_session();
        assert_eq!(session.progress_percent(), 0);
        session.advance();
        assert_eq!(session.progress_percent(), 50);
    }

    #[test]
    fn elapsed_uses_end_time_once_submitted() {
        let mut session = build_session();
        let later = fixed_now() + Duration::seconds(30);
        assert_eq!(session.elapsed_seconds(later), 30);

        session.mark_submitted(later, AttemptId::new(1));
        let much_later = fixed_now() + Duration::seconds(300);
        assert_eq!(session.elapsed_seconds(much_later), 30);
    }

    #[test]
    fn reconcile_confirms_and_denies() {
        let mut session = build_session();
        session.answer(ChoiceId::new(1), fixed_now()); // guessed correct
        session.advance();
        session.answer(ChoiceId::new(6), fixed_now()); // guessed correct

        // Server only confirms question 1.
        session.reconcile(&[QuestionId::new(1)]);
        assert_eq!(session.answer_at(0).unwrap().confirmed_correct, Some(true));
        assert_eq!(session.answer_at(1).unwrap().confirmed_correct, Some(false));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn progress_record_round_trips() {
        let mut session = build_session();
        session.answer(ChoiceId::new(1), fixed_now());
        session.advance();
        session.answer(ChoiceId::new(5), fixed_now());

        let record = session.progress_record();
        let questions = vec![build_question(1, 1, 1), build_question(2, 2, 6)];
        let restored =
            QuizSession::resume(QuizId::new(1), "Tester", questions, &record).unwrap();

        assert_eq!(restored.current_index(), session.current_index());
        assert_eq!(restored.answer_at(0), session.answer_at(0));
        assert_eq!(restored.answer_at(1), session.answer_at(1));
        assert_eq!(restored.started_at(), session.started_at());
    }

    #[test]
    fn resume_clamps_out_of_range_cursor() {
        let mut record = build_session().progress_record();
        record.current_index = 10;
        let questions = vec![build_question(1, 1, 1), build_question(2, 2, 6)];
        let restored =
            QuizSession::resume(QuizId::new(1), "Tester", questions, &record).unwrap();
        assert_eq!(restored.current_index(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = build_session();
        session.answer(ChoiceId::new(1), fixed_now());
        session.advance();
        session.mark_submitted(fixed_now(), AttemptId::new(3));

        let restart = fixed_now() + Duration::seconds(60);
        session.reset(restart);

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.progress().answered, 0);
        assert_eq!(session.started_at(), restart);
        assert!(!session.is_completed());
        assert!(session.attempt_id().is_none());
    }

    #[test]
    fn attempt_request_carries_all_answers() {
        let mut session = build_session();
        session.answer(ChoiceId::new(1), fixed_now());
        session.advance();
        session.answer(ChoiceId::new(6), fixed_now());

        let request = session.to_attempt_request(45);
        assert_eq!(request.quiz_id, QuizId::new(1));
        assert_eq!(request.player_name, "Tester");
        assert_eq!(request.time_spent, 45);
        assert_eq!(request.answers.len(), 2);
        assert_eq!(request.answers[1].choice_id, ChoiceId::new(6));
    }
}
