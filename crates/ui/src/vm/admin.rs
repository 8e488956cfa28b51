use quiz_core::model::{Difficulty, Question};
use services::api::{ChoiceDraft, QuestionDraft, QuizDraft};

/// Validation failures for the admin forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormError {
    MissingTitle,
    MissingText,
    BadDifficulty,
    NotEnoughChoices,
    NoCorrectChoice,
}

impl FormError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            FormError::MissingTitle => "A title is required.",
            FormError::MissingText => "The question text is required.",
            FormError::BadDifficulty => "Pick a difficulty.",
            FormError::NotEnoughChoices => "Provide at least two choices.",
            FormError::NoCorrectChoice => "Mark one choice as correct.",
        }
    }
}

/// Editable state behind the quiz create form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizForm {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub publish: bool,
}

impl QuizForm {
    /// Validate and build the create/update payload.
    ///
    /// # Errors
    ///
    /// Returns `FormError` for a blank title or an unknown difficulty.
    pub fn draft(&self) -> Result<QuizDraft, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        let difficulty: Difficulty = self
            .difficulty
            .parse()
            .map_err(|_| FormError::BadDifficulty)?;

        let description = self.description.trim();
        Ok(QuizDraft {
            title: Some(title.to_string()),
            description: (!description.is_empty()).then(|| description.to_string()),
            difficulty: Some(difficulty),
            is_published: Some(self.publish),
        })
    }
}

/// Fixed number of choice rows on the question form.
pub const QUESTION_CHOICE_ROWS: usize = 4;

/// Editable state behind the question create/edit form.
///
/// Choice rows are positional; blank rows are dropped when the draft is
/// built, so a three-choice question simply leaves the last row empty.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionForm {
    pub title: String,
    pub text: String,
    pub explanation: String,
    pub choices: [String; QUESTION_CHOICE_ROWS],
    pub correct: Option<usize>,
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            text: String::new(),
            explanation: String::new(),
            choices: Default::default(),
            correct: None,
        }
    }
}

impl QuestionForm {
    /// Prefill the form from an existing question for editing.
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        let mut form = Self {
            title: question.title.clone(),
            text: question.text.clone(),
            explanation: question.explanation.clone().unwrap_or_default(),
            ..Self::default()
        };
        for (index, choice) in question
            .choices
            .iter()
            .take(QUESTION_CHOICE_ROWS)
            .enumerate()
        {
            form.choices[index] = choice.text.clone();
            if choice.is_marked_correct() {
                form.correct = Some(index);
            }
        }
        form
    }

    /// Validate and build the create/update payload.
    ///
    /// The caller fills in `quiz_id`, `position` and `difficulty` as the
    /// route requires; this only covers the fields the form edits.
    ///
    /// # Errors
    ///
    /// Returns `FormError` when the title or text is blank, fewer than two
    /// choice rows are filled, or the correct marker points at a blank row.
    pub fn draft(&self) -> Result<QuestionDraft, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        let text = self.text.trim();
        if text.is_empty() {
            return Err(FormError::MissingText);
        }

        let filled: Vec<(usize, &str)> = self
            .choices
            .iter()
            .enumerate()
            .map(|(index, choice)| (index, choice.trim()))
            .filter(|(_, choice)| !choice.is_empty())
            .collect();
        if filled.len() < 2 {
            return Err(FormError::NotEnoughChoices);
        }
        let correct = self.correct.ok_or(FormError::NoCorrectChoice)?;
        if !filled.iter().any(|&(index, _)| index == correct) {
            return Err(FormError::NoCorrectChoice);
        }

        let explanation = self.explanation.trim();
        Ok(QuestionDraft {
            title: Some(title.to_string()),
            text: Some(text.to_string()),
            explanation: (!explanation.is_empty()).then(|| explanation.to_string()),
            choices: Some(
                filled
                    .into_iter()
                    .map(|(index, choice)| ChoiceDraft {
                        text: choice.to_string(),
                        is_correct: index == correct,
                    })
                    .collect(),
            ),
            ..QuestionDraft::default()
        })
    }
}
