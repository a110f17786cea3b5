//! Quiz overlay state machine and question sourcing.
//!
//! The flow runs `Hidden -> Loading -> Presented -> Hidden`. A "show quiz"
//! trigger pauses the owning scene for the whole cycle; answering resumes
//! it and reports pass/fail back through the scene's event channel. The
//! flow never knows which gameplay element consumes the result.
//!
//! Question sources hand back a raw JSON payload. The payload is parsed
//! and shape-checked here: exactly four options and a correct index in
//! range. Any source failure or shape violation substitutes the fixed
//! built-in fallback question, so the overlay is never left without a
//! valid quiz.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Options every quiz must carry
pub const QUIZ_OPTION_COUNT: usize = 4;

/// A presented multiple-choice question. Immutable once produced;
/// discarded when answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub question: String,
    pub options: [String; QUIZ_OPTION_COUNT],
    /// Index of the correct option, always in `0..QUIZ_OPTION_COUNT`
    pub correct_index: usize,
}

/// Wire shape of a question payload, shared by real sources and the
/// built-in bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizPayload {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctIndex")]
    pub correct_index: usize,
}

/// Why a payload could not become a [`Quiz`]
#[derive(Debug)]
pub enum QuizShapeError {
    Json(serde_json::Error),
    WrongOptionCount(usize),
    IndexOutOfRange(usize),
}

impl From<serde_json::Error> for QuizShapeError {
    fn from(e: serde_json::Error) -> Self {
        QuizShapeError::Json(e)
    }
}

impl std::fmt::Display for QuizShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizShapeError::Json(e) => write!(f, "payload is not valid JSON: {}", e),
            QuizShapeError::WrongOptionCount(n) => {
                write!(f, "expected {} options, got {}", QUIZ_OPTION_COUNT, n)
            }
            QuizShapeError::IndexOutOfRange(i) => {
                write!(f, "correct index {} outside 0..{}", i, QUIZ_OPTION_COUNT)
            }
        }
    }
}

impl std::error::Error for QuizShapeError {}

/// Parse and shape-check a raw question payload.
pub fn parse_quiz(raw: &str) -> Result<Quiz, QuizShapeError> {
    let payload: QuizPayload = serde_json::from_str(raw)?;

    let count = payload.options.len();
    let options: [String; QUIZ_OPTION_COUNT] = payload
        .options
        .try_into()
        .map_err(|_| QuizShapeError::WrongOptionCount(count))?;

    if payload.correct_index >= QUIZ_OPTION_COUNT {
        return Err(QuizShapeError::IndexOutOfRange(payload.correct_index));
    }

    Ok(Quiz {
        question: payload.question,
        options,
        correct_index: payload.correct_index,
    })
}

/// The question substituted whenever a source fails or returns a malformed
/// payload. Correct answer: option 0.
pub fn fallback_quiz() -> Quiz {
    Quiz {
        question: "Fire is weak against which element?".to_string(),
        options: [
            "Water".to_string(),
            "Earth".to_string(),
            "Wind".to_string(),
            "Fire".to_string(),
        ],
        correct_index: 0,
    }
}

/// Error raised by a question source that could not produce a payload
#[derive(Debug, Clone)]
pub struct QuestionSourceError(pub String);

impl std::fmt::Display for QuestionSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "question source failed: {}", self.0)
    }
}

impl std::error::Error for QuestionSourceError {}

/// External supplier of quiz questions.
///
/// Implementations return the raw JSON payload; validation happens in
/// [`parse_quiz`] so a misbehaving source can never reach the overlay.
pub trait QuestionSource {
    fn request_question(&mut self) -> Result<String, QuestionSourceError>;
}

/// Question source backed by a fixed bank, picking uniformly at random.
pub struct StaticQuestionSource {
    bank: Vec<QuizPayload>,
}

impl StaticQuestionSource {
    pub fn new(bank: Vec<QuizPayload>) -> Self {
        Self { bank }
    }

    /// Load a bank from a JSON array of payloads.
    pub fn from_json(manifest: &str) -> Result<Self, serde_json::Error> {
        let bank: Vec<QuizPayload> = serde_json::from_str(manifest)?;
        Ok(Self { bank })
    }

    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }
}

impl QuestionSource for StaticQuestionSource {
    fn request_question(&mut self) -> Result<String, QuestionSourceError> {
        if self.bank.is_empty() {
            return Err(QuestionSourceError("question bank is empty".to_string()));
        }
        let mut rng = rand::thread_rng();
        let pick = &self.bank[rng.gen_range(0..self.bank.len())];
        serde_json::to_string(pick).map_err(|e| QuestionSourceError(e.to_string()))
    }
}

/// Where the overlay is in its cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    /// No quiz on screen; simulation runs normally
    Hidden,
    /// Trigger received, question retrieval pending; simulation paused
    Loading,
    /// Question on screen awaiting an answer; simulation still paused
    Presented(Quiz),
}

/// The overlay's state machine. Pause/resume of the owning scene and
/// result publication are coupled in [`crate::scene::GameScene`].
#[derive(Debug, Default)]
pub struct QuizFlow {
    state: QuizState,
}

impl Default for QuizState {
    fn default() -> Self {
        QuizState::Hidden
    }
}

impl QuizFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// True from trigger acceptance until the answer lands
    pub fn is_active(&self) -> bool {
        self.state != QuizState::Hidden
    }

    /// Accept a "show quiz" trigger. Returns false if a cycle is already
    /// in flight; concurrent triggers are rejected, not queued.
    pub(crate) fn begin(&mut self) -> bool {
        if self.is_active() {
            log::warn!("show-quiz trigger ignored: a quiz cycle is already active");
            return false;
        }
        self.state = QuizState::Loading;
        true
    }

    /// Resolve the pending retrieval with a question from `source`,
    /// substituting the fallback on any failure. No-op unless `Loading`.
    pub(crate) fn load_question(&mut self, source: &mut dyn QuestionSource) {
        if self.state != QuizState::Loading {
            return;
        }

        let quiz = match source.request_question() {
            Ok(raw) => match parse_quiz(&raw) {
                Ok(quiz) => quiz,
                Err(e) => {
                    log::warn!("malformed question payload ({}), using fallback quiz", e);
                    fallback_quiz()
                }
            },
            Err(e) => {
                log::warn!("question retrieval failed ({}), using fallback quiz", e);
                fallback_quiz()
            }
        };

        self.state = QuizState::Presented(quiz);
    }

    /// Record the player's pick and close the cycle. Returns whether the
    /// pick was correct, or `None` when no question is presented.
    pub(crate) fn answer(&mut self, index: usize) -> Option<bool> {
        let quiz = match &self.state {
            QuizState::Presented(quiz) => quiz,
            _ => return None,
        };
        let correct = index == quiz.correct_index;
        self.state = QuizState::Hidden;
        Some(correct)
    }
}
