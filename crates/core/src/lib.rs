//! Core library for the Lingua Practice application.
//!
//! Each module owns a distinct subsystem of the practice workflow: WAV
//! encoding of captured speech, recorder state, answer checking, exam
//! answer tracking, spaced-repetition scheduling, flashcard sessions, and
//! the speech-analysis upload client. Everything is synchronous and
//! deterministic so that higher level front ends can drive it directly.

pub mod answer;
pub mod config;
pub mod error;
pub mod exam;
pub mod recorder;
pub mod session;
pub mod speech;
pub mod srs;
pub mod wav;

pub use config::{AppConfig, AudioConfig, SessionConfig, SpeechConfig};
pub use error::{PracticeError, Result};
pub use exam::{AnswerSheet, ExamQuestion, QuestionStatus, Score};
pub use recorder::{Recorder, RecordingSettings};
pub use session::{Feedback, PracticeResult, PracticeSession, SessionSummary, VocabularyWord};
pub use speech::{AnswerEvaluation, PronunciationReport, SpeechClient};
pub use srs::{Difficulty, WordProgress};
pub use wav::AudioBuffer;
