use serde::{Deserialize, Serialize};

use crate::{PracticeError, Result};

/// Scores returned by the pronunciation analysis endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationReport {
    pub transcript: String,
    pub pronunciation_score: u8,
    pub fluency_score: u8,
    pub intonation_score: u8,
    pub accuracy_score: u8,
    pub feedback: String,
    pub suggestion: String,
}

/// Scores returned by the free-answer evaluation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub transcript: String,
    pub feedback: String,
    pub suggestions: String,
    pub content_score: u8,
    pub grammar_score: u8,
    pub vocabulary_score: u8,
    pub pronunciation_score: u8,
    pub fluency_score: u8,
    pub overall_score: u8,
}

/// Parses the analysis endpoint's line-oriented `Label: value` response.
///
/// Lines that are absent or carry a non-numeric score leave the field at
/// its default; the service pads its output with prose the parser must
/// tolerate.
pub fn parse_pronunciation_report(text: &str) -> PronunciationReport {
    let mut report = PronunciationReport::default();

    for line in trimmed_lines(text) {
        if let Some(rest) = line.strip_prefix("Transcript:") {
            report.transcript = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Pronunciation score:") {
            report.pronunciation_score = parse_score(rest);
        } else if let Some(rest) = line.strip_prefix("Fluency score:") {
            report.fluency_score = parse_score(rest);
        } else if let Some(rest) = line.strip_prefix("Intonation score:") {
            report.intonation_score = parse_score(rest);
        } else if let Some(rest) = line.strip_prefix("Accuracy score:") {
            report.accuracy_score = parse_score(rest);
        } else if let Some(rest) = line.strip_prefix("Feedback:") {
            report.feedback = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Suggestion:") {
            report.suggestion = rest.trim().to_string();
        }
    }

    report
}

/// Parses the evaluation endpoint's response. Score labels may appear
/// mid-line, so matching is by containment and the first integer on the
/// line wins.
pub fn parse_answer_evaluation(text: &str) -> AnswerEvaluation {
    let mut evaluation = AnswerEvaluation::default();

    for line in trimmed_lines(text) {
        if let Some(rest) = line.strip_prefix("Transcript:") {
            evaluation.transcript = rest.trim().to_string();
        } else if let Some(rest) = text_after(line, "Feedback:") {
            evaluation.feedback = rest;
        } else if let Some(rest) = text_after(line, "Suggestions:") {
            evaluation.suggestions = rest;
        } else if line.contains("Content:") {
            evaluation.content_score = first_number(line);
        } else if line.contains("Grammar:") {
            evaluation.grammar_score = first_number(line);
        } else if line.contains("Vocabulary:") {
            evaluation.vocabulary_score = first_number(line);
        } else if line.contains("Pronunciation:") {
            evaluation.pronunciation_score = first_number(line);
        } else if line.contains("Fluency:") {
            evaluation.fluency_score = first_number(line);
        } else if line.contains("Overall:") {
            evaluation.overall_score = first_number(line);
        }
    }

    evaluation
}

fn trimmed_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

fn parse_score(raw: &str) -> u8 {
    raw.trim().parse().unwrap_or(0)
}

fn text_after(line: &str, label: &str) -> Option<String> {
    line.find(label)
        .map(|index| line[index + label.len()..].trim().to_string())
}

fn first_number(line: &str) -> u8 {
    let digits: String = line
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Client for the remote speech-analysis service.
///
/// Recordings are submitted as multipart forms: the text fields the
/// endpoint expects plus the encoded WAV bytes as a file part named
/// `File`, filename `recording.wav`, MIME type `audio/wav`.
#[derive(Debug)]
pub struct SpeechClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl SpeechClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Uploads a recording for pronunciation analysis against a reference
    /// line of dialogue.
    pub fn analyze(
        &self,
        topic: &str,
        reference: &str,
        wav: Vec<u8>,
    ) -> Result<PronunciationReport> {
        let form = reqwest::blocking::multipart::Form::new()
            .text("Topic", topic.to_string())
            .text("Reference", reference.to_string())
            .part("File", recording_part(wav)?);

        let text = self.post_form("/api/SpeakingAi/AnalyzeSpeech", form)?;
        Ok(parse_pronunciation_report(&text))
    }

    /// Uploads a recorded free answer to a question for evaluation.
    pub fn evaluate(&self, topic: &str, question: &str, wav: Vec<u8>) -> Result<AnswerEvaluation> {
        let form = reqwest::blocking::multipart::Form::new()
            .text("Topic", topic.to_string())
            .text("Question", question.to_string())
            .part("File", recording_part(wav)?);

        let text = self.post_form("/api/SpeakingAi/EvaluateAnswer", form)?;
        Ok(parse_answer_evaluation(&text))
    }

    fn post_form(&self, path: &str, form: reqwest::blocking::multipart::Form) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "submitting recording");

        let response = self.http.post(&url).multipart(form).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PracticeError::ServiceStatus {
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

fn recording_part(wav: Vec<u8>) -> Result<reqwest::blocking::multipart::Part> {
    let part = reqwest::blocking::multipart::Part::bytes(wav)
        .file_name("recording.wav")
        .mime_str("audio/wav")?;
    Ok(part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_analysis_response() {
        let text = "\
            Transcript: How are you today\n\
            Pronunciation score: 85\n\
            Fluency score: 78\n\
            Intonation score: 80\n\
            Accuracy score: 90\n\
            Feedback: Clear delivery overall.\n\
            Suggestion: Slow down on long vowels.\n";

        let report = parse_pronunciation_report(text);
        assert_eq!(report.transcript, "How are you today");
        assert_eq!(report.pronunciation_score, 85);
        assert_eq!(report.fluency_score, 78);
        assert_eq!(report.intonation_score, 80);
        assert_eq!(report.accuracy_score, 90);
        assert_eq!(report.feedback, "Clear delivery overall.");
        assert_eq!(report.suggestion, "Slow down on long vowels.");
    }

    #[test]
    fn missing_or_garbled_scores_default_to_zero() {
        let text = "Transcript: hello\nPronunciation score: n/a\n";
        let report = parse_pronunciation_report(text);
        assert_eq!(report.transcript, "hello");
        assert_eq!(report.pronunciation_score, 0);
        assert_eq!(report.fluency_score, 0);
    }

    #[test]
    fn parses_evaluation_scores_from_mixed_lines() {
        let text = "\
            Transcript: I think travel is important\n\
            - Content: 80/100\n\
            - Grammar: 75/100\n\
            - Vocabulary: 70/100\n\
            - Pronunciation: 85/100\n\
            - Fluency: 65/100\n\
            - Overall: 75/100\n\
            Some Feedback: Good structure.\n\
            Your Suggestions: Add more detail.\n";

        let evaluation = parse_answer_evaluation(text);
        assert_eq!(evaluation.transcript, "I think travel is important");
        assert_eq!(evaluation.content_score, 80);
        assert_eq!(evaluation.grammar_score, 75);
        assert_eq!(evaluation.vocabulary_score, 70);
        assert_eq!(evaluation.pronunciation_score, 85);
        assert_eq!(evaluation.fluency_score, 65);
        assert_eq!(evaluation.overall_score, 75);
        assert_eq!(evaluation.feedback, "Good structure.");
        assert_eq!(evaluation.suggestions, "Add more detail.");
    }

    #[test]
    fn empty_responses_parse_to_defaults() {
        assert_eq!(
            parse_answer_evaluation(""),
            AnswerEvaluation::default()
        );
        assert_eq!(
            parse_pronunciation_report("\n\n"),
            PronunciationReport::default()
        );
    }

    #[test]
    fn client_normalizes_trailing_slashes() {
        let client = SpeechClient::new("https://speech.example.com/");
        assert_eq!(client.base_url(), "https://speech.example.com");
    }
}
