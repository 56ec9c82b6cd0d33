use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lingua_practice_core::{
    wav, AudioBuffer, Difficulty, PracticeResult, PracticeSession, SpeechClient, SpeechConfig,
    VocabularyWord,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

fn main() -> lingua_practice_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { input, output } => run_encode(&input, &output),
        Commands::Drill { words, count } => run_drill(&words, count),
        Commands::Analyze {
            input,
            topic,
            reference,
            base_url,
        } => run_analyze(&input, &topic, &reference, base_url.as_deref()),
    }
}

/// On-disk form of a captured take awaiting encoding.
#[derive(Debug, Deserialize)]
struct CapturedTake {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

fn run_encode(input: &Path, output: &Path) -> lingua_practice_core::Result<()> {
    let raw = std::fs::read_to_string(input)?;
    let take: CapturedTake = serde_json::from_str(&raw)?;
    let buffer = AudioBuffer::new(take.sample_rate, take.channels)?;

    let bytes = wav::encode(&buffer);
    std::fs::write(output, &bytes)?;
    tracing::info!(
        ?output,
        frames = buffer.frame_count(),
        channels = buffer.channel_count(),
        "encoded recording"
    );
    Ok(())
}

fn run_drill(words_path: &Path, count: usize) -> lingua_practice_core::Result<()> {
    let raw = std::fs::read_to_string(words_path)?;
    let mut words: Vec<VocabularyWord> = serde_json::from_str(&raw)?;
    words.truncate(count);

    let mut session = PracticeSession::new(words)?;
    let today = chrono::Local::now().date_naive();
    let stdin = io::stdin();

    loop {
        let current = session.current_word().clone();
        println!();
        println!("Meaning: {}", current.meaning);
        print!("Your answer: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let feedback = session.check_answer(line.trim());
        if feedback.correct {
            println!("Correct!");
        } else {
            println!("Not quite. The answer is: {}", feedback.expected);
        }

        let difficulty = if feedback.correct {
            Difficulty::Easy
        } else {
            Difficulty::Hard
        };
        session.record_result(
            PracticeResult {
                word_id: current.id,
                correct: feedback.correct,
                difficulty,
            },
            today,
        )?;

        if !session.advance() {
            break;
        }
    }

    let summary = session.summary();
    println!();
    println!("Session complete: {}/{} correct", summary.correct, summary.total);
    for word in session.words() {
        if let Some(next) = word.progress.next_review {
            println!("  {:<16} next review {}", word.word, next);
        }
    }
    Ok(())
}

fn run_analyze(
    input: &Path,
    topic: &str,
    reference: &str,
    base_url: Option<&str>,
) -> lingua_practice_core::Result<()> {
    let wav_bytes = std::fs::read(input)?;
    let base_url = base_url
        .map(str::to_string)
        .unwrap_or_else(|| SpeechConfig::default().base_url);

    tracing::info!(?input, topic, "uploading recording for analysis");
    let client = SpeechClient::new(base_url);
    let report = client.analyze(topic, reference, wav_bytes)?;

    println!("Transcript:    {}", report.transcript);
    println!("Pronunciation: {}", report.pronunciation_score);
    println!("Fluency:       {}", report.fluency_score);
    println!("Intonation:    {}", report.intonation_score);
    println!("Accuracy:      {}", report.accuracy_score);
    if !report.feedback.is_empty() {
        println!("Feedback:      {}", report.feedback);
    }
    if !report.suggestion.is_empty() {
        println!("Suggestion:    {}", report.suggestion);
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Language practice toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a captured take into a 16-bit PCM WAV file.
    Encode {
        /// Path to the captured take (JSON with sample_rate and channels).
        input: PathBuf,
        /// Output path for the WAV file.
        output: PathBuf,
    },
    /// Run a vocabulary flashcard drill in the terminal.
    Drill {
        /// Path to a JSON word list.
        words: PathBuf,
        /// Number of words to practice.
        #[arg(short, long, default_value_t = 25)]
        count: usize,
    },
    /// Upload a recording to the speech service and print the report.
    Analyze {
        /// Path to a WAV recording.
        input: PathBuf,
        /// Conversation topic the recording belongs to.
        #[arg(long)]
        topic: String,
        /// Reference line the learner was reading.
        #[arg(long)]
        reference: String,
        /// Override the speech service base URL.
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_writes_a_valid_wav_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("take.json");
        let output = dir.path().join("recording.wav");

        std::fs::write(
            &input,
            r#"{"sample_rate":44100,"channels":[[0.0,0.5],[0.25,-0.25]]}"#,
        )
        .unwrap();

        run_encode(&input, &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), 44 + 2 * 2 * 2);
        assert_eq!(&bytes[0..4], b"RIFF");
        let pcm = wav::pcm_data(&bytes).expect("data chunk should exist");
        assert_eq!(pcm.len(), 8);
    }

    #[test]
    fn encode_rejects_ragged_channels() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("take.json");
        let output = dir.path().join("recording.wav");

        std::fs::write(
            &input,
            r#"{"sample_rate":44100,"channels":[[0.0,0.5],[0.25]]}"#,
        )
        .unwrap();

        assert!(run_encode(&input, &output).is_err());
        assert!(!output.exists());
    }
}
