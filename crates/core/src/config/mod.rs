use serde::{Deserialize, Serialize};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub audio: AudioConfig,
    pub session: SessionConfig,
    pub speech: SpeechConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            session: SessionConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

/// Configuration specific to audio capture and encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channel_count: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            channel_count: 2,
        }
    }
}

/// Configuration for vocabulary practice sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub word_count: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { word_count: 25 }
    }
}

/// Configuration for the speech-analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub base_url: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: "https://btl-d39f.onrender.com".to_string(),
        }
    }
}
