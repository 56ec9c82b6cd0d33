use serde::{Deserialize, Serialize};

use crate::{wav::AudioBuffer, PracticeError, Result};

/// Configuration options for the capture subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    pub sample_rate: u32,
    pub channel_count: usize,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            channel_count: 2,
        }
    }
}

/// Accumulates decoded capture blocks until a take is complete.
///
/// The host media stack delivers audio in blocks as it records; the
/// recorder concatenates them per channel and hands the finished take to
/// the WAV encoder as a single [`AudioBuffer`]. A take can be discarded
/// with [`Recorder::reset`] and re-recorded from scratch.
#[derive(Debug)]
pub struct Recorder {
    settings: RecordingSettings,
    channels: Vec<Vec<f32>>,
    is_recording: bool,
}

impl Recorder {
    pub fn new(settings: RecordingSettings) -> Self {
        let channels = vec![Vec::new(); settings.channel_count];
        Self {
            settings,
            channels,
            is_recording: false,
        }
    }

    /// Begins a new take, discarding any previously accumulated audio.
    pub fn start(&mut self) {
        for channel in &mut self.channels {
            channel.clear();
        }
        self.is_recording = true;
        tracing::debug!(
            sample_rate = self.settings.sample_rate,
            channels = self.settings.channel_count,
            "recording started"
        );
    }

    /// Stops the current take. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if self.is_recording {
            self.is_recording = false;
            tracing::debug!(frames = self.frame_count(), "recording stopped");
        }
    }

    /// Appends one decoded block, one sample sequence per channel.
    pub fn push_block(&mut self, block: &[Vec<f32>]) -> Result<()> {
        if !self.is_recording {
            return Err(PracticeError::invalid(
                "cannot push audio while the recorder is stopped",
            ));
        }
        if block.len() != self.settings.channel_count {
            return Err(PracticeError::invalid(format!(
                "block has {} channels, settings expect {}",
                block.len(),
                self.settings.channel_count
            )));
        }
        let block_frames = block.first().map(|channel| channel.len()).unwrap_or(0);
        if block.iter().any(|channel| channel.len() != block_frames) {
            return Err(PracticeError::invalid(
                "all channels in a block must contain the same number of frames",
            ));
        }

        for (channel, samples) in self.channels.iter_mut().zip(block) {
            channel.extend_from_slice(samples);
        }
        Ok(())
    }

    /// Consumes the accumulated take and returns it as an [`AudioBuffer`].
    ///
    /// The recorder must be stopped first and the take must contain audio.
    /// The recorder is left empty and ready for a new take.
    pub fn finish(&mut self) -> Result<AudioBuffer> {
        if self.is_recording {
            return Err(PracticeError::invalid(
                "stop the recorder before finishing the take",
            ));
        }
        if self.frame_count() == 0 {
            return Err(PracticeError::invalid("the take contains no audio"));
        }

        let channels = std::mem::replace(
            &mut self.channels,
            vec![Vec::new(); self.settings.channel_count],
        );
        AudioBuffer::new(self.settings.sample_rate, channels)
    }

    /// Discards the current take without producing a buffer.
    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.clear();
        }
        self.is_recording = false;
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Returns the number of frames accumulated so far.
    pub fn frame_count(&self) -> usize {
        self.channels.first().map(|channel| channel.len()).unwrap_or(0)
    }

    pub fn settings(&self) -> &RecordingSettings {
        &self.settings
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(RecordingSettings::default())
    }
}
