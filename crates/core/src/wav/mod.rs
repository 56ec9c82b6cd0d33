use crate::{PracticeError, Result};

/// Length of the RIFF/WAVE header produced by [`encode`].
pub const HEADER_LEN: usize = 44;

const BYTES_PER_SAMPLE: usize = 2;
const PCM_FORMAT: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Decoded multi-channel audio ready for encoding.
///
/// The constructor enforces the invariants the encoder relies on: at least
/// one channel, a positive sample rate, and identical length across every
/// channel. Once a buffer exists, encoding cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Creates a buffer from per-channel sample sequences.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(PracticeError::invalid("sample rate must be positive"));
        }
        if channels.is_empty() {
            return Err(PracticeError::invalid(
                "audio buffer requires at least one channel",
            ));
        }
        let frame_count = channels[0].len();
        if channels.iter().any(|channel| channel.len() != frame_count) {
            return Err(PracticeError::invalid(
                "all channels must contain the same number of frames",
            ));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Returns the number of frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    /// Returns the per-channel sample data.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }
}

/// Encodes the buffer into a complete 16-bit linear PCM WAV file.
///
/// The output is a fixed-layout byte stream: a 44-byte header followed by
/// frame-major interleaved samples (channel 0 of frame 0, channel 1 of
/// frame 0, and so on). The total length is always
/// `44 + frame_count * channel_count * 2`. Identical input produces
/// byte-identical output; nothing in the header varies between calls.
pub fn encode(buffer: &AudioBuffer) -> Vec<u8> {
    let channel_count = buffer.channel_count();
    let frame_count = buffer.frame_count();
    let data_size = (frame_count * channel_count * BYTES_PER_SAMPLE) as u32;
    let block_align = (channel_count * BYTES_PER_SAMPLE) as u16;
    let byte_rate = buffer.sample_rate() * block_align as u32;

    let mut out = Vec::with_capacity(HEADER_LEN + data_size as usize);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    out.extend_from_slice(&(channel_count as u16).to_le_bytes());
    out.extend_from_slice(&buffer.sample_rate().to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());

    for frame in 0..frame_count {
        for channel in buffer.channels() {
            out.extend_from_slice(&sample_to_i16(channel[frame]).to_le_bytes());
        }
    }

    out
}

/// Converts one float sample to a signed 16-bit value.
///
/// Samples are clamped to [-1.0, 1.0] first. Negative values scale by
/// 32768 and non-negative values by 32767, so the full float range maps
/// onto the full i16 range without overflowing at exactly +1.0. The scaled
/// value is truncated toward zero, not rounded.
fn sample_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32_768.0) as i16
    } else {
        (clamped * 32_767.0) as i16
    }
}

/// Returns the `data` chunk payload of a WAV byte stream, if present.
///
/// Walks the RIFF chunk list rather than assuming the payload starts at
/// byte 44, so streams with extra chunks still resolve. Malformed input
/// yields `None`.
pub fn pcm_data(wav: &[u8]) -> Option<&[u8]> {
    if wav.len() < HEADER_LEN {
        return None;
    }
    if &wav[0..4] != b"RIFF" || &wav[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav.len() {
        let chunk_id = &wav[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav[pos + 4],
            wav[pos + 5],
            wav[pos + 6],
            wav[pos + 7],
        ]) as usize;

        if chunk_id == b"data" {
            let data_start = pos + 8;
            let data_end = data_start.checked_add(chunk_size)?;
            if data_end <= wav.len() {
                return Some(&wav[data_start..data_end]);
            }
            return None;
        }

        pos += 8 + chunk_size;
        // Chunks are word aligned.
        if chunk_size % 2 != 0 {
            pos += 1;
        }
    }

    None
}

/// Decodes 16-bit little-endian PCM bytes back into float samples.
pub fn pcm16_to_samples(pcm: &[u8]) -> Vec<f32> {
    pcm.chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32_768.0)
        .collect()
}
