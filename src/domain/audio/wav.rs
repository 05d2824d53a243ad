/// Size of the canonical RIFF/WAVE header written by [`encode_wav`]
pub const WAV_HEADER_LEN: usize = 44;

/// Layout of raw interleaved integer PCM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Raw audio returned by the Gemini speech model: 16-bit LE mono at 24 kHz
    pub const GEMINI_TTS: PcmFormat = PcmFormat {
        sample_rate: 24_000,
        channels: 1,
        bits_per_sample: 16,
    };

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.channels as u32 * self.bits_per_sample as u32 / 8
    }

    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }
}

/// Wrap speech-model PCM in a WAV container
pub fn encode_wav(pcm: &[u8]) -> Vec<u8> {
    encode_wav_with_format(pcm, PcmFormat::GEMINI_TTS)
}

/// Wrap PCM bytes in a 44-byte RIFF/WAVE header; the payload is copied verbatim
pub fn encode_wav_with_format(pcm: &[u8], format: PcmFormat) -> Vec<u8> {
    let data_size = pcm.len() as u32;
    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // "fmt " sub-chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // PCM fmt chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&format.byte_rate().to_le_bytes());
    wav.extend_from_slice(&format.block_align().to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // "data" sub-chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);

    wav
}
