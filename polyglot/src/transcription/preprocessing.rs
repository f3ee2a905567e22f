use std::io::Cursor;

use rubato::{FftFixedIn, Resampler};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::error::{PolyglotError, Result};

pub const TARGET_SAMPLE_RATE: u32 = 16000;
const TARGET_CHANNELS: usize = 1;
const RESAMPLE_CHUNK_SIZE: usize = 1024;

fn invalid_audio(detail: impl std::fmt::Display) -> PolyglotError {
    PolyglotError::Validation(format!("Unreadable audio: {detail}"))
}

fn resample_error(e: rubato::ResampleError) -> PolyglotError {
    PolyglotError::Internal(format!("Resampling failed: {e}"))
}

/// Number of samples `len` input samples span at the target rate, rounded up.
fn resampled_len(len: usize, sample_rate: u32) -> usize {
    (len as u64 * u64::from(TARGET_SAMPLE_RATE)).div_ceil(u64::from(sample_rate)) as usize
}

/// Decoded audio as interleaved f32 samples.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: usize,
}

/// Turns an uploaded recording into 16 kHz mono 16-bit PCM.
pub struct AudioPreprocessor;

impl AudioPreprocessor {
    /// Decode and normalize in one step.
    pub fn prepare(bytes: &[u8], format_hint: Option<&str>) -> Result<Vec<i16>> {
        let decoded = Self::decode(bytes, format_hint)?;
        let mono =
            Self::resample_to_16khz_mono(decoded.samples, decoded.sample_rate, decoded.channels)?;
        Ok(Self::to_pcm16(&mono))
    }

    /// Decode audio bytes (WAV, MP3, M4A/AAC, FLAC, OGG/Vorbis) via symphonia.
    pub fn decode(bytes: &[u8], format_hint: Option<&str>) -> Result<DecodedAudio> {
        if bytes.is_empty() {
            return Err(invalid_audio("Empty audio data"));
        }

        let cursor = Cursor::new(bytes.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = format_hint {
            hint.with_extension(ext);
        }

        let detected = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| invalid_audio(format!("Failed to detect audio format: {e}")))?;

        let mut format = detected.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| invalid_audio("No audio tracks found"))?;
        let track_id = track.id;

        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| invalid_audio("Sample rate not available"))?;

        let channels = track
            .codec_params
            .channels
            .map(|c| c.count())
            .unwrap_or(1);

        debug!(
            "Decoding audio: {} Hz, {} channels, codec: {:?}",
            sample_rate, channels, track.codec_params.codec
        );

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| invalid_audio(format!("Failed to create decoder: {e}")))?;

        let mut samples = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    break;
                }
                Err(e) => return Err(invalid_audio(format!("Failed to read packet: {e}"))),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let mut buffer =
                        SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                    buffer.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buffer.samples());
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    debug!("Decode error (skipping): {}", e);
                    continue;
                }
                Err(e) => return Err(invalid_audio(format!("Failed to decode audio: {e}"))),
            }
        }

        if samples.is_empty() {
            return Err(invalid_audio("No audio samples decoded"));
        }

        debug!("Decoded {} samples at {} Hz", samples.len(), sample_rate);

        Ok(DecodedAudio {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Average interleaved channels into one.
    fn to_mono(samples: Vec<f32>, channels: usize) -> Vec<f32> {
        if channels <= 1 {
            return samples;
        }

        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    }

    pub fn resample_to_16khz_mono(
        samples: Vec<f32>,
        sample_rate: u32,
        channels: usize,
    ) -> Result<Vec<f32>> {
        if samples.is_empty() {
            return Err(invalid_audio("Empty samples for resampling"));
        }

        let mono_samples = Self::to_mono(samples, channels);
        if mono_samples.is_empty() {
            return Err(invalid_audio("Recording too short"));
        }

        if sample_rate == TARGET_SAMPLE_RATE {
            return Ok(mono_samples);
        }

        debug!(
            "Resampling from {} Hz to {} Hz",
            sample_rate, TARGET_SAMPLE_RATE
        );

        let mut resampler = FftFixedIn::<f32>::new(
            sample_rate as usize,
            TARGET_SAMPLE_RATE as usize,
            RESAMPLE_CHUNK_SIZE,
            2,
            TARGET_CHANNELS,
        )
        .map_err(|e| PolyglotError::Internal(format!("Failed to create resampler: {e}")))?;

        let delay = resampler.output_delay();
        let expected = resampled_len(mono_samples.len(), sample_rate);
        let mut output_samples = Vec::with_capacity(delay + expected + RESAMPLE_CHUNK_SIZE);

        let mut chunks = mono_samples.chunks_exact(RESAMPLE_CHUNK_SIZE);
        for chunk in &mut chunks {
            let output = resampler
                .process(std::slice::from_ref(&chunk), None)
                .map_err(resample_error)?;
            output_samples.extend_from_slice(&output[0]);
        }

        let remainder = chunks.remainder();
        if !remainder.is_empty() {
            let output = resampler
                .process_partial(Some(std::slice::from_ref(&remainder)), None)
                .map_err(resample_error)?;
            output_samples.extend_from_slice(&output[0]);
        }

        // Flush the filter delay so the end of the recording is kept.
        while output_samples.len() < delay + expected {
            let output = resampler
                .process_partial(None::<&[&[f32]]>, None)
                .map_err(resample_error)?;
            if output[0].is_empty() {
                break;
            }
            output_samples.extend_from_slice(&output[0]);
        }

        output_samples.drain(..delay.min(output_samples.len()));
        output_samples.truncate(expected);

        if output_samples.is_empty() {
            return Err(invalid_audio("Recording too short"));
        }

        debug!(
            "Resampled {} samples to {} samples at {} Hz",
            mono_samples.len(),
            output_samples.len(),
            TARGET_SAMPLE_RATE
        );

        Ok(output_samples)
    }

    /// Scale `[-1.0, 1.0]` floats to signed 16-bit, clamping out-of-range input.
    pub fn to_pcm16(samples: &[f32]) -> Vec<i16> {
        samples
            .iter()
            .map(|s| (s.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16)
            .collect()
    }
}

/// Wrap 16-bit mono PCM in a canonical 44-byte WAV header.
pub fn encode_wav_pcm16(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let byte_rate = sample_rate * 2;

    let mut wav = Vec::with_capacity(44 + samples.len() * 2);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}
