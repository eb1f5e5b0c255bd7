//! Synthetic magnitudes
//!
//! Stands in for a real player + analyser pair.  Each channel gets its own set of slowly
//! pulsing voices, seeded from the channel title, so switching channels visibly changes
//! which bands dominate.
use crate::analyzer;
use crate::channel;
use crate::error::{Error, Result};
use rand::{Rng, SeedableRng};
use std::sync::atomic;
use std::{sync, thread, time};

/// Bins covered by one voice
const VOICE_SPAN: usize = 64;

#[derive(Debug, Default)]
pub struct SyntheticBuilder {
    pub fps: Option<u32>,
    pub seed: Option<u64>,
}

impl SyntheticBuilder {
    pub fn new() -> SyntheticBuilder {
        Default::default()
    }

    pub fn fps(&mut self, fps: u32) -> &mut SyntheticBuilder {
        self.fps = Some(fps);
        self
    }

    /// Mixed into the per-channel seed
    pub fn seed(&mut self, seed: u64) -> &mut SyntheticBuilder {
        self.seed = Some(seed);
        self
    }

    pub fn build(&mut self) -> SyntheticSource {
        SyntheticSource::new(self.fps.unwrap_or(60).max(1), self.seed.unwrap_or(0))
    }
}

/// One slowly pulsing region of the spectrum
#[derive(Debug, Clone, Copy)]
struct Voice {
    rate: f32,
    phase: f32,
    level: f32,
}

#[derive(Debug)]
struct Producer {
    stop: sync::Arc<atomic::AtomicBool>,
    handle: thread::JoinHandle<()>,
}

#[derive(Debug)]
pub struct SyntheticSource {
    fps: u32,
    seed: u64,
    producer: Option<Producer>,
}

fn title_seed(title: &str) -> u64 {
    // FNV-1a
    title.bytes().fold(0xcbf2_9ce4_8422_2325u64, |h, b| {
        (h ^ b as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

fn voices<R: Rng>(rng: &mut R, length: usize) -> Vec<Voice> {
    (0..(length + VOICE_SPAN - 1) / VOICE_SPAN)
        .map(|_| Voice {
            rate: rng.gen_range(0.1, 2.0),
            phase: rng.gen_range(0.0, std::f32::consts::PI * 2.0),
            level: rng.gen_range(0.3, 1.0),
        })
        .collect()
}

/// Fill `buf` with the spectrum at time `t`
fn render<R: Rng>(voices: &[Voice], t: f32, rng: &mut R, buf: &mut [analyzer::Magnitude]) {
    for (i, m) in buf.iter_mut().enumerate() {
        let voice = voices[i / VOICE_SPAN];

        // Falls off towards the high end like most real-world audio
        let envelope = 220.0 * (-(i as f32) / 300.0).exp();
        let pulse = 0.5 + 0.5 * (voice.rate * t * std::f32::consts::PI * 2.0 + voice.phase).sin();
        let noise = rng.gen_range(0.0, 8.0);

        *m = (envelope * voice.level * pulse + noise)
            .max(0.0)
            .min(analyzer::MAGNITUDE_MAX) as analyzer::Magnitude;
    }
}

impl SyntheticSource {
    fn new(fps: u32, seed: u64) -> SyntheticSource {
        SyntheticSource {
            fps,
            seed,
            producer: None,
        }
    }
}

impl super::Source for SyntheticSource {
    fn load(
        &mut self,
        channel: &channel::Channel,
        length: usize,
    ) -> Result<analyzer::MagnitudeReader> {
        self.stop();

        let (mut writer, reader) = analyzer::magnitude_channel(length);
        let mut rng = rand::rngs::StdRng::seed_from_u64(title_seed(&channel.title) ^ self.seed);
        let voices = voices(&mut rng, length);

        let stop = sync::Arc::new(atomic::AtomicBool::new(false));
        let frame_time = time::Duration::from_micros(1_000_000 / self.fps as u64);

        log::debug!("SyntheticSource({:?}):", channel.title);
        log::debug!("    Voices              = {:8}", voices.len());
        log::debug!("    Frame Time          = {:8?}", frame_time);

        let handle = {
            let stop = stop.clone();

            thread::Builder::new()
                .name("synthetic-source".into())
                .spawn(move || {
                    let start = time::Instant::now();

                    while !stop.load(atomic::Ordering::Relaxed) {
                        let t = start.elapsed().as_secs_f32();
                        writer.publish_with(|buf| render(&voices, t, &mut rng, buf));

                        thread::sleep(frame_time);
                    }
                })
                .map_err(|e| Error::source_failed(channel.title.clone(), e.to_string()))?
        };

        self.producer = Some(Producer { stop, handle });

        Ok(reader)
    }

    fn stop(&mut self) {
        if let Some(producer) = self.producer.take() {
            producer.stop.store(true, atomic::Ordering::Relaxed);

            if producer.handle.join().is_err() {
                log::warn!("Synthetic producer thread panicked");
            }
        }
    }
}

impl Drop for SyntheticSource {
    fn drop(&mut self) {
        use super::Source;

        self.stop();
    }
}
