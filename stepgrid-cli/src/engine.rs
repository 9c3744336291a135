//! Stand-in audio engine for headless playback: prints every trigger.

use stepgrid_core::sequencer::{AudioContext, EngineError, Triggerable};
use stepgrid_types::{sample_header, SampleId};

#[derive(Default)]
pub struct PrintEngine {
    pub triggered: usize,
}

impl AudioContext for PrintEngine {
    fn is_running(&self) -> bool {
        true
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

impl Triggerable for PrintEngine {
    fn trigger(&mut self, sample: SampleId, pitch: &str, time: f64) {
        self.triggered += 1;
        match sample_header(sample) {
            Some(h) => println!("{:>8.3}s  {} {:<12} {}", time, h.emoji, h.name, pitch),
            None => println!("{:>8.3}s  sample {:<5} {}", time, sample, pitch),
        }
    }
}
