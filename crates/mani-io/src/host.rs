//! Offline host driver.

use crate::{Error, Result};
use mani_chorus::ChorusEngine;

/// Renders whole channel buffers through a [`ChorusEngine`] the way a
/// real-time host would: one call per block of `block_size` frames, with the
/// buffer offset advancing through the same input and output buffers.
#[derive(Debug)]
pub struct OfflineHost {
    engine: ChorusEngine,
    block_size: usize,
}

impl OfflineHost {
    /// Wrap `engine`, rendering in blocks of `block_size` frames.
    pub fn new(engine: ChorusEngine, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        Ok(Self { engine, block_size })
    }

    /// Frames per render call.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The hosted engine.
    pub fn engine(&self) -> &ChorusEngine {
        &self.engine
    }

    /// Mutable access to the hosted engine (reset, explicit ramps).
    pub fn engine_mut(&mut self) -> &mut ChorusEngine {
        &mut self.engine
    }

    /// Unwrap the engine.
    pub fn into_engine(self) -> ChorusEngine {
        self.engine
    }

    /// Render `inputs` and return one output buffer per input channel.
    ///
    /// The frame count is the shortest input's length. Input channels beyond
    /// the engine's channel count come back silent.
    pub fn process(&mut self, inputs: &[Vec<f32>]) -> Vec<Vec<f32>> {
        self.process_with_progress(inputs, |_| {})
    }

    /// Like [`process`](Self::process), calling `on_block` with the number of
    /// frames rendered so far after every block.
    pub fn process_with_progress(
        &mut self,
        inputs: &[Vec<f32>],
        mut on_block: impl FnMut(usize),
    ) -> Vec<Vec<f32>> {
        let frames = inputs.iter().map(Vec::len).min().unwrap_or(0);
        let mut outputs: Vec<Vec<f32>> = inputs.iter().map(|_| vec![0.0; frames]).collect();

        if inputs.len() > self.engine.channel_count() {
            tracing::warn!(
                supplied = inputs.len(),
                engine = self.engine.channel_count(),
                "extra input channels will be silent"
            );
        }

        let mut blocks = 0usize;
        {
            let in_refs: Vec<&[f32]> = inputs.iter().map(|c| &c[..frames]).collect();
            let mut out_refs: Vec<&mut [f32]> =
                outputs.iter_mut().map(Vec::as_mut_slice).collect();

            let mut offset = 0;
            while offset < frames {
                let count = self.block_size.min(frames - offset);
                self.engine.process(count, offset, &in_refs, &mut out_refs);
                offset += count;
                blocks += 1;
                on_block(offset);
            }
        }

        tracing::debug!(frames, blocks, block_size = self.block_size, "offline render done");
        outputs
    }
}
