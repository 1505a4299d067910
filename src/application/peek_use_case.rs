// ============================================================
// Layer 2 — PeekUseCase
// ============================================================
// Draws a few batches exactly the way a training loop would:
// sequentially, from one mode, placed on the chosen device.
// Useful to eyeball shapes and the target shift before
// committing to a long run.

use anyhow::{Context, Result};
use burn::{
    backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, NdArray, Wgpu},
    prelude::*,
};

use crate::application::{data_config::DataConfig, prepare_use_case::PrepareUseCase};
use crate::data::{batcher::SequenceBatcher, placement::Target};
use crate::domain::split::Mode;

/// First row of one drawn batch, as it came back from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPreview {
    /// Token offset the window started at
    pub offset:       usize,
    pub shape:        [usize; 2],
    pub first_input:  Vec<i64>,
    pub first_target: Vec<i64>,
}

pub struct PeekUseCase {
    config: DataConfig,
    mode:   Mode,
    count:  usize,
    target: Target,
}

impl PeekUseCase {
    pub fn new(config: DataConfig, mode: Mode, count: usize, target: Target) -> Self {
        Self { config, mode, count, target }
    }

    pub fn execute(&self) -> Result<Vec<BatchPreview>> {
        let batcher = PrepareUseCase::new(self.config.clone()).build_batcher()?;
        tracing::info!(
            "Peeking {} {} batch(es) on {}",
            self.count,
            self.mode,
            self.target
        );

        match self.target {
            Target::Cpu  => preview::<NdArray>(&batcher, self.mode, self.count, &NdArrayDevice::Cpu),
            Target::Wgpu => preview::<Wgpu>(&batcher, self.mode, self.count, &WgpuDevice::default()),
        }
    }
}

/// Draw `count` batches for `mode` on `device` and keep the first row of each.
pub fn preview<B: Backend>(
    batcher: &SequenceBatcher,
    mode:    Mode,
    count:   usize,
    device:  &B::Device,
) -> Result<Vec<BatchPreview>> {
    let cols = batcher.config().block_size();

    (0..count)
        .map(|i| {
            let offset = batcher.cursor(mode.split());
            let batch = batcher
                .next_batch_on::<B>(mode, device)
                .with_context(|| format!("Batch {i} could not be placed on {device:?}"))?;

            let shape = batch.inputs.dims();
            let first_input: Vec<i64> =
                batch.inputs.into_data().iter::<i64>().take(cols).collect();
            let first_target: Vec<i64> =
                batch.targets.into_data().iter::<i64>().take(cols).collect();

            Ok(BatchPreview { offset, shape, first_input, first_target })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prepare_use_case::fixtures;
    use tempfile::tempdir;

    #[test]
    fn test_peek_train_on_cpu() {
        let dir = tempdir().unwrap();
        let cfg = fixtures::write_corpus(dir.path());

        let previews = PeekUseCase::new(cfg, Mode::Train, 5, Target::Cpu).execute().unwrap();
        let offsets: Vec<usize> = previews.iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![0, 8, 16, 24, 0]);

        assert!(previews.iter().all(|p| p.shape == [2, 4]));
        assert_eq!(previews[0].first_input,  vec![1, 2, 3, 4]);
        assert_eq!(previews[0].first_target, vec![2, 3, 4, 1]);
        assert_eq!(previews[4], previews[0]);
    }

    #[test]
    fn test_peek_eval_wraps_after_two() {
        let dir = tempdir().unwrap();
        let cfg = fixtures::write_corpus(dir.path());

        let previews = PeekUseCase::new(cfg, Mode::Eval, 3, Target::Cpu).execute().unwrap();
        let offsets: Vec<usize> = previews.iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![0, 8, 0]);
    }
}
