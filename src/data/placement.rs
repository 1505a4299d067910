// ============================================================
// Layer 4 — Device Placement
// ============================================================
// Turns a CPU TokenBatch into two Burn Int tensors of shape
// [batch_size, block_size] living on the requested device.
//
// Ids are handed to Burn as i32, the narrowest Int element of
// the backends we run on (wgpu), so ids above i32::MAX cannot
// be placed.
// That, a backend that cannot bring the device up, or a
// tensor that ends up somewhere else are all PlacementErrors;
// there is no fallback to the CPU.
//
// Reference: Burn Book §3 (Tensors, Backends and Devices)

use std::{
    fmt,
    panic::{catch_unwind, AssertUnwindSafe},
    str::FromStr,
};

use burn::{
    prelude::*,
    tensor::TensorData,
};

use crate::data::batcher::{SequenceBatcher, TokenBatch, TokenGrid};
use crate::domain::split::Mode;
use crate::error::{Error, Result};

/// A batch already placed on a Burn device.
#[derive(Debug, Clone)]
pub struct DeviceBatch<B: Backend> {
    /// Token ids — shape: [batch_size, block_size]
    pub inputs: Tensor<B, 2, Int>,

    /// Next-token ids — shape: [batch_size, block_size]
    pub targets: Tensor<B, 2, Int>,
}

impl TokenBatch {
    /// Copy both grids onto `device`.
    pub fn to_device<B: Backend>(&self, device: &B::Device) -> Result<DeviceBatch<B>> {
        Ok(DeviceBatch {
            inputs:  place_grid::<B>(&self.inputs, device)?,
            targets: place_grid::<B>(&self.targets, device)?,
        })
    }
}

impl SequenceBatcher {
    /// Next batch for `mode`, placed on `device`.
    ///
    /// The cursor advances even when placement fails; the batch
    /// that could not be placed is not handed out again.
    pub fn next_batch_on<B: Backend>(
        &self,
        mode:   Mode,
        device: &B::Device,
    ) -> Result<DeviceBatch<B>> {
        self.next_batch(mode).to_device::<B>(device)
    }
}

fn place_grid<B: Backend>(grid: &TokenGrid, device: &B::Device) -> Result<Tensor<B, 2, Int>> {
    let ints: Vec<i32> = grid
        .as_flat()
        .iter()
        .map(|&id| {
            i32::try_from(id).map_err(|_| {
                Error::placement(format!("token id {id} does not fit in an i32 tensor"))
            })
        })
        .collect::<Result<_>>()?;

    let data = TensorData::new(ints, grid.shape());

    // backends panic when the device cannot be initialised
    let tensor = catch_unwind(AssertUnwindSafe(|| {
        Tensor::<B, 2, Int>::from_data(data, device)
    }))
    .map_err(|panic| Error::placement(format!("device {device:?} unavailable: {}", panic_message(&*panic))))?;

    if tensor.device() != *device {
        return Err(Error::placement(format!(
            "tensor landed on {:?}, expected {:?}",
            tensor.device(),
            device
        )));
    }
    if tensor.dims() != grid.shape() {
        return Err(Error::placement(format!(
            "tensor has shape {:?}, expected {:?}",
            tensor.dims(),
            grid.shape()
        )));
    }
    Ok(tensor)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "backend panicked".to_string())
}

// ─── Target ───────────────────────────────────────────────────────────────────
/// Placement identifiers accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// `burn::backend::NdArray` on the host
    #[default]
    Cpu,
    /// `burn::backend::Wgpu`, default adapter
    Wgpu,
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cpu"  => Ok(Target::Cpu),
            "wgpu" | "gpu" => Ok(Target::Wgpu),
            other  => Err(Error::placement(format!(
                "unsupported target '{other}' (expected \"cpu\" or \"wgpu\")"
            ))),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Cpu  => f.write_str("cpu"),
            Target::Wgpu => f.write_str("wgpu"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::window::BatchConfig;
    use crate::domain::corpus::EncodedCorpus;
    use burn::backend::{ndarray::NdArrayDevice, NdArray};

    type B = NdArray;

    fn ints(t: Tensor<B, 2, Int>) -> Vec<i64> {
        t.into_data().iter::<i64>().collect()
    }

    fn batcher(tokens: Vec<u32>) -> SequenceBatcher {
        SequenceBatcher::new(
            BatchConfig::new(2, 2).unwrap(),
            EncodedCorpus::from_tokens(tokens.clone()).unwrap(),
            EncodedCorpus::from_tokens(tokens).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_batch_lands_on_device_with_shape() {
        let device = NdArrayDevice::Cpu;
        let s = batcher((0..10).collect());

        let batch = s.next_batch_on::<B>(Mode::Train, &device).unwrap();
        assert_eq!(batch.inputs.dims(),  [2, 2]);
        assert_eq!(batch.targets.dims(), [2, 2]);
        assert_eq!(batch.inputs.device(), device);
        assert_eq!(ints(batch.inputs),  vec![0, 1, 2, 3]);
        assert_eq!(ints(batch.targets), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_placed_batch_matches_cpu_batch() {
        let device = NdArrayDevice::Cpu;
        let a = batcher((100..140).collect());
        let b = batcher((100..140).collect());

        for _ in 0..5 {
            let cpu = a.next_batch(Mode::Eval);
            let placed = b.next_batch_on::<B>(Mode::Eval, &device).unwrap();
            let expected: Vec<i64> = cpu.inputs.as_flat().iter().map(|&x| x as i64).collect();
            assert_eq!(ints(placed.inputs), expected);
        }
    }

    #[test]
    fn test_oversized_id_is_placement_error() {
        let s = batcher(vec![1, 2, u32::MAX, 3, 4]);
        let err = s.next_batch_on::<B>(Mode::Train, &NdArrayDevice::Cpu).unwrap_err();
        assert!(matches!(err, Error::Placement { .. }));
    }

    #[test]
    fn test_target_parsing() {
        assert_eq!("cpu".parse::<Target>().unwrap(),  Target::Cpu);
        assert_eq!("WGPU".parse::<Target>().unwrap(), Target::Wgpu);
        assert!(matches!("cuda".parse::<Target>(), Err(Error::Placement { .. })));
    }
}
