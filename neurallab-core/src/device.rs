use serde::Serialize;
use std::fmt::{self, Debug};

/// Represents the physical location where parameter arithmetic runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageDevice {
    /// Main system memory and the host CPU.
    /// This is the default device.
    #[default]
    CPU,
    /// A CUDA-capable GPU. No kernels are authored here; a backend reporting
    /// this device still has to honour the sequential epoch semantics.
    GPU,
}

impl fmt::Display for StorageDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageDevice::CPU => f.write_str("cpu"),
            StorageDevice::GPU => f.write_str("cuda"),
        }
    }
}

/// A pluggable numeric backend. The trainer only needs its identity; scalar
/// arithmetic itself happens on the host.
pub trait ComputeBackend: Debug + Send + Sync {
    /// Identifier reported back to the caller, e.g. `"cpu"`.
    fn name(&self) -> String;

    fn device(&self) -> StorageDevice;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl ComputeBackend for CpuBackend {
    fn name(&self) -> String {
        StorageDevice::CPU.to_string()
    }

    fn device(&self) -> StorageDevice {
        StorageDevice::CPU
    }
}

/// Health-check payload: `{"status": "ok", "device": "cpu"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub status: String,
    pub device: String,
}

/// Request-scoped context handed to the training loop.
///
/// Each training run owns its own context; there is no process-wide device
/// selection.
#[derive(Debug)]
pub struct TrainingContext {
    backend: Box<dyn ComputeBackend>,
}

impl TrainingContext {
    pub fn new(backend: Box<dyn ComputeBackend>) -> Self {
        TrainingContext { backend }
    }

    pub fn cpu() -> Self {
        TrainingContext::new(Box::new(CpuBackend))
    }

    pub fn backend(&self) -> &dyn ComputeBackend {
        self.backend.as_ref()
    }

    pub fn status(&self) -> BackendStatus {
        BackendStatus {
            status: "ok".to_string(),
            device: self.backend.name(),
        }
    }
}

impl Default for TrainingContext {
    fn default() -> Self {
        TrainingContext::cpu()
    }
}
