//! Best-effort accelerator detection.
//!
//! Never fails: any probe error simply narrows the result to
//! [`Accelerator::None`].

use tracing::debug;

use crate::domain::{Accelerator, Platform, parse_cuda_version};
use crate::ports::{CommandRunner, Invocation};

/// Detect an NVIDIA GPU and the CUDA version its driver supports.
///
/// 1. `nvidia-smi`: success means NVIDIA hardware with a working driver;
///    the header carries `CUDA Version: X.Y`.
/// 2. Platform hardware inventory (`lspci`, `wmic`, `system_profiler`):
///    an "nvidia" entry means hardware without a usable driver version.
pub fn detect_accelerator(runner: &dyn CommandRunner, platform: Platform) -> Accelerator {
    match runner.run(&Invocation::new("nvidia-smi")) {
        Ok(output) if output.success() => {
            let cuda_version = parse_cuda_version(&output.stdout);
            debug!(?cuda_version, "nvidia-smi reported a GPU");
            return Accelerator::Nvidia { cuda_version };
        }
        Ok(output) => debug!(exit = %output.describe_exit(), "nvidia-smi failed"),
        Err(e) => debug!(error = %e, "nvidia-smi not available"),
    }

    let inventory = platform.gpu_inventory();
    match runner.run(&inventory) {
        Ok(output) if output.success() => {
            if output.stdout.to_lowercase().contains("nvidia") {
                debug!(tool = %inventory.command_line(), "Hardware inventory lists an NVIDIA device");
                return Accelerator::Nvidia { cuda_version: None };
            }
            debug!("Hardware inventory lists no NVIDIA device");
        }
        Ok(output) => debug!(exit = %output.describe_exit(), "Hardware inventory failed"),
        Err(e) => debug!(error = %e, "Hardware inventory not available"),
    }

    Accelerator::None
}
