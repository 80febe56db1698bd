//! Process-wide Ray runtime.
use anyhow::Result;
use log::{info, warn};
use pyo3::Python;
use stint_core::Runtime;

/// Guard over the process-wide Ray runtime.
///
/// [`Runtime::init`] brings the cluster up; dropping the guard shuts it
/// down again. One matched pair per run.
pub struct RayRuntime {
    // Construction goes through `init` only.
    _private: (),
}

impl Runtime for RayRuntime {
    fn init() -> Result<Self> {
        Python::with_gil(|py| -> Result<()> {
            let ray = py.import("ray")?;
            ray.call_method0("init")?;
            Ok(())
        })?;
        info!("Ray runtime initialized");
        Ok(Self { _private: () })
    }
}

impl Drop for RayRuntime {
    fn drop(&mut self) {
        let res = Python::with_gil(|py| -> pyo3::PyResult<()> {
            py.import("ray")?.call_method0("shutdown")?;
            Ok(())
        });
        match res {
            Ok(()) => info!("Ray runtime shut down"),
            Err(e) => warn!("Failed to shut down Ray: {}", e),
        }
    }
}
