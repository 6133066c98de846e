use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use darcy_core::io::{read_volume, write_json, write_json_file};
use darcy_core::Volume;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use tracing::{debug, info};

pub fn configure_threads(spec: &str) {
    let count = if spec.eq_ignore_ascii_case("auto") {
        num_cpus::get()
    } else {
        spec.parse().unwrap_or_else(|_| num_cpus::get())
    };
    debug!(threads = count, "configuring rayon pool");
    let _ = ThreadPoolBuilder::new().num_threads(count).build_global();
}

/// Read and validate a volume file.
pub fn load_volume(path: &Path) -> Result<Volume> {
    let volume =
        read_volume(path).with_context(|| format!("reading volume {}", path.display()))?;
    volume
        .validate()
        .with_context(|| format!("validating volume {}", path.display()))?;
    let [w, h, d] = volume.shape();
    info!(w, h, d, pores = volume.pore_count(), "loaded volume");
    Ok(volume)
}

/// Pretty JSON to `out`, or to stdout when no path is given.
pub fn emit<T: Serialize>(data: &T, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            write_json_file(data, path, true)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_json(data, &mut handle, true)?;
        }
    }
    Ok(())
}
