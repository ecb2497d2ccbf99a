//! Debug logging infrastructure for terrain investigation
//!
//! Writes to the file named by `TerrainConfig::debug_log_path`.
//! The log file is recreated on each `init_debug_log()` call.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::marching_squares::Vertex;

lazy_static::lazy_static! {
    static ref DEBUG_LOG: Mutex<Option<File>> = Mutex::new(None);
}

/// Log a debug message to the terrain debug log file
pub fn debug_log(msg: &str) {
    if let Ok(mut guard) = DEBUG_LOG.lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }
    }
}

/// Initialize the debug log file (overwrites any existing log)
pub fn init_debug_log(path: &Path) {
    if let Ok(mut guard) = DEBUG_LOG.lock() {
        *guard = match File::create(path) {
            Ok(file) => Some(file),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not create terrain debug log");
                None
            }
        };
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "=== CARVE TERRAIN DEBUG LOG ===");
            let _ = writeln!(file, "Timestamp: {:?}", std::time::SystemTime::now());
            let _ = writeln!(file);
        }
    }
}

pub fn is_debug_log_enabled() -> bool {
    DEBUG_LOG.lock().map(|guard| guard.is_some()).unwrap_or(false)
}

/// Statistics about normals in a mesh
#[derive(Debug)]
pub struct NormalStats {
    pub min_len: f32,
    pub max_len: f32,
    pub degenerate_count: usize,
}

/// Compute statistics about vertex normals
/// A normal is considered degenerate if its length is not close to 1.0
pub fn compute_normal_stats(vertices: &[Vertex]) -> NormalStats {
    let mut min_len = f32::MAX;
    let mut max_len = f32::MIN;
    let mut degenerate_count = 0;

    for v in vertices {
        let n = v.normal;
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        min_len = min_len.min(len);
        max_len = max_len.max(len);

        if !(0.99..=1.01).contains(&len) {
            degenerate_count += 1;
        }
    }

    if vertices.is_empty() {
        min_len = 0.0;
        max_len = 0.0;
    }

    NormalStats {
        min_len,
        max_len,
        degenerate_count,
    }
}

/// Count vertices that appear at identical positions (within epsilon)
/// Returns the number of duplicate position groups found
pub fn count_duplicate_positions(vertices: &[Vertex], epsilon: f32) -> usize {
    // Quantize positions to grid cells for fast lookup
    let scale = 1.0 / epsilon;
    let mut position_counts: HashMap<(i32, i32, i32), usize> = HashMap::new();

    for v in vertices {
        let p = v.position;
        let key = (
            (p[0] * scale).round() as i32,
            (p[1] * scale).round() as i32,
            (p[2] * scale).round() as i32,
        );
        *position_counts.entry(key).or_insert(0) += 1;
    }

    position_counts.values().filter(|&&count| count > 1).count()
}
