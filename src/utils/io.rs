use anyhow::{Context, Result};
use std::fs;
use std::io::Read;

pub fn read_to_string(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

pub fn write_string(path: &str, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path))
}

/// Read a file, or stdin when no path (or `-`) is given.
pub fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) if p != "-" => read_to_string(p),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
