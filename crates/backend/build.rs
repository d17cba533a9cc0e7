use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies the workspace config.toml next to the built binary so that
/// `load_config` finds it without extra flags.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    let source_config = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config.toml");
    let dest_config = target_dir.join("config.toml");

    if !source_config.exists() {
        println!(
            "cargo:warning=config.toml not found at {:?}, the embedded default will be used",
            source_config
        );
        return;
    }

    if let Err(e) = fs::copy(&source_config, &dest_config) {
        panic!("Failed to copy config.toml: {}", e);
    }
}

// OUT_DIR is target/<profile>/build/<pkg>-<hash>/out
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}
