//! Build script for colorcast-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates camera.toml and embeds it as postcard binary
//! - With `readonly`, renders the color bar frame table for flash

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use colorcast_core::config::CameraConfig;
use colorcast_core::frame::{fill_bar_table, Geometry, BAR_COUNT};

fn main() {
    setup_linker();
    let config = embed_config();
    if env::var_os("CARGO_FEATURE_READONLY").is_some() {
        embed_frame_table(&config);
    }
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate camera.toml and write OUT_DIR/camera.bin
fn embed_config() -> CameraConfig {
    println!("cargo:rerun-if-changed=camera.toml");

    let config_path = Path::new("camera.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: camera.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a camera.toml configuration file.         ║\n\
            ║  Please create one in the colorcast-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read camera.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax errors and unknown value types both surface here
    let config: CameraConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid camera.toml                                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid camera configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  • {:<62} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            describe(e)
        );
    }

    let bytes = postcard::to_allocvec(&config).unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("camera.bin"), bytes).unwrap();

    println!(
        "cargo:warning=camera.toml validated: {}x{} @ {} fps",
        config.video.width,
        config.video.height,
        config.video.fps()
    );

    config
}

/// Render one frame per bar step into OUT_DIR/frames.bin
fn embed_frame_table(config: &CameraConfig) {
    // Validation above guarantees a usable geometry
    let geometry = Geometry::try_from(&config.video).unwrap();
    let mut frames = vec![0u8; geometry.frame_size() * BAR_COUNT];
    let written = fill_bar_table(&mut frames, &geometry, BAR_COUNT).unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("frames.bin"), &frames[..written]).unwrap();

    println!(
        "cargo:warning=readonly frame table: {} frames, {} bytes in flash",
        BAR_COUNT, written
    );
}

/// Human-readable message for a validation error
fn describe(error: colorcast_core::config::ConfigError) -> &'static str {
    use colorcast_core::config::ConfigError::*;

    match error {
        InvalidWidth => "[video] width must be even and at least 16",
        InvalidHeight => "[video] height must be non-zero",
        InvalidFrameInterval => "[video] frame_interval must be non-zero",
        InvalidPacketSize => "[video] max_packet_size must be 3-1023",
        InvalidTickInterval => "[video] tick_interval_ms must be non-zero",
        InvalidBlinkPeriod => "[status] blink periods must be non-zero",
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
