//! Build script for shuntcal-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml and compiles it into constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// RP2040 watchdog counter limit
const WATCHDOG_MAX_MS: i64 = 8300;

/// Headroom the watchdog must leave above the longest command
const WATCHDOG_MARGIN_MS: i64 = 1000;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
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
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Device settings after validation
struct DeviceConfig {
    baudrate: u32,
    parity: &'static str,
    command_delay_ms: u32,
    burn_in_passes: u8,
    burn_in_interval_ms: u32,
    brownout_grace_ms: u32,
    watchdog_timeout_ms: u32,
    watchdog_refresh_ms: u32,
}

/// Validate device.toml at compile time
fn validate_config() -> DeviceConfig {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a device.toml configuration file.         ║\n\
            ║  Please create one in the shuntcal-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let baudrate = read_int(&config, "console", "baudrate", 1200, 921_600, &mut errors);
    let parity = match config
        .get("console")
        .and_then(|c| c.get("parity"))
        .and_then(|p| p.as_str())
    {
        Some("none") => "None",
        Some("even") => "Even",
        Some("odd") => "Odd",
        Some(_) => {
            errors.push("console.parity must be \"none\", \"even\" or \"odd\"".to_string());
            "Odd"
        }
        None => {
            errors.push("Missing console.parity".to_string());
            "Odd"
        }
    };

    let command_delay_ms = read_int(&config, "timing", "command_delay_ms", 0, 5000, &mut errors);
    let burn_in_passes = read_int(&config, "timing", "burn_in_passes", 1, 16, &mut errors);
    let burn_in_interval_ms =
        read_int(&config, "timing", "burn_in_interval_ms", 0, 5000, &mut errors);
    let brownout_grace_ms = read_int(&config, "timing", "brownout_grace_ms", 0, 5000, &mut errors);
    let watchdog_timeout_ms = read_int(
        &config,
        "watchdog",
        "timeout_ms",
        1,
        WATCHDOG_MAX_MS,
        &mut errors,
    );
    let watchdog_refresh_ms = read_int(
        &config,
        "watchdog",
        "refresh_ms",
        1,
        WATCHDOG_MAX_MS,
        &mut errors,
    );

    // An idle console is kept alive by refresh ticks alone
    if errors.is_empty() && watchdog_refresh_ms * 2 > watchdog_timeout_ms {
        errors.push(format!(
            "watchdog.refresh_ms must be at most half of timeout_ms ({} ms)",
            watchdog_timeout_ms
        ));
    }

    // INIT is the longest command: every pass, the pauses between, then the settle
    let longest_command_ms =
        command_delay_ms + burn_in_passes.saturating_sub(1) * burn_in_interval_ms;
    if errors.is_empty() && watchdog_timeout_ms < longest_command_ms + WATCHDOG_MARGIN_MS {
        errors.push(format!(
            "watchdog.timeout_ms must exceed INIT duration ({} ms) by {} ms",
            longest_command_ms, WATCHDOG_MARGIN_MS
        ));
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid settings in device.toml                          ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");

    DeviceConfig {
        baudrate: baudrate as u32,
        parity,
        command_delay_ms: command_delay_ms as u32,
        burn_in_passes: burn_in_passes as u8,
        burn_in_interval_ms: burn_in_interval_ms as u32,
        brownout_grace_ms: brownout_grace_ms as u32,
        watchdog_timeout_ms: watchdog_timeout_ms as u32,
        watchdog_refresh_ms: watchdog_refresh_ms as u32,
    }
}

/// Read `[section] key` as an integer within `min..=max`
///
/// Problems are collected in `errors`; the returned value is then `min`.
fn read_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    let value = config
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_integer());

    match value {
        Some(v) if (min..=max).contains(&v) => v,
        Some(v) => {
            errors.push(format!("{}.{} = {} (must be {}..={})", section, key, v, min, max));
            min
        }
        None => {
            errors.push(format!("Missing integer {}.{}", section, key));
            min
        }
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

/// Write the validated settings as Rust constants into OUT_DIR
fn generate_config(config: &DeviceConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("device_config.rs")).unwrap();

    writeln!(f, "// Generated from device.toml by build.rs").unwrap();
    writeln!(f, "pub const CONSOLE_BAUDRATE: u32 = {};", config.baudrate).unwrap();
    writeln!(f, "pub const CONSOLE_PARITY: Parity = Parity::{};", config.parity).unwrap();
    writeln!(f, "pub const COMMAND_DELAY_MS: u32 = {};", config.command_delay_ms).unwrap();
    writeln!(f, "pub const BURN_IN_PASSES: u8 = {};", config.burn_in_passes).unwrap();
    writeln!(f, "pub const BURN_IN_INTERVAL_MS: u32 = {};", config.burn_in_interval_ms).unwrap();
    writeln!(f, "pub const BROWNOUT_GRACE_MS: u32 = {};", config.brownout_grace_ms).unwrap();
    writeln!(f, "pub const WATCHDOG_TIMEOUT_MS: u32 = {};", config.watchdog_timeout_ms).unwrap();
    writeln!(f, "pub const WATCHDOG_REFRESH_MS: u32 = {};", config.watchdog_refresh_ms).unwrap();
}
