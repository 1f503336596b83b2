//! Build script for watchpost-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates node.toml at compile time
//! - Generates the `NODE_CONFIG` constant the firmware runs with

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use watchpost_core::config::{ConfigError, NodeConfig, PinConfig};

/// I2C0 is the only bus wired to the display connector
const I2C0_SDA: u8 = 4;
const I2C0_SCL: u8 = 5;

fn main() {
    setup_linker();
    let config = load_config();
    validate_config(&config);
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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse node.toml
fn load_config() -> NodeConfig {
    // Re-run if node.toml changes
    println!("cargo:rerun-if-changed=node.toml");

    let config_path = Path::new("node.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: node.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a node.toml configuration file.           ║\n\
            ║  Please create one in the watchpost-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read node.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid node.toml                                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
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

fn describe(err: ConfigError) -> String {
    match err {
        ConfigError::PinOutOfRange { pin } => {
            format!("GPIO{} does not exist on the RP2040 (0-29)", pin)
        }
        ConfigError::PinConflict { pin } => format!("GPIO{} is assigned more than once", pin),
        ConfigError::ZeroValue { field } => format!("{} must be greater than zero", field),
        ConfigError::InvalidI2cAddress { address } => {
            format!("display.i2c_address 0x{:02X} is not a 7-bit address", address)
        }
        ConfigError::InvalidDisplayGeometry => {
            "display must be 1-20 columns and 1-4 rows".to_string()
        }
        ConfigError::UnsupportedInversion { field } => {
            format!("{}.inverted is not supported on a single-wire line", field)
        }
    }
}

/// Validate node.toml contents
fn validate_config(config: &NodeConfig) {
    let mut errors = Vec::new();

    if let Err(e) = config.validate() {
        errors.push(describe(e));
    }
    if config.display.sda_pin != I2C0_SDA || config.display.scl_pin != I2C0_SCL {
        errors.push(format!(
            "display must use I2C0 on GPIO{} (SDA) / GPIO{} (SCL)",
            I2C0_SDA, I2C0_SCL
        ));
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in node.toml                       ║\n\
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

    println!("cargo:warning=node.toml validated successfully");
}

fn pin_literal(p: &PinConfig) -> String {
    format!(
        "PinConfig {{ pin: {}, inverted: {}, pull_up: {} }}",
        p.pin, p.inverted, p.pull_up
    )
}

/// Write `node_config.rs` into OUT_DIR
fn generate_config(config: &NodeConfig) {
    let m = &config.motion;
    let r = &config.ranging;
    let c = &config.climate;
    let d = &config.display;
    let t = &config.tasks;

    let source = format!(
        "// Generated by build.rs from node.toml\n\
         pub const NODE_CONFIG: NodeConfig = NodeConfig {{\n    \
             motion: MotionConfig {{ pin: {}, debounce_ms: {} }},\n    \
             ranging: RangingConfig {{ trigger_pin: {}, echo_pin: {}, timeout_us: {}, change_threshold_cm: {:?}f32 }},\n    \
             climate: ClimateConfig {{ pin: {}, min_interval_ms: {} }},\n    \
             display: DisplayConfig {{ i2c_address: {}, sda_pin: {}, scl_pin: {}, columns: {}, rows: {}, banner_ms: {} }},\n    \
             tasks: TaskPlan {{ motion_ms: {}, ranging_ms: {}, climate_ms: {}, remote_idle_ms: {}, remote_connected_ms: {}, display_ms: {} }},\n\
         }};\n",
        pin_literal(&m.pin),
        m.debounce_ms,
        pin_literal(&r.trigger_pin),
        pin_literal(&r.echo_pin),
        r.timeout_us,
        r.change_threshold_cm,
        pin_literal(&c.pin),
        c.min_interval_ms,
        d.i2c_address,
        d.sda_pin,
        d.scl_pin,
        d.columns,
        d.rows,
        d.banner_ms,
        t.motion_ms,
        t.ranging_ms,
        t.climate_ms,
        t.remote_idle_ms,
        t.remote_connected_ms,
        t.display_ms,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("node_config.rs"), source).unwrap();
}
