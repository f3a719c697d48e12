//! Build script for motion-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates motion.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "control",
        &[
            ("kp", Kind::Number),
            ("ki", Kind::Number),
            ("integral_min", Kind::Number),
            ("integral_max", Kind::Number),
            ("alpha", Kind::Number),
            ("pwm_resolution", Kind::Count),
        ],
    ),
    (
        "voltage",
        &[
            ("lower", Kind::Number),
            ("upper", Kind::Number),
            ("resolution", Kind::Number),
        ],
    ),
    (
        "rpm",
        &[
            ("lower", Kind::Number),
            ("upper", Kind::Number),
            ("resolution", Kind::Number),
        ],
    ),
    (
        "encoder",
        &[
            ("pulses_per_rev", Kind::Number),
            ("quadrature_multiplier", Kind::Count),
        ],
    ),
    (
        "flow_rate",
        &[("a", Kind::Number), ("b", Kind::Number), ("c", Kind::Number)],
    ),
    (
        "timing",
        &[
            ("sample_hz", Kind::Count),
            ("refresh_ms", Kind::Count),
            ("blink_ms", Kind::Count),
            ("debounce_ms", Kind::Count),
            ("splash_ms", Kind::Count),
        ],
    ),
];

#[derive(Clone, Copy)]
enum Kind {
    /// Integer or float
    Number,
    /// Positive integer
    Count,
}

fn main() {
    setup_linker();
    validate_config();
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
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate motion.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=motion.toml");

    let config_path = Path::new("motion.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: motion.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds motion.toml as its settings file.           ║\n\
            ║  Please create one in the motion-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("\nERROR: Failed to read motion.toml: {}\n", e),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid TOML syntax in motion.toml                       ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n\
            \n{}\n",
            e
        ),
    };

    let mut errors = Vec::new();
    check_schema(&config, &mut errors);
    check_ranges(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid motion.toml                                      ║\n\
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
}

/// Reject unknown sections, unknown keys and wrongly typed values
fn check_schema(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".into());
        return;
    };

    for (section, body) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| name == section) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(body) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in body {
            match keys.iter().find(|(name, _)| name == key) {
                None => errors.push(format!("[{}] unknown key '{}'", section, key)),
                Some((_, Kind::Number)) => {
                    if number(value).is_none() {
                        errors.push(format!("[{}] {} must be a number", section, key));
                    }
                }
                Some((_, Kind::Count)) => match value.as_integer() {
                    Some(n) if n > 0 => {}
                    _ => errors.push(format!("[{}] {} must be a positive integer", section, key)),
                },
            }
        }
    }
}

/// Cross-field checks mirroring the firmware's settings validation
fn check_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let get = |section: &str, key: &str| config.get(section).and_then(|s| s.get(key)).and_then(number);

    if let Some(alpha) = get("control", "alpha") {
        if !(alpha > 0.0 && alpha <= 1.0) {
            errors.push("[control] alpha must be in (0, 1]".into());
        }
    }

    if let (Some(min), Some(max)) = (get("control", "integral_min"), get("control", "integral_max")) {
        if min > max {
            errors.push("[control] integral_min must not exceed integral_max".into());
        }
    }

    if let Some(ppr) = get("encoder", "pulses_per_rev") {
        if ppr <= 0.0 {
            errors.push("[encoder] pulses_per_rev must be positive".into());
        }
    }

    for section in ["voltage", "rpm"] {
        if let (Some(lower), Some(upper)) = (get(section, "lower"), get(section, "upper")) {
            if lower > upper {
                errors.push(format!("[{}] lower must not exceed upper", section));
            }
        }
        if let Some(step) = get(section, "resolution") {
            if step <= 0.0 {
                errors.push(format!("[{}] resolution must be positive", section));
            }
        }
    }
}

fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(n) => Some(*n as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}
