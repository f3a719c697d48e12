//! Settings file parser
//!
//! A minimal TOML subset reader for the embedded `motion.toml`. It does NOT
//! support the full TOML language.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = number` pairs (integers and decimals, optional sign)
//! - Comments (`# ...`), whole-line and trailing
//!
//! Parsing starts from [`Settings::default`], so absent keys keep their
//! fallback values.

use super::types::Settings;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header, with its line number
    InvalidSection(u16),
    /// Value is not a number of the expected kind
    InvalidValue(u16),
    /// Key not recognized in the current section
    UnknownKey(u16),
    /// Line is neither a header nor a key/value pair
    Malformed(u16),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Control,
    Voltage,
    Rpm,
    Encoder,
    FlowRate,
    Timing,
}

/// Parse settings text into [`Settings`]
///
/// The result is not validated; call [`Settings::validate`] before use.
pub fn parse_settings(input: &str) -> Result<Settings, ParseError> {
    let mut settings = Settings::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = u16::try_from(index + 1).unwrap_or(u16::MAX);
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Malformed(line_no))?;
        apply_value(&mut settings, section, key, value, line_no)?;
    }

    Ok(settings)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "control" => Some(Section::Control),
        "voltage" => Some(Section::Voltage),
        "rpm" => Some(Section::Rpm),
        "encoder" => Some(Section::Encoder),
        "flow_rate" => Some(Section::FlowRate),
        "timing" => Some(Section::Timing),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_number<T: core::str::FromStr>(value: &str, line_no: u16) -> Result<T, ParseError> {
    // TOML allows underscores between digits
    let mut buf: heapless::String<32> = heapless::String::new();
    for ch in value.chars().filter(|c| *c != '_') {
        buf.push(ch).map_err(|_| ParseError::InvalidValue(line_no))?;
    }
    buf.parse().map_err(|_| ParseError::InvalidValue(line_no))
}

fn apply_value(
    settings: &mut Settings,
    section: Section,
    key: &str,
    value: &str,
    line_no: u16,
) -> Result<(), ParseError> {
    let float = |v: &str| parse_number::<f32>(v, line_no);
    let int = |v: &str| parse_number::<u32>(v, line_no);

    match (section, key) {
        (Section::Control, "kp") => settings.control.kp = float(value)?,
        (Section::Control, "ki") => settings.control.ki = float(value)?,
        (Section::Control, "integral_min") => settings.control.integral_min = float(value)?,
        (Section::Control, "integral_max") => settings.control.integral_max = float(value)?,
        (Section::Control, "alpha") => settings.control.alpha = float(value)?,
        (Section::Control, "pwm_resolution") => {
            settings.control.pwm_resolution = parse_number(value, line_no)?
        }

        (Section::Voltage, "lower") => settings.voltage.lower = float(value)?,
        (Section::Voltage, "upper") => settings.voltage.upper = float(value)?,
        (Section::Voltage, "resolution") => settings.voltage.resolution = float(value)?,

        (Section::Rpm, "lower") => settings.rpm.lower = float(value)?,
        (Section::Rpm, "upper") => settings.rpm.upper = float(value)?,
        (Section::Rpm, "resolution") => settings.rpm.resolution = float(value)?,

        (Section::Encoder, "pulses_per_rev") => settings.encoder.pulses_per_rev = float(value)?,
        (Section::Encoder, "quadrature_multiplier") => {
            settings.encoder.quadrature_multiplier = parse_number(value, line_no)?
        }

        (Section::FlowRate, "a") => settings.flow_rate.a = float(value)?,
        (Section::FlowRate, "b") => settings.flow_rate.b = float(value)?,
        (Section::FlowRate, "c") => settings.flow_rate.c = float(value)?,

        (Section::Timing, "sample_hz") => settings.timing.sample_hz = int(value)?,
        (Section::Timing, "refresh_ms") => settings.timing.refresh_ms = int(value)?,
        (Section::Timing, "blink_ms") => settings.timing.blink_ms = int(value)?,
        (Section::Timing, "debounce_ms") => settings.timing.debounce_ms = int(value)?,
        (Section::Timing, "splash_ms") => settings.timing.splash_ms = int(value)?,

        _ => return Err(ParseError::UnknownKey(line_no)),
    }

    Ok(())
}
