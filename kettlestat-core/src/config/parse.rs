//! Minimal TOML parser for the kettle configuration
//!
//! Handles only the subset `kettle.toml` uses and needs no allocator.
//!
//! Supported features:
//! - [section] headers
//! - key = integer
//! - key = [integer, integer, ...] on a single line
//! - Comments (# ...), whole-line or trailing
//!
//! NOT supported:
//! - Strings, booleans, floats
//! - Multi-line arrays
//! - Dotted keys or nested tables
//!
//! Parsing starts from `KettleConfig::default()` and overrides each key it
//! reads, so a file only needs the values that differ from the reference
//! calibration. Unknown sections and keys are errors.

use core::str::FromStr;

use heapless::Vec;

use crate::color::Color;

use super::{ConfigError, KettleConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line is neither a header, a key/value pair nor a comment
    Syntax,
    /// Section header names no known table
    UnknownSection,
    /// Key is not part of its section (or appears before any section)
    UnknownKey,
    /// Value does not parse, overflows, or has the wrong array length
    InvalidValue,
    /// File parsed but the result fails validation
    Invalid(ConfigError),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Classifier,
    Temperature,
    Setpoints,
    Servo,
    Palette,
}

/// Parse TOML configuration into a validated KettleConfig
pub fn parse(input: &str) -> Result<KettleConfig, ParseError> {
    let mut config = KettleConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::Syntax);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Syntax)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate().map_err(ParseError::Invalid)?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "classifier" => Ok(Section::Classifier),
        "temperature" => Ok(Section::Temperature),
        "setpoints" => Ok(Section::Setpoints),
        "servo" => Ok(Section::Servo),
        "palette" => Ok(Section::Palette),
        _ => Err(ParseError::UnknownSection),
    }
}

/// Split `key = value`
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value
fn parse_int<T: FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a single-line integer array of exactly `N` entries
fn parse_array<T: FromStr, const N: usize>(value: &str) -> Result<[T; N], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut items: Vec<T, N> = Vec::new();
    let mut parts = inner.split(',').map(str::trim).peekable();
    while let Some(part) = parts.next() {
        // Allow one trailing comma
        if part.is_empty() && parts.peek().is_none() && !items.is_empty() {
            break;
        }
        let item = parse_int(part)?;
        items.push(item).map_err(|_| ParseError::InvalidValue)?;
    }

    items.into_array().map_err(|_| ParseError::InvalidValue)
}

fn parse_color(value: &str) -> Result<Color, ParseError> {
    parse_array::<u8, 3>(value).map(Color::from)
}

/// Apply a parsed key/value pair to the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut KettleConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Classifier => {
            let c = &mut config.classifier;
            match key {
                "resolution_bits" => c.resolution_bits = parse_int(value)?,
                "object_above" => c.object_above = parse_int(value)?,
                "button_above" => c.button_above = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Temperature => {
            let t = &mut config.temperature;
            match key {
                "resolution_bits" => t.resolution_bits = parse_int(value)?,
                "bucket_floors" => t.bucket_floors = parse_array(value)?,
                "hysteresis" => t.hysteresis = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Setpoints => {
            let s = &mut config.setpoints;
            match key {
                "targets" => s.targets = parse_array(value)?,
                "default_index" => s.default_index = parse_int(value)?,
                "select_timeout_s" => s.select_timeout_s = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Servo => {
            let s = &mut config.servo;
            match key {
                "frame_ticks" => s.frame_ticks = parse_int(value)?,
                "pulse_ticks" => s.pulse_ticks = parse_array(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Palette => {
            let p = &mut config.palette;
            match key {
                "idle" => p.idle = parse_color(value)?,
                "selecting" => p.selecting = parse_color(value)?,
                "heating" => p.heating = parse_color(value)?,
                "holding" => p.holding = parse_color(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Root => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse(""), Ok(KettleConfig::default()));
        assert_eq!(parse("# nothing\n\n"), Ok(KettleConfig::default()));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config_str = r#"
# Alternate sensor calibration
[classifier]
resolution_bits = 10
object_above = 600   # water
button_above = 960

[setpoints]
default_index = 0
"#;
        let config = parse(config_str).unwrap();
        assert_eq!(config.classifier.resolution_bits, 10);
        assert_eq!(config.classifier.object_above, 600);
        assert_eq!(config.classifier.button_above, 960);
        assert_eq!(config.setpoints.default_index, 0);
        // Untouched sections keep their defaults
        assert_eq!(config.temperature, KettleConfig::default().temperature);
    }

    #[test]
    fn test_parse_arrays() {
        let config_str = "
[temperature]
bucket_floors = [400, 520, 640, 760, 880, 1000]

[palette]
holding = [0, 255, 0]
";
        let config = parse(config_str).unwrap();
        assert_eq!(config.temperature.bucket_floors, [400, 520, 640, 760, 880, 1000]);
        assert_eq!(config.palette.holding, Color::GREEN);
    }

    #[test]
    fn test_trailing_comma() {
        let config = parse("[setpoints]\ntargets = [610, 710, 810, 910, 1010,]\n").unwrap();
        assert_eq!(config.setpoints.targets, [610, 710, 810, 910, 1010]);
    }

    #[test]
    fn test_wrong_array_length() {
        assert_eq!(
            parse("[setpoints]\ntargets = [600, 700]\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse("[palette]\nidle = [1, 2, 3, 4]\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_value_overflow() {
        assert_eq!(
            parse("[palette]\nidle = [0, 0, 256]\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse("[classifier]\nobject_above = -1\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(parse("[wifi]\n"), Err(ParseError::UnknownSection));
        assert_eq!(
            parse("[servo]\nspeed = 3\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(parse("hysteresis = 10\n"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(parse("[servo\n"), Err(ParseError::Syntax));
        assert_eq!(parse("[servo]\nframe_ticks\n"), Err(ParseError::Syntax));
        assert_eq!(parse("[servo]\nframe_ticks =\n"), Err(ParseError::Syntax));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        assert_eq!(
            parse("[temperature]\nhysteresis = 700\n"),
            Err(ParseError::Invalid(ConfigError::HysteresisTooLarge))
        );
    }

    #[test]
    fn test_narrow_temperature_needs_rescaled_targets() {
        assert_eq!(
            parse("[temperature]\nresolution_bits = 8\n"),
            Err(ParseError::Invalid(ConfigError::BucketUnreachable))
        );

        let config = parse(
            "[temperature]
resolution_bits = 8
bucket_floors = [125, 150, 175, 200, 225, 250]
hysteresis = 12

[setpoints]
targets = [150, 175, 200, 237, 250]
",
        )
        .unwrap();
        assert_eq!(config.setpoints.targets[4], 250);
    }
}
