//! CLI command implementations.

pub mod generate;
pub mod params;
pub mod process;

/// Parse a normalized parameter level for clap's `value_parser`.
pub fn parse_level(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("Invalid number: '{}'", s))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("Value {} out of range (expected 0.0 to 1.0)", value));
    }
    Ok(value)
}

/// Parse an output bit depth for clap's `value_parser`.
pub fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Invalid bit depth: '{}' (expected 16, 24, or 32)", s)),
    }
}
