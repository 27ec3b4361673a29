//! Invocation input gathering.
//!
//! Inputs arrive two ways, mirroring how CI orchestrators pass step
//! parameters: `INPUT_<NAME>` environment variables and explicit
//! `--input name=value` flags. Flags win on conflict. Names are folded to
//! the declared spelling: lowercase, `-` → `_`.

use anyhow::{bail, Result};
use stratus_action::RawInputs;
use stratus_config::Environment;

const INPUT_ENV_PREFIX: &str = "INPUT_";

/// Fold an input name to its canonical spelling.
fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

/// Parse one `name=value` flag.
fn parse_flag(flag: &str) -> Result<(String, String)> {
    match flag.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((normalize(name), value.to_string()))
        }
        _ => bail!("--input expects `name=value`, got `{flag}`"),
    }
}

/// Collect the raw input mapping from `INPUT_*` variables and flags.
pub fn collect(env: &Environment, flags: &[String]) -> Result<RawInputs> {
    let mut raw = RawInputs::new();

    for (name, value) in env.iter_prefixed(INPUT_ENV_PREFIX) {
        raw.insert(normalize(name), value.to_string());
    }

    for flag in flags {
        let (name, value) = parse_flag(flag)?;
        raw.insert(name, value);
    }

    Ok(raw)
}
