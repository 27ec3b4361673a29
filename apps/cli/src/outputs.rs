//! Output emission.
//!
//! Outputs go to stdout as `name=value` lines, and are additionally
//! appended to the file named by `STRATUS_OUTPUT` when set, which is how
//! later steps of the orchestrator consume them.

use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use stratus_config::Environment;

/// Variable naming the file outputs are appended to.
pub const OUTPUT_FILE_VAR: &str = "STRATUS_OUTPUT";

/// Emit the output mapping.
pub fn emit(env: &Environment, outputs: &IndexMap<String, String>) -> Result<()> {
    let rendered = render(outputs);
    print!("{rendered}");

    if let Some(path) = env.get(OUTPUT_FILE_VAR) {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening output file `{path}`"))?;
        file.write_all(rendered.as_bytes())
            .with_context(|| format!("writing output file `{path}`"))?;
    }

    Ok(())
}

fn render(outputs: &IndexMap<String, String>) -> String {
    let mut rendered = String::new();
    for (name, value) in outputs {
        rendered.push_str(name);
        rendered.push('=');
        rendered.push_str(value);
        rendered.push('\n');
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line_per_output() {
        let outputs: IndexMap<String, String> = [
            ("queue_url".to_string(), "http://sqs/q".to_string()),
            ("status".to_string(), "created".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(render(&outputs), "queue_url=http://sqs/q\nstatus=created\n");
    }

    #[test]
    fn appends_to_the_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs.txt");
        let env = Environment::from_pairs([(OUTPUT_FILE_VAR, path.to_str().unwrap())]);

        let outputs: IndexMap<String, String> =
            [("status".to_string(), "deleted".to_string())].into_iter().collect();
        emit(&env, &outputs).unwrap();
        emit(&env, &outputs).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "status=deleted\nstatus=deleted\n");
    }
}
