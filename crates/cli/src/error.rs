//! CLI errors and their exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: simulation error (zero display size, unknown setting key)
//! - 11: I/O error (settings file, PNG export)
//! - 12: input error (malformed `--set`, unknown blend mode)
//! - 13: serialization error (corrupt settings file, JSON output)

use flow_fields_core::FlowError;
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Simulation(FlowError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    /// A `--set` argument without a `key=` part.
    pub fn bad_assignment(text: &str) -> Self {
        CliError::Input(format!("invalid --set '{text}': expected key=value"))
    }

    /// A `--blend` name that is neither `additive` nor `normal`.
    pub fn unknown_blend(name: &str) -> Self {
        CliError::Input(format!(
            "unknown blend mode '{name}': expected additive or normal"
        ))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Simulation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            CliError::Simulation(_) => "simulation",
            CliError::Io(_) => "io",
            CliError::Input(_) => "input",
            CliError::Serialization(_) => "serialization",
        }
    }

    /// Machine-readable form printed in `--json` mode.
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "exit_code": self.exit_code(),
        })
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Simulation(FlowError::UnknownParam(key)) => write!(
                f,
                "unknown setting '{key}' (see `flow-fields config --schema`)"
            ),
            CliError::Simulation(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<FlowError> for CliError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::Io(msg) => CliError::Io(msg),
            FlowError::Serialization(msg) => CliError::Serialization(msg),
            other => CliError::Simulation(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_display_size_exits_with_10() {
        let err = CliError::from(FlowError::InvalidDimensions);
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("non-zero"));
    }

    #[test]
    fn unknown_setting_points_at_the_schema() {
        let err = CliError::from(FlowError::UnknownParam("speed".into()));
        assert_eq!(err.exit_code(), 10);
        let msg = err.to_string();
        assert!(msg.contains("'speed'"), "{msg}");
        assert!(msg.contains("config --schema"), "{msg}");
    }

    #[test]
    fn unwritable_settings_file_exits_with_11() {
        let err = CliError::from(FlowError::Io("settings.json: permission denied".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn corrupt_settings_file_exits_with_13() {
        let err = CliError::from(FlowError::Serialization(
            "settings.json: expected a JSON object".into(),
        ));
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn bad_assignment_is_input_error() {
        let err = CliError::bad_assignment("count");
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("key=value"));
    }

    #[test]
    fn unknown_blend_lists_the_modes() {
        let err = CliError::unknown_blend("multiply");
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("additive or normal"));
    }

    #[test]
    fn json_form_carries_kind_and_code() {
        let j = CliError::bad_assignment("=").to_json();
        assert_eq!(j["kind"], "input");
        assert_eq!(j["exit_code"], 12);
        assert!(j["error"].as_str().unwrap().contains("--set"));
    }

    #[test]
    fn malformed_json_output_is_serialization_error() {
        let bad_json = serde_json::from_str::<Value>("{invalid");
        let err = CliError::from(bad_json.unwrap_err());
        assert_eq!(err.exit_code(), 13);
        assert_eq!(err.to_json()["kind"], "serialization");
    }
}
