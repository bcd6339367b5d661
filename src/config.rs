use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    breakpoints::BreakpointTable,
    diff::RemovalPolicy,
    extract::{ExtractOpts, LineHeightPolicy},
    foundation::error::{RespondiffError, RespondiffResult},
    render::{MediaLabel, RenderOpts},
    units::LengthMode,
};

/// Run configuration: the breakpoint table plus every formatting policy.
///
/// All fields are optional in JSON; missing ones take the plugin defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub breakpoints: BreakpointTable,
    pub length_mode: LengthMode,
    pub line_height: LineHeightPolicy,
    pub removal: RemovalPolicy,
    pub media_label: MediaLabel,
}

impl Config {
    pub fn from_reader<R: std::io::Read>(r: R) -> RespondiffResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RespondiffError::serde(format!("parse config JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> RespondiffResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RespondiffError::io(format!("open config JSON '{}'", path.display()), e)
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn extract_opts(&self) -> ExtractOpts {
        ExtractOpts {
            length_mode: self.length_mode,
            line_height: self.line_height,
        }
    }

    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            media_label: self.media_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_plugin_defaults() {
        let c = Config::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.breakpoints, BreakpointTable::desktop());
        assert_eq!(c.length_mode, LengthMode::Rem);
    }

    #[test]
    fn fields_override_defaults() {
        let s = r#"{
            "breakpoints": { "sm": 640, "lg": 1280 },
            "lengthMode": "px",
            "lineHeight": "percent",
            "removal": "unset",
            "mediaLabel": "name"
        }"#;
        let c = Config::from_reader(s.as_bytes()).unwrap();
        assert_eq!(c.breakpoints.base().name, "sm");
        assert_eq!(c.extract_opts().length_mode, LengthMode::Px);
        assert_eq!(c.extract_opts().line_height, LineHeightPolicy::Percent);
        assert_eq!(c.removal, RemovalPolicy::Unset);
        assert_eq!(c.render_opts().media_label, MediaLabel::Name);
    }

    #[test]
    fn invalid_table_is_rejected() {
        let err = Config::from_reader(r#"{"breakpoints": {}}"#.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("at least one tier"));
    }
}
