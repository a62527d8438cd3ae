use crate::detector::LsdParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `detect_segments` tool.
///
/// ```json
/// {
///   "input": "frame.png",
///   "lsd": { "scale": 0.8, "angle_tolerance_deg": 22.5 },
///   "output": { "segments_json": "out/segments.json" }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct DetectToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub lsd: LsdParams,
    pub output: DetectOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DetectOutputConfig {
    pub segments_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<DetectToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<DetectToolConfig, String> {
    let config: DetectToolConfig = serde_json::from_str(data).map_err(|e| e.to_string())?;
    config.lsd.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lsd_section_is_optional() {
        let config = parse_config(r#"{ "input": "a.png", "output": { "segments_json": "o.json" } }"#)
            .expect("parse");
        assert_eq!(config.lsd, LsdParams::default());
        assert_eq!(config.output.segments_json, PathBuf::from("o.json"));
    }

    #[test]
    fn invalid_parameters_are_reported() {
        let err = parse_config(
            r#"{ "input": "a.png", "lsd": { "density_threshold": 2.0 }, "output": { "segments_json": "o.json" } }"#,
        )
        .unwrap_err();
        assert!(err.contains("density_threshold"), "{err}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config(Path::new("/nonexistent/lsd.json")).unwrap_err();
        assert!(err.contains("/nonexistent/lsd.json"), "{err}");
    }
}
