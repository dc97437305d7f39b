use std::path::Path;

use bayonet_core::presets::preset_by_name;

pub fn run(name: &str, output: Option<&Path>) -> Result<(), String> {
    let battle = preset_by_name(name).map_err(|e| e.to_string())?;
    let json = battle
        .to_json()
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    super::write_output(&json, output)
}
