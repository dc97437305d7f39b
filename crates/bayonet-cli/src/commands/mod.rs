pub mod export;
pub mod presets;
pub mod simulate;
pub mod tables;

use std::path::Path;

use bayonet_core::{BattleState, Stance};

/// Load a battle from a JSON file.
fn load_encounter(path: &Path) -> Result<BattleState, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    BattleState::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

/// Parse a stance name.
fn parse_stance(name: &str) -> Result<Stance, String> {
    Stance::from_name(name).ok_or_else(|| {
        format!("unknown stance '{name}' (expected aggressive, balanced or defensive)")
    })
}

/// Write `contents` to `path`, or stdout when no path is given.
fn write_output(contents: &str, path: Option<&Path>) -> Result<(), String> {
    match path {
        Some(path) => {
            std::fs::write(path, contents)
                .map_err(|e| format!("cannot write '{}': {e}", path.display()))?;
            println!("  Wrote {}", path.display());
            Ok(())
        }
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}
