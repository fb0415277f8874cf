use crate::error::{CrewbookError, Result};
use crate::settings::{load_settings_from, save_settings_to, settings_path, Settings};

pub fn run(init: bool) -> Result<()> {
    let path = settings_path();
    if init {
        if path.exists() {
            println!("Settings already exist at {}", path.display());
        } else {
            save_settings_to(&Settings::default(), &path)?;
            println!("Wrote default settings to {}", path.display());
        }
    }
    let settings = load_settings_from(&path);
    let json = serde_json::to_string_pretty(&settings)
        .map_err(|e| CrewbookError::Settings(e.to_string()))?;
    println!("{}\n{json}", path.display());
    Ok(())
}
