use rpassword::prompt_password;
use zeroize::Zeroizing;

use crate::cli::Globals;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};

pub fn run(
    globals: &Globals,
    data_dir: Option<String>,
    company: Option<String>,
    currency: Option<String>,
    token: bool,
) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(url) = &globals.api_url {
        settings.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(name) = company {
        settings.company_name = name;
    }
    if let Some(code) = currency {
        settings.currency = code.trim().to_uppercase();
    }
    if token {
        let entered = Zeroizing::new(prompt_password("API token (empty to clear): ")?);
        let trimmed = entered.trim();
        settings.api_token = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    std::fs::create_dir_all(settings.cache_dir())?;
    save_settings(&settings)?;

    println!("Settings written to {}", settings_path().display());
    println!("Data directory: {}", settings.data_dir);
    if settings.api_base_url.is_empty() {
        println!("No API URL set. Pass --api-url URL, or use --snapshot FILE with each command.");
    }
    Ok(())
}
