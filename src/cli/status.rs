use crate::settings::{load_settings, settings_file_exists, settings_path};

fn or_unset(val: &str) -> &str {
    if val.is_empty() { "(not set)" } else { val }
}

pub fn run() {
    let settings = load_settings();

    println!("Settings:   {}", settings_path().display());
    if !settings_file_exists() {
        println!("            (missing, using defaults; run `gymbios init`)");
    }
    println!("Company:    {}", or_unset(&settings.company_name));
    println!("API URL:    {}", or_unset(&settings.api_base_url));
    println!("API token:  {}", if settings.api_token.is_some() { "set" } else { "(not set)" });
    println!("Currency:   {}", settings.currency);
    match settings.request_timeout() {
        Some(t) => println!("Timeout:    {}s", t.as_secs()),
        None => println!("Timeout:    none"),
    }
    println!("Data dir:   {}", settings.data_dir);
    println!("Cache dir:  {}", settings.cache_dir().display());
}
