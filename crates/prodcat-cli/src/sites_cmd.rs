use prodcat_core::AppConfig;

/// Prints the configured, enabled site profiles in declared order.
pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let sites = if config.sites_path.exists() {
        prodcat_core::load_sites(&config.sites_path)?
    } else {
        prodcat_core::SitesFile::builtin()
    };

    println!("Available sites:");
    for site in sites.enabled() {
        let marker = if site.key == config.default_site {
            " (default)"
        } else {
            ""
        };
        println!("  {:<16} {} ({}){marker}", site.key, site.name, site.base_url);
    }

    Ok(())
}
