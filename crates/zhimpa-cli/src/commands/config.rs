use anyhow::Result;
use zhimpa_core::config::SiteConfig;
use zhimpa_infrastructure::ConfigService;

pub fn print(config: &SiteConfig) -> Result<()> {
    print!("{}", ConfigService::render(config)?);
    Ok(())
}
