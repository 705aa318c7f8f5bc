use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    cli::{AppContext, InitArgs},
    core::{accumulate::CommentStripping, snippet::Numbering},
};

/// Config files probed in the working directory, first hit wins.
pub const CONFIG_FILES: [&str; 4] = ["docstub.toml", "docstub.yaml", "docstub.json", ".docstub.toml"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Statement scanning below the cursor
    pub scan: ScanConfig,

    /// Generated comment layout
    pub template: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig
{
    /// Physical lines read before giving up on unbalanced brackets
    pub max_lines: usize,
    pub comment_stripping: CommentStripping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig
{
    /// Default text of the description field
    pub description: String,
    pub param_tag: String,
    /// Default text of each parameter field
    pub param_placeholder: String,
    /// Spaces between the longest parameter line and its field
    pub alignment_gap: usize,
    pub numbering: Numbering,
}

impl Default for ScanConfig
{
    fn default() -> Self
    {
        Self {
            max_lines: crate::core::accumulate::DEFAULT_MAX_LINES,
            comment_stripping: CommentStripping::Greedy,
        }
    }
}

impl Default for TemplateConfig
{
    fn default() -> Self
    {
        Self {
            description: "description".to_string(),
            param_tag: "@param".to_string(),
            param_placeholder: "desc".to_string(),
            alignment_gap: 2,
            numbering: Numbering::Doubling,
        }
    }
}

/// Load from the first config file found in the working directory, then
/// `DOCSTUB_` environment overrides (`DOCSTUB_SCAN__MAX_LINES=40`).
pub fn load_config() -> Result<Config>
{
    load_config_in(Path::new("."))
}

pub fn load_config_in(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("DOCSTUB")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        print!("{toml_string}");
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
