use tagsync::cli::{Cli, Commands, ConfigAction};
use tagsync::config::Config;
use tagsync::error::{Result, TagsyncError};
use tagsync::mapper::MapperFactory;
use tagsync::model::SourceEntity;
use tagsync::registry::MapperRegistry;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Map {
            input,
            json,
            strict,
        } => {
            cmd_map(cli.config, &input, json, strict)?;
        }
        Commands::Check { entity_type } => {
            cmd_check(cli.config, &entity_type)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_filter = if verbose { "tagsync=debug" } else { "tagsync=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn cmd_map(
    config_path: Option<std::path::PathBuf>,
    input: &std::path::Path,
    json: bool,
    strict: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let factory = MapperFactory::with_builtins();
    let registry = MapperRegistry::bootstrap(&factory, &config);

    if !registry.is_complete() {
        if strict {
            return Err(TagsyncError::Config(
                "Some configured mappers failed to bootstrap (see log)".to_string(),
            ));
        }
        tracing::warn!("Running with a partially bootstrapped registry");
    }

    let content = std::fs::read_to_string(input).map_err(|e| TagsyncError::Io {
        source: e,
        context: format!("Failed to read entities file: {:?}", input),
    })?;
    let entities: Vec<SourceEntity> =
        serde_json::from_str(&content).map_err(|e| TagsyncError::Json {
            source: e,
            context: format!("Failed to parse entities file: {:?}", input),
        })?;

    let mut resources = Vec::new();
    let mut skipped = 0usize;

    for entity in &entities {
        match registry.build_resource(entity) {
            Some(resource) => resources.push(resource),
            None => {
                skipped += 1;
                tracing::debug!(
                    "No resource for entity {} (type {})",
                    entity.guid,
                    entity.type_name
                );
            }
        }
    }

    if json {
        let out = serde_json::to_string_pretty(&resources).map_err(|e| TagsyncError::Json {
            source: e,
            context: "Failed to serialize resources".to_string(),
        })?;
        println!("{}", out);
    } else {
        for resource in &resources {
            println!(
                "{} -> {} {:?}",
                resource.guid, resource.service_name, resource.resource_elements
            );
        }
        println!(
            "\n✓ Mapped {} of {} entities ({} skipped)",
            resources.len(),
            entities.len(),
            skipped
        );
    }

    Ok(())
}

fn cmd_check(config_path: Option<std::path::PathBuf>, entity_type: &str) -> Result<()> {
    let config = load_config(config_path)?;

    let factory = MapperFactory::with_builtins();
    let registry = MapperRegistry::bootstrap(&factory, &config);

    if registry.is_entity_type_handled(entity_type) {
        println!("✓ {} is handled", entity_type);
    } else {
        println!("✗ {} is not handled", entity_type);
        println!("\nHandled entity types:");
        for handled in registry.handled_entity_types() {
            println!("  {}", handled);
        }
    }

    Ok(())
}

fn cmd_config(config_path: Option<std::path::PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let json = serde_json::to_string_pretty(&config).map_err(|e| TagsyncError::Json {
                source: e,
                context: "Failed to serialize config".to_string(),
            })?;
            println!("{}", json);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| TagsyncError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            let config = Config::default();
            config.save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<std::path::PathBuf>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        tracing::warn!(
            "Config file not found, using defaults. Run 'tagsync config init' to create one."
        );
        return Ok(Config::default());
    }

    Config::load(&path)
}
