use crate::cli::{Cli, Commands};
use crate::config::VdkConfig;
use crate::console::run_console;
use crate::replay::replay;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::sync::Arc;
use vdk_agents::{PersonaFactory, PersonaKind};
use vdk_core::{Persona, TransitionPolicy};
use vdk_session::{Session, SessionConfig};

/// Runs a parsed command line against an already loaded configuration.
pub async fn run(cli: Cli, config: VdkConfig) -> Result<()> {
    let mut session_config = config.session_config();
    if cli.enforce {
        session_config.policy = TransitionPolicy::Enforced;
    }

    match cli.command {
        Commands::Personas => {
            let factory = PersonaFactory::new(config.persona_settings());
            for kind in PersonaKind::ALL {
                let persona = factory.create(kind).await?;
                println!("{:<12} {}", kind, persona.description());
            }
            Ok(())
        }
        Commands::Tools { persona } => {
            let persona = create(&config, &persona).await?;
            let session = Session::start(persona, session_config).await?;
            println!("{}", serde_json::to_string_pretty(&session.declarations())?);
            Ok(())
        }
        Commands::Instructions { persona } => {
            let persona = create(&config, &persona).await?;
            println!("{}", persona.instructions());
            Ok(())
        }
        Commands::Console { persona } => {
            let session = start(&config, &persona, session_config).await?;
            run_console(&session).await
        }
        Commands::Replay { persona, file } => {
            let session = start(&config, &persona, session_config).await?;
            let reader = BufReader::new(
                File::open(&file).with_context(|| format!("failed to open {}", file.display()))?,
            );
            replay(&session, reader, io::stdout().lock()).await?;
            Ok(())
        }
    }
}

async fn create(config: &VdkConfig, name: &str) -> Result<Arc<dyn Persona>> {
    let kind: PersonaKind = name.parse()?;
    let factory = PersonaFactory::new(config.persona_settings());
    Ok(factory.create(kind).await?)
}

async fn start(config: &VdkConfig, name: &str, session_config: SessionConfig) -> Result<Session> {
    let persona = create(config, name).await?;
    Ok(Session::start(persona, session_config).await?)
}
