//! Grimoire - command-line spellbook viewer.

use std::sync::Arc;

use anyhow::Context;
use grimoire_domain::{CharacterId, PreparationPolicy};
use grimoire_engine::infrastructure::{
    clock::SystemClock,
    config::{load_dotenv_from_repo_root, EngineConfig},
    ports::{CatalogFilter, ClockPort},
    sqlite::SqliteRepositories,
};
use grimoire_engine::App;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grimoire_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env()?;
    tracing::info!(
        db_path = %config.db_path,
        cantrip_table = %config.cantrip_table,
        "Starting Grimoire"
    );

    let repos = SqliteRepositories::connect(&config.db_path).await?;
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let app = App::new(repos, clock, PreparationPolicy::new(config.cantrip_table));

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("catalog") => {
            let text: Vec<String> = args.collect();
            print_catalog(&app, &text.join(" ")).await
        }
        Some("spellbook") => {
            let raw = args.next().context("usage: grimoire spellbook <character-uuid>")?;
            let character_id: CharacterId = raw
                .parse()
                .with_context(|| format!("invalid character id '{}'", raw))?;
            print_spellbook(&app, character_id).await
        }
        _ => {
            eprintln!("usage: grimoire <catalog [text] | spellbook <character-uuid>>");
            std::process::exit(2);
        }
    }
}

async fn print_catalog(app: &App, text: &str) -> anyhow::Result<()> {
    let spells = app
        .use_cases
        .catalog
        .ops
        .search(CatalogFilter::new().with_text(text))
        .await?;

    for spell in &spells {
        let fields = spell.fields();
        println!(
            "{:<10} {:<30} {:<30} {:<14} {}",
            fields.level.to_string(),
            fields.name,
            fields.name_alt,
            fields.school.label(),
            spell.id()
        );
    }
    println!("{} spell(s)", spells.len());
    Ok(())
}

async fn print_spellbook(app: &App, character_id: CharacterId) -> anyhow::Result<()> {
    let view = &app.use_cases.spellbook.view;
    let groups = view.grouped(character_id).await?;
    let counts = view.prepared_counts(character_id).await?;

    for group in &groups {
        println!("{}", group.level);
        for spell in &group.spells {
            let marker = if spell.is_prepared { "*" } else { " " };
            let origin = if spell.is_personal { " (personal)" } else { "" };
            println!(
                "  {} {} [{}] {}{}",
                marker,
                spell.fields.name,
                spell.fields.components_label(),
                spell.fields.school.label(),
                origin
            );
        }
    }
    println!(
        "Prepared: {} cantrip(s), {} leveled spell(s)",
        counts.cantrips, counts.leveled
    );
    Ok(())
}
