use anyhow::Context;
use clap::Parser;
use steam_stats::config::{Cli, Command, PlayersArgs, TopArgs};
use steam_stats::steam::AppId;
use steam_stats::utils::{logger, validation::Validate};
use steam_stats::{ChartsScraper, ExportOptions, ScrapeOutcome, SteamClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init(cli.verbose);

    if let Err(e) = cli.validate() {
        tracing::error!("configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(2);
    }

    let result = match cli.command {
        Command::Players(args) => run_players(args).await,
        Command::Top(args) => run_top(args).await,
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}

async fn run_players(args: PlayersArgs) -> anyhow::Result<()> {
    let client = SteamClient::builder()
        .catalog_url(&args.catalog_url)
        .player_count_url(&args.player_count_url)
        .build()
        .context("failed to build the Steam client")?;

    if args.names.is_empty() {
        for result in client.player_counts_by_id(&args.ids).await {
            match result.count {
                Ok(count) => println!("{}: {}", result.app_id, count),
                Err(e) => println!("{}: error: {}", result.app_id, e),
            }
        }
        return Ok(());
    }

    let resolutions = client.resolve_names(&args.names).await?;

    let mut resolved: Vec<(String, AppId)> = Vec::new();
    for resolution in resolutions {
        match resolution.app_id {
            Some(id) => resolved.push((resolution.requested, id)),
            None => println!("{}: not found", resolution.requested),
        }
    }

    let ids: Vec<AppId> = resolved.iter().map(|(_, id)| *id).collect();
    let counts = client.player_counts_by_id(&ids).await;

    for ((name, id), result) in resolved.iter().zip(&counts) {
        match &result.count {
            Ok(count) => println!("{} ({}): {}", name, id, count),
            Err(e) => println!("{} ({}): error: {}", name, id, e),
        }
    }

    Ok(())
}

async fn run_top(args: TopArgs) -> anyhow::Result<()> {
    let scraper = ChartsScraper::builder()
        .base_url(&args.base_url)
        .build()
        .context("failed to build the leaderboard scraper")?;

    let export = ExportOptions {
        export: args.export,
        path: args.output.clone(),
    };

    match scraper.scrape_top_games(args.pages, &export).await? {
        ScrapeOutcome::Rows(games) => {
            tracing::info!("scraped {} games from {} page(s)", games.len(), args.pages);
            for game in &games {
                println!(
                    "{}\t{}\t{}",
                    game.name, game.current_players, game.peak_players
                );
            }
        }
        ScrapeOutcome::Exported { path, rows } => {
            println!("exported {} games to {}", rows, path.display());
        }
    }

    Ok(())
}
