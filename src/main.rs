use anyhow::anyhow;
use clap::{Parser, Subcommand};
use naval_battle::{
    init_logging, Catalog, Command, Event, MatchApi, MatchConfig, MatchHandle, MatchStore, Phase,
    Player, RandomPlayer, Side, DEFAULT_BOARD_SIZE,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
struct GameArgs {
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    board_size: usize,
    #[arg(
        long,
        default_value = "submarine:1x3,torpedo:2x2,carrier:3x1",
        help = "Fleet as name:LENxCOUNT entries separated by commas"
    )]
    catalog: Catalog,
}

impl GameArgs {
    fn config(&self) -> anyhow::Result<MatchConfig> {
        Ok(MatchConfig::new(self.board_size, self.catalog.clone())?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play two automated sides against each other and print a JSON summary.
    Sim {
        #[command(flatten)]
        game: GameArgs,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value = "Side 1")]
        side_one: String,
        #[arg(long, default_value = "Side 2")]
        side_two: String,
    },
    /// Print the configured fleet as JSON.
    Catalog {
        #[command(flatten)]
        game: GameArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim {
            game,
            seed,
            side_one,
            side_two,
        } => {
            let config = game.config()?;
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            log::info!("simulating with seed {}", seed);

            let store = MatchStore::new();
            let handle = store.create(side_one, side_two, config.clone()).await;

            let one = tokio::spawn(drive(handle.clone(), Side::One, seed, config.clone()));
            let two = tokio::spawn(drive(handle.clone(), Side::Two, seed, config));
            let (attacks_one, attacks_two) = tokio::try_join!(one, two)?;
            let (attacks_one, attacks_two) = (attacks_one?, attacks_two?);

            let summary = handle
                .inspect(|game| {
                    let winner = game.winner().map(|w| {
                        json!({ "side": w.number(), "name": game.side_name(w) })
                    });
                    json!({
                        "match": game.id().to_string(),
                        "seed": seed,
                        "winner": winner,
                        "turns": game.history().len(),
                        "attacks": { "side1": attacks_one, "side2": attacks_two },
                    })
                })
                .await;
            store.remove(handle.id()).await;
            println!("{}", serde_json::to_string(&summary)?);
        }
        Commands::Catalog { game } => {
            let config = game.config()?;
            let catalog = config.catalog();
            let out = json!({
                "board_size": config.board_size(),
                "ships": catalog.classes(),
                "total_ships": catalog.total_ships(),
                "total_cells": catalog.total_cells(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

/// Play one seat until the match finishes; returns the number of attacks made.
async fn drive(
    handle: MatchHandle,
    side: Side,
    seed: u64,
    config: MatchConfig,
) -> anyhow::Result<usize> {
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(side.number() as u64));
    let mut player = RandomPlayer::new();

    let fleet = player
        .plan_fleet(&mut rng, side, &config)
        .map_err(|e| anyhow!(e))?;
    for command in fleet {
        handle.execute(command).await?;
    }

    let mut attacks = 0;
    loop {
        let snap = handle.snapshot(side).await;
        match snap.phase {
            Phase::Finished => break,
            Phase::Combat if snap.active == Some(side) => {
                let target = player
                    .select_target(&mut rng, &snap.opponent_board)
                    .ok_or_else(|| anyhow!("{} has no cell left to attack", side))?;
                for event in handle.execute(Command::Attack { side, target }).await? {
                    log::debug!("{:?}", event);
                    if let Event::AttackResolved { record, .. } = event {
                        player.handle_attack_result(&record);
                        attacks += 1;
                    }
                }
            }
            _ => tokio::task::yield_now().await,
        }
    }
    Ok(attacks)
}
