use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pokemon_arena::{
    BattleEngine, BattleRules, BattleRunner, Behavior, Catalog, ScoringAI, Side, TurnRng,
    TypeChart,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pokemon-arena", about = "Turn-based creature battle engine", version)]
struct Cli {
    /// Directory holding species.ron, moves.ron and type_chart.ron
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Battle rules file (RON)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every species in the catalog
    List,
    /// Run an automated battle and print its log
    Battle {
        #[arg(long, default_value = "charizard")]
        player: String,
        /// Defaults to the species with the best matchup against the player
        #[arg(long)]
        opponent: Option<String>,
        /// Seed for reproducible battles
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 100)]
        max_turns: u32,
        /// Emit the log as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = build_engine(&cli)?;

    match cli.command {
        Command::List => {
            for (key, species) in engine.catalog().species() {
                println!("[{}]\n{}\n", key, species);
            }
            Ok(())
        }
        Command::Battle {
            player,
            opponent,
            seed,
            max_turns,
            json,
        } => run_battle(&engine, &player, opponent, seed, max_turns, json),
    }
}

fn build_engine(cli: &Cli) -> Result<BattleEngine> {
    let rules = match &cli.rules {
        Some(path) => BattleRules::load(path)
            .with_context(|| format!("loading rules from {}", path.display()))?,
        None => BattleRules::default(),
    };

    let engine = match &cli.data {
        Some(dir) => {
            let catalog = Catalog::load(dir)
                .with_context(|| format!("loading catalog from {}", dir.display()))?;
            let chart = TypeChart::load(&dir.join("type_chart.ron"))
                .with_context(|| format!("loading type chart from {}", dir.display()))?;
            BattleEngine::new(catalog, chart, rules)?
        }
        None => BattleEngine::builtin()?.with_rules(rules)?,
    };
    Ok(engine)
}

fn run_battle(
    engine: &BattleEngine,
    player: &str,
    opponent: Option<String>,
    seed: Option<u64>,
    max_turns: u32,
    json: bool,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => TurnRng::seeded(seed),
        None => TurnRng::new_random(),
    };
    let opponent = match opponent {
        Some(key) => key,
        None => engine.choose_best_opponent(player)?,
    };

    let session = engine.start_battle(player, &opponent, &mut rng)?;
    info!(
        battle_id = %session.battle_id,
        player = %session.player.name,
        opponent = %session.opponent.name,
        "starting battle"
    );
    if !json {
        println!(
            "{} {} vs {} {}",
            session.player.sprite, session.player.name, session.opponent.sprite, session.opponent.name
        );
    }

    let player_ai = ScoringAI::new();
    let mut runner = BattleRunner::new(engine, session, Box::new(ScoringAI::new()));

    while !runner.is_over() {
        if runner.session().turn_number >= max_turns {
            bail!("battle did not finish within {} turns", max_turns);
        }
        let choice = player_ai.choose_move(Side::Player, runner.session(), engine, &mut rng)?;
        let report = runner.submit_action(&choice, &mut rng)?;
        for event in &report.events {
            if json {
                println!("{}", serde_json::to_string(event)?);
            } else {
                println!("{}", event.text);
            }
        }
    }

    let session = runner.into_session();
    let summary = match session.winner() {
        Some(side) => format!("{} wins after {} turns", session.combatant(side).name, session.turn_number + 1),
        None => format!("no winner ({:?})", session.game_state),
    };
    info!(battle_id = %session.battle_id, "{}", summary);
    if !json {
        println!("{}", summary);
    }
    Ok(())
}
