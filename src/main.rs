#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use gomoku::{
    coord_to_string, init_logging, play_match, print_game, read_command, AiAgent, CliCommand,
    GameApi, GameMode, GameSession, GameState, Player, RandomAgent, SearchConfig, SessionConfig,
    Snapshot, DEFAULT_BOARD_SIZE, DEFAULT_CACHE_BITS, DEFAULT_CANDIDATE_RADIUS,
    DEFAULT_MAX_CANDIDATES, DEFAULT_SEARCH_DEPTH,
};

#[cfg(feature = "std")]
use anyhow::Context;
#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
#[cfg(feature = "std")]
enum OpponentType {
    Ai,
    Random,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct EngineArgs {
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, help = "Board side length (5..=26)")]
    size: usize,
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH, help = "Search depth in plies")]
    depth: u8,
    #[arg(long, default_value_t = DEFAULT_CANDIDATE_RADIUS, help = "Candidate distance from existing stones")]
    radius: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_CANDIDATES, help = "Candidates kept per node (0 keeps all)")]
    beam: usize,
    #[arg(long, default_value_t = DEFAULT_CACHE_BITS, help = "Transposition table size as a power of two (0 disables)")]
    cache_bits: u8,
}

#[cfg(feature = "std")]
impl EngineArgs {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            depth: self.depth.max(1),
            radius: self.radius,
            max_candidates: (self.beam > 0).then_some(self.beam),
            cache_bits: self.cache_bits,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the engine in the terminal.
    Play {
        #[command(flatten)]
        engine: EngineArgs,
        #[arg(long, help = "Let the engine open the game")]
        ai_first: bool,
        #[arg(long, conflicts_with = "ai_first", help = "Two humans share the terminal; the engine only gives hints")]
        pvp: bool,
        #[arg(long, help = "Resume from a JSON board snapshot")]
        load: Option<PathBuf>,
    },
    /// Watch the engine play a full game.
    Selfplay {
        #[command(flatten)]
        engine: EngineArgs,
        #[arg(long, value_enum, default_value_t = OpponentType::Ai)]
        opponent: OpponentType,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            engine,
            ai_first,
            pvp,
            load,
        } => {
            let config = SessionConfig {
                size: engine.size,
                human: Player::One,
                starting: if ai_first { Player::Two } else { Player::One },
                mode: if pvp {
                    GameMode::TwoPlayer
                } else {
                    GameMode::VsEngine
                },
                search: engine.search_config(),
            };
            let mut session = GameSession::new(config)?;
            if let Some(path) = load {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let snapshot = Snapshot::from_json(&text)?;
                session.load_snapshot(&snapshot)?;
                println!("Loaded board from {}", path.display());
            }
            run_play(&mut session).await?;
        }
        Commands::Selfplay {
            engine,
            opponent,
            seed,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let mut game = GameState::new(engine.size, Player::One)?;
            let mut two = AiAgent::new(engine.search_config());
            let outcome = match opponent {
                OpponentType::Ai => {
                    let mut one = AiAgent::new(engine.search_config());
                    play_match(&mut game, &mut one, &mut two, &mut rng)?
                }
                OpponentType::Random => {
                    let mut one = RandomAgent::new();
                    play_match(&mut game, &mut one, &mut two, &mut rng)?
                }
            };
            print_game(&game);
            println!("Finished after {} plies: {:?}", game.ply(), outcome);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn run_play(session: &mut GameSession) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut show = true;
    loop {
        let over = session.outcome().is_over();
        if show {
            print_game(session.state());
            if over {
                println!("Game over: restart, save <file> or quit");
            }
        }
        show = true;

        if !over && !session.awaits_human() {
            println!("Engine is thinking...");
            let mv = session.play_ai().await?;
            println!("Engine played {}", coord_to_string(mv.x, mv.y));
            continue;
        }

        if !over && session.mode() == GameMode::TwoPlayer {
            println!("{} to move", session.to_move());
        }
        let Some(command) = read_command(&mut input, session.size())? else {
            break;
        };
        match command {
            CliCommand::Place(x, y) => {
                if let Err(e) = session.play_human(x, y) {
                    println!("{}", e);
                    show = false;
                }
            }
            CliCommand::Hint => {
                match session.suggest().await {
                    Ok(mv) => println!("Suggestion: {}", coord_to_string(mv.x, mv.y)),
                    Err(e) => println!("No suggestion: {}", e),
                }
                show = false;
            }
            CliCommand::Save(path) => {
                let json = session.snapshot().to_json_pretty()?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Saved board to {}", path.display());
                show = false;
            }
            CliCommand::Restart => session.reset(),
            CliCommand::Quit => break,
        }
    }
    Ok(())
}
