use gomoku::{play_match, AiAgent, GameState, Outcome, Player, RandomAgent, SearchConfig};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [depth]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let mut config = SearchConfig::default();
    if let Some(depth) = args.get(2) {
        config.depth = depth.parse()?;
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut random = RandomAgent::new();
    let mut ai = AiAgent::new(config);
    let mut game = GameState::standard()?;

    let outcome = play_match(&mut game, &mut random, &mut ai, &mut rng)?;

    let winner = match outcome {
        Outcome::Won(Player::One) => Some("random"),
        Outcome::Won(Player::Two) => Some("ai"),
        _ => None,
    };

    let result = json!({
        "seed": seed,
        "depth": config.depth,
        "plies": game.ply(),
        "outcome": format!("{:?}", outcome),
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
