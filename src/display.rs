//! Plain-text presentation of scan results. Consumes `ScanOutcome` and an
//! optional error string; knows nothing about how the data was fetched.

use chrono::Local;
use nfl_api::pipeline::ScanOutcome;

/// Render one scan outcome as a text block.
pub fn render_outcome(outcome: &ScanOutcome, college: &str) -> String {
    if outcome.live_game_count == 0 {
        return "No NFL games are live right now.\n".to_owned();
    }

    if outcome.matchups.is_empty() {
        return format!(
            "{} live game(s), but no {college} players on the field.\n",
            outcome.live_game_count
        );
    }

    let mut out = String::new();
    for matchup in &outcome.matchups {
        out.push_str(&format!(
            "{} — {}\n",
            matchup.game.name, matchup.game.status_detail
        ));
        for side in &matchup.teams {
            out.push_str(&format!("  {}\n", side.team.name));
            if side.players.is_empty() {
                out.push_str(&format!("    no {college} players\n"));
            }
            for player in &side.players {
                out.push_str(&format!(
                    "    #{} {} {} — {}\n",
                    player.jersey,
                    player.position,
                    player.name,
                    player.college.as_deref().unwrap_or(college),
                ));
            }
        }
        out.push('\n');
    }
    out
}

pub fn print_outcome(outcome: &ScanOutcome, college: &str) {
    println!("── scan {} ──", Local::now().format("%H:%M:%S"));
    print!("{}", render_outcome(outcome, college));
}

pub fn print_error(message: &str) {
    println!("── scan {} ──", Local::now().format("%H:%M:%S"));
    println!("Scan failed: {message}");
}
