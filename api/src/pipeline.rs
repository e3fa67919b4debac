//! The scan pipeline: team directory → live games → rosters → college
//! affiliations → per-game matchups.
//!
//! Only the two top-level fetches (directory, scoreboard) can fail the run.
//! Everything downstream degrades to empty/absent: a broken roster or
//! biography lookup costs one team or one player, never the scan.

use crate::client::{ApiResult, NflApi};
use crate::{CollegeMatcher, Game, GameMatchup, Player, Team, TeamInGame};
use futures_util::future::join_all;
use log::{debug, info};
use std::collections::HashMap;

/// Result of one scan. `live_game_count` lets the presentation layer tell
/// "no live games" apart from "live games but no matched players".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub live_game_count: usize,
    pub matchups: Vec<GameMatchup>,
}

/// Run the full pipeline once. Each invocation is independent; nothing is
/// carried over between runs.
pub async fn scan(api: &NflApi, matcher: &CollegeMatcher) -> ApiResult<ScanOutcome> {
    let teams = api.fetch_teams().await?;
    let directory: HashMap<String, Team> =
        teams.into_iter().map(|t| (t.id.clone(), t)).collect();

    let games: Vec<Game> = api
        .fetch_scoreboard()
        .await?
        .into_iter()
        .filter(Game::is_live)
        .collect();
    info!("{} live game(s) on the scoreboard", games.len());

    let matchups = build_matchups(api, matcher, &directory, &games).await;
    Ok(ScanOutcome { live_game_count: games.len(), matchups })
}

/// Build per-game matchups. Output follows scoreboard order; matched players
/// within a team follow roster order. A matchup is emitted only when at
/// least one player matched across both teams.
pub async fn build_matchups(
    api: &NflApi,
    matcher: &CollegeMatcher,
    directory: &HashMap<String, Team>,
    games: &[Game],
) -> Vec<GameMatchup> {
    let mut matchups = Vec::new();

    for game in games {
        let mut teams = Vec::with_capacity(game.competitors.len());
        for competitor in &game.competitors {
            let team = directory.get(&competitor.team_id).cloned().unwrap_or_else(|| {
                // Not in the directory — the competitor's inline identity is
                // good enough to keep the game in the scan.
                debug!("team {} missing from directory, using inline identity", competitor.team_id);
                Team {
                    id: competitor.team_id.clone(),
                    name: competitor.name.clone(),
                    abbrev: competitor.abbrev.clone(),
                }
            });
            let players = matched_players_on_team(api, matcher, &team).await;
            teams.push(TeamInGame { team, players });
        }

        let matchup = GameMatchup { game: game.clone(), teams };
        if matchup.matched_count() > 0 {
            matchups.push(matchup);
        }
    }

    matchups
}

/// Resolve one team's roster and keep the players whose college matches.
/// Affiliation lookups run concurrently; `join_all` restores roster order
/// regardless of completion order, and no lookup's failure touches another.
async fn matched_players_on_team(
    api: &NflApi,
    matcher: &CollegeMatcher,
    team: &Team,
) -> Vec<Player> {
    let roster = api.fetch_roster(&team.id).await;
    if roster.is_empty() {
        debug!("no roster data for {} ({})", team.name, team.id);
        return Vec::new();
    }

    let colleges = join_all(
        roster
            .iter()
            .map(|entry| api.resolve_college(&entry.player.id, &entry.college)),
    )
    .await;

    roster
        .into_iter()
        .zip(colleges)
        .filter_map(|(entry, college)| {
            let college = college?;
            if !matcher.matches(&college) {
                return None;
            }
            let mut player = entry.player;
            player.college = Some(college);
            Some(player)
        })
        .collect()
}
