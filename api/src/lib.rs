pub mod client;
pub mod espn;
pub mod pipeline;

use chrono::{DateTime, Utc};

const HEADSHOT_CDN: &str = "https://a.espncdn.com/i/headshots/nfl/players/full";

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,   // "Detroit Lions"
    pub abbrev: String, // "DET"
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub name: String,       // "Detroit Lions at Green Bay Packers"
    pub short_name: String, // "DET @ GB"
    pub status: GameStatus,
    /// Free-text status from the API, e.g. "Halftime" or "End of 3rd Quarter".
    pub status_detail: String,
    pub competitors: Vec<Competitor>,
    pub start_time: Option<DateTime<Utc>>,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }
}

/// A team's side of a game as the scoreboard reports it. Carries its own
/// name/abbreviation so a team missing from the directory still renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Competitor {
    pub team_id: String,
    pub name: String,
    pub abbrev: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Pregame,
    InProgress,
    Halftime,
    EndOfPeriod,
    Delayed,
    Final,
    Postponed,
    Other,
}

impl GameStatus {
    /// The four states in which players are considered to be on the field.
    pub fn is_live(self) -> bool {
        matches!(
            self,
            GameStatus::InProgress
                | GameStatus::Halftime
                | GameStatus::EndOfPeriod
                | GameStatus::Delayed
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub jersey: String,   // "unknown" when the roster omits it
    pub position: String, // abbreviation, "unknown" when omitted
    /// Resolved college name; None until the affiliation resolver has run.
    pub college: Option<String>,
    pub team_id: String,
}

impl Player {
    /// ESPN headshot CDN URL, derived from the athlete id. Never fetched here.
    pub fn headshot_url(&self) -> String {
        format!("{HEADSHOT_CDN}/{}.png", self.id)
    }
}

/// A roster entry before affiliation resolution: the player plus whatever
/// college information the roster payload itself carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterPlayer {
    pub player: Player,
    pub college: CollegeField,
}

/// The roster/biography "college" field as the API actually ships it:
/// missing, an inline name, or a `$ref` URL to a separate college resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CollegeField {
    #[default]
    Absent,
    Inline(String),
    Reference(String),
}

/// One team's participation in one game: the team plus the matched players
/// found on its roster, in roster order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamInGame {
    pub team: Team,
    pub players: Vec<Player>,
}

/// A live game paired with the matched players on each side. Only built
/// when at least one player matched across both teams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameMatchup {
    pub game: Game,
    pub teams: Vec<TeamInGame>,
}

impl GameMatchup {
    pub fn matched_count(&self) -> usize {
        self.teams.iter().map(|t| t.players.len()).sum()
    }

    /// All matched players in this game, flattened across both teams.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.teams.iter().flat_map(|t| t.players.iter())
    }
}

// ---------------------------------------------------------------------------
// Matching policy
// ---------------------------------------------------------------------------

/// Case-insensitive containment match on a college name, with an exclusion
/// list for other institutions that embed the same core token ("Michigan
/// State" must not count as "Michigan").
#[derive(Debug, Clone, PartialEq)]
pub struct CollegeMatcher {
    target: String,
    exclusions: Vec<String>,
}

impl Default for CollegeMatcher {
    fn default() -> Self {
        Self::new(
            "Michigan",
            &[
                "Michigan State",
                "Michigan Tech",
                "Western Michigan",
                "Eastern Michigan",
                "Central Michigan",
            ],
        )
    }
}

impl CollegeMatcher {
    pub fn new(target: &str, exclusions: &[&str]) -> Self {
        Self {
            target: target.to_lowercase(),
            exclusions: exclusions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn matches(&self, college: &str) -> bool {
        let college = college.to_lowercase();
        college.contains(&self.target) && !self.exclusions.iter().any(|e| college.contains(e))
    }
}
