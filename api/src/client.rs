use crate::espn::{
    AthleteBioResponse, CollegeResource, EspnAthlete, EspnAthleteGroup, EspnCompetitor, EspnEvent,
    RosterResponse, ScoreboardResponse, TeamDetailResponse, TeamsResponse,
};
use crate::{CollegeField, Competitor, Game, GameStatus, Player, RosterPlayer, Team};
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl";
const ESPN_CORE_V2: &str = "https://sports.core.api.espn.com/v2/sports/football/leagues/nfl";

/// Placeholder for jersey/position when the roster omits them.
const UNKNOWN: &str = "unknown";

/// NFL API client backed by ESPN's public endpoints.
#[derive(Debug, Clone)]
pub struct NflApi {
    client: Client,
    timeout: Duration,
    site_base: String,
    core_base: String,
}

impl Default for NflApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("wolvewatch/0.1 (live alumni tracker)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            site_base: ESPN_SITE_V2.to_owned(),
            core_base: ESPN_CORE_V2.to_owned(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl NflApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at alternate hosts. Used by tests to target a mock
    /// server instead of ESPN.
    pub fn with_base_urls(site_base: &str, core_base: &str) -> Self {
        Self {
            site_base: site_base.trim_end_matches('/').to_owned(),
            core_base: core_base.trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Fetch the full league team directory. A failure here is fatal to the
    /// run; later stages need the directory to resolve competitor ids.
    pub async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let url = format!("{}/teams", self.site_base);
        let raw: TeamsResponse = self.get(&url).await?;
        let teams = raw
            .sports
            .unwrap_or_default()
            .into_iter()
            .flat_map(|s| s.leagues.unwrap_or_default())
            .flat_map(|l| l.teams.unwrap_or_default())
            .filter_map(|entry| {
                let t = entry.team?;
                Some(Team {
                    id: t.id?,
                    name: t.display_name.unwrap_or_default(),
                    abbrev: t.abbreviation.unwrap_or_default(),
                })
            })
            .collect();
        Ok(teams)
    }

    /// Fetch the current scoreboard. Maps every event; filtering to live
    /// games is a pure step on top (`Game::is_live`).
    pub async fn fetch_scoreboard(&self) -> ApiResult<Vec<Game>> {
        let url = format!("{}/scoreboard", self.site_base);
        let raw: ScoreboardResponse = self.get(&url).await?;
        let games = raw
            .events
            .unwrap_or_default()
            .iter()
            .map(map_event_to_game)
            .collect();
        Ok(games)
    }

    /// Fetch a team's roster, minimally populated.
    ///
    /// Fallback chain:
    /// 1) standard roster endpoint
    /// 2) team-detail endpoint with `?enable=roster`
    ///
    /// Every failure is absorbed: a team we can't get a roster for is a
    /// normal empty outcome, never an error that aborts the scan.
    pub async fn fetch_roster(&self, team_id: &str) -> Vec<RosterPlayer> {
        let url = format!("{}/teams/{team_id}/roster", self.site_base);
        match self.get_lenient::<RosterResponse>(&url).await {
            Ok(raw) => {
                let players = flatten_groups(raw.athletes.unwrap_or_default(), team_id);
                if !players.is_empty() {
                    return players;
                }
                debug!("roster endpoint empty for team {team_id}, trying team detail");
            }
            Err(e) => debug!("roster endpoint failed for team {team_id}: {e}"),
        }

        let url = format!("{}/teams/{team_id}?enable=roster", self.site_base);
        match self.get_lenient::<TeamDetailResponse>(&url).await {
            Ok(raw) => {
                let groups = raw
                    .team
                    .and_then(|t| t.roster)
                    .and_then(|r| r.athletes)
                    .unwrap_or_default();
                flatten_groups(groups, team_id)
            }
            Err(e) => {
                debug!("team detail endpoint failed for team {team_id}: {e}");
                Vec::new()
            }
        }
    }

    /// Resolve a player's college affiliation, short-circuiting on the first
    /// source that yields a name:
    /// 1) the roster payload's own college field
    /// 2) the athlete biography
    /// 3) the college resource a biography `$ref` points at
    ///
    /// Network failures are absorbed into `None` — one player's bad lookup
    /// must never abort the scan.
    pub async fn resolve_college(
        &self,
        athlete_id: &str,
        roster_field: &CollegeField,
    ) -> Option<String> {
        match roster_field {
            CollegeField::Inline(name) => return Some(name.clone()),
            CollegeField::Reference(url) => return self.fetch_college_name(url).await,
            CollegeField::Absent => {}
        }

        let url = format!("{}/athletes/{athlete_id}", self.core_base);
        let bio: AthleteBioResponse = match self.get_lenient(&url).await {
            Ok(bio) => bio,
            Err(e) => {
                debug!("biography lookup failed for athlete {athlete_id}: {e}");
                return None;
            }
        };

        match bio.college.map(|c| c.into_field()).unwrap_or_default() {
            CollegeField::Inline(name) => Some(name),
            CollegeField::Reference(url) => self.fetch_college_name(&url).await,
            CollegeField::Absent => None,
        }
    }

    async fn fetch_college_name(&self, url: &str) -> Option<String> {
        match self.get_lenient::<CollegeResource>(url).await {
            Ok(college) => college.name.or(college.display_name),
            Err(e) => {
                debug!("college dereference failed for {url}: {e}");
                None
            }
        }
    }

    /// Strict fetch: any non-success status is an error. Used by the two
    /// top-level sources, where a 404 must surface as a failed run rather
    /// than an empty one.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }

    /// Lenient fetch: a client error collapses to the default (empty)
    /// response. Used by the roster/biography lookups, where a 404 is a
    /// normal "no data" outcome that feeds the fallback chain.
    async fn get_lenient<T: Default + serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> ApiResult<T> {
        match self.get::<T>(url).await {
            Err(ApiError::Api(e, url))
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) =>
            {
                debug!("client error for {url}, treating as empty");
                Ok(T::default())
            }
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

fn parse_status(s: &str) -> GameStatus {
    match s {
        "STATUS_SCHEDULED" => GameStatus::Pregame,
        "STATUS_IN_PROGRESS" => GameStatus::InProgress,
        "STATUS_HALFTIME" => GameStatus::Halftime,
        "STATUS_END_PERIOD" => GameStatus::EndOfPeriod,
        "STATUS_DELAYED" => GameStatus::Delayed,
        "STATUS_FINAL" | "STATUS_FINAL_OT" => GameStatus::Final,
        "STATUS_POSTPONED" | "STATUS_CANCELED" | "STATUS_SUSPENDED" => GameStatus::Postponed,
        _ => GameStatus::Other,
    }
}

fn map_event_to_game(event: &EspnEvent) -> Game {
    let status_type = event.status.as_ref().and_then(|s| s.status_type.as_ref());
    let status = status_type
        .and_then(|t| t.name.as_deref())
        .map(parse_status)
        .unwrap_or_default();
    let status_detail = status_type
        .and_then(|t| t.description.clone())
        .unwrap_or_default();

    let start_time: Option<DateTime<Utc>> = event
        .date
        .as_deref()
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc));

    // Flatten competitions → competitors; the scoreboard carries exactly one
    // competition per event.
    let competitors = event
        .competitions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .flat_map(|c| c.competitors.iter().flatten())
        .map(map_competitor)
        .collect();

    Game {
        id: event.id.clone().unwrap_or_default(),
        name: event.name.clone().unwrap_or_default(),
        short_name: event.short_name.clone().unwrap_or_default(),
        status,
        status_detail,
        competitors,
        start_time,
    }
}

/// A competitor either embeds a team record or acts as one itself.
fn map_competitor(c: &EspnCompetitor) -> Competitor {
    let team = c.team.as_ref();
    Competitor {
        team_id: team
            .and_then(|t| t.id.clone())
            .or_else(|| c.id.clone())
            .unwrap_or_default(),
        name: team
            .and_then(|t| t.display_name.clone())
            .or_else(|| c.display_name.clone())
            .unwrap_or_default(),
        abbrev: team
            .and_then(|t| t.abbreviation.clone())
            .or_else(|| c.abbreviation.clone())
            .unwrap_or_default(),
    }
}

/// Roster endpoints group athletes into unit sub-lists; flatten them into a
/// single sequence, preserving group and in-group order.
fn flatten_groups(groups: Vec<EspnAthleteGroup>, team_id: &str) -> Vec<RosterPlayer> {
    groups
        .into_iter()
        .flat_map(|g| g.items.unwrap_or_default())
        .filter_map(|a| map_athlete(a, team_id))
        .collect()
}

fn map_athlete(a: EspnAthlete, team_id: &str) -> Option<RosterPlayer> {
    let id = a.id?;
    let player = Player {
        id,
        name: a.display_name.unwrap_or_default(),
        jersey: a.jersey.unwrap_or_else(|| UNKNOWN.to_owned()),
        position: a
            .position
            .and_then(|p| p.abbreviation)
            .unwrap_or_else(|| UNKNOWN.to_owned()),
        college: None,
        team_id: team_id.to_owned(),
    };
    let college = a.college.map(|c| c.into_field()).unwrap_or_default();
    Some(RosterPlayer { player, college })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("STATUS_IN_PROGRESS"), GameStatus::InProgress);
        assert_eq!(parse_status("STATUS_HALFTIME"), GameStatus::Halftime);
        assert_eq!(parse_status("STATUS_END_PERIOD"), GameStatus::EndOfPeriod);
        assert_eq!(parse_status("STATUS_DELAYED"), GameStatus::Delayed);
        assert_eq!(parse_status("STATUS_SCHEDULED"), GameStatus::Pregame);
        assert_eq!(parse_status("STATUS_FINAL"), GameStatus::Final);
        assert_eq!(parse_status("STATUS_POSTPONED"), GameStatus::Postponed);
        assert_eq!(parse_status("STATUS_RAIN_DANCE"), GameStatus::Other);
    }

    #[test]
    fn event_maps_status_detail_and_competitors() {
        let json = r#"{
            "id": "401547401",
            "name": "Detroit Lions at Green Bay Packers",
            "shortName": "DET @ GB",
            "date": "2026-09-13T17:00:00Z",
            "status": {"type": {"name": "STATUS_HALFTIME", "description": "Halftime"}},
            "competitions": [{"competitors": [
                {"team": {"id": "8", "displayName": "Detroit Lions", "abbreviation": "DET"}},
                {"team": {"id": "9", "displayName": "Green Bay Packers", "abbreviation": "GB"}}
            ]}]
        }"#;
        let event: EspnEvent = serde_json::from_str(json).unwrap();
        let game = map_event_to_game(&event);
        assert_eq!(game.status, GameStatus::Halftime);
        assert_eq!(game.status_detail, "Halftime");
        assert!(game.is_live());
        assert_eq!(game.competitors.len(), 2);
        assert_eq!(game.competitors[0].team_id, "8");
        assert!(game.start_time.is_some());
    }

    #[test]
    fn competitor_without_embedded_team_uses_its_own_fields() {
        let json = r#"{"id": "22", "displayName": "Arizona Cardinals", "abbreviation": "ARI"}"#;
        let raw: EspnCompetitor = serde_json::from_str(json).unwrap();
        let c = map_competitor(&raw);
        assert_eq!(c.team_id, "22");
        assert_eq!(c.name, "Arizona Cardinals");
        assert_eq!(c.abbrev, "ARI");
    }

    #[test]
    fn athlete_without_jersey_or_position_gets_unknown() {
        let json = r#"{"id": "123", "displayName": "Practice Squad Guy"}"#;
        let raw: EspnAthlete = serde_json::from_str(json).unwrap();
        let rp = map_athlete(raw, "8").unwrap();
        assert_eq!(rp.player.jersey, "unknown");
        assert_eq!(rp.player.position, "unknown");
        assert_eq!(rp.player.team_id, "8");
        assert_eq!(rp.college, CollegeField::Absent);
    }

    #[test]
    fn athlete_without_id_is_dropped() {
        let raw: EspnAthlete = serde_json::from_str(r#"{"displayName": "Ghost"}"#).unwrap();
        assert!(map_athlete(raw, "8").is_none());
    }

    #[test]
    fn groups_flatten_in_order() {
        let json = r#"[
            {"items": [{"id": "1", "displayName": "A"}, {"id": "2", "displayName": "B"}]},
            {"items": [{"id": "3", "displayName": "C"}]}
        ]"#;
        let groups: Vec<EspnAthleteGroup> = serde_json::from_str(json).unwrap();
        let players = flatten_groups(groups, "8");
        let ids: Vec<&str> = players.iter().map(|p| p.player.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    // -----------------------------------------------------------------------
    // Endpoint tests against a mock server
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn fetch_teams_parses_directory() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/teams")
            .with_body(
                r#"{"sports": [{"leagues": [{"teams": [
                    {"team": {"id": "8", "displayName": "Detroit Lions", "abbreviation": "DET"}}
                ]}]}]}"#,
            )
            .create_async()
            .await;

        let api = NflApi::with_base_urls(&server.url(), &server.url());
        let teams = api.fetch_teams().await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name, "Detroit Lions");
    }

    #[tokio::test]
    async fn scoreboard_not_found_is_an_error_not_an_empty_day() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/scoreboard")
            .with_status(404)
            .create_async()
            .await;

        let api = NflApi::with_base_urls(&server.url(), &server.url());
        assert!(api.fetch_scoreboard().await.is_err());
    }

    #[tokio::test]
    async fn team_directory_not_found_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/teams")
            .with_status(404)
            .create_async()
            .await;

        let api = NflApi::with_base_urls(&server.url(), &server.url());
        assert!(api.fetch_teams().await.is_err());
    }

    #[tokio::test]
    async fn roster_falls_back_to_team_detail_when_primary_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _primary = server
            .mock("GET", "/teams/8/roster")
            .with_status(404)
            .create_async()
            .await;
        let _fallback = server
            .mock("GET", "/teams/8?enable=roster")
            .with_body(
                r#"{"team": {"roster": {"athletes": [
                    {"items": [{"id": "77", "displayName": "Fallback Guy", "jersey": "77"}]}
                ]}}}"#,
            )
            .create_async()
            .await;

        let api = NflApi::with_base_urls(&server.url(), &server.url());
        let roster = api.fetch_roster("8").await;
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].player.name, "Fallback Guy");
    }

    #[tokio::test]
    async fn roster_is_empty_when_both_endpoints_fail() {
        let mut server = mockito::Server::new_async().await;
        let _primary = server
            .mock("GET", "/teams/8/roster")
            .with_status(404)
            .create_async()
            .await;
        let _fallback = server
            .mock("GET", "/teams/8?enable=roster")
            .with_status(404)
            .create_async()
            .await;

        let api = NflApi::with_base_urls(&server.url(), &server.url());
        assert!(api.fetch_roster("8").await.is_empty());
    }

    #[tokio::test]
    async fn inline_roster_college_short_circuits_without_network() {
        // Point at a dead base URL: an inline field must never hit the wire.
        let api = NflApi::with_base_urls("http://127.0.0.1:1", "http://127.0.0.1:1");
        let college = api
            .resolve_college("1", &CollegeField::Inline("Michigan".into()))
            .await;
        assert_eq!(college.as_deref(), Some("Michigan"));
    }

    #[tokio::test]
    async fn biography_college_string_resolves() {
        let mut server = mockito::Server::new_async().await;
        let _bio = server
            .mock("GET", "/athletes/42")
            .with_body(r#"{"college": "Michigan"}"#)
            .create_async()
            .await;

        let api = NflApi::with_base_urls(&server.url(), &server.url());
        let college = api.resolve_college("42", &CollegeField::Absent).await;
        assert_eq!(college.as_deref(), Some("Michigan"));
    }

    #[tokio::test]
    async fn biography_college_ref_is_dereferenced() {
        let mut server = mockito::Server::new_async().await;
        let college_url = format!("{}/colleges/130", server.url());
        let _bio = server
            .mock("GET", "/athletes/42")
            .with_body(format!(r#"{{"college": {{"$ref": "{college_url}"}}}}"#))
            .create_async()
            .await;
        let _college = server
            .mock("GET", "/colleges/130")
            .with_body(r#"{"name": "Michigan", "displayName": "Michigan Wolverines"}"#)
            .create_async()
            .await;

        let api = NflApi::with_base_urls(&server.url(), &server.url());
        let college = api.resolve_college("42", &CollegeField::Absent).await;
        assert_eq!(college.as_deref(), Some("Michigan"));
    }

    #[tokio::test]
    async fn biography_server_error_is_absorbed() {
        let mut server = mockito::Server::new_async().await;
        let _bio = server
            .mock("GET", "/athletes/42")
            .with_status(500)
            .create_async()
            .await;

        let api = NflApi::with_base_urls(&server.url(), &server.url());
        assert!(api.resolve_college("42", &CollegeField::Absent).await.is_none());
    }
}
