/// ESPN API raw wire types — serde shapes for deserializing ESPN responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

use crate::CollegeField;

// ---------------------------------------------------------------------------
// Team directory  (site v2 API, /teams)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsResponse {
    pub sports: Option<Vec<EspnSport>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnSport {
    pub leagues: Option<Vec<EspnLeague>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnLeague {
    pub teams: Option<Vec<EspnTeamEntry>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTeamEntry {
    pub team: Option<EspnTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
}

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API, /scoreboard)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
    pub date: Option<String>, // ISO 8601
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_IN_PROGRESS", "STATUS_HALFTIME", ...
    pub description: Option<String>, // "Halftime", "End of 3rd Quarter"
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
}

/// A competitor either embeds a team reference or carries the identity
/// fields itself; both shapes appear in the wild.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    pub team: Option<EspnTeam>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
}

// ---------------------------------------------------------------------------
// Rosters  (site v2 API, /teams/{id}/roster and /teams/{id}?enable=roster)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RosterResponse {
    /// Athletes arrive grouped by unit ("offense", "defense", ...).
    pub athletes: Option<Vec<EspnAthleteGroup>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamDetailResponse {
    pub team: Option<EspnTeamDetail>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamDetail {
    pub roster: Option<EspnEmbeddedRoster>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEmbeddedRoster {
    pub athletes: Option<Vec<EspnAthleteGroup>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthleteGroup {
    pub items: Option<Vec<EspnAthlete>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthlete {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub jersey: Option<String>,
    pub position: Option<EspnPosition>,
    pub college: Option<EspnCollege>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnPosition {
    pub abbreviation: Option<String>,
}

// ---------------------------------------------------------------------------
// Athlete biography  (core v2 API, /athletes/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AthleteBioResponse {
    pub college: Option<EspnCollege>,
}

/// The college field ships in three shapes: a bare string, an inline object
/// with a name, or a `$ref` pointer to a separate college resource.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum EspnCollege {
    Name(String),
    Object(EspnCollegeObject),
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCollegeObject {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

impl EspnCollege {
    /// Collapse the wire polymorphism into the tagged domain variant.
    pub fn into_field(self) -> CollegeField {
        match self {
            EspnCollege::Name(name) => CollegeField::Inline(name),
            EspnCollege::Object(obj) => {
                if let Some(name) = obj.name.or(obj.display_name) {
                    CollegeField::Inline(name)
                } else if let Some(reference) = obj.reference {
                    CollegeField::Reference(reference)
                } else {
                    CollegeField::Absent
                }
            }
        }
    }
}

/// Dereference target for a college `$ref`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CollegeResource {
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn college_as_bare_string_is_inline() {
        let raw: EspnCollege = serde_json::from_str(r#""Michigan""#).unwrap();
        assert_eq!(raw.into_field(), CollegeField::Inline("Michigan".into()));
    }

    #[test]
    fn college_as_object_prefers_name_over_display_name() {
        let raw: EspnCollege =
            serde_json::from_str(r#"{"name":"Michigan","displayName":"Michigan Wolverines"}"#)
                .unwrap();
        assert_eq!(raw.into_field(), CollegeField::Inline("Michigan".into()));
    }

    #[test]
    fn college_as_object_falls_back_to_display_name() {
        let raw: EspnCollege =
            serde_json::from_str(r#"{"displayName":"Michigan Wolverines"}"#).unwrap();
        assert_eq!(
            raw.into_field(),
            CollegeField::Inline("Michigan Wolverines".into())
        );
    }

    #[test]
    fn college_as_ref_is_reference() {
        let raw: EspnCollege = serde_json::from_str(
            r#"{"$ref":"https://sports.core.api.espn.com/v2/colleges/130"}"#,
        )
        .unwrap();
        assert_eq!(
            raw.into_field(),
            CollegeField::Reference("https://sports.core.api.espn.com/v2/colleges/130".into())
        );
    }

    #[test]
    fn empty_college_object_is_absent() {
        let raw: EspnCollege = serde_json::from_str("{}").unwrap();
        assert_eq!(raw.into_field(), CollegeField::Absent);
    }

    #[test]
    fn teams_response_parses_nested_directory() {
        let json = r#"{
            "sports": [{"leagues": [{"teams": [
                {"team": {"id": "8", "displayName": "Detroit Lions", "abbreviation": "DET"}},
                {"team": {"id": "9", "displayName": "Green Bay Packers", "abbreviation": "GB"}}
            ]}]}]
        }"#;
        let raw: TeamsResponse = serde_json::from_str(json).unwrap();
        let leagues = &raw.sports.unwrap()[0].leagues;
        let teams = leagues.as_ref().unwrap()[0].teams.as_ref().unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].team.as_ref().unwrap().id.as_deref(), Some("8"));
    }

    #[test]
    fn roster_response_parses_grouped_athletes() {
        let json = r#"{
            "athletes": [
                {"items": [{"id": "1", "displayName": "A", "jersey": "9",
                            "position": {"abbreviation": "QB"}, "college": "Michigan"}]},
                {"items": [{"id": "2", "displayName": "B"}]}
            ]
        }"#;
        let raw: RosterResponse = serde_json::from_str(json).unwrap();
        let groups = raw.athletes.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0].items.as_ref().unwrap()[0].id.as_deref(),
            Some("1")
        );
    }
}
