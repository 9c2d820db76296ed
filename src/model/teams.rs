// File: ./src/model/teams.rs
use crate::error::HomecalError;
use std::collections::HashMap;

pub const DEFAULT_LOGO_URL: &str = "https://cdn.nba.com/logos/nba/{0}/primary/L/logo.svg";

const NBA_TEAMS: &[(&str, &str)] = &[
    ("Atlanta Hawks", "1610612737"),
    ("Boston Celtics", "1610612738"),
    ("Brooklyn Nets", "1610612751"),
    ("Charlotte Hornets", "1610612766"),
    ("Chicago Bulls", "1610612741"),
    ("Cleveland Cavaliers", "1610612739"),
    ("Dallas Mavericks", "1610612742"),
    ("Denver Nuggets", "1610612743"),
    ("Detroit Pistons", "1610612765"),
    ("Golden State Warriors", "1610612744"),
    ("Houston Rockets", "1610612745"),
    ("Indiana Pacers", "1610612754"),
    ("LA Clippers", "1610612746"),
    ("Los Angeles Clippers", "1610612746"),
    ("LA Lakers", "1610612747"),
    ("Los Angeles Lakers", "1610612747"),
    ("Memphis Grizzlies", "1610612763"),
    ("Miami Heat", "1610612748"),
    ("Milwaukee Bucks", "1610612749"),
    ("Minnesota Timberwolves", "1610612750"),
    ("New Orleans Pelicans", "1610612740"),
    ("New York Knicks", "1610612752"),
    ("Oklahoma City Thunder", "1610612760"),
    ("Orlando Magic", "1610612753"),
    ("Philadelphia 76ers", "1610612755"),
    ("Phoenix Suns", "1610612756"),
    ("Portland Trail Blazers", "1610612757"),
    ("Sacramento Kings", "1610612758"),
    ("San Antonio Spurs", "1610612759"),
    ("Toronto Raptors", "1610612761"),
    ("Utah Jazz", "1610612762"),
    ("Washington Wizards", "1610612764"),
];

/// The built-in name → id table, in a form that can live in a config file.
pub fn default_team_table() -> HashMap<String, String> {
    NBA_TEAMS
        .iter()
        .map(|(name, id)| (name.to_string(), id.to_string()))
        .collect()
}

/// Exact, case-sensitive team name lookup. Aliases are simply extra names
/// pointing at the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDirectory {
    teams: HashMap<String, String>,
}

impl Default for TeamDirectory {
    fn default() -> Self {
        Self::new(default_team_table())
    }
}

impl TeamDirectory {
    pub fn new(teams: HashMap<String, String>) -> Self {
        Self { teams }
    }

    pub fn lookup(&self, team: &str) -> Result<&str, HomecalError> {
        self.teams
            .get(team)
            .map(String::as_str)
            .ok_or_else(|| HomecalError::UnresolvedTeam {
                team: team.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Fills a logo URL template. `{0}` is replaced by the team id.
pub fn logo_url(template: &str, team_id: &str) -> String {
    template.replace("{0}", team_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_share_an_id() {
        let dir = TeamDirectory::default();
        assert_eq!(
            dir.lookup("LA Clippers").unwrap(),
            dir.lookup("Los Angeles Clippers").unwrap()
        );
        assert_eq!(
            dir.lookup("LA Lakers").unwrap(),
            dir.lookup("Los Angeles Lakers").unwrap()
        );
        assert_ne!(
            dir.lookup("LA Lakers").unwrap(),
            dir.lookup("LA Clippers").unwrap()
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dir = TeamDirectory::default();
        assert_eq!(dir.lookup("Miami Heat").unwrap(), "1610612748");
        assert_eq!(
            dir.lookup("miami heat"),
            Err(HomecalError::UnresolvedTeam {
                team: "miami heat".to_string()
            })
        );
    }

    #[test]
    fn test_logo_url() {
        assert_eq!(
            logo_url(DEFAULT_LOGO_URL, "1610612738"),
            "https://cdn.nba.com/logos/nba/1610612738/primary/L/logo.svg"
        );
    }
}
