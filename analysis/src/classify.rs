//! Classifies raw log lines into the handful of shapes the parser cares
//! about. Everything else is noise and classifies to `None`.

const SESSION_MARKER: &str = "SessionClient :: Message :: ";
const RESET_MARKER: &str = "RoundManager :: ResetRounds()";
const STATS_MARKER: &str = "Stats :: ";
const TEAM_NAME_MARKER: &str = "RoundGUI :: Start() Team Name Text ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCategory<'l> {
    Kill,
    Damage,
    /// `Team<n>` with the parsed team index. Only 0 and 1 are meaningful,
    /// anything else is dropped by the segmenter.
    Team(u8),
    Unknown(&'l str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'l> {
    /// Session/telemetry control message with its raw JSON payload.
    Session(&'l str),
    /// Explicit marker that the round counters were reset.
    RoundReset,
    /// `Stats :: <category> :: <payload>` with the payload still undecoded.
    Stats {
        category: StatCategory<'l>,
        payload: &'l str,
    },
    /// Round-start banner carrying a team display name.
    TeamName { side: &'l str, name: &'l str },
}

pub fn classify(line: &str) -> Option<LineKind<'_>> {
    let line = line.trim_end();

    if let Some(index) = line.find(SESSION_MARKER) {
        return Some(LineKind::Session(&line[index + SESSION_MARKER.len()..]));
    }

    if line.contains(RESET_MARKER) {
        return Some(LineKind::RoundReset);
    }

    if let Some(index) = line.find(STATS_MARKER) {
        let rest = &line[index + STATS_MARKER.len()..];
        let (category, payload) = rest.split_once(" :: ")?;

        let category = match category {
            "Kill" => StatCategory::Kill,
            "Damage" => StatCategory::Damage,
            other => match other.strip_prefix("Team").and_then(|n| n.parse().ok()) {
                Some(team) => StatCategory::Team(team),
                None => StatCategory::Unknown(other),
            },
        };
        return Some(LineKind::Stats { category, payload });
    }

    if let Some(index) = line.find(TEAM_NAME_MARKER) {
        let rest = &line[index + TEAM_NAME_MARKER.len()..];
        let (side, rest) = rest.split_once(": [")?;
        let name = rest.strip_suffix(']')?;
        return Some(LineKind::TeamName { side, name });
    }

    None
}
