use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Calendar season, plus the sentinel items use to declare year-round wear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    #[serde(rename = "All Seasons")]
    AllSeasons,
}

impl Season {
    /// The four calendar seasons in display order.
    pub const CALENDAR: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Northern-hemisphere meteorological season for a 1-based month.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn current(now: DateTime<Utc>) -> Self {
        Self::from_month(now.month())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::AllSeasons => "All Seasons",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            "all seasons" | "all" => Ok(Season::AllSeasons),
            other => Err(DomainError::InvariantViolation(format!("unknown season `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn months_map_to_meteorological_seasons() {
        assert_eq!(Season::from_month(2), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Fall);
        assert_eq!(Season::from_month(12), Season::Winter);
    }

    #[test]
    fn current_season_reads_the_clock_argument() {
        let july = Utc.with_ymd_and_hms(2024, 7, 14, 12, 0, 0).unwrap();
        assert_eq!(Season::current(july), Season::Summer);
    }

    #[test]
    fn parses_autumn_alias_and_sentinel() {
        assert_eq!("Autumn".parse::<Season>().unwrap(), Season::Fall);
        assert_eq!("All Seasons".parse::<Season>().unwrap(), Season::AllSeasons);
        assert!("monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn sentinel_serializes_with_display_name() {
        let json = serde_json::to_string(&vec![Season::Fall, Season::AllSeasons]).unwrap();
        assert_eq!(json, r#"["Fall","All Seasons"]"#);
    }
}
