use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Route;

/// A route paired with the moment its details were viewed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteHistoryEntry {
    pub route: Route,
    pub date: DateTime<Utc>,
}

impl RouteHistoryEntry {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            date: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryDay {
    pub day: NaiveDate,
    pub entries: Vec<RouteHistoryEntry>,
}

/// Groups entries by the UTC calendar day they were added, keeping the
/// incoming order both across and within groups.
pub fn group_by_day(history: &[RouteHistoryEntry]) -> Vec<HistoryDay> {
    let mut days: Vec<HistoryDay> = Vec::new();

    for entry in history {
        let day = entry.date.date_naive();

        match days.iter_mut().find(|group| group.day == day) {
            Some(group) => group.entries.push(entry.clone()),
            None => days.push(HistoryDay {
                day,
                entries: vec![entry.clone()],
            }),
        }
    }

    days
}

#[test]
fn groups_entries_by_day() {
    use crate::entities::{route::sample_route, TransportMode};
    use chrono::{Duration, TimeZone};

    let today = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
    let yesterday = today - Duration::days(1);

    let entry = |id: &str, date: DateTime<Utc>| RouteHistoryEntry {
        route: sample_route(id, TransportMode::Train, 12.0),
        date,
    };

    let history = vec![
        entry("c", today),
        entry("b", today - Duration::hours(2)),
        entry("a", yesterday),
    ];

    let days = group_by_day(&history);

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].day, today.date_naive());
    assert_eq!(
        days[0]
            .entries
            .iter()
            .map(|entry| entry.route.id.as_str())
            .collect::<Vec<_>>(),
        vec!["c", "b"]
    );
    assert_eq!(days[1].day, yesterday.date_naive());
    assert_eq!(days[1].entries.len(), 1);
}
