//! The single persisted planner document.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::task::Task;
use crate::streak::StreakState;

/// Storage key the whole document lives under.
pub const DOCUMENT_KEY: &str = "studyroom.planner";

/// Storage key holding the last stored document that did not load cleanly.
pub const BACKUP_KEY: &str = "studyroom.planner.backup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

/// Study-hours goal for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default)]
    pub total_goal: f64,
    #[serde(default)]
    pub hours_logged: f64,
}

impl Goal {
    /// Percentage of the goal logged, capped at 100.
    pub fn progress_pct(&self) -> f64 {
        if self.total_goal <= 0.0 {
            return 0.0;
        }
        (self.hours_logged / self.total_goal * 100.0).min(100.0)
    }

    pub fn is_met(&self) -> bool {
        self.total_goal > 0.0 && self.hours_logged >= self.total_goal
    }

    pub fn remaining_hours(&self) -> f64 {
        (self.total_goal - self.hours_logged).max(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicProfile {
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub level: String,
}

/// Everything the planner persists. Missing fields load as empty/zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDocument {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub goals: BTreeMap<String, Goal>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub profile: AcademicProfile,
    #[serde(default)]
    pub streak: StreakState,
}

impl PlannerDocument {
    /// Parse a stored document, discarding only the parts that do not fit.
    ///
    /// Each top-level field, each task and each goal is read on its own, so
    /// one bad entry does not take the rest of the document with it. Returns
    /// the document and the number of parts that were dropped. Fails only
    /// when `raw` is not a JSON object at all.
    pub fn parse_lenient(raw: &str) -> Result<(Self, usize), serde_json::Error> {
        let Value::Object(mut fields) = serde_json::from_str::<Value>(raw)? else {
            return Err(serde_json::Error::custom("planner document is not a JSON object"));
        };
        let mut dropped = 0;
        let doc = Self {
            tasks: entries(fields.remove("tasks"), "tasks", &mut dropped),
            notes: field(&mut fields, "notes", &mut dropped),
            theme: field(&mut fields, "theme", &mut dropped),
            goals: goals(fields.remove("goals"), &mut dropped),
            user_name: field(&mut fields, "userName", &mut dropped),
            profile: field(&mut fields, "profile", &mut dropped),
            streak: field(&mut fields, "streak", &mut dropped),
        };
        Ok((doc, dropped))
    }
}

fn field<T: DeserializeOwned + Default>(
    fields: &mut Map<String, Value>,
    name: &str,
    dropped: &mut usize,
) -> T {
    match fields.remove(name) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(field = name, error = %e, "dropping unreadable document field");
            *dropped += 1;
            T::default()
        }),
    }
}

fn entries(value: Option<Value>, name: &str, dropped: &mut usize) -> Vec<Task> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            tracing::warn!(field = name, "expected a list, dropping it");
            *dropped += 1;
            return Vec::new();
        }
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Task>(item) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::warn!(error = %e, "dropping unreadable task");
                *dropped += 1;
                None
            }
        })
        .collect()
}

fn goals(value: Option<Value>, dropped: &mut usize) -> BTreeMap<String, Goal> {
    let map = match value {
        None | Some(Value::Null) => return BTreeMap::new(),
        Some(Value::Object(map)) => map,
        Some(_) => {
            tracing::warn!("goals is not an object, dropping it");
            *dropped += 1;
            return BTreeMap::new();
        }
    };
    map.into_iter()
        .filter_map(|(subject, goal)| match serde_json::from_value::<Goal>(goal) {
            Ok(goal) => Some((subject, goal)),
            Err(e) => {
                tracing::warn!(%subject, error = %e, "dropping unreadable goal");
                *dropped += 1;
                None
            }
        })
        .collect()
}
