use serde::Serialize;

use super::Project;

pub const DEFAULT_LANES: &[&str] = &["ongoing", "planned", "onhold", "completed", "scrapped"];

/// The declared lanes of a board plus the lane new projects land in.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneSet {
    lanes: Vec<String>,
    intake: String,
}

impl LaneSet {
    pub fn new(lanes: Vec<String>, intake: Option<String>) -> Result<Self, String> {
        if lanes.is_empty() {
            return Err("Lane set must not be empty".to_string());
        }
        for (i, lane) in lanes.iter().enumerate() {
            if lane.is_empty() {
                return Err("Lane names must not be empty".to_string());
            }
            if lanes[..i].contains(lane) {
                return Err(format!("Duplicate lane '{lane}'"));
            }
        }

        let intake = intake.unwrap_or_else(|| lanes[0].clone());
        if !lanes.contains(&intake) {
            return Err(format!("Intake lane '{intake}' is not a declared lane"));
        }

        Ok(Self { lanes, intake })
    }

    pub fn contains(&self, section: &str) -> bool {
        self.lanes.iter().any(|l| l == section)
    }

    pub fn intake(&self) -> &str {
        &self.intake
    }

    pub fn names(&self) -> &[String] {
        &self.lanes
    }
}

impl Default for LaneSet {
    fn default() -> Self {
        Self {
            lanes: DEFAULT_LANES.iter().map(|s| s.to_string()).collect(),
            intake: DEFAULT_LANES[0].to_string(),
        }
    }
}

/// One rendered column of the board.
#[derive(Debug, Clone, Serialize)]
pub struct Lane {
    pub id: String,
    pub projects: Vec<Project>,
}
