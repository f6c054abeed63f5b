use std::net::IpAddr;
use std::path::PathBuf;

use crate::gate::Digest;
use crate::models::lane::DEFAULT_LANES;
use crate::models::LaneSet;

/// Prefixes of build-time substitution tokens that were never replaced.
const PLACEHOLDER_MARKERS: &[&str] = &["__", "${", "%%"];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub sync_endpoint: Option<String>,
    pub admin_digest: Option<Digest>,
    pub files_endpoint: Option<String>,
    pub lanes: LaneSet,
    pub cache_dir: Option<PathBuf>,
    pub session_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("LABBOARD_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| format!("Invalid LABBOARD_HOST: {e}"))?;

        let port: u16 = env_or("LABBOARD_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid LABBOARD_PORT: {e}"))?;

        let log_level = env_or("LABBOARD_LOG_LEVEL", "info");

        let sync_endpoint = env_configured("LABBOARD_SYNC_ENDPOINT");
        let files_endpoint = env_configured("LABBOARD_FILES_ENDPOINT");

        let admin_digest = env_configured("LABBOARD_ADMIN_DIGEST")
            .map(|v| Digest::from_hex(&v).map_err(|e| format!("Invalid LABBOARD_ADMIN_DIGEST: {e}")))
            .transpose()?;

        let lanes = parse_lanes(
            &env_or("LABBOARD_LANES", &DEFAULT_LANES.join(",")),
            env_configured("LABBOARD_INTAKE_LANE"),
        )
        .map_err(|e| format!("Invalid LABBOARD_LANES: {e}"))?;

        let cache_dir = env_configured("LABBOARD_CACHE_DIR").map(PathBuf::from);
        let session_dir = Some(
            env_configured("LABBOARD_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join("labboard-session")),
        );

        Ok(Config {
            host,
            port,
            log_level,
            sync_endpoint,
            admin_digest,
            files_endpoint,
            lanes,
            cache_dir,
            session_dir,
        })
    }
}

/// True when a value is empty or still carries an unreplaced substitution token.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| value.starts_with(m))
}

pub fn parse_lanes(raw: &str, intake: Option<String>) -> Result<LaneSet, String> {
    let lanes = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    LaneSet::new(lanes, intake)
}

fn env_configured(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !is_placeholder(v))
        .map(|v| v.trim().to_string())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
