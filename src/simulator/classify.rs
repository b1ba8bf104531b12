use serde::{Deserialize, Serialize};

/// Arc length of the overall-score ring.
pub const RING_CIRCUMFERENCE: f64 = 691.15;

pub fn ring_offset(current: u32) -> f64 {
    RING_CIRCUMFERENCE - (RING_CIRCUMFERENCE * current as f64 / 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatColor {
    Safe,
    Caution,
    Elevated,
    Severe,
}

impl ThreatColor {
    pub fn for_level(level: u32) -> Self {
        if level < 30 {
            ThreatColor::Safe
        } else if level < 60 {
            ThreatColor::Caution
        } else if level < 80 {
            ThreatColor::Elevated
        } else {
            ThreatColor::Severe
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ThreatColor::Safe => "#00ff88",
            ThreatColor::Caution => "#ffff00",
            ThreatColor::Elevated => "#ff6600",
            ThreatColor::Severe => "#ff0044",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreatStatus {
    Critical,
    HighRisk,
    RelativelySafe,
}

impl ThreatStatus {
    pub fn for_score(score: u32) -> Self {
        if score > 80 {
            ThreatStatus::Critical
        } else if score > 60 {
            ThreatStatus::HighRisk
        } else {
            ThreatStatus::RelativelySafe
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThreatStatus::Critical => "CRITICAL THREAT DETECTED",
            ThreatStatus::HighRisk => "HIGH RISK LEVEL",
            ThreatStatus::RelativelySafe => "RELATIVELY SAFE",
        }
    }
}

/// Final banner shown once the counter reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBanner {
    pub status: ThreatStatus,
    pub color: ThreatColor,
}

impl StatusBanner {
    pub fn for_score(score: u32) -> Self {
        Self {
            status: ThreatStatus::for_score(score),
            color: ThreatColor::for_level(score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskDescription {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskDescription {
    pub fn for_level(level: u32) -> Self {
        if level > 80 {
            RiskDescription::Critical
        } else if level > 60 {
            RiskDescription::High
        } else if level > 40 {
            RiskDescription::Medium
        } else {
            RiskDescription::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskDescription::Low => "Low Risk",
            RiskDescription::Medium => "Medium Risk",
            RiskDescription::High => "High Risk",
            RiskDescription::Critical => "Critical Risk",
        }
    }
}
