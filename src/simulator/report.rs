use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Malware,
    Trojans,
    Permissions,
    Injection,
    Network,
    Encryption,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Malware,
        Category::Trojans,
        Category::Permissions,
        Category::Injection,
        Category::Network,
        Category::Encryption,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Malware => "malware",
            Category::Trojans => "trojans",
            Category::Permissions => "permissions",
            Category::Injection => "injection",
            Category::Network => "network",
            Category::Encryption => "encryption",
        }
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        match self {
            Category::Malware => 70..=99,
            Category::Trojans => 60..=99,
            Category::Permissions => 50..=99,
            Category::Injection => 75..=99,
            Category::Network => 65..=99,
            Category::Encryption => 55..=99,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category severity. Values are random; nothing is read from the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatReport {
    pub malware: u32,
    pub trojans: u32,
    pub permissions: u32,
    pub injection: u32,
    pub network: u32,
    pub encryption: u32,
}

impl ThreatReport {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            malware: rng.gen_range(Category::Malware.range()),
            trojans: rng.gen_range(Category::Trojans.range()),
            permissions: rng.gen_range(Category::Permissions.range()),
            injection: rng.gen_range(Category::Injection.range()),
            network: rng.gen_range(Category::Network.range()),
            encryption: rng.gen_range(Category::Encryption.range()),
        }
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Malware => self.malware,
            Category::Trojans => self.trojans,
            Category::Permissions => self.permissions,
            Category::Injection => self.injection,
            Category::Network => self.network,
            Category::Encryption => self.encryption,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Floor of the mean over all categories.
    pub fn overall_score(&self) -> u32 {
        let total: u32 = self.iter().map(|(_, value)| value).sum();
        total / Category::ALL.len() as u32
    }
}
