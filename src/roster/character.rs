use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meta tier, best first. Derived ordering follows declaration order,
/// so `Tier::SPlus < Tier::C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "S+")]
    SPlus,
    S,
    A,
    B,
    C,
}

impl Tier {
    pub const BASELINE: Tier = Tier::B;

    pub fn label(&self) -> &'static str {
        match self {
            Tier::SPlus => "S+",
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S+" => Ok(Tier::SPlus),
            "S" => Ok(Tier::S),
            "A" => Ok(Tier::A),
            "B" => Ok(Tier::B),
            "C" => Ok(Tier::C),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

/// The six role classes the matchup heuristic knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Assassin,
    Fighter,
    Tank,
    Mage,
    Marksman,
    Support,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Tank,
        Role::Fighter,
        Role::Assassin,
        Role::Mage,
        Role::Marksman,
        Role::Support,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Assassin => "Assassin",
            Role::Fighter => "Fighter",
            Role::Tank => "Tank",
            Role::Mage => "Mage",
            Role::Marksman => "Marksman",
            Role::Support => "Support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

/// Splits a composite "A/B" classification into trimmed segments.
pub fn segments(composite: &str) -> Vec<String> {
    composite.split('/').map(|s| s.trim().to_string()).collect()
}

/// First segment of a composite classification.
pub fn primary_segment(composite: &str) -> &str {
    composite.split('/').next().unwrap_or("").trim()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub title: String,
    pub icon: String,
    /// Composite role string as the catalog ships it, e.g. "Fighter/Assassin".
    pub role: String,
    pub specialty: String,
    /// Composite lane string, e.g. "EXP Lane/Jungling".
    pub lane: String,
    pub tier: Tier,
    pub difficulty: u8,
    pub utility: Vec<String>,
    pub core_items: Vec<String>,
    pub counters: Vec<String>,
    pub synergies: Vec<String>,
}

impl Character {
    pub fn roles(&self) -> Vec<String> {
        segments(&self.role)
    }

    pub fn primary_role(&self) -> &str {
        primary_segment(&self.role)
    }

    /// Primary role as one of the known classes, `None` for anything exotic.
    pub fn primary_role_class(&self) -> Option<Role> {
        self.primary_role().parse().ok()
    }

    pub fn lanes(&self) -> Vec<String> {
        segments(&self.lane)
    }

    pub fn primary_lane(&self) -> &str {
        primary_segment(&self.lane)
    }
}
