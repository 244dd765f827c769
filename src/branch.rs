use std::fmt;

use serde::Serialize;

use crate::parser::columns::{HeaderRule, Role};

const WIKI_BASE: &str = "https://en.wikipedia.org/wiki/";

/// Military service a list page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, clap::ValueEnum)]
pub enum Branch {
    Army,
    Navy,
    #[serde(rename = "Air Force")]
    AirForce,
}

impl Branch {
    /// Scrape order; output records follow it.
    pub const ALL: [Branch; 3] = [Branch::Army, Branch::Navy, Branch::AirForce];

    /// Requested branches in scrape order; empty means all.
    pub fn select(requested: &[Branch]) -> Vec<Branch> {
        if requested.is_empty() {
            return Branch::ALL.to_vec();
        }
        Branch::ALL
            .into_iter()
            .filter(|b| requested.contains(b))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            Branch::Army => "Army",
            Branch::Navy => "Navy",
            Branch::AirForce => "Air Force",
        }
    }

    /// Wikipedia article title of the list page.
    pub fn page_title(self) -> &'static str {
        match self {
            Branch::Army => "List_of_equipment_of_the_Indian_Army",
            Branch::Navy => "List_of_active_Indian_Navy_ships",
            Branch::AirForce => "List_of_active_Indian_military_aircraft",
        }
    }

    pub fn page_url(self) -> String {
        format!("{}{}", WIKI_BASE, self.page_title())
    }

    pub fn profile(self) -> &'static BranchProfile {
        match self {
            Branch::Army => &ARMY,
            Branch::Navy => &NAVY,
            Branch::AirForce => &AIR_FORCE,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a row's cell count is checked before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowGuard {
    /// Skip rows shorter than the highest resolved index among these roles.
    /// Roles outside the list are still required and fail as a missing cell.
    Strict(&'static [Role]),
    /// No length check; out-of-range cells fall back to defaults.
    Lenient,
}

/// Placeholder values used when a role was not found or a field is never
/// derived from the page.
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    pub name: Option<&'static str>,
    pub origin: &'static str,
    pub kind: &'static str,
    pub quantity: &'static str,
    pub era: &'static str,
    pub production_cost: &'static str,
    pub upkeep_cost: &'static str,
}

/// Everything that differs between the three branch extractors.
#[derive(Debug)]
pub struct BranchProfile {
    pub branch: Branch,
    pub rules: &'static [HeaderRule],
    /// Identifying roles in priority order; a table needs one of them.
    pub identity: &'static [Role],
    pub guard: RowGuard,
    pub defaults: Defaults,
    /// Key of the second `specs` entry.
    pub spec_label: &'static str,
    /// Phrase following the type in the description.
    pub service_phrase: &'static str,
    pub id_prefix: &'static str,
}

static ARMY: BranchProfile = BranchProfile {
    branch: Branch::Army,
    rules: &[
        HeaderRule::new(Role::Name, &["model", "name", "vehicle", "weapon"]),
        HeaderRule::new(Role::Origin, &["origin"]),
        HeaderRule::new(Role::Kind, &["type"]),
        HeaderRule::new(Role::Quantity, &["quantity", "number", "active"]),
    ],
    identity: &[Role::Name],
    guard: RowGuard::Strict(&[Role::Name, Role::Origin, Role::Kind, Role::Quantity]),
    defaults: Defaults {
        name: None,
        origin: "Unknown",
        kind: "Equipment",
        quantity: "Unknown",
        era: "Modern",
        production_cost: "Unknown",
        upkeep_cost: "Unknown",
    },
    spec_label: "Type",
    service_phrase: "used by the Indian Army",
    id_prefix: "army-",
};

static NAVY: BranchProfile = BranchProfile {
    branch: Branch::Navy,
    rules: &[
        HeaderRule::new(Role::Name, &["name"]),
        HeaderRule::new(Role::Origin, &["origin"]),
        HeaderRule::new(Role::Kind, &["type"]),
        HeaderRule::new(Role::Class, &["class"]),
    ],
    identity: &[Role::Name, Role::Class],
    guard: RowGuard::Lenient,
    defaults: Defaults {
        name: Some("Unknown Ship"),
        origin: "Unknown",
        kind: "Ship",
        quantity: "Active",
        era: "Modern",
        production_cost: "Unknown",
        upkeep_cost: "High",
    },
    spec_label: "Class",
    service_phrase: "in the Indian Navy",
    id_prefix: "navy-",
};

static AIR_FORCE: BranchProfile = BranchProfile {
    branch: Branch::AirForce,
    rules: &[
        HeaderRule::new(Role::Name, &["aircraft"]),
        HeaderRule::new(Role::Origin, &["origin"]),
        HeaderRule::new(Role::Kind, &["role", "type"]),
        HeaderRule::new(Role::Quantity, &["service", "quantity"]),
    ],
    identity: &[Role::Name],
    guard: RowGuard::Strict(&[Role::Name, Role::Origin, Role::Kind]),
    defaults: Defaults {
        name: None,
        origin: "Unknown",
        kind: "Aircraft",
        quantity: "Unknown",
        era: "Modern",
        production_cost: "Unknown",
        upkeep_cost: "High",
    },
    spec_label: "Role",
    service_phrase: "used by the Indian Air Force",
    id_prefix: "af-",
};
