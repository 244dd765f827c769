use std::fmt;

/// Semantic field a table column can be inferred to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Name,
    Class,
    Origin,
    Kind,
    Quantity,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Name, Role::Class, Role::Origin, Role::Kind, Role::Quantity];

    fn slot(self) -> usize {
        match self {
            Role::Name => 0,
            Role::Class => 1,
            Role::Origin => 2,
            Role::Kind => 3,
            Role::Quantity => 4,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Name => "name",
            Role::Class => "class",
            Role::Origin => "origin",
            Role::Kind => "type",
            Role::Quantity => "quantity",
        };
        f.write_str(s)
    }
}

/// One entry of an ordered header rule list: a header whose lowercased text
/// contains any of `keywords` is assigned `role`.
#[derive(Debug, Clone, Copy)]
pub struct HeaderRule {
    pub role: Role,
    pub keywords: &'static [&'static str],
}

impl HeaderRule {
    pub const fn new(role: Role, keywords: &'static [&'static str]) -> Self {
        Self { role, keywords }
    }

    fn matches(&self, header_lower: &str) -> bool {
        self.keywords.iter().any(|k| header_lower.contains(k))
    }
}

/// Role → column index for one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    slots: [Option<usize>; 5],
}

impl ColumnMap {
    pub fn get(&self, role: Role) -> Option<usize> {
        self.slots[role.slot()]
    }

    pub fn set(&mut self, role: Role, idx: usize) {
        self.slots[role.slot()] = Some(idx);
    }

    /// First role of `candidates` that resolved, with its column.
    pub fn first_of(&self, candidates: &[Role]) -> Option<(Role, usize)> {
        candidates
            .iter()
            .find_map(|&r| self.get(r).map(|idx| (r, idx)))
    }

    /// Highest column index among `roles`, if any resolved.
    pub fn max_index(&self, roles: &[Role]) -> Option<usize> {
        roles.iter().filter_map(|&r| self.get(r)).max()
    }

    pub fn resolved(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        Role::ALL
            .into_iter()
            .filter_map(|r| self.get(r).map(|idx| (r, idx)))
    }
}

impl fmt::Display for ColumnMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .resolved()
            .map(|(role, idx)| format!("{}={}", role, idx))
            .collect();
        if parts.is_empty() {
            f.write_str("(none)")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

/// Assign roles to header columns.
///
/// Per column the first matching rule wins. Per role the last matching column
/// wins: a later header overwrites an earlier assignment for the same role.
/// Pages like "Model | Variant name" therefore resolve `Name` to the second
/// column. This is kept as observed on the source pages.
pub fn infer_columns<S: AsRef<str>>(headers: &[S], rules: &[HeaderRule]) -> ColumnMap {
    let mut map = ColumnMap::default();
    for (i, header) in headers.iter().enumerate() {
        let lower = header.as_ref().to_lowercase();
        if let Some(rule) = rules.iter().find(|r| r.matches(&lower)) {
            map.set(rule.role, i);
        }
    }
    map
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::Branch;
    use proptest::prelude::*;

    fn army(headers: &[&str]) -> ColumnMap {
        infer_columns(headers, Branch::Army.profile().rules)
    }

    #[test]
    fn army_model_origin_quantity() {
        let m = army(&["Model", "Origin", "Quantity"]);
        assert_eq!(m.get(Role::Name), Some(0));
        assert_eq!(m.get(Role::Origin), Some(1));
        assert_eq!(m.get(Role::Quantity), Some(2));
        assert_eq!(m.get(Role::Kind), None);
    }

    #[test]
    fn case_insensitive_substring() {
        let m = army(&["Weapon System", "Country of ORIGIN", "In active service"]);
        assert_eq!(m.get(Role::Name), Some(0));
        assert_eq!(m.get(Role::Origin), Some(1));
        assert_eq!(m.get(Role::Quantity), Some(2));
    }

    #[test]
    fn last_match_wins_per_role() {
        let m = army(&["Model", "Origin", "Variant name"]);
        assert_eq!(m.get(Role::Name), Some(2));
    }

    #[test]
    fn first_rule_wins_per_column() {
        // "Vehicle type" hits both name and type keywords; name comes first.
        let m = army(&["Vehicle type", "Origin"]);
        assert_eq!(m.get(Role::Name), Some(0));
        assert_eq!(m.get(Role::Kind), None);
    }

    #[test]
    fn no_identifying_header() {
        let m = army(&["Year", "Event"]);
        assert_eq!(m.first_of(&[Role::Name]), None);
    }

    #[test]
    fn navy_class_fallback() {
        let rules = Branch::Navy.profile().rules;
        let m = infer_columns(&["Class", "Type", "Origin"], rules);
        assert_eq!(m.first_of(&[Role::Name, Role::Class]), Some((Role::Class, 0)));

        let m = infer_columns(&["Class", "Name", "Origin"], rules);
        assert_eq!(m.first_of(&[Role::Name, Role::Class]), Some((Role::Name, 1)));
    }

    #[test]
    fn air_force_role_column() {
        let rules = Branch::AirForce.profile().rules;
        let m = infer_columns(&["Aircraft", "Origin", "Role", "In service"], rules);
        assert_eq!(m.get(Role::Name), Some(0));
        assert_eq!(m.get(Role::Kind), Some(2));
        assert_eq!(m.get(Role::Quantity), Some(3));
    }

    #[test]
    fn max_index_ignores_unresolved() {
        let m = army(&["Model", "Origin"]);
        assert_eq!(m.max_index(&[Role::Name, Role::Origin, Role::Kind, Role::Quantity]), Some(1));
        assert_eq!(m.max_index(&[Role::Kind]), None);
    }

    #[test]
    fn display_lists_resolved() {
        let m = army(&["Model", "Origin"]);
        assert_eq!(m.to_string(), "name=0 origin=1");
        assert_eq!(ColumnMap::default().to_string(), "(none)");
    }

    proptest! {
        #[test]
        fn synonym_always_resolves(
            prefix in proptest::collection::vec("[a-z ]{0,8}", 0..4),
            synonym in prop::sample::select(vec!["model", "name", "vehicle", "weapon"]),
            suffix in proptest::collection::vec("[a-z ]{0,8}", 0..4),
        ) {
            let mut headers = prefix.clone();
            headers.push(format!("Main {}", synonym.to_uppercase()));
            headers.extend(suffix);
            let m = infer_columns(&headers, Branch::Army.profile().rules);
            prop_assert!(m.get(Role::Name).is_some());
        }

        #[test]
        fn no_synonym_never_resolves(headers in proptest::collection::vec("[0-9 ]{0,10}", 0..6)) {
            let m = infer_columns(&headers, Branch::Army.profile().rules);
            prop_assert_eq!(m.first_of(&[Role::Name]), None);
        }
    }
}
