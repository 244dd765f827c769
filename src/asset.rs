use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::branch::{Branch, BranchProfile};
use crate::parser::rows::RowFields;
use crate::parser::text::slugify;

/// One scraped record, shaped like the front-end's `MilitaryAsset`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub origin: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub era: String,
    pub branch: Branch,
    pub image_url: String,
    pub description: String,
    pub production_cost: String,
    pub upkeep_cost: String,
    pub number_in_service: String,
    pub specs: Specs,
}

/// The two-entry `specs` object: `Origin` then a branch-specific key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specs {
    pub origin: String,
    pub label: &'static str,
    pub value: String,
}

impl Serialize for Specs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("Origin", &self.origin)?;
        map.serialize_entry(self.label, &self.value)?;
        map.end()
    }
}

impl Asset {
    /// Build a record from row fields. `id` and `description` are derived.
    pub fn assemble(fields: RowFields, profile: &BranchProfile, prefix_ids: bool) -> Self {
        let d = &profile.defaults;
        let slug = slugify(&fields.name);
        let id = if prefix_ids {
            format!("{}{}", profile.id_prefix, slug)
        } else {
            slug
        };
        let description = format!(
            "{} is a {} {}. Origin: {}.",
            fields.name,
            fields.kind.to_lowercase(),
            profile.service_phrase,
            fields.origin
        );

        Asset {
            id,
            description,
            era: d.era.to_string(),
            branch: profile.branch,
            production_cost: d.production_cost.to_string(),
            upkeep_cost: d.upkeep_cost.to_string(),
            specs: Specs {
                origin: fields.origin.clone(),
                label: profile.spec_label,
                value: fields.kind.clone(),
            },
            name: fields.name,
            origin: fields.origin,
            kind: fields.kind,
            image_url: fields.image_url,
            number_in_service: fields.quantity,
        }
    }
}
