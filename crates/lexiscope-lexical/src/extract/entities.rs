//! Grouping of recognized entities into people, organizations, locations
//! and labelled others.

use lexiscope_core::{EntityGroups, Result};

use crate::pipeline::{AnnotatedDoc, EntityLabel};

/// Maximum entries kept per group.
pub const MAX_PER_GROUP: usize = 5;

/// Bucket entities by label; duplicates dropped, first occurrence kept.
pub fn extract(doc: &AnnotatedDoc) -> Result<EntityGroups> {
    let mut groups = EntityGroups::default();
    for entity in &doc.entities {
        let (bucket, value) = match entity.label {
            EntityLabel::Person => (&mut groups.people, entity.text.clone()),
            EntityLabel::Org => (&mut groups.organizations, entity.text.clone()),
            EntityLabel::Gpe | EntityLabel::Loc => (&mut groups.locations, entity.text.clone()),
            other => (&mut groups.other, format!("{} ({})", entity.text, other)),
        };
        if bucket.len() < MAX_PER_GROUP && !bucket.contains(&value) {
            bucket.push(value);
        }
    }
    Ok(groups)
}
