//! Learning resources hub: link catalog and skill selection.

pub mod catalog;
pub mod selection;

pub use catalog::{resource_links, ResourceItem, ResourceLinks};
pub use selection::{filter_skills, SkillSelection, SKILL_CATALOG};
