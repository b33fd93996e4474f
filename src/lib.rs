//! issue-import: translate project-management exports into tracker-ready JSON
//!
//! Each import source reads an export file from another tool and maps its
//! rows onto one normalized result: issues plus name-keyed maps of users,
//! labels, and workflow statuses.

pub mod cli;
pub mod importers;
pub mod model;
pub mod parse;
