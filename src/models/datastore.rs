//! Whole-site snapshot returned to the front end on first load.

use serde::{Deserialize, Serialize};

use super::{ChoirEvent, GalleryPhoto, Intro, Member, Slide};

/// Every content collection in one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSnapshot {
    pub revision_id: i64,
    pub admin: bool,
    pub intro: Intro,
    pub slides: Vec<Slide>,
    pub gallery: Vec<GalleryPhoto>,
    pub members: Vec<Member>,
    pub events: Vec<ChoirEvent>,
}
