//! Introduction section text.

use serde::{Deserialize, Serialize};

use crate::content::Document;
use crate::storage::keys;

/// The editable welcome block at the top of the introduction section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Intro {
    pub welcome: String,
    pub title: String,
    pub content: String,
}

impl Document for Intro {
    const STORAGE_KEY: &'static str = keys::INTRO;

    fn seed() -> Self {
        Self {
            welcome: "Welcome".to_string(),
            title: "예배를 향한 마음".to_string(),
            content: "글로리아 찬양대는 성남신광교회 1부 예배 가운데 찬양으로 예배의 문을 여는 공동체입니다.\n\n\
                      한 사람의 소리가 아닌 함께 드리는 고백으로 성도들의 마음이 하나님께 향하도록 겸손히 섬기고 있습니다."
                .to_string(),
        }
    }
}
