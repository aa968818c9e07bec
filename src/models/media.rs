//! Carousel slides and gallery photos.
//!
//! Both are edited through one editor whose payload is [`MediaDraft`].

use serde::{Deserialize, Serialize};

use crate::content::ContentItem;
use crate::storage::keys;

/// A banner slide in the hero carousel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: i64,
    pub image_src: String,
    pub title: String,
    pub desc: String,
}

/// A photo in the gallery grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhoto {
    pub id: i64,
    pub image_src: String,
    pub alt: String,
    pub category: String,
    pub title: String,
    /// Free-form display label such as "2023년 4월"
    pub date: String,
}

/// Editor payload, tagged by which collection it belongs to.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MediaDraft {
    #[serde(rename_all = "camelCase")]
    Slide {
        image_src: String,
        title: String,
        #[serde(default)]
        desc: String,
    },
    #[serde(rename_all = "camelCase")]
    Gallery {
        image_src: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        category: String,
        title: String,
        #[serde(default)]
        date: String,
    },
}

impl MediaDraft {
    pub fn image_src(&self) -> &str {
        match self {
            MediaDraft::Slide { image_src, .. } | MediaDraft::Gallery { image_src, .. } => {
                image_src
            }
        }
    }
}

impl ContentItem for Slide {
    const STORAGE_KEY: &'static str = keys::SLIDES;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        let slide = |id, photo: &str, title: &str, desc: &str| Slide {
            id,
            image_src: unsplash(photo, 1200),
            title: title.to_string(),
            desc: desc.to_string(),
        };

        vec![
            slide(1, "photo-1438232992991-995b7058bbb3", "2023 부활절 칸타타", "주님의 부활을 기뻐하며 드린 찬양"),
            slide(2, "photo-1507838153414-b4b713384ebd", "가을 특별 찬양", "온 맘 다해 드리는 예배"),
            slide(3, "photo-1512389142860-9c449e58a543", "성탄 전야제", "아기 예수님의 탄생을 축하하며"),
        ]
    }
}

impl ContentItem for GalleryPhoto {
    const STORAGE_KEY: &'static str = keys::GALLERY;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        let photo = |id, photo: &str, alt: &str, category: &str, title: &str, date: &str| {
            GalleryPhoto {
                id,
                image_src: unsplash(photo, 800),
                alt: alt.to_string(),
                category: category.to_string(),
                title: title.to_string(),
                date: date.to_string(),
            }
        };

        vec![
            photo(1, "photo-1516280440614-6697288d5d38", "Sheet music resting on a stand in warm light", "Easter Service", "부활절 칸타타", "2023년 4월"),
            photo(2, "photo-1459749411177-d4a428c37ae5", "Choir members singing in robes, blurred background", "Regular Sunday", "시편 23편", "2023년 10월"),
            photo(3, "photo-1542621334-a254cf47733d", "Detail of pipe organ in a church", "Christmas Eve", "성탄 전야 미사", "2022년 12월"),
        ]
    }
}

fn unsplash(photo: &str, width: u32) -> String {
    format!(
        "https://images.unsplash.com/{}?auto=format&fit=crop&w={}&q=80",
        photo, width
    )
}
