//! Calendar event model.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::shift_month;
use crate::content::ContentItem;
use crate::storage::keys;

/// A dated news item shown in the calendar and the news list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChoirEvent {
    pub id: i64,
    /// Display date, always `YYYY. MM. DD`
    pub date_str: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub title: String,
    pub desc: String,
}

impl ChoirEvent {
    /// Sort key; events are kept ascending by this.
    pub fn date_key(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }

    /// Whether this event falls on exactly the given day.
    pub fn is_on(&self, year: i32, month: u32, day: u32) -> bool {
        self.date_key() == (year, month, day)
    }
}

/// Editor payload for an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// `0` marks a draft that has no identity yet
    #[serde(default)]
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

impl EventDraft {
    /// Blank draft for a new event on the given day.
    pub fn new_on(year: i32, month: u32, day: u32) -> Self {
        Self {
            id: 0,
            year,
            month,
            day,
            title: String::new(),
            desc: String::new(),
        }
    }

    /// The draft's date, if it names a real calendar day.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn into_event(self, id: i64) -> ChoirEvent {
        ChoirEvent {
            id,
            date_str: format_date(self.year, self.month, self.day),
            year: self.year,
            month: self.month,
            day: self.day,
            title: self.title.trim().to_string(),
            desc: self.desc,
        }
    }
}

/// Render a date the way the news list shows it.
pub fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{}. {:02}. {:02}", year, month, day)
}

impl ContentItem for ChoirEvent {
    const STORAGE_KEY: &'static str = keys::EVENTS;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        seed_events(Local::now().date_naive())
    }

    fn prepare(&mut self) {
        self.date_str = format_date(self.year, self.month, self.day);
    }

    fn arrange(items: &mut Vec<Self>) {
        items.sort_by_key(ChoirEvent::date_key);
    }
}

/// Day `day` of the month `month_offset` months away from `today`'s month.
///
/// Days past the end of the month roll into the following month.
fn relative_date(today: NaiveDate, month_offset: i32, day: u32) -> NaiveDate {
    let (year, month) = shift_month(today.year(), today.month(), month_offset);
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today);
    first + chrono::Days::new(u64::from(day.saturating_sub(1)))
}

/// Built-in events placed around the current month.
pub fn seed_events(today: NaiveDate) -> Vec<ChoirEvent> {
    let event = |id, month_offset, day, title: &str, desc: &str| {
        let date = relative_date(today, month_offset, day);
        EventDraft {
            id,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            title: title.to_string(),
            desc: desc.to_string(),
        }
        .into_event(id)
    };

    let mut events = vec![
        event(1, 0, 12, "정기 찬양 수련회", "이번 주 토요일 기도원에서 기도와 연습을 위한 모임을 갖습니다."),
        event(2, 0, 5, "특별 찬양 준비 리허설", "다가오는 절기 발표를 위한 특별 리허설이 화요일 저녁 7시에 시작됩니다."),
        event(3, -1, 28, "새 가운 봉헌", "새로 기증받은 찬양대 가운 봉헌식이 오전 예배 중에 있었습니다."),
        event(4, 1, 24, "연합 예배 특별 찬양", "전교인이 함께하는 연합 예배에서 특별 찬양으로 영광 돌립니다."),
        event(5, 1, 31, "월례 기도회", "한 달을 마무리하고 새로운 달을 준비하는 은혜의 시간입니다."),
    ];
    ChoirEvent::arrange(&mut events);
    events
}
