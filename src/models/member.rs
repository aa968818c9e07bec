//! Choir member model.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::ContentItem;
use crate::storage::keys;

/// Vocal category used to group members.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VoicePart {
    Leader,
    Soprano,
    Alto,
    Tenor,
    Bass,
}

impl VoicePart {
    pub const ALL: [VoicePart; 5] = [
        VoicePart::Leader,
        VoicePart::Soprano,
        VoicePart::Alto,
        VoicePart::Tenor,
        VoicePart::Bass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoicePart::Leader => "Leader",
            VoicePart::Soprano => "Soprano",
            VoicePart::Alto => "Alto",
            VoicePart::Tenor => "Tenor",
            VoicePart::Bass => "Bass",
        }
    }
}

impl fmt::Display for VoicePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoicePart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VoicePart::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown voice part: {}", s))
    }
}

/// A choir member shown in the roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub part: VoicePart,
    pub image_src: String,
    pub bio: String,
}

/// Editor payload for a member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_part")]
    pub part: VoicePart,
    #[serde(default)]
    pub image_src: String,
    #[serde(default)]
    pub bio: String,
}

fn default_part() -> VoicePart {
    VoicePart::Soprano
}

impl MemberDraft {
    pub fn into_member(self, id: i64) -> Member {
        Member {
            id,
            name: self.name.trim().to_string(),
            role: self.role.filter(|r| !r.trim().is_empty()),
            part: self.part,
            image_src: self.image_src,
            bio: self.bio,
        }
    }
}

/// Roster order by name: case-insensitive, then by exact name.
///
/// Hangul syllables compare in 가나다 order. This is plain code-point order,
/// not a locale collation, so Latin names sort before Hangul ones.
pub fn compare_names(a: &Member, b: &Member) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

impl ContentItem for Member {
    const STORAGE_KEY: &'static str = keys::MEMBERS;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        seed_members()
    }
}

fn seed_member(id: i64, name: &str, role: Option<&str>, part: VoicePart, photo: &str, width: u32, bio: &str) -> Member {
    Member {
        id,
        name: name.to_string(),
        role: role.map(str::to_string),
        part,
        image_src: format!(
            "https://images.unsplash.com/{}?auto=format&fit=crop&w={}&q=80",
            photo, width
        ),
        bio: bio.to_string(),
    }
}

/// Built-in roster shown until an editor saves their own.
pub fn seed_members() -> Vec<Member> {
    use VoicePart::*;

    vec![
        seed_member(1, "김민수", Some("지휘자"), Leader, "photo-1507003211169-0a1dd7228f2d", 300,
            "지난 20여 년간 지휘봉을 잡으며 깨달은 것은, 최고의 음악은 최고의 영성에서 나온다는 사실입니다."),
        seed_member(2, "이지영", Some("반주자"), Leader, "photo-1438761681033-6461ffad8d80", 300,
            "피아노 건반 하나하나에 기도를 담습니다."),
        seed_member(3, "박준형", Some("부지휘자"), Leader, "photo-1472099645785-5658abf4ff4e", 300,
            "젊은 열정으로 찬양대에 새로운 활력을 불어넣고 있습니다."),
        seed_member(4, "박소희", None, Soprano, "photo-1544005313-94ddf0286df2", 150,
            "소프라노 파트장으로서 가장 높은 음역을 담당하지만, 마음은 가장 겸손한 자세를 잃지 않으려 노력합니다."),
        seed_member(5, "김지은", None, Soprano, "photo-1534528741775-53994a69daeb", 150,
            "찬양의 가사 한 구절 한 구절이 제게는 더욱 절실하게 다가옵니다."),
        seed_member(6, "최하나", None, Soprano, "photo-1531746020798-e6953c6e8e04", 150,
            "어린 시절 주일학교 성가대부터 시작해 지금까지 찬양의 자리를 떠나지 않았습니다."),
        seed_member(7, "이수진", None, Soprano, "photo-1580489944761-15a19d654956", 150,
            "처음 교회에 나왔을 때, 찬양대의 찬양을 듣고 하염없이 눈물을 흘렸던 기억이 납니다."),
        seed_member(8, "정미경", None, Alto, "photo-1554151228-14d9def656ec", 150,
            "알토는 멜로디를 빛나게 해주는 어머니와 같은 파트입니다."),
        seed_member(9, "한예슬", None, Alto, "photo-1598550874175-4d7112ee7f43", 150,
            "음악 전공자로서 자칫 기술적인 부분에만 치우칠 수 있음을 늘 경계합니다."),
        seed_member(10, "강민지", None, Alto, "photo-1506794778202-cad84cf45f1d", 150,
            "치열한 직장 생활 속에서 지치고 상한 마음을 안고 주일 예배에 옵니다."),
        seed_member(11, "윤서연", None, Alto, "photo-1520813792240-56fc4a3765a7", 150,
            "육아로 인해 잠시 내려놓았던 찬양의 자리에 다시 섰을 때의 감격을 잊을 수 없습니다."),
        seed_member(12, "김동현", None, Tenor, "photo-1500648767791-00dcc994a43e", 150,
            "테너는 찬양의 화려함과 호소력을 담당한다고 생각합니다."),
        seed_member(13, "이준호", None, Tenor, "photo-1504257432389-52343af06ae3", 150,
            "이곳에서는 '형제'라는 이름으로 하나가 됩니다."),
        seed_member(14, "박성우", None, Tenor, "photo-1492562080023-ab3db95bfbce", 150,
            "할아버지, 아버지에 이어 3대째 찬양대로 섬기고 있습니다."),
        seed_member(15, "최영재", None, Bass, "photo-1472099645785-5658abf4ff4e", 150,
            "건물의 기초가 튼튼해야 하듯, 베이스는 찬양의 영적, 음악적 토대를 담당합니다."),
        seed_member(16, "임현우", None, Bass, "photo-1531427186611-ecfd6d936c79", 150,
            "찬양대에서는 내 소리를 낮추고 남의 소리를 들어야 조화가 이루어짐을 배웁니다."),
        seed_member(17, "김상훈", None, Bass, "photo-1519345182560-3f2917c472ef", 150,
            "은퇴 후 제2의 인생을 찬양 봉사로 시작했습니다."),
    ]
}
