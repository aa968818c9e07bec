//! AI companion widget backend.
//!
//! Forwards the visitor's text to a hosted language model and hands back
//! whatever it says. The model is an opaque collaborator: any failure turns
//! into a fixed apology and never into an error response.

mod feedback;
mod format;
mod gemini;

pub use feedback::*;
pub use format::*;
pub use gemini::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;

/// Instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "\
당신은 '글로리아 찬양대'의 AI 영성 도우미입니다.
사용자가 자신의 감정이나 상황을 이야기하면, 따뜻하고 정중한 어조(존댓말)로 위로와 추천을 해주세요.
**모든 답변은 반드시 한국어(Korean)로 작성해야 합니다.**

**디자인/가독성 지침**:
1. **핵심 키워드, 성경 구절의 장절(예: 시편 23:1), 찬양 곡명**은 반드시 **굵게(Bold)** 처리해주세요.
2. 각 섹션 사이에는 반드시 빈 줄을 두 번 넣어 구분감을 주세요.
3. 유튜브 링크나 영상은 제공하지 마세요.

[응답 구조]
1. **[말씀]** : 상황에 딱 맞는 성경 구절을 적어주세요. (핵심 구절과 **장절**을 굵게)

2. **[위로]** : 따뜻한 위로와 격려의 메시지를 2-3문장으로 전해주세요. (**핵심 위로 단어**를 굵게)

3. **[추천 찬양]** : 이 상황에 어울리는 찬양곡 3곡의 제목을 추천해 주세요.
   - 1. **곡명** - 추천 이유
   - 2. **곡명** - 추천 이유
   - 3. **곡명** - 추천 이유
";

/// Shown when the model answers with nothing.
pub const EMPTY_REPLY_MESSAGE: &str = "죄송합니다. 응답을 생성할 수 없습니다.";

/// Shown when the model cannot be reached or fails.
pub const FAILURE_MESSAGE: &str = "일시적인 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";

/// A hosted text-generation model.
#[async_trait]
pub trait CompanionModel: Send + Sync {
    async fn generate(&self, system_instruction: &str, user_text: &str)
        -> Result<String, AppError>;
}

/// The companion as the widget sees it.
#[derive(Clone)]
pub struct Companion {
    model: Option<Arc<dyn CompanionModel>>,
}

impl Companion {
    pub fn new(model: Option<Arc<dyn CompanionModel>>) -> Self {
        Self { model }
    }

    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }

    /// Ask the model about `input`. Always yields displayable text.
    pub async fn ask(&self, input: &str) -> String {
        let Some(model) = &self.model else {
            tracing::warn!("Companion asked but no model is configured");
            return FAILURE_MESSAGE.to_string();
        };

        match model.generate(SYSTEM_INSTRUCTION, input).await {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY_MESSAGE.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Error generating content: {}", e);
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}
