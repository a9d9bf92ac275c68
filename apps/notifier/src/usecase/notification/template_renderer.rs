//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メール本文を HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **カテゴリごとに 2 形式**: `{template_name}.html` と `{template_name}.txt`
//! - **取り組みリンク**: テンプレート側で `https://{{ domain }}/proyek/{{ project.slug }}/` を組み立てる
//!
//! 件名はドメイン層（[`NotificationCategory::subject`]）の責務であり、ここでは扱わない。

use tera::{Context, Tera};
use upkoding_domain::notification::{NotificationCategory, NotificationError, RecipientContext};

/// 組み込みテンプレート
const BUILTIN_TEMPLATES: [(&str, &str); 8] = [
    (
        "project_review_request.html",
        include_str!("../../../templates/notifications/project_review_request.html"),
    ),
    (
        "project_review_request.txt",
        include_str!("../../../templates/notifications/project_review_request.txt"),
    ),
    (
        "project_message.html",
        include_str!("../../../templates/notifications/project_message.html"),
    ),
    (
        "project_message.txt",
        include_str!("../../../templates/notifications/project_message.txt"),
    ),
    (
        "project_approved.html",
        include_str!("../../../templates/notifications/project_approved.html"),
    ),
    (
        "project_approved.txt",
        include_str!("../../../templates/notifications/project_approved.txt"),
    ),
    (
        "project_disapproved.html",
        include_str!("../../../templates/notifications/project_disapproved.html"),
    ),
    (
        "project_disapproved.txt",
        include_str!("../../../templates/notifications/project_disapproved.txt"),
    ),
];

/// レンダリング済みの本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub html: String,
    pub text: String,
}

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、受信者コンテキストから本文を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 組み込みテンプレートでレンダラーを作成
    pub fn new() -> Result<Self, NotificationError> {
        Self::with_templates(BUILTIN_TEMPLATES.to_vec())
    }

    /// 任意のテンプレートでレンダラーを作成
    ///
    /// テンプレート名は `{template_name}.html` / `{template_name}.txt` の形式で登録する。
    pub fn with_templates(templates: Vec<(&str, &str)>) -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(templates)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// カテゴリのテンプレートで受信者向けの本文を生成する
    pub fn render(
        &self,
        category: NotificationCategory,
        context: &RecipientContext<'_>,
    ) -> Result<RenderedBody, NotificationError> {
        let template_name = category.template_name();
        let context = Context::from_serialize(context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let html = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(RenderedBody { html, text })
    }
}
