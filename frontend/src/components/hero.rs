//! Hero section component

use leptos::*;

use crate::APP_NAME;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>{APP_NAME}</h1>
            <p class="subtitle">
                "登山動画をアップロードすると、シーンごとの説明文と編集提案を表示します。"
            </p>
        </div>
    }
}
