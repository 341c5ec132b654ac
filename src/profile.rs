//! User profile attributes and the personalization context block.
//!
//! The profile is session-scoped and mutated in place by the profile-editing
//! surface; the pipeline only ever reads it. Every strategy interpolates the
//! rendered context block into its system instruction, so an absent profile
//! must render to an empty string rather than an error.

use serde::{Deserialize, Serialize};

/// Selectable age brackets.
pub const AGE_GROUPS: [&str; 8] = [
    "10代", "20代", "30代", "40代", "50代", "60代", "70代", "80代以上",
];

/// All 47 prefectures, in the standard JIS ordering.
pub const PREFECTURES: [&str; 47] = [
    "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県",
    "茨城県", "栃木県", "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県",
    "新潟県", "富山県", "石川県", "福井県", "山梨県", "長野県", "岐阜県",
    "静岡県", "愛知県", "三重県", "滋賀県", "京都府", "大阪府", "兵庫県",
    "奈良県", "和歌山県", "鳥取県", "島根県", "岡山県", "広島県", "山口県",
    "徳島県", "香川県", "愛媛県", "高知県", "福岡県", "佐賀県", "長崎県",
    "熊本県", "大分県", "宮崎県", "鹿児島県", "沖縄県",
];

/// Selectable occupations.
pub const OCCUPATIONS: [&str; 9] = [
    "会社員", "公務員", "自営業", "役員", "学生", "主婦・主夫",
    "パート・アルバイト", "退職・年金受給", "その他",
];

/// Interest catalog shown in the profile editor.
pub const INTERESTS: [&str; 12] = [
    "株式投資", "投資信託", "不動産", "FX・暗号資産", "節約・貯金",
    "旅行", "グルメ", "テクノロジー", "ファッション", "健康・ヘルスケア",
    "スポーツ", "映画・音楽",
];

/// Placeholder rendered for attributes the user left unset.
const UNSET: &str = "未設定";

/// Session-scoped personalization attributes.
///
/// Empty strings mean "unset"; `interests` preserves insertion order for
/// display even though the context block only joins them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age_group: String,
    pub prefecture: String,
    pub occupation: String,
    pub interests: Vec<String>,
}

/// Render the profile into the context block injected into every strategy's
/// system instruction. `None` renders to an empty string so strategies can
/// interpolate unconditionally.
pub fn context_block(profile: Option<&UserProfile>) -> String {
    let Some(profile) = profile else {
        return String::new();
    };

    let field = |value: &str| {
        if value.is_empty() {
            UNSET.to_string()
        } else {
            value.to_string()
        }
    };
    let interests = if profile.interests.is_empty() {
        UNSET.to_string()
    } else {
        profile.interests.join(", ")
    };

    format!(
        "\n[ユーザープロファイル情報]\n\
         - 年齢: {}\n\
         - 居住地: {}\n\
         - 職業: {}\n\
         - 興味・関心: {}\n\n\
         回答はこのプロファイル情報を考慮してパーソナライズしてください。\n\
         例えば、年齢層に合わせた言葉遣いや、興味関心に基づいたトピックの選定、職業に関連するアドバイスなどを含めてください。\n",
        field(&profile.age_group),
        field(&profile.prefecture),
        field(&profile.occupation),
        interests,
    )
}
