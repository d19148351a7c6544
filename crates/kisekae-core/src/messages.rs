//! User-facing text.
//!
//! Failures are shown with one fixed message per call site. The
//! underlying cause goes to the log, never to the screen.

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// 简体中文.
    #[default]
    SimplifiedChinese,
    /// English.
    English,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Self; 2] = [Self::SimplifiedChinese, Self::English];

    /// BCP 47 tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SimplifiedChinese => "zh-CN",
            Self::English => "en",
        }
    }

    /// Match a tag such as `en-US` or `zh` by its primary subtag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?;
        if primary.eq_ignore_ascii_case("zh") {
            Some(Self::SimplifiedChinese)
        } else if primary.eq_ignore_ascii_case("en") {
            Some(Self::English)
        } else {
            None
        }
    }

    /// Strings for this locale.
    #[must_use]
    pub const fn catalog(self) -> &'static Catalog {
        match self {
            Self::SimplifiedChinese => &ZH_CN,
            Self::English => &EN,
        }
    }
}

/// Where a generation failure happened. Each site has its own wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallSite {
    /// Composing the person with the clothes.
    TryOn,
    /// Designing a clothing item from a prompt.
    ClothingDesign,
}

/// Every string the wizard shows.
#[derive(Debug, PartialEq, Eq)]
#[allow(clippy::struct_field_names)]
pub struct Catalog {
    pub app_title: &'static str,
    pub person_step_title: &'static str,
    pub person_upload: &'static str,
    pub person_placeholder: &'static str,
    pub clothes_step_title: &'static str,
    pub clothes_upload: &'static str,
    pub clothes_placeholder: &'static str,
    pub upload_unsupported: &'static str,
    pub upload_unreadable: &'static str,
    pub upload_not_image: &'static str,
    pub person_chosen_hint: &'static str,
    pub designer_label: &'static str,
    pub prompt_placeholder: &'static str,
    pub generate: &'static str,
    pub designing: &'static str,
    pub retry: &'static str,
    pub back: &'static str,
    pub result_step_title: &'static str,
    pub result_placeholder: &'static str,
    pub trying_on: &'static str,
    pub trying_on_detail: &'static str,
    pub back_and_retry: &'static str,
    pub start_over: &'static str,
    pub change_clothes: &'static str,
    pub download: &'static str,
    pub history_title: &'static str,
    pub try_on_failed: &'static str,
    pub clothing_failed: &'static str,
}

impl Catalog {
    /// The failure message for `site`.
    #[must_use]
    pub const fn failure(&self, site: CallSite) -> &'static str {
        match site {
            CallSite::TryOn => self.try_on_failed,
            CallSite::ClothingDesign => self.clothing_failed,
        }
    }
}

static ZH_CN: Catalog = Catalog {
    app_title: "AI 换装大师",
    person_step_title: "选择或上传人物照片",
    person_upload: "上传照片",
    person_placeholder: "人物",
    clothes_step_title: "选择或生成衣物",
    clothes_upload: "上传衣物",
    clothes_placeholder: "衣物",
    upload_unsupported: "不支持的文件类型",
    upload_unreadable: "无法读取文件",
    upload_not_image: "无法识别的图片",
    person_chosen_hint: "已选定人物，请为 TA 挑选一件衣服",
    designer_label: "AI 设计师",
    prompt_placeholder: "输入提示词，例如：红色丝绸晚礼服, 赛博朋克夹克...",
    generate: "生成",
    designing: "设计中...",
    retry: "重试一下",
    back: "返回上一步",
    result_step_title: "生成效果",
    result_placeholder: "效果",
    trying_on: "正在为您试穿中...",
    trying_on_detail: "正在处理全身细节",
    back_and_retry: "返回重试",
    start_over: "开始新的换装",
    change_clothes: "更换衣物",
    download: "下载图片",
    history_title: "历史生成记录",
    try_on_failed: "生成失败。请确保 API Key 配置正确，且网络畅通。",
    clothing_failed: "抱歉，生成衣物时遇到问题。可能是网络波动或服务繁忙，请稍后再试。",
};

static EN: Catalog = Catalog {
    app_title: "AI Outfit Studio",
    person_step_title: "Choose or upload a person photo",
    person_upload: "Upload photo",
    person_placeholder: "Person",
    clothes_step_title: "Choose or design clothing",
    clothes_upload: "Upload clothing",
    clothes_placeholder: "Clothes",
    upload_unsupported: "Unsupported file type",
    upload_unreadable: "Failed to read file",
    upload_not_image: "Not a recognized image",
    person_chosen_hint: "Person selected. Now pick something for them to wear.",
    designer_label: "AI designer",
    prompt_placeholder: "Describe a garment, e.g. red silk evening gown, cyberpunk jacket...",
    generate: "Generate",
    designing: "Designing...",
    retry: "Try again",
    back: "Back",
    result_step_title: "Result",
    result_placeholder: "Result",
    trying_on: "Trying it on for you...",
    trying_on_detail: "Rendering full-body details",
    back_and_retry: "Go back and retry",
    start_over: "Start a new outfit",
    change_clothes: "Change clothes",
    download: "Download image",
    history_title: "History",
    try_on_failed: "Generation failed. Check that the API key is configured and the network is reachable.",
    clothing_failed: "Sorry, something went wrong while designing the clothing. The network or service may be busy; please try again shortly.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_wording_differs_per_site() {
        for locale in Locale::ALL {
            let catalog = locale.catalog();
            assert_ne!(
                catalog.failure(CallSite::TryOn),
                catalog.failure(CallSite::ClothingDesign),
                "{locale:?}"
            );
        }
    }

    #[test]
    fn upload_errors_are_translated() {
        let zh = Locale::SimplifiedChinese.catalog();
        let en = Locale::English.catalog();
        assert_ne!(zh.upload_unsupported, en.upload_unsupported);
        assert_ne!(zh.upload_unreadable, en.upload_unreadable);
        assert_ne!(zh.upload_not_image, en.upload_not_image);
    }

    #[test]
    fn from_tag_uses_primary_subtag() {
        assert_eq!(Locale::from_tag("en-US"), Some(Locale::English));
        assert_eq!(Locale::from_tag("ZH_cn"), Some(Locale::SimplifiedChinese));
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!(Locale::from_tag(Locale::English.tag()), Some(Locale::English));
    }
}
