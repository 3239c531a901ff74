// Multi-language support module
// Localized launcher strings for English and Chinese
// Neighborhood and wrap labels are not translated: they are the keys of the token tables

#[derive(Clone)]
pub struct Assets {
    // Panels
    pub title_options: &'static str,
    pub title_axes_fmt: &'static str, // "Axes ({})"

    // Option labels
    pub lbl_dimensions: &'static str,
    pub lbl_mines_fmt: &'static str, // "Mines (0-{}):"
    pub lbl_slider: &'static str,
    pub lbl_neighborhood: &'static str,
    pub lbl_radius: &'static str,
    pub lbl_wrapping: &'static str,
    pub lbl_volume_fmt: &'static str, // "Cells: {}"
    pub lbl_axis_fmt: &'static str,   // "Axis {}:"

    // Buttons
    pub btn_launch: &'static str,
    pub btn_ok: &'static str,

    // Modals
    pub err_title: &'static str,
    pub launched_title: &'static str,
    pub launched_field_fmt: &'static str, // "Field: {}"
    pub launched_mines_fmt: &'static str, // "Mines: {}"
    pub launched_rule_fmt: &'static str,  // "Neighborhood: {} r={} wrap={}"
    pub launched_at_fmt: &'static str,    // "Launched at {}"

    // Status bar
    pub status_hint: &'static str,
    pub status_over_bound: &'static str,

    // Terminal size messages
    pub tsmsg_line1: &'static str,
    pub tsmsg_line2: &'static str,
    pub tsmsg_title: &'static str,
}

/// Returns English language assets
pub fn english_assets() -> Assets {
    Assets {
        title_options: "Options",
        title_axes_fmt: "Axes ({})",

        lbl_dimensions: "Dimensions:",
        lbl_mines_fmt: "Mines (0-{}):",
        lbl_slider: "Slider:",
        lbl_neighborhood: "Neighborhood:",
        lbl_radius: "Radius:",
        lbl_wrapping: "Wrapping:",
        lbl_volume_fmt: "Cells: {}",
        lbl_axis_fmt: "Axis {}:",

        btn_launch: " Launch game ",
        btn_ok: " OK ",

        err_title: "Error",
        launched_title: "Game launched",
        launched_field_fmt: "Field: {}",
        launched_mines_fmt: "Mines: {}",
        launched_rule_fmt: "Neighborhood: {} r={} wrap={}",
        launched_at_fmt: "Launched at {}",

        status_hint: " ↑↓ Tab: move  ←→ +-: change  Enter: launch  F7: 中文  Esc: exit ",
        status_over_bound: " Mine count exceeds field, adjust to clamp ",

        tsmsg_line1: "Terminal layout too small",
        tsmsg_line2: "Minimum size required: {} x {}",
        tsmsg_title: "Resize needed",
    }
}

/// Returns Chinese language assets
pub fn chinese_assets() -> Assets {
    Assets {
        title_options: "选项",
        title_axes_fmt: "维度 ({})",

        lbl_dimensions: "维数：",
        lbl_mines_fmt: "地雷 (0-{})：",
        lbl_slider: "滑块：",
        lbl_neighborhood: "邻域：",
        lbl_radius: "半径：",
        lbl_wrapping: "边界：",
        lbl_volume_fmt: "格子：{}",
        lbl_axis_fmt: "第 {} 维：",

        btn_launch: " 开始游戏 ",
        btn_ok: " 确定 ",

        err_title: "错误",
        launched_title: "游戏已启动",
        launched_field_fmt: "雷区：{}",
        launched_mines_fmt: "地雷：{}",
        launched_rule_fmt: "邻域：{} 半径={} 边界={}",
        launched_at_fmt: "启动于 {}",

        status_hint: " ↑↓ Tab：移动  ←→ +-：调整  回车：开始  F7：English  Esc：退出 ",
        status_over_bound: " 地雷数超出雷区，调整后自动修正 ",

        tsmsg_line1: "终端屏幕布局过小",
        tsmsg_line2: "最小需要尺寸：{} x {}",
        tsmsg_title: "需要调整大小",
    }
}

/// Normalize a locale or language code to a supported one ("zh-CN" → "zh")
fn normalize(lang_code: &str) -> &'static str {
    if lang_code.to_lowercase().starts_with("zh") {
        "zh"
    } else {
        "en"
    }
}

/// Current language code and its string assets
pub struct Lang {
    pub current_lang: String,
    pub assets: Assets,
}

impl Lang {
    pub fn new(lang_code: &str) -> Self {
        let code = normalize(lang_code);
        Lang {
            current_lang: code.to_string(),
            assets: if code == "zh" {
                chinese_assets()
            } else {
                english_assets()
            },
        }
    }

    /// Switch between English and Chinese, returning the new code
    pub fn toggle(&mut self) -> &str {
        let next = if self.current_lang == "zh" { "en" } else { "zh" };
        *self = Lang::new(next);
        &self.current_lang
    }

    /// Replace the single `{}` placeholder of a format asset
    pub fn fill(fmt: &str, value: impl std::fmt::Display) -> String {
        fmt.replacen("{}", &value.to_string(), 1)
    }

    /// Replace `{}` placeholders in order
    pub fn fill_all(fmt: &str, values: &[String]) -> String {
        let mut out = fmt.to_string();
        for v in values {
            out = out.replacen("{}", v, 1);
        }
        out
    }
}
