use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// 引擎配置文件，`config_index` 为其下标
pub const CONFIG_PROFILES: [&str; 3] = [
    "config-default.toml",
    "config-210901.toml",
    "config-220723.toml",
];

/// 选点范围上限（含）
pub const MAX_CAND_RANGE: u8 = 5;

/// 宿主能力：决定默认线程数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// 是否支持共享内存多线程
    pub shared_memory_threads: bool,
    /// 硬件并行度提示
    pub parallelism: usize,
}

impl HostCapabilities {
    /// 查询当前宿主
    pub fn detect() -> Self {
        let parallelism = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self {
            // wasm 未开启 atomics 时无法共享内存
            shared_memory_threads: cfg!(any(
                not(target_family = "wasm"),
                target_feature = "atomics"
            )),
            parallelism,
        }
    }

    /// 默认线程数：并行度的一半，至少为 1；不支持共享内存时固定为 1
    pub fn default_threads(&self) -> usize {
        if self.shared_memory_threads {
            (self.parallelism / 2).max(1)
        } else {
            1
        }
    }
}

/// 时间控制方式（序列化为 0..=3）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ThinkTimeOption {
    /// 使用自定义的每步/每局时间与深度、节点上限
    #[default]
    Custom,
    Fast,
    Slow,
    Unlimited,
}

impl TryFrom<u8> for ThinkTimeOption {
    type Error = SettingsError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Custom),
            1 => Ok(Self::Fast),
            2 => Ok(Self::Slow),
            3 => Ok(Self::Unlimited),
            other => Err(SettingsError::InvalidThinkTimeOption(other)),
        }
    }
}

impl From<ThinkTimeOption> for u8 {
    fn from(o: ThinkTimeOption) -> Self {
        match o {
            ThinkTimeOption::Custom => 0,
            ThinkTimeOption::Fast => 1,
            ThinkTimeOption::Slow => 2,
            ThinkTimeOption::Unlimited => 3,
        }
    }
}

/// 点击方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ClickCheck {
    /// 直接落子
    #[default]
    Direct,
    /// 二次确认
    Confirm,
    /// 滑动落子
    Slide,
}

impl TryFrom<u8> for ClickCheck {
    type Error = SettingsError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Direct),
            1 => Ok(Self::Confirm),
            2 => Ok(Self::Slide),
            other => Err(SettingsError::OutOfRange {
                field: "clickCheck",
                value: i64::from(other),
            }),
        }
    }
}

impl From<ClickCheck> for u8 {
    fn from(c: ClickCheck) -> Self {
        match c {
            ClickCheck::Direct => 0,
            ClickCheck::Confirm => 1,
            ClickCheck::Slide => 2,
        }
    }
}

/// 实时估值显示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PvEvalDisplay {
    #[default]
    Hidden,
    Eval,
    WinRate,
}

impl TryFrom<u8> for PvEvalDisplay {
    type Error = SettingsError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Hidden),
            1 => Ok(Self::Eval),
            2 => Ok(Self::WinRate),
            other => Err(SettingsError::OutOfRange {
                field: "showPvEval",
                value: i64::from(other),
            }),
        }
    }
}

impl From<PvEvalDisplay> for u8 {
    fn from(d: PvEvalDisplay) -> Self {
        match d {
            PvEvalDisplay::Hidden => 0,
            PvEvalDisplay::Eval => 1,
            PvEvalDisplay::WinRate => 2,
        }
    }
}

/// 棋盘外观，只由渲染端读取
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStyle {
    pub board_color: String,
    pub line_color: String,
    pub line_width: f64,
    pub coord_color: String,
    pub coord_font_style: String,
    pub coord_font_family: String,
    pub star_radius_scale: f64,
    pub piece_black: String,
    pub piece_white: String,
    pub piece_stroke_width: f64,
    pub piece_stroke_black: String,
    pub piece_stroke_white: String,
    pub piece_scale: f64,
    pub index_color_black: String,
    pub index_color_white: String,
    pub index_font_style: String,
    pub index_font_family: String,
    pub index_scale: f64,
    pub last_step_color: String,
    pub last_step_scale: f64,
    pub winline_width: f64,
    pub winline_color: String,
    pub best_move_color: String,
    pub thinking_move_color: String,
    pub thought_move_color: String,
    pub lost_move_color: String,
    pub best_move_scale: f64,
    pub realtime_move_scale: f64,
    pub selection_stroke_width: f64,
    pub selection_stroke_color: String,
    pub forbid_stroke_width: f64,
    pub forbid_stroke_color: String,
    /// 字重
    pub pv_eval_font_style: u32,
    pub pv_eval_font_family: String,
    pub pv_eval_scale: f64,
    pub pv_eval_alpha: f64,
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            board_color: "#BDBEBC".to_owned(),
            line_color: "#000000".to_owned(),
            line_width: 0.03,
            coord_color: "#000000".to_owned(),
            coord_font_style: String::new(),
            coord_font_family: "sans-serif".to_owned(),
            star_radius_scale: 0.1,
            piece_black: "#000000".to_owned(),
            piece_white: "#FFFFFF".to_owned(),
            piece_stroke_width: 0.021,
            piece_stroke_black: "#000000".to_owned(),
            piece_stroke_white: "#000000".to_owned(),
            piece_scale: 0.95,
            index_color_black: "#FFFFFF".to_owned(),
            index_color_white: "#000000".to_owned(),
            index_font_style: "bold".to_owned(),
            index_font_family: "sans-serif".to_owned(),
            index_scale: 0.45,
            last_step_color: "#E74C3C".to_owned(),
            last_step_scale: 0.15,
            winline_width: 0.12,
            winline_color: "#2E86C1".to_owned(),
            best_move_color: "#E74C3C".to_owned(),
            thinking_move_color: "#3FF476".to_owned(),
            thought_move_color: "#3C5EE7".to_owned(),
            lost_move_color: "#FDFEFE".to_owned(),
            best_move_scale: 0.12,
            realtime_move_scale: 0.09,
            selection_stroke_width: 0.08,
            selection_stroke_color: "#E74C3C".to_owned(),
            forbid_stroke_width: 0.12,
            forbid_stroke_color: "#E74C3C".to_owned(),
            pv_eval_font_style: 600,
            pv_eval_font_family: "sans-serif".to_owned(),
            pv_eval_scale: 0.45,
            pv_eval_alpha: 0.9,
        }
    }
}

/// 全部用户设置
///
/// 序列化后的键名即设置项名（`boardSize`、`hashSize` …），
/// [`SettingsStore`](super::SettingsStore) 按键名读写。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub language: Option<String>,
    pub board_style: BoardStyle,
    pub board_size: u32,
    pub think_time_option: ThinkTimeOption,
    /// 自定义每步时间（毫秒）
    pub turn_time: i64,
    /// 自定义每局时间（毫秒）
    pub match_time: i64,
    pub max_depth: i32,
    pub max_nodes: u64,
    /// 规则: 0-无禁手 1-无禁长连不赢 2,4-有禁手 5-无禁一手交换
    pub rule: u8,
    pub threads: usize,
    /// 棋力限制（百分比）
    pub strength: u32,
    /// MultiPV 多点分析
    pub nbest: u32,
    /// 配置序号: [0, CONFIG_PROFILES.len())
    pub config_index: usize,
    /// 选点范围: 0..=5
    pub cand_range: u8,
    /// 置换表大小（MiB）
    pub hash_size: u32,
    /// 后台思考
    pub pondering: bool,
    pub click_check: ClickCheck,
    /// 棋子序号起点
    pub index_origin: u32,
    pub show_coord: bool,
    pub show_analysis: bool,
    pub show_detail: bool,
    pub show_pv_eval: PvEvalDisplay,
    pub show_index: bool,
    pub show_last_step: bool,
    pub show_winline: bool,
    pub show_forbid: bool,
    pub ai_think_black: bool,
    pub ai_think_white: bool,
}

impl Settings {
    pub fn new(host: &HostCapabilities) -> Self {
        Self {
            language: None,
            board_style: BoardStyle::default(),
            board_size: 15,
            think_time_option: ThinkTimeOption::Custom,
            turn_time: 5000,
            match_time: 9_999_000,
            max_depth: 64,
            max_nodes: 0,
            rule: 0,
            threads: host.default_threads(),
            strength: 100,
            nbest: 1,
            config_index: CONFIG_PROFILES.len() - 1,
            cand_range: 3,
            hash_size: 256,
            pondering: false,
            click_check: ClickCheck::Direct,
            index_origin: 0,
            show_coord: true,
            show_analysis: true,
            show_detail: true,
            show_pv_eval: PvEvalDisplay::Hidden,
            show_index: true,
            show_last_step: true,
            show_winline: true,
            show_forbid: true,
            ai_think_black: false,
            ai_think_white: false,
        }
    }

    /// 检查枚举类型无法表达的取值约束
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.game_rule()?;
        if self.config_index >= CONFIG_PROFILES.len() {
            return Err(SettingsError::ConfigIndexOutOfRange {
                index: self.config_index,
                count: CONFIG_PROFILES.len(),
            });
        }
        if self.cand_range > MAX_CAND_RANGE {
            return Err(SettingsError::OutOfRange {
                field: "candRange",
                value: i64::from(self.cand_range),
            });
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(&HostCapabilities::detect())
    }
}
