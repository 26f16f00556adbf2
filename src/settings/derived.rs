//! 由设置推导出的引擎参数

use super::state::{CONFIG_PROFILES, Settings, ThinkTimeOption};
use crate::error::SettingsError;

/// 不限时
pub const UNLIMITED_TIME: i64 = -1;
/// 非自定义模式下的搜索深度上限
pub const PRESET_MAX_DEPTH: i32 = 100;

/// 归一化后的规则族
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameRule {
    Freestyle,
    Standard,
    Renju,
}

impl GameRule {
    /// 规则编号 → 规则族
    pub fn from_code(code: u8) -> Result<Self, SettingsError> {
        match code {
            0 | 5 => Ok(Self::Freestyle),
            1 => Ok(Self::Standard),
            2 | 4 => Ok(Self::Renju),
            other => Err(SettingsError::UnknownRule(other)),
        }
    }

    /// 引擎协议中的规则值
    pub fn code(self) -> u8 {
        match self {
            Self::Freestyle => 0,
            Self::Standard => 1,
            Self::Renju => 2,
        }
    }
}

impl ThinkTimeOption {
    pub fn turn_time(self, custom_ms: i64) -> i64 {
        match self {
            Self::Custom => custom_ms,
            Self::Fast => 7_000,
            Self::Slow => 40_000,
            Self::Unlimited => UNLIMITED_TIME,
        }
    }

    pub fn match_time(self, custom_ms: i64) -> i64 {
        match self {
            Self::Custom => custom_ms,
            Self::Fast => 180_000,
            Self::Slow => 900_000,
            Self::Unlimited => UNLIMITED_TIME,
        }
    }
}

impl Settings {
    /// 每步时间（毫秒），-1 表示不限
    pub fn effective_turn_time(&self) -> i64 {
        self.think_time_option.turn_time(self.turn_time)
    }

    /// 每局时间（毫秒），-1 表示不限
    pub fn effective_match_time(&self) -> i64 {
        self.think_time_option.match_time(self.match_time)
    }

    pub fn depth(&self) -> i32 {
        match self.think_time_option {
            ThinkTimeOption::Custom => self.max_depth,
            _ => PRESET_MAX_DEPTH,
        }
    }

    /// 节点上限，0 表示不限
    pub fn nodes(&self) -> u64 {
        match self.think_time_option {
            ThinkTimeOption::Custom => self.max_nodes,
            _ => 0,
        }
    }

    pub fn game_rule(&self) -> Result<GameRule, SettingsError> {
        GameRule::from_code(self.rule)
    }

    /// 当前选中的引擎配置文件名
    pub fn config_profile(&self) -> Result<&'static str, SettingsError> {
        CONFIG_PROFILES
            .get(self.config_index)
            .copied()
            .ok_or(SettingsError::ConfigIndexOutOfRange {
                index: self.config_index,
                count: CONFIG_PROFILES.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::state::HostCapabilities;

    fn settings() -> Settings {
        Settings::new(&HostCapabilities {
            shared_memory_threads: true,
            parallelism: 4,
        })
    }

    #[test]
    fn test_game_rule_families() {
        for code in [0, 5] {
            assert_eq!(GameRule::from_code(code).unwrap(), GameRule::Freestyle);
        }
        assert_eq!(GameRule::from_code(1).unwrap(), GameRule::Standard);
        for code in [2, 4] {
            assert_eq!(GameRule::from_code(code).unwrap(), GameRule::Renju);
        }
    }

    #[test]
    fn test_game_rule_unknown_code_fails() {
        let mut s = settings();
        for code in [3, 6, 255] {
            s.rule = code;
            assert!(matches!(s.game_rule(), Err(SettingsError::UnknownRule(c)) if c == code));
        }
    }

    #[test]
    fn test_time_tables() {
        let mut s = settings();
        s.turn_time = 1234;
        s.match_time = 56_789;

        let expected = [
            (ThinkTimeOption::Custom, 1234, 56_789),
            (ThinkTimeOption::Fast, 7_000, 180_000),
            (ThinkTimeOption::Slow, 40_000, 900_000),
            (ThinkTimeOption::Unlimited, -1, -1),
        ];
        for (option, turn, total) in expected {
            s.think_time_option = option;
            assert_eq!(s.effective_turn_time(), turn, "{option:?}");
            assert_eq!(s.effective_match_time(), total, "{option:?}");
        }
    }

    #[test]
    fn test_depth_and_nodes_follow_custom_mode() {
        let mut s = settings();
        s.max_depth = 20;
        s.max_nodes = 1_000_000;
        assert_eq!(s.depth(), 20);
        assert_eq!(s.nodes(), 1_000_000);

        for option in [
            ThinkTimeOption::Fast,
            ThinkTimeOption::Slow,
            ThinkTimeOption::Unlimited,
        ] {
            s.think_time_option = option;
            assert_eq!(s.depth(), PRESET_MAX_DEPTH);
            assert_eq!(s.nodes(), 0);
        }
    }

    #[test]
    fn test_config_profile() {
        let mut s = settings();
        assert_eq!(s.config_profile().unwrap(), "config-220723.toml");
        s.config_index = 0;
        assert_eq!(s.config_profile().unwrap(), "config-default.toml");
        s.config_index = 9;
        assert!(s.config_profile().is_err());
    }
}
