//! 按键名读写设置项，以及持久化白名单

use crate::error::SettingsError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 需要持久化的顶层设置项；未列出的新字段默认不保存
pub const PROPERTIES_TO_SAVE: &[&str] = &[
    "language",
    "boardSize",
    "thinkTimeOption",
    "turnTime",
    "matchTime",
    "maxDepth",
    "maxNodes",
    "rule",
    "threads",
    "strength",
    "nbest",
    "configIndex",
    "candRange",
    "hashSize",
    "pondering",
    "clickCheck",
    "showCoord",
    "showAnalysis",
    "showDetail",
    "showPvEval",
    "showIndex",
    "showLastStep",
    "showWinline",
    "showForbid",
    "aiThinkBlack",
    "aiThinkWhite",
];

/// 需要持久化的棋盘外观项
pub const BOARD_PROPERTIES_TO_SAVE: &[&str] = &[
    "boardColor",
    "lastStepColor",
    "winlineColor",
    "bestMoveColor",
    "thinkingMoveColor",
    "thoughtMoveColor",
    "lostMoveColor",
];

pub fn is_persisted(key: &str) -> bool {
    PROPERTIES_TO_SAVE.contains(&key)
}

pub fn is_board_persisted(key: &str) -> bool {
    BOARD_PROPERTIES_TO_SAVE.contains(&key)
}

/// 读取 `target` 序列化后名为 `key` 的字段
pub(crate) fn read_field<T: Serialize>(target: &T, key: &str) -> Result<Value, SettingsError> {
    let doc = serde_json::to_value(target)?;
    doc.get(key)
        .cloned()
        .ok_or_else(|| SettingsError::UnknownKey(key.to_owned()))
}

/// 替换 `target` 中名为 `key` 的字段
///
/// 整体经过一次反序列化，类型不符或越界的枚举编号会被拒绝，
/// 此时 `target` 保持不变。
pub(crate) fn write_field<T>(target: &mut T, key: &str, value: Value) -> Result<(), SettingsError>
where
    T: Serialize + DeserializeOwned,
{
    let mut doc = serde_json::to_value(&*target)?;
    let slot = doc
        .as_object_mut()
        .and_then(|fields| fields.get_mut(key))
        .ok_or_else(|| SettingsError::UnknownKey(key.to_owned()))?;
    *slot = value;

    *target = serde_json::from_value(doc).map_err(|source| SettingsError::InvalidValue {
        key: key.to_owned(),
        source,
    })?;
    Ok(())
}
