use super::fields::{
    BOARD_PROPERTIES_TO_SAVE, PROPERTIES_TO_SAVE, is_board_persisted, is_persisted, read_field,
    write_field,
};
use super::state::Settings;
use crate::error::{SettingsError, StorageError};
use crate::storage::KeyValueStore;
use chrono::{Duration, Utc};
use serde_json::{Map, Value};

/// 存储键前缀，后接应用版本号
pub const STORAGE_KEY_PREFIX: &str = "GMKC_CFG_";
/// 条目在最后一次写入后保留的天数
pub const ENTRY_TTL_DAYS: i64 = 30;

/// `load` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 当前版本没有保存过设置
    Missing,
    /// 条目无法解析，按未保存处理
    Corrupt,
    /// 已应用的设置项数
    Applied(usize),
}

/// 设置的唯一持有者：读写设置项并在需要时持久化
#[derive(Debug)]
pub struct SettingsStore<S> {
    settings: Settings,
    storage: S,
    version: String,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(settings: Settings, storage: S, version: impl Into<String>) -> Self {
        Self {
            settings,
            storage,
            version: version.into(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn into_parts(self) -> (Settings, S) {
        (self.settings, self.storage)
    }

    /// 当前版本的存储键
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_KEY_PREFIX}{}", self.version)
    }

    pub fn value(&self, key: &str) -> Result<Value, SettingsError> {
        read_field(&self.settings, key)
    }

    pub fn board_style_value(&self, key: &str) -> Result<Value, SettingsError> {
        read_field(&self.settings.board_style, key)
    }

    /// 写入设置项；白名单内的键随即保存
    pub fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.set_value_no_save(key, value)?;
        if is_persisted(key) {
            self.save()?;
        }
        Ok(())
    }

    pub fn set_value_no_save(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        write_field(&mut self.settings, key, value)?;
        tracing::debug!(key, "设置已更新");
        Ok(())
    }

    pub fn set_board_style(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.set_board_style_no_save(key, value)?;
        if is_board_persisted(key) {
            self.save()?;
        }
        Ok(())
    }

    pub fn set_board_style_no_save(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        write_field(&mut self.settings.board_style, key, value)?;
        tracing::debug!(key, "棋盘外观已更新");
        Ok(())
    }

    /// 仅包含白名单字段的扁平映射，即 `save` 写入的内容
    pub fn persisted_snapshot(&self) -> Result<Map<String, Value>, SettingsError> {
        let top = serde_json::to_value(&self.settings)?;
        let board = serde_json::to_value(&self.settings.board_style)?;

        let mut out = Map::new();
        for (doc, keys) in [(&top, PROPERTIES_TO_SAVE), (&board, BOARD_PROPERTIES_TO_SAVE)] {
            for &key in keys {
                let v = doc
                    .get(key)
                    .ok_or_else(|| SettingsError::UnknownKey(key.to_owned()))?;
                out.insert(key.to_owned(), v.clone());
            }
        }
        Ok(out)
    }

    pub fn save(&mut self) -> Result<(), SettingsError> {
        let text = serde_json::to_string(&self.persisted_snapshot()?)?;
        let key = self.storage_key();
        let expires_at = Utc::now() + Duration::days(ENTRY_TTL_DAYS);
        self.storage.write(&key, &text, expires_at)?;
        tracing::debug!(key = %key, "设置已保存");
        Ok(())
    }

    /// 从存储恢复白名单字段
    ///
    /// 条目缺失或损坏时保持当前值；单个字段无效时跳过该字段。
    pub fn load(&mut self) -> Result<LoadOutcome, SettingsError> {
        let key = self.storage_key();
        let text = match self.storage.read(&key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key = %key, "没有已保存的设置");
                return Ok(LoadOutcome::Missing);
            }
            Err(StorageError::Serde(e)) => {
                tracing::warn!(key = %key, err = %e, "存储条目损坏，使用默认设置");
                return Ok(LoadOutcome::Corrupt);
            }
            Err(e) => return Err(e.into()),
        };

        let saved: Map<String, Value> = match serde_json::from_str(&text) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(key = %key, err = %e, "已保存的设置无法解析，使用默认设置");
                return Ok(LoadOutcome::Corrupt);
            }
        };

        let mut applied = 0;
        for &field in PROPERTIES_TO_SAVE {
            let Some(v) = saved.get(field) else { continue };
            match self.set_value_no_save(field, v.clone()) {
                Ok(()) => applied += 1,
                Err(e) => tracing::warn!(field, err = %e, "忽略无效的已保存设置"),
            }
        }
        for &field in BOARD_PROPERTIES_TO_SAVE {
            let Some(v) = saved.get(field) else { continue };
            match self.set_board_style_no_save(field, v.clone()) {
                Ok(()) => applied += 1,
                Err(e) => tracing::warn!(field, err = %e, "忽略无效的已保存外观设置"),
            }
        }

        if let Err(e) = self.settings.validate() {
            tracing::warn!(err = %e, "已加载的设置违反取值约束");
        }
        tracing::info!(key = %key, applied, "设置已加载");
        Ok(LoadOutcome::Applied(applied))
    }

    /// 删除当前版本的存储条目，内存中的设置不变
    pub fn clear(&mut self) -> Result<(), SettingsError> {
        let key = self.storage_key();
        self.storage.remove(&key)?;
        tracing::info!(key = %key, "已清除保存的设置");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::state::{ClickCheck, HostCapabilities, PvEvalDisplay};
    use crate::storage::MemoryStorage;
    use serde_json::json;

    const HOST: HostCapabilities = HostCapabilities {
        shared_memory_threads: true,
        parallelism: 8,
    };

    fn store() -> SettingsStore<MemoryStorage> {
        SettingsStore::new(Settings::new(&HOST), MemoryStorage::new(), "1.0.0")
    }

    #[test]
    fn test_storage_key_uses_version() {
        assert_eq!(store().storage_key(), "GMKC_CFG_1.0.0");
    }

    #[test]
    fn test_set_value_whitelisted_saves() {
        let mut s = store();
        s.set_value("hashSize", json!(512)).unwrap();
        assert_eq!(s.settings().hash_size, 512);
        assert_eq!(s.storage().len(), 1);

        let expires_at = s.storage().expires_at("GMKC_CFG_1.0.0").unwrap();
        let ttl = expires_at - Utc::now();
        assert!(ttl > Duration::days(29) && ttl <= Duration::days(30));
    }

    #[test]
    fn test_set_value_transient_does_not_save() {
        let mut s = store();
        s.set_value("indexOrigin", json!(1)).unwrap();
        assert_eq!(s.settings().index_origin, 1);
        assert!(s.storage().is_empty());

        s.set_board_style("lineWidth", json!(0.05)).unwrap();
        assert!(s.storage().is_empty());
    }

    #[test]
    fn test_set_value_no_save_skips_storage() {
        let mut s = store();
        s.set_value_no_save("rule", json!(4)).unwrap();
        s.set_board_style_no_save("boardColor", json!("#123456")).unwrap();
        assert!(s.storage().is_empty());
        assert_eq!(s.settings().rule, 4);
        assert_eq!(s.settings().board_style.board_color, "#123456");
    }

    #[test]
    fn test_set_board_style_whitelisted_saves() {
        let mut s = store();
        s.set_board_style("winlineColor", json!("#000000")).unwrap();
        assert_eq!(s.storage().len(), 1);
    }

    #[test]
    fn test_invalid_value_is_not_saved() {
        let mut s = store();
        assert!(s.set_value("thinkTimeOption", json!(9)).is_err());
        assert!(s.storage().is_empty());
    }

    #[test]
    fn test_snapshot_contains_exactly_whitelist() {
        let s = store();
        let snap = s.persisted_snapshot().unwrap();
        assert_eq!(
            snap.len(),
            PROPERTIES_TO_SAVE.len() + BOARD_PROPERTIES_TO_SAVE.len()
        );
        assert!(!snap.contains_key("indexOrigin"));
        assert!(!snap.contains_key("boardStyle"));
        assert!(!snap.contains_key("lineWidth"));
        assert_eq!(snap["language"], Value::Null);
        assert_eq!(snap["boardColor"], "#BDBEBC");
    }

    #[test]
    fn test_load_missing_keeps_defaults() {
        let mut s = store();
        assert_eq!(s.load().unwrap(), LoadOutcome::Missing);
        assert_eq!(s.settings(), &Settings::new(&HOST));
    }

    #[test]
    fn test_load_skips_invalid_fields() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                "GMKC_CFG_1.0.0",
                r##"{"boardSize":19,"thinkTimeOption":8,"lostMoveColor":"#111111","indexOrigin":5}"##,
                Utc::now() + Duration::days(1),
            )
            .unwrap();

        let mut s = SettingsStore::new(Settings::new(&HOST), storage, "1.0.0");
        assert_eq!(s.load().unwrap(), LoadOutcome::Applied(2));
        assert_eq!(s.settings().board_size, 19);
        assert_eq!(s.settings().board_style.lost_move_color, "#111111");
        assert_eq!(s.settings().index_origin, 0);
        assert_eq!(s.settings().think_time_option, Default::default());
    }

    #[test]
    fn test_load_corrupt_text() {
        let mut storage = MemoryStorage::new();
        storage
            .write("GMKC_CFG_1.0.0", "{not-json", Utc::now() + Duration::days(1))
            .unwrap();

        let mut s = SettingsStore::new(Settings::new(&HOST), storage, "1.0.0");
        assert_eq!(s.load().unwrap(), LoadOutcome::Corrupt);
        assert_eq!(s.settings(), &Settings::new(&HOST));
    }

    #[test]
    fn test_click_check_and_pv_eval_out_of_range_rejected() {
        let mut s = store();
        for (key, value) in [("clickCheck", json!(3)), ("showPvEval", json!(5))] {
            let err = s.set_value(key, value).unwrap_err();
            assert!(matches!(err, SettingsError::InvalidValue { key: ref k, .. } if k == key));
        }
        assert_eq!(s.settings(), &Settings::new(&HOST));
        assert!(s.storage().is_empty());
    }

    #[test]
    fn test_load_skips_out_of_range_enums() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                "GMKC_CFG_1.0.0",
                r#"{"clickCheck":3,"showPvEval":5,"hashSize":128}"#,
                Utc::now() + Duration::days(1),
            )
            .unwrap();

        let mut s = SettingsStore::new(Settings::new(&HOST), storage, "1.0.0");
        assert_eq!(s.load().unwrap(), LoadOutcome::Applied(1));
        assert_eq!(s.settings().hash_size, 128);
        assert_eq!(s.settings().click_check, ClickCheck::Direct);
        assert_eq!(s.settings().show_pv_eval, PvEvalDisplay::Hidden);
    }

    #[test]
    fn test_clear_removes_entry_only() {
        let mut s = store();
        s.set_value("boardSize", json!(20)).unwrap();
        s.clear().unwrap();
        assert!(s.storage().is_empty());
        assert_eq!(s.settings().board_size, 20);
    }
}
