//! ボリューム定義

use serde::{Deserialize, Serialize};

/// ボリュームマウント
///
/// `ホストパスまたはボリューム名:コンテナパス` のコロン区切り文字列を
/// そのまま保持します（例: `pg_data:/var/lib/postgresql/data/`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMount {
    pub value: String,
}

impl VolumeMount {
    /// マウント元の名前（最初のコロンより前の部分）
    ///
    /// コロンを含まない値は文字列全体を名前として扱います。
    pub fn name(&self) -> &str {
        match self.value.split_once(':') {
            Some((name, _)) => name,
            None => &self.value,
        }
    }

    /// バインドマウントか（`./` または `/` で始まるもの）
    ///
    /// バインドマウントはトップレベルの named volume 宣言に含まれません。
    pub fn is_bind_mount(&self) -> bool {
        let name = self.name();
        name.starts_with("./") || name.starts_with('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount(value: &str) -> VolumeMount {
        VolumeMount {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_name_with_colon() {
        assert_eq!(mount("pg_data:/var/lib/postgresql/data/").name(), "pg_data");
        assert_eq!(mount("./local:/local").name(), "./local");
    }

    #[test]
    fn test_name_without_colon() {
        // コロンなしは文字列全体が名前
        assert_eq!(mount("orphan_volume").name(), "orphan_volume");
    }

    #[test]
    fn test_bind_mount_detection() {
        assert!(mount("./local:/local").is_bind_mount());
        assert!(mount("/etc/config:/config").is_bind_mount());
        assert!(!mount("app_data:/data").is_bind_mount());
        assert!(!mount("orphan_volume").is_bind_mount());
    }
}
