//! サービス定義

use super::exposed::ExposedConfig;
use super::volume::VolumeMount;
use serde::{Deserialize, Serialize};

/// サービス定義
///
/// Deploy内の1コンテナに相当します。ネットワーク構成は
/// [`ServiceNetworking`] の閉じたバリアント集合で表現され、
/// コンパイラはこれを網羅的にマッチします。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// サービス名（1〜32文字、Deploy内で一意）
    pub name: String,
    /// Dockerイメージ（タグ込みでそのまま出力される）
    pub docker_image: String,
    /// ネットワーク構成
    #[serde(default)]
    pub networking: ServiceNetworking,
    /// 環境変数（出力順を保持）
    #[serde(default)]
    pub environment_variables: Vec<EnvVar>,
    /// ボリュームマウント（出力順を保持）
    #[serde(default)]
    pub volumes: Vec<VolumeMount>,
}

/// サービスのネットワーク構成
///
/// internal（サービス間通信）と proxy（リバースプロキシ公開）の
/// 2軸を1つのバリアント集合に畳み込んだもの。
/// depends_on は internal 軸を持つサービスのみが宣言できます。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ServiceNetworking {
    /// どのネットワークにも参加しない
    #[default]
    Isolated,
    /// internalネットワークのみ
    Internal {
        /// 同じDeploy内の別サービス名（depends_on出力にのみ使用）
        #[serde(default, skip_serializing_if = "Option::is_none")]
        depends_on: Option<String>,
    },
    /// proxyネットワークのみ（外部公開）
    Exposed { config: ExposedConfig },
    /// internalとproxyの両方
    InternalExposed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        depends_on: Option<String>,
        config: ExposedConfig,
    },
}

impl ServiceNetworking {
    /// internalネットワークに参加するか
    pub fn has_internal(&self) -> bool {
        matches!(self, Self::Internal { .. } | Self::InternalExposed { .. })
    }

    /// depends_on参照（internal軸を持つバリアントのみ）
    pub fn depends_on(&self) -> Option<&str> {
        match self {
            Self::Internal { depends_on } | Self::InternalExposed { depends_on, .. } => {
                depends_on.as_deref()
            }
            Self::Isolated | Self::Exposed { .. } => None,
        }
    }

    /// 公開設定（proxy軸を持つバリアントのみ）
    pub fn exposed_config(&self) -> Option<&ExposedConfig> {
        match self {
            Self::Exposed { config } | Self::InternalExposed { config, .. } => Some(config),
            Self::Isolated | Self::Internal { .. } => None,
        }
    }
}

/// 環境変数
///
/// 値はクォート・エスケープなしでそのまま出力されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}
