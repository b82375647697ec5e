//! 公開設定（リバースプロキシ・TLS証明書）

use serde::{Deserialize, Serialize};

/// リバースプロキシ公開設定
///
/// `rule` はTraefikのホストマッチング式（例: ``Host(`a.com`)``）で、
/// この層ではパースせずラベルへそのまま書き出します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposedConfig {
    /// ルーティングルール（8〜256文字。最短は `Host(``)`）
    pub rule: String,
    /// コンテナポート。指定時はloadbalancerサービスへ固定される
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// TLS証明書設定
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<Certificate>,
}

/// TLS証明書設定
///
/// `name` は traefik.yml 側で設定された certResolver 名を指します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// certResolver名（1〜32文字）
    pub name: String,
    /// 証明書のメインドメイン
    pub for_domain: String,
    /// SAN（サブドメイン）の一覧。空の場合はsansラベル自体を省略
    #[serde(default)]
    pub for_sub_domains: Vec<SubDomain>,
}

/// 証明書のサブドメイン
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubDomain {
    pub value: String,
}
